//! Marketplace browser and purchase flow.
//!
//! Buying is deliberately non-transactional: the object is placed into
//! the room locally no matter what, and the purchase/analytics records
//! are fire-and-forget posts that may fail without undoing the place.

use std::sync::mpsc::{channel, Receiver};

use shared::market::{
    AnalyticsEvent, EventKind, ListingDraft, MarketplaceListing, PurchaseRecord,
};
use shared::VoxelObject;

use crate::helpers;
use crate::remote::RemoteClient;

use super::session::SessionState;

/// Form for publishing the selected object
#[derive(Default)]
pub struct ListingForm {
    pub name: String,
    pub price: String,
    pub description: String,
    pub kind: String,
}

#[derive(Default)]
pub struct MarketplaceState {
    pub items: Vec<MarketplaceListing>,
    pub search: String,
    /// Search string the current item list corresponds to
    last_fetched_search: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub form: ListingForm,
    pub show_listing_dialog: bool,
    rx_items: Option<Receiver<Result<Vec<MarketplaceListing>, String>>>,
    rx_publish: Option<Receiver<Result<MarketplaceListing, String>>>,
    rx_delete: Option<Receiver<Result<serde_json::Value, String>>>,
}

impl MarketplaceState {
    /// Fetch listings for the current search string
    pub fn refresh(&mut self, remote: &RemoteClient) {
        let (tx, rx) = channel();
        let path = if self.search.trim().is_empty() {
            "/marketplace".to_string()
        } else {
            format!("/marketplace?search={}", self.search.trim())
        };
        remote.get(&path, tx);
        self.rx_items = Some(rx);
        self.is_loading = true;
        self.last_fetched_search = Some(self.search.trim().to_string());
    }

    /// Refresh when the search text changed since the last fetch
    pub fn refresh_if_stale(&mut self, remote: &RemoteClient) {
        let current = self.search.trim();
        if self.is_loading {
            return;
        }
        if self.last_fetched_search.as_deref() != Some(current) {
            self.refresh(remote);
        }
    }

    /// Publish the selected object with the filled form
    pub fn publish(&mut self, remote: &RemoteClient, object: &VoxelObject, creator: &str) {
        let price = self.form.price.trim().parse::<f64>().unwrap_or(0.0);
        let draft = ListingDraft {
            name: if self.form.name.trim().is_empty() {
                object.name.clone()
            } else {
                self.form.name.trim().to_string()
            },
            price,
            description: self.form.description.clone(),
            image_url: String::new(),
            color: object.color.clone(),
            kind: if self.form.kind.is_empty() {
                object.kind.clone()
            } else {
                self.form.kind.clone()
            },
            creator: creator.to_string(),
            data: object.clone(),
        };

        let (tx, rx) = channel();
        remote.post("/marketplace", draft, tx);
        self.rx_publish = Some(rx);
    }

    /// Delete an own listing (server enforces the creator match)
    pub fn delete(&mut self, remote: &RemoteClient, listing_id: &str, email: &str) {
        let (tx, rx) = channel();
        remote.delete(
            &format!("/marketplace/{listing_id}"),
            serde_json::json!({ "email": email }),
            tx,
        );
        self.rx_delete = Some(rx);
    }

    /// Record a view event for a listing (fire-and-forget)
    pub fn record_view(&self, remote: &RemoteClient, item: &MarketplaceListing, session: &SessionState) {
        self.record_event(remote, EventKind::View, item, session);
    }

    /// Buy an item: post the purchase record and an add-to-room event.
    /// The caller places the object locally regardless of either call.
    pub fn purchase(&self, remote: &RemoteClient, item: &MarketplaceListing, session: &SessionState) {
        if let Some(user) = session.user() {
            remote.post_fire_and_forget(
                "/track-purchase",
                PurchaseRecord {
                    item_id: item.id.clone(),
                    item_name: item.name.clone(),
                    buyer: user.email.clone(),
                    seller: item.creator.clone(),
                    amount: item.price,
                    timestamp: helpers::now_millis(),
                },
            );
        }
        self.record_event(remote, EventKind::AddToRoom, item, session);
    }

    fn record_event(
        &self,
        remote: &RemoteClient,
        kind: EventKind,
        item: &MarketplaceListing,
        session: &SessionState,
    ) {
        remote.post_fire_and_forget(
            "/analytics",
            AnalyticsEvent {
                kind,
                item_id: item.id.clone(),
                item_kind: item.kind.clone(),
                seller: item.creator.clone(),
                user: session
                    .user()
                    .map(|u| u.user_id.clone())
                    .unwrap_or_default(),
                timestamp: helpers::now_millis(),
            },
        );
    }

    /// Drain finished calls; refetches after publish/delete
    pub fn poll(&mut self, remote: &RemoteClient) {
        if let Some(result) = self.rx_items.as_ref().and_then(|rx| rx.try_recv().ok()) {
            self.rx_items = None;
            self.is_loading = false;
            match result {
                Ok(items) => {
                    self.items = items;
                    self.error = None;
                }
                Err(e) => self.error = Some(e),
            }
        }

        if let Some(result) = self.rx_publish.as_ref().and_then(|rx| rx.try_recv().ok()) {
            self.rx_publish = None;
            match result {
                Ok(_) => {
                    self.show_listing_dialog = false;
                    self.form = ListingForm::default();
                    self.refresh(remote);
                }
                Err(e) => self.error = Some(e),
            }
        }

        if let Some(result) = self.rx_delete.as_ref().and_then(|rx| rx.try_recv().ok()) {
            self.rx_delete = None;
            match result {
                Ok(_) => self.refresh(remote),
                Err(e) => self.error = Some(e),
            }
        }
    }
}
