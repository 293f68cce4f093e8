//! JSON-file-backed store for users, listings, analytics and purchases.
//!
//! The whole store is one serde document persisted after every mutation.
//! There are no cross-collection transactions: a purchase record and the
//! room mutation it accompanies succeed or fail independently.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use shared::market::{
    AnalyticsEvent, Cart, ListingDraft, ListingSource, MarketplaceListing, PurchaseRecord,
};
use shared::RoomData;

pub type SharedStore = Arc<RwLock<Store>>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered: {0}")]
    DuplicateEmail(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Creator email mismatch on update/delete
    #[error("forbidden")]
    Forbidden,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Registered user. `saved_rooms` keeps at most one element: the last
/// saved room replaces the previous one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub saved_rooms: Vec<RoomData>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StoreData {
    #[serde(default)]
    users: Vec<UserRecord>,
    #[serde(default)]
    listings: Vec<MarketplaceListing>,
    #[serde(default)]
    events: Vec<AnalyticsEvent>,
    #[serde(default)]
    purchases: Vec<PurchaseRecord>,
    #[serde(default)]
    carts: Vec<Cart>,
}

pub struct Store {
    path: Option<PathBuf>,
    data: StoreData,
}

impl Store {
    /// In-memory store for tests.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: StoreData::default(),
        }
    }

    /// Open a store at `path`, loading existing data if the file exists.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let data = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: Some(path),
            data,
        })
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, serde_json::to_string_pretty(&self.data)?)?;
        }
        Ok(())
    }

    // ── Users ─────────────────────────────────────────────────

    pub fn register_user(
        &mut self,
        email: &str,
        password_hash: String,
    ) -> Result<UserRecord, StoreError> {
        if self.data.users.iter().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail(email.to_string()));
        }
        let user = UserRecord {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash,
            saved_rooms: Vec::new(),
        };
        self.data.users.push(user.clone());
        self.persist()?;
        Ok(user)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&UserRecord> {
        self.data.users.iter().find(|u| u.email == email)
    }

    pub fn user_by_id(&self, id: &str) -> Option<&UserRecord> {
        self.data.users.iter().find(|u| u.id == id)
    }

    /// Replace the user's saved room (one-element history).
    pub fn save_room(&mut self, user_id: &str, room: RoomData) -> Result<(), StoreError> {
        let user = self
            .data
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(StoreError::NotFound("user"))?;
        user.saved_rooms = vec![room];
        self.persist()
    }

    pub fn load_room(&self, user_id: &str) -> Result<Option<RoomData>, StoreError> {
        let user = self
            .user_by_id(user_id)
            .ok_or(StoreError::NotFound("user"))?;
        Ok(user.saved_rooms.first().cloned())
    }

    // ── Marketplace ───────────────────────────────────────────

    pub fn insert_listing(
        &mut self,
        draft: ListingDraft,
        now_millis: u64,
    ) -> Result<MarketplaceListing, StoreError> {
        let listing = MarketplaceListing {
            id: uuid::Uuid::new_v4().to_string(),
            name: draft.name,
            price: draft.price,
            description: draft.description,
            image_url: draft.image_url,
            color: draft.color,
            kind: draft.kind,
            creator: draft.creator,
            data: draft.data,
            created_at: now_millis,
            source: ListingSource::User,
        };
        self.data.listings.push(listing.clone());
        self.persist()?;
        Ok(listing)
    }

    /// Listings newest first, with optional case-insensitive name filter.
    pub fn listings(&self, search: Option<&str>) -> Vec<MarketplaceListing> {
        let needle = search.map(|s| s.to_lowercase());
        let mut out: Vec<MarketplaceListing> = self
            .data
            .listings
            .iter()
            .filter(|l| match &needle {
                Some(n) => l.name.to_lowercase().contains(n),
                None => true,
            })
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    pub fn listing(&self, id: &str) -> Option<&MarketplaceListing> {
        self.data.listings.iter().find(|l| l.id == id)
    }

    /// Update a listing; the requesting email must match the creator.
    pub fn update_listing(
        &mut self,
        id: &str,
        email: &str,
        draft: ListingDraft,
    ) -> Result<MarketplaceListing, StoreError> {
        let listing = self
            .data
            .listings
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(StoreError::NotFound("listing"))?;
        if listing.creator != email {
            return Err(StoreError::Forbidden);
        }
        listing.name = draft.name;
        listing.price = draft.price;
        listing.description = draft.description;
        listing.image_url = draft.image_url;
        listing.color = draft.color;
        listing.kind = draft.kind;
        listing.data = draft.data;
        let updated = listing.clone();
        self.persist()?;
        Ok(updated)
    }

    /// Delete a listing; the requesting email must match the creator.
    pub fn delete_listing(&mut self, id: &str, email: &str) -> Result<(), StoreError> {
        let listing = self
            .data
            .listings
            .iter()
            .find(|l| l.id == id)
            .ok_or(StoreError::NotFound("listing"))?;
        if listing.creator != email {
            return Err(StoreError::Forbidden);
        }
        self.data.listings.retain(|l| l.id != id);
        self.persist()
    }

    /// Replace all Shopify-sourced listings with a fresh mirror.
    pub fn replace_shopify_listings(
        &mut self,
        listings: Vec<MarketplaceListing>,
    ) -> Result<usize, StoreError> {
        self.data
            .listings
            .retain(|l| l.source != ListingSource::Shopify);
        let count = listings.len();
        self.data.listings.extend(listings);
        self.persist()?;
        Ok(count)
    }

    // ── Carts ─────────────────────────────────────────────────

    pub fn set_cart(&mut self, cart: Cart) -> Result<(), StoreError> {
        self.data.carts.retain(|c| c.email != cart.email);
        self.data.carts.push(cart);
        self.persist()
    }

    pub fn cart(&self, email: &str) -> Cart {
        self.data
            .carts
            .iter()
            .find(|c| c.email == email)
            .cloned()
            .unwrap_or_else(|| Cart {
                email: email.to_string(),
                items: Vec::new(),
            })
    }

    // ── Analytics / purchases (append-only) ───────────────────

    pub fn push_event(&mut self, event: AnalyticsEvent) -> Result<(), StoreError> {
        self.data.events.push(event);
        self.persist()
    }

    pub fn push_purchase(&mut self, purchase: PurchaseRecord) -> Result<(), StoreError> {
        self.data.purchases.push(purchase);
        self.persist()
    }

    pub fn events(&self) -> &[AnalyticsEvent] {
        &self.data.events
    }

    pub fn purchases(&self) -> &[PurchaseRecord] {
        &self.data.purchases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::market::EventKind;
    use shared::{VoxelObject, VoxelPart};

    fn obj(id: &str) -> VoxelObject {
        VoxelObject {
            id: id.to_string(),
            name: "Thing".to_string(),
            kind: "decor".to_string(),
            position: [0.0; 3],
            rotation: 0.0,
            color: "#fff".to_string(),
            description: String::new(),
            parts: vec![VoxelPart {
                offset: [0.0; 3],
                dimensions: [1.0; 3],
                color: None,
            }],
            visible: true,
            is_user_created: true,
        }
    }

    fn draft(name: &str, creator: &str) -> ListingDraft {
        ListingDraft {
            name: name.to_string(),
            price: 2.5,
            description: String::new(),
            image_url: String::new(),
            color: "#fff".to_string(),
            kind: "decor".to_string(),
            creator: creator.to_string(),
            data: obj("o1"),
        }
    }

    #[test]
    fn test_register_rejects_duplicate_email() {
        let mut store = Store::in_memory();
        store.register_user("a@example.com", "h".into()).unwrap();
        let err = store.register_user("a@example.com", "h".into()).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail(_)));
    }

    #[test]
    fn test_save_room_keeps_one_element() {
        let mut store = Store::in_memory();
        let user = store.register_user("a@example.com", "h".into()).unwrap();

        store.save_room(&user.id, RoomData::empty(10.0)).unwrap();
        store.save_room(&user.id, RoomData::empty(20.0)).unwrap();

        let room = store.load_room(&user.id).unwrap().unwrap();
        assert_eq!(room.width(), 20.0);
        assert_eq!(store.user_by_id(&user.id).unwrap().saved_rooms.len(), 1);
    }

    #[test]
    fn test_load_room_unknown_user() {
        let store = Store::in_memory();
        assert!(matches!(
            store.load_room("nope"),
            Err(StoreError::NotFound("user"))
        ));
    }

    #[test]
    fn test_listing_search_and_order() {
        let mut store = Store::in_memory();
        store.insert_listing(draft("Red Chair", "a@x"), 100).unwrap();
        store.insert_listing(draft("Blue Table", "a@x"), 200).unwrap();
        store.insert_listing(draft("chair mini", "a@x"), 300).unwrap();

        let all = store.listings(None);
        assert_eq!(all.len(), 3);
        // newest first
        assert_eq!(all[0].name, "chair mini");

        let chairs = store.listings(Some("CHAIR"));
        assert_eq!(chairs.len(), 2);
    }

    #[test]
    fn test_delete_requires_matching_creator() {
        let mut store = Store::in_memory();
        let listing = store.insert_listing(draft("Chair", "a@example.com"), 1).unwrap();

        let err = store
            .delete_listing(&listing.id, "intruder@example.com")
            .unwrap_err();
        assert!(matches!(err, StoreError::Forbidden));
        assert_eq!(store.listings(None).len(), 1);

        store.delete_listing(&listing.id, "a@example.com").unwrap();
        assert!(store.listings(None).is_empty());
    }

    #[test]
    fn test_update_requires_matching_creator() {
        let mut store = Store::in_memory();
        let listing = store.insert_listing(draft("Chair", "a@example.com"), 1).unwrap();

        let err = store
            .update_listing(&listing.id, "b@example.com", draft("Hacked", "b@example.com"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Forbidden));

        let updated = store
            .update_listing(&listing.id, "a@example.com", draft("Chair v2", "a@example.com"))
            .unwrap();
        assert_eq!(updated.name, "Chair v2");
        // creator is not reassignable through update
        assert_eq!(updated.creator, "a@example.com");
    }

    #[test]
    fn test_replace_shopify_listings() {
        let mut store = Store::in_memory();
        store.insert_listing(draft("User item", "a@x"), 1).unwrap();

        let mirror = |name: &str| MarketplaceListing {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            price: 9.0,
            description: String::new(),
            image_url: String::new(),
            color: "#333".to_string(),
            kind: "decor".to_string(),
            creator: "store".to_string(),
            data: obj("s"),
            created_at: 5,
            source: ListingSource::Shopify,
        };

        store.replace_shopify_listings(vec![mirror("A"), mirror("B")]).unwrap();
        assert_eq!(store.listings(None).len(), 3);

        // a later sync replaces, not appends
        store.replace_shopify_listings(vec![mirror("C")]).unwrap();
        let all = store.listings(None);
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|l| l.source == ListingSource::User));
    }

    #[test]
    fn test_cart_replace_and_fetch() {
        let mut store = Store::in_memory();
        assert!(store.cart("a@x").items.is_empty());

        store
            .set_cart(Cart {
                email: "a@x".to_string(),
                items: vec![shared::market::CartItem {
                    item_id: "l1".to_string(),
                    name: "Chair".to_string(),
                    price: 3.0,
                    quantity: 2,
                }],
            })
            .unwrap();
        assert_eq!(store.cart("a@x").items.len(), 1);

        store
            .set_cart(Cart {
                email: "a@x".to_string(),
                items: Vec::new(),
            })
            .unwrap();
        assert!(store.cart("a@x").items.is_empty());
    }

    #[test]
    fn test_events_append_only() {
        let mut store = Store::in_memory();
        for i in 0..3 {
            store
                .push_event(AnalyticsEvent {
                    kind: EventKind::View,
                    item_id: format!("l{i}"),
                    item_kind: "decor".to_string(),
                    seller: "s@x".to_string(),
                    user: "u1".to_string(),
                    timestamp: i,
                })
                .unwrap();
        }
        assert_eq!(store.events().len(), 3);
    }

    #[test]
    fn test_persistence_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let mut store = Store::open(path.clone()).unwrap();
            store.register_user("a@example.com", "hash".into()).unwrap();
            store.insert_listing(draft("Chair", "a@example.com"), 7).unwrap();
        }

        let store = Store::open(path).unwrap();
        assert!(store.user_by_email("a@example.com").is_some());
        assert_eq!(store.listings(None).len(), 1);
    }
}
