//! Recommendation scoring and seller aggregates.
//!
//! Both are recomputed from the full event/purchase logs on every request.

use std::collections::HashMap;

use shared::market::{
    AnalyticsEvent, EventKind, MarketplaceListing, PurchaseRecord, Recommendation, SellerReport,
};

/// Event weights for the tally: a purchase says more than a view.
fn event_weight(kind: EventKind) -> f64 {
    match kind {
        EventKind::View => 1.0,
        EventKind::AddToRoom => 3.0,
        EventKind::Purchase => 5.0,
    }
}

/// Rank listings for a user by a weighted tally over the event log.
///
/// Score = the user's accumulated weight for the listing's category
/// plus a fraction of the item's global popularity. The user's own
/// listings are never recommended.
pub fn recommendations(
    user_id: &str,
    user_email: Option<&str>,
    listings: &[MarketplaceListing],
    events: &[AnalyticsEvent],
    limit: usize,
) -> Vec<Recommendation> {
    // Per-category affinity from this user's events
    let mut affinity: HashMap<&str, f64> = HashMap::new();
    // Global per-item popularity from everyone's events
    let mut popularity: HashMap<&str, f64> = HashMap::new();

    for ev in events {
        let w = event_weight(ev.kind);
        if ev.user == user_id && !ev.item_kind.is_empty() {
            *affinity.entry(ev.item_kind.as_str()).or_default() += w;
        }
        *popularity.entry(ev.item_id.as_str()).or_default() += w;
    }

    let mut scored: Vec<Recommendation> = listings
        .iter()
        .filter(|l| Some(l.creator.as_str()) != user_email)
        .map(|l| {
            let score = affinity.get(l.kind.as_str()).copied().unwrap_or(0.0)
                + popularity.get(l.id.as_str()).copied().unwrap_or(0.0) * 0.1;
            Recommendation {
                listing: l.clone(),
                score,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.listing.created_at.cmp(&a.listing.created_at))
    });
    scored.truncate(limit);
    scored
}

/// Per-seller aggregates: revenue and sale count from the purchase
/// ledger, view/add-to-room counts from the event log.
pub fn seller_report(
    seller_email: &str,
    purchases: &[PurchaseRecord],
    events: &[AnalyticsEvent],
) -> SellerReport {
    let mut report = SellerReport::default();

    for p in purchases.iter().filter(|p| p.seller == seller_email) {
        report.revenue += p.amount;
        report.sales += 1;
    }

    for ev in events.iter().filter(|e| e.seller == seller_email) {
        match ev.kind {
            EventKind::View => report.views += 1,
            EventKind::AddToRoom => report.adds_to_room += 1,
            EventKind::Purchase => {}
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::market::ListingSource;
    use shared::{VoxelObject, VoxelPart};

    fn listing(id: &str, kind: &str, creator: &str, created_at: u64) -> MarketplaceListing {
        MarketplaceListing {
            id: id.to_string(),
            name: id.to_string(),
            price: 1.0,
            description: String::new(),
            image_url: String::new(),
            color: "#fff".to_string(),
            kind: kind.to_string(),
            creator: creator.to_string(),
            data: VoxelObject {
                id: format!("{id}-obj"),
                name: id.to_string(),
                kind: kind.to_string(),
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
            },
            created_at,
            source: ListingSource::User,
        }
    }

    fn event(kind: EventKind, item: &str, item_kind: &str, seller: &str, user: &str) -> AnalyticsEvent {
        AnalyticsEvent {
            kind,
            item_id: item.to_string(),
            item_kind: item_kind.to_string(),
            seller: seller.to_string(),
            user: user.to_string(),
            timestamp: 0,
        }
    }

    #[test]
    fn test_affinity_ranks_matching_kind_first() {
        let listings = vec![
            listing("chair", "furniture", "s@x", 1),
            listing("lamp", "lighting", "s@x", 2),
        ];
        // u1 keeps interacting with furniture
        let events = vec![
            event(EventKind::View, "chair", "furniture", "s@x", "u1"),
            event(EventKind::AddToRoom, "chair", "furniture", "s@x", "u1"),
        ];

        let recs = recommendations("u1", None, &listings, &events, 10);
        assert_eq!(recs[0].listing.id, "chair");
        assert!(recs[0].score > recs[1].score);
    }

    #[test]
    fn test_purchase_outweighs_views() {
        let listings = vec![
            listing("a", "decor", "s@x", 1),
            listing("b", "structure", "s@x", 1),
        ];
        // u2's purchase of b (weight 5) beats u1's three views of a (3 * 1 * 0.1)
        let events = vec![
            event(EventKind::View, "a", "decor", "s@x", "u1"),
            event(EventKind::View, "a", "decor", "s@x", "u1"),
            event(EventKind::View, "a", "decor", "s@x", "u1"),
            event(EventKind::Purchase, "b", "structure", "s@x", "u2"),
        ];

        // u3 has no affinity at all: pure popularity ordering
        let recs = recommendations("u3", None, &listings, &events, 10);
        assert_eq!(recs[0].listing.id, "b");
    }

    #[test]
    fn test_own_listings_excluded() {
        let listings = vec![
            listing("mine", "decor", "me@x", 1),
            listing("other", "decor", "s@x", 1),
        ];
        let recs = recommendations("u1", Some("me@x"), &listings, &[], 10);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].listing.id, "other");
    }

    #[test]
    fn test_limit_and_tiebreak_by_recency() {
        let listings = vec![
            listing("old", "decor", "s@x", 1),
            listing("new", "decor", "s@x", 2),
            listing("newest", "decor", "s@x", 3),
        ];
        let recs = recommendations("u1", None, &listings, &[], 2);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].listing.id, "newest");
        assert_eq!(recs[1].listing.id, "new");
    }

    #[test]
    fn test_seller_report_aggregates() {
        let purchases = vec![
            PurchaseRecord {
                item_id: "a".to_string(),
                item_name: "A".to_string(),
                buyer: "b@x".to_string(),
                seller: "s@x".to_string(),
                amount: 5.0,
                timestamp: 0,
            },
            PurchaseRecord {
                item_id: "b".to_string(),
                item_name: "B".to_string(),
                buyer: "b@x".to_string(),
                seller: "s@x".to_string(),
                amount: 2.5,
                timestamp: 0,
            },
            PurchaseRecord {
                item_id: "c".to_string(),
                item_name: "C".to_string(),
                buyer: "b@x".to_string(),
                seller: "other@x".to_string(),
                amount: 99.0,
                timestamp: 0,
            },
        ];
        let events = vec![
            event(EventKind::View, "a", "decor", "s@x", "u1"),
            event(EventKind::View, "a", "decor", "s@x", "u2"),
            event(EventKind::AddToRoom, "a", "decor", "s@x", "u1"),
            event(EventKind::View, "c", "decor", "other@x", "u1"),
        ];

        let report = seller_report("s@x", &purchases, &events);
        assert_eq!(report.revenue, 7.5);
        assert_eq!(report.sales, 2);
        assert_eq!(report.views, 2);
        assert_eq!(report.adds_to_room, 1);
    }

    #[test]
    fn test_seller_report_empty() {
        let report = seller_report("nobody@x", &[], &[]);
        assert_eq!(report, SellerReport::default());
    }
}
