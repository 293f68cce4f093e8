use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared::market::{
    AnalyticsEvent, Cart, EventKind, ListingDraft, LoginRequest, LoginResponse,
    MarketplaceListing, PurchaseRecord, Recommendation, RegisterRequest, SaveRoomRequest,
    SellerReport,
};
use shared::patch::{GenerationRequest, GenerationResponse};
use shared::RoomData;

use crate::ai::{self, AiError};
use crate::auth;
use crate::error::ApiError;
use crate::shopify;
use crate::AppState;

/// Maximum entries returned by the recommendation route
const RECOMMENDATION_LIMIT: usize = 10;

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// ── Accounts ─────────────────────────────────────────────────

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::Validation("email and password required".into()));
    }

    let hash = auth::hash_password(&request.password)?;
    let mut store = state.store.write().await;
    let user = store.register_user(request.email.trim(), hash)?;
    tracing::info!("registered user {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered", "userId": user.id })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let store = state.store.read().await;
    let user = store
        .user_by_email(request.email.trim())
        .ok_or(ApiError::Unauthorized)?;

    if !auth::verify_password(&request.password, &user.password_hash) {
        return Err(ApiError::Unauthorized);
    }

    let token = state.auth.issue_token(&user.email, &user.id)?;
    Ok(Json(LoginResponse {
        token,
        email: user.email.clone(),
        user_id: user.id.clone(),
    }))
}

// ── Marketplace ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

pub async fn list_marketplace(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<MarketplaceListing>> {
    let store = state.store.read().await;
    let search = params.search.as_deref().filter(|s| !s.is_empty());
    Json(store.listings(search))
}

pub async fn create_listing(
    State(state): State<AppState>,
    Json(draft): Json<ListingDraft>,
) -> Result<(StatusCode, Json<MarketplaceListing>), ApiError> {
    if draft.name.trim().is_empty() {
        return Err(ApiError::Validation("listing name required".into()));
    }
    if draft.creator.trim().is_empty() {
        return Err(ApiError::Validation("creator email required".into()));
    }

    let mut store = state.store.write().await;
    let listing = store.insert_listing(draft, now_millis())?;
    Ok((StatusCode::CREATED, Json(listing)))
}

/// PUT/PATCH /marketplace/{id}. The draft's `creator` field is the
/// requester's asserted email; it must match the stored creator.
pub async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<ListingDraft>,
) -> Result<Json<MarketplaceListing>, ApiError> {
    let email = draft.creator.clone();
    let mut store = state.store.write().await;
    let listing = store.update_listing(&id, &email, draft)?;
    Ok(Json(listing))
}

#[derive(Debug, Deserialize)]
pub struct DeleteListingRequest {
    pub email: String,
}

pub async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<DeleteListingRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut store = state.store.write().await;
    store.delete_listing(&id, &request.email)?;
    Ok(Json(json!({ "message": "Deleted" })))
}

// ── Rooms ────────────────────────────────────────────────────

pub async fn save_room(
    State(state): State<AppState>,
    Json(request): Json<SaveRoomRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut store = state.store.write().await;
    store.save_room(&request.user_id, request.room)?;
    Ok(Json(json!({ "message": "Room saved" })))
}

pub async fn load_room(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Option<RoomData>>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.load_room(&user_id)?))
}

// ── Carts ────────────────────────────────────────────────────

pub async fn set_cart(
    State(state): State<AppState>,
    Json(cart): Json<Cart>,
) -> Result<Json<Value>, ApiError> {
    if cart.email.trim().is_empty() {
        return Err(ApiError::Validation("cart email required".into()));
    }
    let mut store = state.store.write().await;
    store.set_cart(cart)?;
    Ok(Json(json!({ "message": "Cart saved" })))
}

pub async fn get_cart(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Json<Cart> {
    let store = state.store.read().await;
    Json(store.cart(&email))
}

// ── Analytics ────────────────────────────────────────────────

pub async fn record_event(
    State(state): State<AppState>,
    Json(mut event): Json<AnalyticsEvent>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if event.timestamp == 0 {
        event.timestamp = now_millis();
    }
    let mut store = state.store.write().await;
    store.push_event(event)?;
    Ok((StatusCode::CREATED, Json(json!({ "message": "Recorded" }))))
}

pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Vec<Recommendation>> {
    let store = state.store.read().await;
    let email = store.user_by_id(&user_id).map(|u| u.email.clone());
    let recs = crate::analytics::recommendations(
        &user_id,
        email.as_deref(),
        &store.listings(None),
        store.events(),
        RECOMMENDATION_LIMIT,
    );
    Json(recs)
}

pub async fn get_seller_analytics(
    State(state): State<AppState>,
    Path(seller_email): Path<String>,
) -> Json<SellerReport> {
    let store = state.store.read().await;
    Json(crate::analytics::seller_report(
        &seller_email,
        store.purchases(),
        store.events(),
    ))
}

pub async fn track_purchase(
    State(state): State<AppState>,
    Json(mut purchase): Json<PurchaseRecord>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if purchase.timestamp == 0 {
        purchase.timestamp = now_millis();
    }

    let mut store = state.store.write().await;
    let item_kind = store
        .listing(&purchase.item_id)
        .map(|l| l.kind.clone())
        .unwrap_or_default();

    let event = AnalyticsEvent {
        kind: EventKind::Purchase,
        item_id: purchase.item_id.clone(),
        item_kind,
        seller: purchase.seller.clone(),
        user: purchase.buyer.clone(),
        timestamp: purchase.timestamp,
    };

    store.push_purchase(purchase)?;
    store.push_event(event)?;
    Ok((StatusCode::CREATED, Json(json!({ "message": "Recorded" }))))
}

// ── Generation proxy ─────────────────────────────────────────

pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let response = ai::generate(&state.http, state.ai_api_key.as_deref(), request)
        .await
        .map_err(|e| match e {
            AiError::BadJson(_) | AiError::EmptyReply => ApiError::Validation(e.to_string()),
            other => ApiError::Upstream(other.to_string()),
        })?;
    Ok(Json(response))
}

// ── Shopify mirror ───────────────────────────────────────────

/// Shared by the HTTP route and the background schedule.
pub async fn run_shopify_sync(state: &AppState) -> Result<usize, ApiError> {
    let config = state
        .shopify
        .as_ref()
        .ok_or_else(|| ApiError::Upstream("Shopify credentials not configured".into()))?;

    let listings = shopify::fetch_listings(&state.http, config, now_millis())
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    let count = listings.len();
    let mut store = state.store.write().await;
    store.replace_shopify_listings(listings)?;
    tracing::info!("mirrored {count} Shopify products");
    Ok(count)
}

pub async fn shopify_sync(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let count = run_shopify_sync(&state).await?;
    Ok(Json(json!({ "message": "Synced", "count": count })))
}
