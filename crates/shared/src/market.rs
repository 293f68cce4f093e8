//! Типы маркетплейса, аналитики и аккаунтов (общие для клиента и сервера)

use serde::{Deserialize, Serialize};

use crate::{RoomData, VoxelObject};

/// Откуда пришёл товар в маркетплейс
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingSource {
    /// Опубликован пользователем
    User,
    /// Зеркало из каталога Shopify
    Shopify,
}

/// Товар маркетплейса — воксельный объект с ценой и описанием
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceListing {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    /// Картинка превью (data-URL); пустая строка, если нет
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Email продавца; используется для проверок владения
    pub creator: String,
    /// Полные данные объекта для размещения в комнате
    pub data: VoxelObject,
    /// Unix-время создания (миллисекунды)
    #[serde(rename = "createdAt", default)]
    pub created_at: u64,
    #[serde(default = "default_source")]
    pub source: ListingSource,
}

fn default_source() -> ListingSource {
    ListingSource::User
}

/// Запрос на создание/обновление товара
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingDraft {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub creator: String,
    pub data: VoxelObject,
}

/// Вид события аналитики
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    View,
    AddToRoom,
    Purchase,
}

/// Событие аналитики (журнал только дописывается)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    #[serde(rename = "event")]
    pub kind: EventKind,
    #[serde(rename = "itemId")]
    pub item_id: String,
    /// Категория товара на момент события
    #[serde(rename = "itemType", default)]
    pub item_kind: String,
    /// Email продавца товара
    #[serde(default)]
    pub seller: String,
    /// Идентификатор пользователя, совершившего действие
    #[serde(rename = "userId", default)]
    pub user: String,
    #[serde(default)]
    pub timestamp: u64,
}

/// Запись о покупке
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    #[serde(rename = "itemId")]
    pub item_id: String,
    #[serde(rename = "itemName", default)]
    pub item_name: String,
    pub buyer: String,
    pub seller: String,
    pub amount: f64,
    #[serde(default)]
    pub timestamp: u64,
}

/// Сводка продавца, считается на лету из журнала событий и покупок
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SellerReport {
    pub revenue: f64,
    pub sales: u64,
    pub views: u64,
    #[serde(rename = "addsToRoom")]
    pub adds_to_room: u64,
}

/// Рекомендация: товар и его итоговый балл
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub listing: MarketplaceListing,
    pub score: f64,
}

/// Элемент корзины пользователя
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "itemId")]
    pub item_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

/// Корзина, привязанная к email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Cart {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

// ── Аккаунты ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Ответ на логин: подписанный токен сессии + идентификаторы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Сохранение комнаты: сервер хранит ровно одну последнюю
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRoomRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "roomData")]
    pub room: RoomData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VoxelPart;

    fn roundtrip<T: serde::Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
        val: &T,
    ) {
        let json = serde_json::to_string(val).expect("serialize");
        let back: T = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(*val, back);
    }

    fn listing(id: &str, creator: &str) -> MarketplaceListing {
        MarketplaceListing {
            id: id.to_string(),
            name: "Cyber Chair".to_string(),
            price: 5.0,
            description: "A chair".to_string(),
            image_url: String::new(),
            color: "#3498db".to_string(),
            kind: "furniture".to_string(),
            creator: creator.to_string(),
            data: VoxelObject {
                id: "obj".to_string(),
                name: "Cyber Chair".to_string(),
                kind: "furniture".to_string(),
                position: [0.0, 0.0, 0.0],
                rotation: 0.0,
                color: "#3498db".to_string(),
                description: String::new(),
                parts: vec![VoxelPart {
                    offset: [0.0, 0.0, 0.0],
                    dimensions: [1.0, 1.0, 1.0],
                    color: None,
                }],
                visible: true,
                is_user_created: true,
            },
            created_at: 1_700_000_000_000,
            source: ListingSource::User,
        }
    }

    #[test]
    fn test_listing_serde() {
        roundtrip(&listing("l1", "a@example.com"));
    }

    #[test]
    fn test_listing_wire_names() {
        let json = serde_json::to_string(&listing("l1", "a@example.com")).unwrap();
        assert!(json.contains(r#""type":"furniture""#));
        assert!(json.contains(r#""imageUrl""#));
        assert!(json.contains(r#""createdAt""#));
        assert!(json.contains(r#""source":"user""#));
    }

    #[test]
    fn test_listing_source_defaults_to_user() {
        let mut json = serde_json::to_value(listing("l1", "a@example.com")).unwrap();
        json.as_object_mut().unwrap().remove("source");
        let back: MarketplaceListing = serde_json::from_value(json).unwrap();
        assert_eq!(back.source, ListingSource::User);
    }

    #[test]
    fn test_event_kind_serde() {
        assert_eq!(
            serde_json::to_string(&EventKind::AddToRoom).unwrap(),
            r#""add_to_room""#
        );
        for kind in [EventKind::View, EventKind::AddToRoom, EventKind::Purchase] {
            roundtrip(&kind);
        }
    }

    #[test]
    fn test_analytics_event_serde() {
        let ev = AnalyticsEvent {
            kind: EventKind::View,
            item_id: "l1".to_string(),
            item_kind: "decor".to_string(),
            seller: "s@example.com".to_string(),
            user: "u1".to_string(),
            timestamp: 42,
        };
        roundtrip(&ev);
        let json = serde_json::to_string(&ev).unwrap();
        assert!(json.contains(r#""event":"view""#));
        assert!(json.contains(r#""itemId""#));
    }

    #[test]
    fn test_cart_item_quantity_default() {
        let json = r#"{"itemId":"l1","name":"Chair","price":3.5}"#;
        let item: CartItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_login_response_wire_names() {
        let resp = LoginResponse {
            token: "t".to_string(),
            email: "a@example.com".to_string(),
            user_id: "u1".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""userId":"u1""#));
        roundtrip(&resp);
    }
}
