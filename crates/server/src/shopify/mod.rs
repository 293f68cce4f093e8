//! Shopify Storefront mirror.
//!
//! Pulls the product catalog over the Storefront GraphQL API and
//! transforms each product into a marketplace listing with a generic
//! one-block voxel model. The sync runs on demand via the HTTP route and
//! on a fixed schedule when credentials are configured.

use serde_json::{json, Value};

use shared::market::{ListingSource, MarketplaceListing};
use shared::{VoxelObject, VoxelPart};

/// Placeholder colors for mirrored products
const DEFAULT_COLORS: [&str; 8] = [
    "#e74c3c", "#3498db", "#2ecc71", "#f39c12", "#9b59b6", "#1abc9c", "#34495e", "#95a5a6",
];

const PRODUCTS_QUERY: &str = r#"
query {
  products(first: 250) {
    edges {
      node {
        id
        title
        description
        images(first: 1) { edges { node { src } } }
        variants(first: 1) { edges { node { priceV2 { amount } quantityAvailable } } }
      }
    }
  }
}
"#;

#[derive(Debug, Clone)]
pub struct ShopifyConfig {
    pub store_name: String,
    pub access_token: String,
}

impl ShopifyConfig {
    /// Read SHOPIFY_STORE_NAME / SHOPIFY_ACCESS_TOKEN; None when either
    /// is absent (the mirror is then disabled).
    pub fn from_env() -> Option<Self> {
        Some(Self {
            store_name: std::env::var("SHOPIFY_STORE_NAME").ok()?,
            access_token: std::env::var("SHOPIFY_ACCESS_TOKEN").ok()?,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShopifyError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Shopify API error: {status}")]
    Upstream { status: u16 },
    #[error("GraphQL error: {0}")]
    GraphQl(String),
}

/// Fetch the catalog and transform it into marketplace listings.
pub async fn fetch_listings(
    client: &reqwest::Client,
    config: &ShopifyConfig,
    now_millis: u64,
) -> Result<Vec<MarketplaceListing>, ShopifyError> {
    let url = format!(
        "https://{}.myshopify.com/api/2025-01/graphql.json",
        config.store_name
    );

    let response = client
        .post(&url)
        .header("X-Shopify-Storefront-Access-Token", &config.access_token)
        .json(&json!({ "query": PRODUCTS_QUERY }))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ShopifyError::Upstream {
            status: status.as_u16(),
        });
    }

    let body: Value = response.json().await?;
    if let Some(errors) = body.get("errors").and_then(|e| e.as_array()) {
        let messages: Vec<&str> = errors
            .iter()
            .filter_map(|e| e["message"].as_str())
            .collect();
        return Err(ShopifyError::GraphQl(messages.join(", ")));
    }

    Ok(transform_products(&body, &config.store_name, now_millis))
}

/// Transform a Storefront reply into listings. Products that do not fit
/// the expected shape are skipped, not fatal.
pub fn transform_products(body: &Value, store_name: &str, now_millis: u64) -> Vec<MarketplaceListing> {
    let Some(edges) = body["data"]["products"]["edges"].as_array() else {
        return Vec::new();
    };

    let mut listings = Vec::with_capacity(edges.len());
    for edge in edges {
        let product = &edge["node"];
        let Some(title) = product["title"].as_str() else {
            continue;
        };
        let product_id = product["id"].as_str().unwrap_or(title);

        let price = product["variants"]["edges"]
            .as_array()
            .and_then(|v| v.first())
            .and_then(|v| v["node"]["priceV2"]["amount"].as_str())
            .and_then(|a| a.parse::<f64>().ok())
            .unwrap_or(0.0);

        let image_url = product["images"]["edges"]
            .as_array()
            .and_then(|i| i.first())
            .and_then(|i| i["node"]["src"].as_str())
            .unwrap_or("")
            .to_string();

        let color = pick_color(product_id);
        let description = product["description"]
            .as_str()
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{title} from Shopify store"));

        listings.push(MarketplaceListing {
            id: uuid::Uuid::new_v4().to_string(),
            name: title.to_string(),
            price,
            description,
            image_url,
            color: color.to_string(),
            kind: "decor".to_string(),
            creator: store_name.to_string(),
            data: generic_voxel_object(product_id, title, color),
            created_at: now_millis,
            source: ListingSource::Shopify,
        });
    }

    listings
}

/// Deterministic palette pick keyed on the product id.
fn pick_color(product_id: &str) -> &'static str {
    let sum: usize = product_id.bytes().map(|b| b as usize).sum();
    DEFAULT_COLORS[sum % DEFAULT_COLORS.len()]
}

/// Mirrored products have no real geometry: a single unit block.
fn generic_voxel_object(product_id: &str, name: &str, color: &str) -> VoxelObject {
    VoxelObject {
        id: format!("shopify-{product_id}"),
        name: name.to_string(),
        kind: "decor".to_string(),
        position: [0.0, 0.0, 0.0],
        rotation: 0.0,
        color: color.to_string(),
        description: name.to_string(),
        parts: vec![VoxelPart {
            offset: [0.0, 0.0, 0.0],
            dimensions: [1.0, 1.0, 1.0],
            color: Some(color.to_string()),
        }],
        visible: true,
        is_user_created: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(products: Value) -> Value {
        json!({ "data": { "products": { "edges": products } } })
    }

    fn product(id: &str, title: &str, price: &str) -> Value {
        json!({
            "node": {
                "id": id,
                "title": title,
                "description": "",
                "images": { "edges": [{ "node": { "src": "https://cdn.example/img.png" } }] },
                "variants": { "edges": [{ "node": { "priceV2": { "amount": price }, "quantityAvailable": 3 } }] }
            }
        })
    }

    #[test]
    fn test_transform_basic_product() {
        let body = reply(json!([product("gid://1", "Lava Lamp", "19.99")]));
        let listings = transform_products(&body, "demo-store", 42);

        assert_eq!(listings.len(), 1);
        let l = &listings[0];
        assert_eq!(l.name, "Lava Lamp");
        assert_eq!(l.price, 19.99);
        assert_eq!(l.creator, "demo-store");
        assert_eq!(l.source, ListingSource::Shopify);
        assert_eq!(l.created_at, 42);
        assert_eq!(l.description, "Lava Lamp from Shopify store");
        assert!(!l.data.is_user_created);
        assert_eq!(l.data.parts.len(), 1);
        assert_eq!(l.data.parts[0].dimensions, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_transform_skips_malformed_products() {
        let body = reply(json!([
            product("gid://1", "Good", "1.00"),
            { "node": { "description": "no title here" } }
        ]));
        let listings = transform_products(&body, "demo-store", 0);
        assert_eq!(listings.len(), 1);
    }

    #[test]
    fn test_transform_missing_variant_prices_zero() {
        let body = reply(json!([{
            "node": { "id": "gid://2", "title": "No Price", "variants": { "edges": [] } }
        }]));
        let listings = transform_products(&body, "demo-store", 0);
        assert_eq!(listings[0].price, 0.0);
        assert!(listings[0].image_url.is_empty());
    }

    #[test]
    fn test_transform_empty_reply() {
        assert!(transform_products(&json!({}), "s", 0).is_empty());
    }

    #[test]
    fn test_color_pick_is_deterministic() {
        assert_eq!(pick_color("gid://abc"), pick_color("gid://abc"));
        assert!(DEFAULT_COLORS.contains(&pick_color("anything")));
    }
}
