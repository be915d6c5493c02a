//! Marketplace search links. These are search-URL templates, not product lookups.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLinks {
    pub amazon: String,
    pub flipkart: String,
    pub myntra: String,
    pub shoppersstop: String,
    pub blinkit: String,
    pub meesho: String,
}

impl PurchaseLinks {
    pub fn for_title(title: &str) -> Self {
        let encoded = encode_query(title);
        Self {
            amazon: format!("https://www.amazon.in/s?k={encoded}"),
            flipkart: format!("https://www.flipkart.com/search?q={encoded}"),
            myntra: format!("https://www.myntra.com/{encoded}"),
            shoppersstop: format!("https://www.shoppersstop.com/search?q={encoded}"),
            blinkit: format!("https://blinkit.com/s/?q={encoded}"),
            meesho: format!("https://www.meesho.com/search?q={encoded}"),
        }
    }
}

/// Form-urlencodes a search term (spaces become `+`).
pub fn encode_query(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
