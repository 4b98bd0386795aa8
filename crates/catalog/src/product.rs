//! Product value type.

use serde::{Deserialize, Serialize};

use kiosk_core::ProductId;

/// Product category.
///
/// The serde renames are the catalog service's wire strings; keep them in
/// sync with what the backend actually sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "софт-скил")]
    SoftSkill,
    #[serde(rename = "хард-скил")]
    HardSkill,
    #[serde(rename = "дополнительное")]
    Additional,
    #[serde(rename = "кнопка")]
    Button,
    #[serde(rename = "другое")]
    Other,
}

/// A catalog product.
///
/// `price` is absent for items that are not for sale; such items cannot be
/// added to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub category: Category,
    pub price: Option<u64>,
}

impl Product {
    /// Whether the product can be bought at all.
    pub fn is_purchasable(&self) -> bool {
        self.price.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_uses_the_wire_strings() {
        let json = serde_json::to_string(&Category::SoftSkill).unwrap();
        assert_eq!(json, "\"софт-скил\"");

        let parsed: Category = serde_json::from_str("\"кнопка\"").unwrap();
        assert_eq!(parsed, Category::Button);
    }

    #[test]
    fn product_without_price_is_not_purchasable() {
        let product = Product {
            id: ProductId::new("p-1"),
            title: "Backend anti-stress ball".to_string(),
            description: "Squeeze when the deploy fails".to_string(),
            image: "/p-1.png".to_string(),
            category: Category::Other,
            price: None,
        };
        assert!(!product.is_purchasable());
    }
}
