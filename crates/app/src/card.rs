//! Display model for one product tile.

use serde::Serialize;

use storefront_catalog::{DiscountPolicy, Price, Product, ProductId};

/// Longest description shown on a card before it is cut off.
pub const DESCRIPTION_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub description: String,
    pub list_price: Price,
    /// Present only when discounts are shown and the price actually changes.
    pub discounted_price: Option<Price>,
    /// Whole percent off; shown whenever the category qualifies, in any view.
    pub discount_percent: Option<u32>,
}

impl ProductCard {
    pub fn build(product: &Product, policy: &DiscountPolicy, show_discount: bool) -> Self {
        let discounted_price = show_discount
            .then(|| policy.discounted_price(product.price, &product.category))
            .filter(|discounted| *discounted != product.price);

        Self {
            id: product.id,
            title: product.title.clone(),
            image: product.image.clone(),
            description: truncate_description(&product.description, DESCRIPTION_LIMIT),
            list_price: product.price,
            discounted_price,
            discount_percent: policy.badge_percent(&product.category),
        }
    }

    pub fn badge_label(&self) -> Option<String> {
        self.discount_percent.map(|pct| format!("{pct}% OFF"))
    }
}

/// Cuts `text` to `max_chars` characters, trims, and appends `...`.
pub fn truncate_description(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64, category: &str) -> Product {
        Product::new(9, "Backpack", Price::new(price).unwrap(), category)
            .with_description("Fits 15 inch laptops")
            .with_image("https://img/backpack.jpg")
    }

    #[test]
    fn aggregate_view_shows_discounted_price() {
        let card = ProductCard::build(&product(100.0, "men's clothing"), &DiscountPolicy::default(), true);
        assert_eq!(card.discounted_price.map(Price::get), Some(70.0));
        assert_eq!(card.badge_label().as_deref(), Some("30% OFF"));
    }

    #[test]
    fn category_view_hides_discounted_price_but_keeps_badge() {
        let card = ProductCard::build(&product(100.0, "men's clothing"), &DiscountPolicy::default(), false);
        assert_eq!(card.discounted_price, None);
        assert_eq!(card.discount_percent, Some(30));
    }

    #[test]
    fn undiscounted_category_has_no_discount_fields() {
        let card = ProductCard::build(&product(80.0, "electronics"), &DiscountPolicy::default(), true);
        assert_eq!(card.discounted_price, None);
        assert_eq!(card.badge_label(), None);
        assert_eq!(card.description, "Fits 15 inch laptops");
        assert_eq!(card.image, "https://img/backpack.jpg");
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let long = format!("{} tail", "a".repeat(99));
        let truncated = truncate_description(&long, DESCRIPTION_LIMIT);
        assert_eq!(truncated, format!("{}...", "a".repeat(99)));

        assert_eq!(truncate_description("short", DESCRIPTION_LIMIT), "short");
        let exact = "b".repeat(DESCRIPTION_LIMIT);
        assert_eq!(truncate_description(&exact, DESCRIPTION_LIMIT), exact);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_description("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn serializes_prices_as_numbers() {
        let card = ProductCard::build(&product(22.3, "men's clothing"), &DiscountPolicy::default(), true);
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["list_price"], serde_json::json!(22.3));
        assert_eq!(json["discounted_price"], serde_json::json!(15.61));
        assert_eq!(json["id"], serde_json::json!(9));
    }
}
