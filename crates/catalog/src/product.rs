use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ProductId, ValueObject};

/// Non-negative, finite price in the catalog's single currency unit.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    pub const ZERO: Price = Price(0.0);

    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation(format!(
                "price must be a finite number (got {value})"
            )));
        }
        if value < 0.0 {
            return Err(DomainError::validation(format!(
                "price cannot be negative (got {value})"
            )));
        }
        // Adding +0.0 folds -0.0 into 0.0 so total ordering treats them alike.
        Ok(Self(value + 0.0))
    }

    /// Wraps a value already known to satisfy the price invariant.
    pub(crate) fn from_checked(value: f64) -> Self {
        debug_assert!(value.is_finite() && value >= 0.0);
        Self(value + 0.0)
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl ValueObject for Price {}

impl TryFrom<f64> for Price {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Price::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

/// Free-text category label, exactly as the catalog service spells it.
///
/// Equality is exact and case-sensitive; only discount matching lower-cases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Category {}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog product as supplied by the catalog service.
///
/// Read-only from the storefront's point of view: nothing in this crate mutates a
/// `Product`, projections only borrow and reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    pub category: Category,
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Minimal constructor for callers that only care about pricing and grouping.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: Price,
        category: impl Into<Category>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            price,
            category: category.into(),
            image: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_rejects_negative_and_non_finite() {
        assert!(matches!(Price::new(-0.01), Err(DomainError::Validation(_))));
        assert!(matches!(Price::new(f64::NAN), Err(DomainError::Validation(_))));
        assert!(matches!(Price::new(f64::INFINITY), Err(DomainError::Validation(_))));
    }

    #[test]
    fn price_normalizes_negative_zero() {
        let price = Price::new(-0.0).unwrap();
        assert!(price.get().is_sign_positive());
        assert_eq!(price.get().total_cmp(&0.0), core::cmp::Ordering::Equal);
    }

    #[test]
    fn price_displays_with_two_decimals() {
        assert_eq!(Price::new(109.95).unwrap().to_string(), "$109.95");
        assert_eq!(Price::new(7.0).unwrap().to_string(), "$7.00");
    }

    #[test]
    fn deserializes_fake_store_payload() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price.get(), 109.95);
        assert_eq!(product.category.as_str(), "men's clothing");
        assert_eq!(Entity::id(&product), &ProductId::new(1));
    }

    #[test]
    fn deserialization_rejects_negative_price() {
        let json = r#"{"id": 2, "title": "Broken", "price": -5, "category": "electronics"}"#;
        let err = serde_json::from_str::<Product>(json).unwrap_err();
        assert!(err.to_string().contains("price cannot be negative"));
    }

    #[test]
    fn category_equality_is_case_sensitive() {
        assert_ne!(Category::from("Electronics"), Category::from("electronics"));
        assert_eq!(Category::from("jewelery"), Category::new(String::from("jewelery")));
    }
}
