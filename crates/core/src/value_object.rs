//! Value object trait: equality by value, not identity.
//!
//! Prices, price ranges, categories and discount rules are value objects: two
//! instances with the same attributes are interchangeable.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one (e.g. `PriceRange::with_low`).
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Price(f64);
///
/// impl ValueObject for Price {}
///
/// assert_eq!(Price(9.99), Price(9.99));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
