//! Shopper selection state and the category/price predicates.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, ValueObject};

use crate::discount::DiscountPolicy;
use crate::product::{Category, Product};

/// Label of the aggregate (all-categories) view.
pub const ALL_CATEGORIES: &str = "All categories";

/// Which slice of the catalog is being viewed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategorySelection {
    /// Aggregate view: every category, discount-adjusted prices.
    #[default]
    All,
    /// A single category, matched exactly against `Product::category`.
    Only(Category),
}

impl CategorySelection {
    pub fn only(category: impl Into<Category>) -> Self {
        Self::Only(category.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategorySelection::All)
    }

    pub fn label(&self) -> &str {
        match self {
            CategorySelection::All => ALL_CATEGORIES,
            CategorySelection::Only(category) => category.as_str(),
        }
    }
}

impl ValueObject for CategorySelection {}

impl From<String> for CategorySelection {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            CategorySelection::All
        } else {
            CategorySelection::Only(Category::from(value))
        }
    }
}

impl From<&str> for CategorySelection {
    fn from(value: &str) -> Self {
        CategorySelection::from(value.to_string())
    }
}

impl From<CategorySelection> for String {
    fn from(value: CategorySelection) -> Self {
        value.label().to_string()
    }
}

impl core::fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Selectable category entries: the aggregate view first, then the catalog's
/// categories in the order the catalog service listed them.
pub fn category_options(categories: &[Category]) -> Vec<CategorySelection> {
    core::iter::once(CategorySelection::All)
        .chain(categories.iter().cloned().map(CategorySelection::Only))
        .collect()
}

/// Inclusive price window `[low, high]`.
///
/// An inverted window (`low > high`) is kept as given and simply admits no
/// price; it is not corrected or reported.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    low: f64,
    high: f64,
}

impl PriceRange {
    /// Window used before any product has been loaded.
    pub const EMPTY_CATALOG: PriceRange = PriceRange {
        low: 0.0,
        high: 1000.0,
    };

    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// `[min(price), max(price)]` over raw prices, or [`Self::EMPTY_CATALOG`].
    pub fn spanning(products: &[Product]) -> Self {
        let mut prices = products.iter().map(|p| p.price.get());
        let Some(first) = prices.next() else {
            return Self::EMPTY_CATALOG;
        };
        let (low, high) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Self { low, high }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn is_inverted(&self) -> bool {
        self.low > self.high
    }

    pub fn contains(&self, price: f64) -> bool {
        self.low <= price && price <= self.high
    }

    /// Moves the low handle; ignored when it would pass the high handle.
    pub fn with_low(self, low: f64) -> Self {
        if low <= self.high { Self { low, ..self } } else { self }
    }

    /// Moves the high handle; ignored when it would pass the low handle.
    pub fn with_high(self, high: f64) -> Self {
        if high >= self.low { Self { high, ..self } } else { self }
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::EMPTY_CATALOG
    }
}

impl ValueObject for PriceRange {}

/// Closed set of orderings the storefront offers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortMode {
    #[default]
    #[serde(rename = "PRICE_ASC")]
    PriceAscending,
    #[serde(rename = "PRICE_DESC")]
    PriceDescending,
    /// Highest discount amount first; only meaningful in the aggregate view.
    #[serde(rename = "DISCOUNT")]
    Discount,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [
        SortMode::PriceAscending,
        SortMode::PriceDescending,
        SortMode::Discount,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::PriceAscending => "PRICE_ASC",
            SortMode::PriceDescending => "PRICE_DESC",
            SortMode::Discount => "DISCOUNT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::PriceAscending => "Price: Low → High",
            SortMode::PriceDescending => "Price: High → Low",
            SortMode::Discount => "Discount",
        }
    }

    /// Whether this mode actually reorders anything for the given view.
    pub fn is_applicable(self, selection: &CategorySelection) -> bool {
        match self {
            SortMode::PriceAscending | SortMode::PriceDescending => true,
            SortMode::Discount => selection.is_all(),
        }
    }
}

impl FromStr for SortMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unknown sort mode '{s}' (expected PRICE_ASC, PRICE_DESC or DISCOUNT)"
                ))
            })
    }
}

impl core::fmt::Display for SortMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the shopper has selected. Owned by the UI layer, passed by
/// reference into the projection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub selected_category: CategorySelection,
    pub price_range: PriceRange,
    pub sort_mode: SortMode,
}

impl FilterState {
    /// Defaults for a freshly loaded catalog: aggregate view, the full observed
    /// price span, cheapest first.
    pub fn for_catalog(products: &[Product]) -> Self {
        Self {
            selected_category: CategorySelection::All,
            price_range: PriceRange::spanning(products),
            sort_mode: SortMode::PriceAscending,
        }
    }

    pub fn is_aggregate_view(&self) -> bool {
        self.selected_category.is_all()
    }
}

pub fn passes_category(product: &Product, selection: &CategorySelection) -> bool {
    match selection {
        CategorySelection::All => true,
        CategorySelection::Only(category) => &product.category == category,
    }
}

/// Tests the discounted price in the aggregate view (the price shown there) and
/// the list price otherwise.
pub fn passes_price(
    product: &Product,
    range: &PriceRange,
    selection: &CategorySelection,
    policy: &DiscountPolicy,
) -> bool {
    let tested = if selection.is_all() {
        policy.discounted_price(product.price, &product.category)
    } else {
        product.price
    };
    range.contains(tested.get())
}

pub fn passes_filters(product: &Product, state: &FilterState, policy: &DiscountPolicy) -> bool {
    passes_category(product, &state.selected_category)
        && passes_price(product, &state.price_range, &state.selected_category, policy)
}
