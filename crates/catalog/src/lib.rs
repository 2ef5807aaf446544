//! Catalog domain module.
//!
//! Pure, synchronous logic that turns a fetched product list plus the shopper's
//! filter/sort selection into the ordered list to render (no IO, no HTTP, no
//! shared mutable state).
//!
//! - [`discount`]: category keyword → discount rate policy.
//! - [`filter`]: selection state and the category/price predicates.
//! - [`sort`]: the three-way comparator for each sort mode.
//! - [`projection`]: the orchestrator that applies all of the above.

pub mod discount;
pub mod filter;
pub mod product;
pub mod projection;
pub mod sort;

pub use discount::{DiscountPolicy, DiscountRule, DiscountTable};
pub use filter::{
    ALL_CATEGORIES, CategorySelection, FilterState, PriceRange, SortMode, category_options,
    passes_category, passes_filters, passes_price,
};
pub use product::{Category, Price, Product};
pub use projection::{CatalogProjection, project};
pub use sort::SortComparator;
pub use storefront_core::ProductId;
