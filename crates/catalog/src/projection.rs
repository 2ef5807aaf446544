//! Catalog projection: raw products + selection state → render-ready order.

use std::sync::LazyLock;

use crate::discount::DiscountPolicy;
use crate::filter::{FilterState, passes_category, passes_price};
use crate::product::Product;
use crate::sort::SortComparator;

static BUILTIN_POLICY: LazyLock<DiscountPolicy> = LazyLock::new(DiscountPolicy::default);

/// Applies category filter, price filter and sort, in that order.
///
/// Holds only the (immutable) discount policy, so one instance can serve any
/// number of concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct CatalogProjection {
    policy: DiscountPolicy,
}

impl CatalogProjection {
    pub fn new(policy: DiscountPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &DiscountPolicy {
        &self.policy
    }

    /// Filters and orders `products` for the given state.
    ///
    /// Borrows the input and returns references into it; identical inputs
    /// always yield the same items in the same order.
    pub fn project<'a>(&self, products: &'a [Product], state: &FilterState) -> Vec<&'a Product> {
        project_with(products, state, &self.policy)
    }
}

/// [`CatalogProjection::project`] with the built-in discount table.
pub fn project<'a>(products: &'a [Product], state: &FilterState) -> Vec<&'a Product> {
    project_with(products, state, &BUILTIN_POLICY)
}

fn project_with<'a>(
    products: &'a [Product],
    state: &FilterState,
    policy: &DiscountPolicy,
) -> Vec<&'a Product> {
    let selection = &state.selected_category;

    let mut retained: Vec<&Product> = products
        .iter()
        .filter(|p| passes_category(p, selection))
        .filter(|p| passes_price(p, &state.price_range, selection, policy))
        .collect();

    let comparator = SortComparator::new(state.sort_mode, selection, policy);
    comparator.sort(&mut retained);

    tracing::trace!(
        category = %selection,
        sort_mode = %comparator.mode(),
        low = state.price_range.low(),
        high = state.price_range.high(),
        input = products.len(),
        retained = retained.len(),
        "catalog projected"
    );

    retained
}
