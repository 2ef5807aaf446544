//! Shopper session: owns the selection state and recomputes the projection.

use chrono::{DateTime, Utc};
use serde::Serialize;

use storefront_catalog::{
    CatalogProjection, Category, CategorySelection, FilterState, PriceRange, Product, SortMode,
    category_options,
};

use crate::card::ProductCard;
use crate::source::CatalogSnapshot;

/// Shown when discount sorting is selected outside the aggregate view.
pub const DISCOUNT_SORT_REQUIRES_ALL_CATEGORIES: &str =
    "Discount sorting requires \"All categories\" to be selected";

/// Tooltip for the disabled discount option.
pub const DISCOUNT_SORT_UNAVAILABLE: &str =
    "Discount sorting is only available when 'All categories' is selected";

/// One entry of the sort picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOption {
    pub mode: SortMode,
    pub label: &'static str,
    pub enabled: bool,
    pub hint: Option<&'static str>,
}

/// UI state holder. The sole owner and mutator of [`FilterState`].
///
/// Every read of the visible list re-runs the projection; there is no cached
/// result to invalidate.
#[derive(Debug, Clone, Default)]
pub struct StorefrontSession {
    projection: CatalogProjection,
    products: Vec<Product>,
    categories: Vec<Category>,
    state: FilterState,
    initial_range: PriceRange,
    loaded_at: Option<DateTime<Utc>>,
}

impl StorefrontSession {
    pub fn new(projection: CatalogProjection) -> Self {
        Self {
            projection,
            ..Self::default()
        }
    }

    /// Installs a freshly fetched catalog and resets the price window to its span.
    ///
    /// Category and sort selections survive a reload.
    pub fn load(&mut self, snapshot: CatalogSnapshot) {
        self.initial_range = PriceRange::spanning(&snapshot.products);
        self.state.price_range = self.initial_range;
        self.products = snapshot.products;
        self.categories = snapshot.categories;
        self.loaded_at = Some(snapshot.fetched_at);

        tracing::debug!(
            products = self.products.len(),
            low = self.initial_range.low(),
            high = self.initial_range.high(),
            "catalog loaded into session"
        );
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded_at.is_some()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.state
    }

    pub fn category_options(&self) -> Vec<CategorySelection> {
        category_options(&self.categories)
    }

    pub fn select_category(&mut self, selection: CategorySelection) {
        tracing::debug!(category = %selection, "category selected");
        self.state.selected_category = selection;
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        tracing::debug!(sort_mode = %mode, "sort mode selected");
        self.state.sort_mode = mode;
    }

    /// Replaces the price window as given, inverted or not.
    pub fn set_price_range(&mut self, range: PriceRange) {
        if range.is_inverted() {
            tracing::warn!(
                low = range.low(),
                high = range.high(),
                "inverted price range; no product will match"
            );
        }
        self.state.price_range = range;
    }

    /// Low slider handle; ignored if it would pass the high handle.
    pub fn move_low(&mut self, low: f64) {
        self.state.price_range = self.state.price_range.with_low(low);
    }

    /// High slider handle; ignored if it would pass the low handle.
    pub fn move_high(&mut self, high: f64) {
        self.state.price_range = self.state.price_range.with_high(high);
    }

    pub fn clear_price_filter(&mut self) {
        self.state.price_range = self.initial_range;
    }

    pub fn has_active_price_filter(&self) -> bool {
        self.state.price_range != self.initial_range
    }

    /// Slider track bounds: the span of raw prices in the loaded catalog.
    pub fn slider_bounds(&self) -> PriceRange {
        PriceRange::spanning(&self.products)
    }

    /// Discounted prices are only displayed in the aggregate view.
    pub fn shows_discount(&self) -> bool {
        self.state.is_aggregate_view()
    }

    pub fn sort_options(&self) -> Vec<SortOption> {
        SortMode::ALL
            .into_iter()
            .map(|mode| {
                let enabled = mode.is_applicable(&self.state.selected_category);
                SortOption {
                    mode,
                    label: mode.label(),
                    enabled,
                    hint: (!enabled).then_some(DISCOUNT_SORT_UNAVAILABLE),
                }
            })
            .collect()
    }

    pub fn discount_sort_notice(&self) -> Option<&'static str> {
        let mode = self.state.sort_mode;
        (!mode.is_applicable(&self.state.selected_category))
            .then_some(DISCOUNT_SORT_REQUIRES_ALL_CATEGORIES)
    }

    pub fn visible_products(&self) -> Vec<&Product> {
        self.projection.project(&self.products, &self.state)
    }

    pub fn cards(&self) -> Vec<ProductCard> {
        let show_discount = self.shows_discount();
        let policy = self.projection.policy();
        self.visible_products()
            .into_iter()
            .map(|product| ProductCard::build(product, policy, show_discount))
            .collect()
    }
}
