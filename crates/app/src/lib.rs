//! Storefront shell around the catalog core.
//!
//! Everything here is a collaborator of [`storefront_catalog`]: it fetches the
//! catalog, owns the shopper's selection, and turns projected products into
//! display cards. The filtering/sorting itself lives in the catalog crate.

pub mod card;
pub mod config;
pub mod session;
pub mod source;

pub use card::ProductCard;
pub use config::{ConfigError, StorefrontConfig};
pub use session::{SortOption, StorefrontSession};
pub use source::{
    CatalogSnapshot, CatalogSource, CatalogSourceError, HttpCatalogSource, StaticCatalogSource,
    fetch_snapshot,
};
