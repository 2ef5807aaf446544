//! Catalog data source: where the product list and category vocabulary come from.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_catalog::{Category, Product};

#[derive(Debug, Error)]
pub enum CatalogSourceError {
    #[error("catalog request failed")]
    Transport(#[source] reqwest::Error),

    #[error("API error: {status} ({url})")]
    Status { status: u16, url: String },

    #[error("failed to decode catalog response")]
    Decode(#[source] reqwest::Error),
}

/// Read-only access to the remote catalog service.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every product, in the order the service lists them.
    async fn all_products(&self) -> Result<Vec<Product>, CatalogSourceError>;

    /// Distinct category labels, in the service's order.
    async fn categories(&self) -> Result<Vec<Category>, CatalogSourceError>;

    /// Products of one category (exact label).
    async fn products_in_category(
        &self,
        category: &Category,
    ) -> Result<Vec<Product>, CatalogSourceError>;
}

/// Everything the storefront needs from one fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub fetched_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products,
            categories,
            fetched_at: Utc::now(),
        }
    }
}

/// Fetches products and categories concurrently.
///
/// A failed product fetch is an error. A failed category fetch is logged and the
/// categories are derived from the products instead (first-seen order).
pub async fn fetch_snapshot<S>(source: &S) -> Result<CatalogSnapshot, CatalogSourceError>
where
    S: CatalogSource + ?Sized,
{
    let (products, categories) = tokio::join!(source.all_products(), source.categories());
    let products = products?;

    let categories = match categories {
        Ok(categories) => categories,
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch categories; deriving from products");
            distinct_categories(&products)
        }
    };

    tracing::info!(
        products = products.len(),
        categories = categories.len(),
        "catalog snapshot fetched"
    );
    Ok(CatalogSnapshot::new(products, categories))
}

fn distinct_categories(products: &[Product]) -> Vec<Category> {
    let mut seen: Vec<Category> = Vec::new();
    for product in products {
        if !seen.contains(&product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

/// Fake Store API compatible HTTP source.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogSourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CatalogSourceError::Transport)?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn request<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogSourceError> {
        let url = self.url(path);
        tracing::debug!(%url, "fetching catalog resource");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(CatalogSourceError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "catalog service returned an error");
            return Err(CatalogSourceError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(CatalogSourceError::Decode)
    }
}

pub(crate) fn category_path(category: &Category) -> String {
    format!("/products/category/{}", urlencoding::encode(category.as_str()))
}

#[async_trait::async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn all_products(&self) -> Result<Vec<Product>, CatalogSourceError> {
        self.request("/products").await
    }

    async fn categories(&self) -> Result<Vec<Category>, CatalogSourceError> {
        self.request("/products/categories").await
    }

    async fn products_in_category(
        &self,
        category: &Category,
    ) -> Result<Vec<Product>, CatalogSourceError> {
        self.request(&category_path(category)).await
    }
}

/// In-memory source for tests, demos and pre-fetched data.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    products: Vec<Product>,
    categories: Option<Vec<Category>>,
}

impl StaticCatalogSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            categories: None,
        }
    }

    /// Pins the category list; otherwise it is derived from the products.
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = Some(categories);
        self
    }
}

#[async_trait::async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn all_products(&self) -> Result<Vec<Product>, CatalogSourceError> {
        Ok(self.products.clone())
    }

    async fn categories(&self) -> Result<Vec<Category>, CatalogSourceError> {
        Ok(self
            .categories
            .clone()
            .unwrap_or_else(|| distinct_categories(&self.products)))
    }

    async fn products_in_category(
        &self,
        category: &Category,
    ) -> Result<Vec<Product>, CatalogSourceError> {
        Ok(self
            .products
            .iter()
            .filter(|p| &p.category == category)
            .cloned()
            .collect())
    }
}
