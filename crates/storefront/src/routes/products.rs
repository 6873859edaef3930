//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use estore_core::{ProductId, format_usd};
use tracing::instrument;

use crate::catalog::CatalogError;
use crate::catalog::types::Product;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product detail display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub rating: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: format_usd(product.price),
            image: product.image.clone(),
            category: product.category.clone(),
            rating: format!("{:.1} ({} reviews)", product.rating.rate, product.rating.count),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
}

/// Display product detail page.
///
/// The reference catalog answers unknown IDs with an empty body, which the
/// client reports as a parse failure; both that and an explicit 404 render
/// as "not found" here.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ProductShowTemplate> {
    let product = state
        .catalog()
        .get_product(ProductId::new(id))
        .await
        .map_err(|e| match e {
            CatalogError::NotFound(_) | CatalogError::Parse(_) => {
                AppError::NotFound(format!("product {id}"))
            }
            other => AppError::from(other),
        })?;

    Ok(ProductShowTemplate {
        product: ProductView::from(product.as_ref()),
    })
}
