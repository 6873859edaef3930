//! Home page route handler.
//!
//! Renders the product grid with category pills. The selected category is a
//! query parameter projected through [`CategorySelection`]; filtering is a
//! pure read-side projection of the fetched product collection.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use estore_core::format_usd;
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::CatalogError;
use crate::catalog::types::Product;
use crate::category::CategorySelection;
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub rating: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: format_usd(product.price),
            image: product.image.clone(),
            category: product.category.clone(),
            rating: format!("{:.1} ({})", product.rating.rate, product.rating.count),
        }
    }
}

/// Category pill display data for templates.
#[derive(Clone)]
pub struct CategoryPillView {
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// Build the category pill row: "All" first, then every catalog category.
fn category_pills(categories: &[String], selection: &CategorySelection) -> Vec<CategoryPillView> {
    let mut pills = vec![CategoryPillView {
        label: "All".to_string(),
        href: "/".to_string(),
        active: *selection == CategorySelection::All,
    }];

    pills.extend(categories.iter().map(|category| CategoryPillView {
        label: category.clone(),
        href: format!("/?category={}", urlencoding::encode(category)),
        active: selection.name() == Some(category.as_str()),
    }));

    pills
}

/// Home page query parameters.
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub category: Option<String>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home/index.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
    pub pills: Vec<CategoryPillView>,
    /// True when the catalog could not be reached; products is empty then.
    pub catalog_unavailable: bool,
}

/// Fetch the product collection for the current selection.
///
/// A selected category uses the catalog's category endpoint; "all" fetches
/// the full product list.
async fn fetch_products(
    state: &AppState,
    selection: &CategorySelection,
) -> Result<Arc<Vec<Product>>, CatalogError> {
    match selection.name() {
        Some(category) => state.catalog().list_products_by_category(category).await,
        None => state.catalog().list_products().await,
    }
}

/// Display the home page product grid.
///
/// Catalog failures degrade to a generic "no data available" state; they
/// never affect the independently hydrated cart.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>, Query(query): Query<HomeQuery>) -> impl IntoResponse {
    let selection = CategorySelection::from_param(query.category);

    let (products, categories) = tokio::join!(
        fetch_products(&state, &selection),
        state.catalog().list_categories(),
    );

    let categories = match categories {
        Ok(categories) => categories.as_ref().clone(),
        Err(e) => {
            tracing::warn!("Failed to fetch categories: {e}");
            Vec::new()
        }
    };
    let pills = category_pills(&categories, &selection);

    match products {
        Ok(products) => {
            let products = selection
                .apply(&products)
                .iter()
                .map(ProductCardView::from)
                .collect();

            HomeTemplate {
                products,
                pills,
                catalog_unavailable: false,
            }
        }
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            HomeTemplate {
                products: Vec::new(),
                pills,
                catalog_unavailable: true,
            }
        }
    }
}
