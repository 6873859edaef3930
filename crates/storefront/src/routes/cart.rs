//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutation goes through the cart service, which mirrors the result
//! into durable storage via the persistence bridge.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use estore_core::{ProductId, format_usd};
use serde::Deserialize;
use tracing::instrument;

use crate::cart::{CartSnapshot, LineItem, MAX_LINE_QUANTITY};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: String,
    /// Choices for the quantity `<select>`, 1 through the add-path ceiling.
    pub quantity_options: Vec<QuantityOptionView>,
}

/// One `<option>` in a line's quantity control.
#[derive(Clone)]
pub struct QuantityOptionView {
    pub value: u32,
    pub selected: bool,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_string(),
            item_count: 0,
        }
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        let quantity_options = (1..=MAX_LINE_QUANTITY)
            .map(|value| QuantityOptionView {
                value,
                selected: value == item.quantity,
            })
            .collect();

        Self {
            id: item.id,
            title: item.title.clone(),
            quantity: item.quantity,
            price: format_usd(item.price),
            line_price: format_usd(item.line_total()),
            image: item.image.clone(),
            quantity_options,
        }
    }
}

impl From<&CartSnapshot> for CartView {
    fn from(snapshot: &CartSnapshot) -> Self {
        Self {
            items: snapshot.items.iter().map(CartItemView::from).collect(),
            subtotal: format_usd(snapshot.total),
            item_count: snapshot.total_items,
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i32,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let cart = CartView::from(&state.cart().snapshot());
    CartShowTemplate { cart }
}

/// Add item to cart (HTMX).
///
/// Looks the product up in the catalog and adds a snapshot of it to the
/// cart. Returns an HTMX trigger to update the cart count badge.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Response {
    let product_id = ProductId::new(form.product_id);

    match state.catalog().get_product(product_id).await {
        Ok(product) => {
            let snapshot = state.cart().add_item(&product);

            // Return cart count with HTMX trigger to update other elements
            (
                AppendHeaders([("HX-Trigger", "cart-updated")]),
                CartCountTemplate {
                    count: snapshot.total_items,
                },
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(%product_id, "Failed to add item to cart: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<span class=\"text-red-500\">Error adding to cart</span>"),
            )
                .into_response()
        }
    }
}

/// Update cart item quantity (HTMX).
///
/// A quantity of zero or less removes the line. Unknown product IDs are a
/// no-op; the fragment simply re-renders the current cart.
#[instrument(skip(state))]
pub async fn update(State(state): State<AppState>, Form(form): Form<UpdateCartForm>) -> Response {
    let snapshot = state
        .cart()
        .set_quantity(ProductId::new(form.product_id), form.quantity);

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&snapshot),
        },
    )
        .into_response()
}

/// Remove item from cart (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let snapshot = state.cart().remove_item(ProductId::new(form.product_id));

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&snapshot),
        },
    )
        .into_response()
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    CartCountTemplate {
        count: state.cart().snapshot().total_items,
    }
}
