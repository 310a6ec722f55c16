//! Cart Quote Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mayfield_app::domain::carts::records::{CartQuote, PricedLine};

use crate::{
    cart::{CartItemRequest, errors::into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct QuoteRequest {
    #[serde(default)]
    pub items: Vec<CartItemRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuoteLineResponse {
    pub product_id: Uuid,
    pub name: String,
    pub image: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub line_total: u64,
}

impl From<PricedLine> for QuoteLineResponse {
    fn from(line: PricedLine) -> Self {
        QuoteLineResponse {
            product_id: line.product_uuid.into(),
            name: line.name,
            image: line.image,
            unit_price: line.unit_price,
            quantity: line.quantity,
            line_total: line.line_total,
        }
    }
}

/// Server-computed totals in minor currency units.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuoteResponse {
    pub lines: Vec<QuoteLineResponse>,
    pub subtotal: u64,
    pub shipping_cost: u64,
    pub tax: u64,
    pub total: u64,
}

impl From<CartQuote> for QuoteResponse {
    fn from(quote: CartQuote) -> Self {
        QuoteResponse {
            lines: quote.lines.into_iter().map(Into::into).collect(),
            subtotal: quote.totals.subtotal,
            shipping_cost: quote.totals.shipping,
            tax: quote.totals.tax,
            total: quote.totals.total,
        }
    }
}

/// Cart Quote Handler
///
/// Prices a client-held cart against the live catalog so the storefront can
/// show the totals checkout will accept.
#[endpoint(
    tags("cart"),
    summary = "Quote Cart",
    responses(
        (status_code = StatusCode::OK, description = "Priced cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown product or invalid quantity"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<QuoteRequest>,
    depot: &mut Depot,
) -> Result<Json<QuoteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let lines = json.into_inner().items.into_iter().map(Into::into).collect();

    let quote = state
        .app
        .carts
        .quote(lines)
        .await
        .map_err(into_status_error)?;

    Ok(Json(quote.into()))
}
