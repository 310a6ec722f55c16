//! Cart

mod errors;
pub(crate) mod quote;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mayfield_app::domain::carts::data::CartLine;

/// A cart line as held by the client.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemRequest {
    pub product_id: Uuid,
    pub quantity: u32,
}

impl From<CartItemRequest> for CartLine {
    fn from(item: CartItemRequest) -> Self {
        CartLine {
            product_uuid: item.product_id.into(),
            quantity: item.quantity,
        }
    }
}
