//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use mayfield_app::domain::products::data::ProductAttributes;

/// Product fields accepted on create and update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductRequest {
    pub name: String,

    /// Price in pence/cents
    pub price: u64,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub details: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub weight: String,

    #[serde(default)]
    pub origin: String,

    #[serde(default)]
    pub season: String,

    #[serde(default)]
    pub nutritional: String,

    #[serde(default)]
    pub stock: u32,

    #[serde(default)]
    pub featured: bool,
}

impl From<ProductRequest> for ProductAttributes {
    fn from(request: ProductRequest) -> Self {
        ProductAttributes {
            name: request.name,
            price: request.price,
            description: request.description,
            details: request.details,
            image: request.image,
            weight: request.weight,
            origin: request.origin,
            season: request.season,
            nutritional: request.nutritional,
            stock: request.stock,
            featured: request.featured,
        }
    }
}
