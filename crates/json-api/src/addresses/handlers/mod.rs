//! Address Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mayfield_app::domain::addresses::{data::AddressFields, records::AddressRecord};

/// Address fields as submitted on create and update.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct AddressPayload {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub is_default: bool,
}

impl AddressPayload {
    fn into_parts(self) -> (AddressFields, bool) {
        (
            AddressFields {
                full_name: self.full_name,
                phone: self.phone,
                address: self.address,
                city: self.city,
                state: self.state,
                zip_code: self.zip_code,
                country: self.country,
            },
            self.is_default,
        )
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddressResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub is_default: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AddressRecord> for AddressResponse {
    fn from(address: AddressRecord) -> Self {
        AddressResponse {
            id: address.uuid.into(),
            user_id: address.user_uuid.into(),
            full_name: address.full_name,
            phone: address.phone,
            address: address.address,
            city: address.city,
            state: address.state,
            zip_code: address.zip_code,
            country: address.country,
            is_default: address.is_default,
            created_at: address.created_at.to_string(),
            updated_at: address.updated_at.to_string(),
        }
    }
}
