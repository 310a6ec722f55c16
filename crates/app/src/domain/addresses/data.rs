//! Address Data

use crate::domain::{addresses::records::AddressUuid, users::records::UserUuid};

/// Postal fields of an address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressFields {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl AddressFields {
    /// Whether every field carries a non-blank value.
    pub fn is_complete(&self) -> bool {
        [
            &self.full_name,
            &self.phone,
            &self.address,
            &self.city,
            &self.state,
            &self.zip_code,
            &self.country,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

/// New Address Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub uuid: AddressUuid,
    pub user_uuid: UserUuid,
    pub fields: AddressFields,
    pub is_default: bool,
}

/// Address Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct AddressUpdate {
    pub fields: AddressFields,
    pub is_default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_field_makes_address_incomplete() {
        let fields = AddressFields {
            full_name: "Jo Bloggs".to_string(),
            phone: "0123".to_string(),
            address: "1 High Street".to_string(),
            city: "Canterbury".to_string(),
            state: "Kent".to_string(),
            zip_code: "CT1 1AA".to_string(),
            country: "GB".to_string(),
        };

        assert!(fields.is_complete());

        let blank_city = AddressFields {
            city: " ".to_string(),
            ..fields
        };

        assert!(!blank_city.is_complete());
    }
}
