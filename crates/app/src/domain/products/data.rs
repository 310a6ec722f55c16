//! Products Data

use crate::domain::products::records::ProductUuid;

/// Editable catalog attributes of a product.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductAttributes {
    pub name: String,
    pub price: u64,
    pub description: String,
    pub details: String,
    pub image: String,
    pub weight: String,
    pub origin: String,
    pub season: String,
    pub nutritional: String,
    pub stock: u32,
    pub featured: bool,
}

impl ProductAttributes {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Missing required fields".to_string());
        }

        if self.price == 0 {
            return Err("Price must be greater than zero".to_string());
        }

        Ok(())
    }
}

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub attributes: ProductAttributes,
}

/// Catalog listing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProductFilter {
    pub featured_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes() -> ProductAttributes {
        ProductAttributes {
            name: "Wildflower Honey".to_string(),
            price: 1200,
            ..ProductAttributes::default()
        }
    }

    #[test]
    fn valid_attributes_pass() {
        assert!(attributes().validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let attributes = ProductAttributes {
            name: "  ".to_string(),
            ..attributes()
        };

        assert_eq!(
            attributes.validate(),
            Err("Missing required fields".to_string())
        );
    }

    #[test]
    fn zero_price_is_rejected() {
        let attributes = ProductAttributes {
            price: 0,
            ..attributes()
        };

        assert!(attributes.validate().is_err());
    }
}
