//! Test Helpers

use crate::{
    domain::{
        addresses::data::AddressFields,
        carts::data::CartLine,
        orders::{
            data::NewOrder,
            records::{OrderUuid, ShippingDetails},
        },
        pricing::OrderTotals,
        products::{
            ProductsService, ProductsServiceError,
            data::{NewProduct, ProductAttributes},
            records::{ProductRecord, ProductUuid},
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{Role, UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

pub(crate) const TEST_PASSWORD: &str = "correct horse";

pub(crate) async fn create_user(
    ctx: &TestContext,
    email: &str,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .create_user(
            NewUser {
                uuid: UserUuid::new(),
                name: "Test User".to_string(),
                email: email.to_string(),
                password: TEST_PASSWORD.to_string(),
            },
            Role::User,
        )
        .await
}

pub(crate) fn product_attributes(name: &str, price: u64) -> ProductAttributes {
    ProductAttributes {
        name: name.to_string(),
        price,
        description: format!("{name} from the farm"),
        stock: 10,
        ..ProductAttributes::default()
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            attributes: product_attributes(name, price),
        })
        .await
}

pub(crate) fn address_fields() -> AddressFields {
    AddressFields {
        full_name: "Jo Bloggs".to_string(),
        phone: "01227 000000".to_string(),
        address: "1 High Street".to_string(),
        city: "Canterbury".to_string(),
        state: "Kent".to_string(),
        zip_code: "CT1 1AA".to_string(),
        country: "GB".to_string(),
    }
}

pub(crate) fn shipping_details() -> ShippingDetails {
    let fields = address_fields();

    ShippingDetails {
        full_name: fields.full_name,
        email: "jo@example.com".to_string(),
        phone: fields.phone,
        address: fields.address,
        city: fields.city,
        state: fields.state,
        zip_code: fields.zip_code,
        country: fields.country,
    }
}

pub(crate) fn new_order(user: UserUuid, lines: Vec<CartLine>, totals: OrderTotals) -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        user_uuid: user,
        lines,
        shipping: shipping_details(),
        totals,
        idempotency_key: None,
    }
}
