//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use mayfield_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        addresses::{
            MockAddressesService,
            records::{AddressRecord, AddressUuid},
        },
        carts::MockCartsService,
        orders::{
            MockOrdersService,
            records::{OrderDetail, OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid, ShippingDetails},
            status::OrderStatus,
        },
        pricing::OrderTotals,
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        reviews::{
            MockReviewsService,
            records::{ReviewRecord, ReviewUuid},
        },
        stats::MockStatsService,
        users::{
            MockUsersService,
            records::{Role, UserRecord, UserUuid},
        },
        wishlist::{
            MockWishlistService,
            records::{WishlistEntry, WishlistItemRecord, WishlistItemUuid},
        },
    },
};

use crate::{auth::middleware::authenticate, router::prefer_json, state::State};

/// Bearer token accepted by [`TestApp::signed_in`].
pub(crate) const TEST_TOKEN: &str = "test-token";

/// Mocked services for handler tests. Services left as `None` reject every call.
#[derive(Default)]
pub(crate) struct TestApp {
    pub(crate) users: Option<MockUsersService>,
    pub(crate) products: Option<MockProductsService>,
    pub(crate) carts: Option<MockCartsService>,
    pub(crate) orders: Option<MockOrdersService>,
    pub(crate) addresses: Option<MockAddressesService>,
    pub(crate) reviews: Option<MockReviewsService>,
    pub(crate) wishlist: Option<MockWishlistService>,
    pub(crate) stats: Option<MockStatsService>,
    pub(crate) auth: Option<MockAuthService>,
}

impl TestApp {
    /// Accept [`TEST_TOKEN`] as a token for `principal`.
    pub(crate) fn signed_in(mut self, principal: Principal) -> Self {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .withf(|token| token == TEST_TOKEN)
            .returning(move |_| Ok(principal));

        self.auth = Some(auth);
        self
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            users: Arc::new(self.users.unwrap_or_default()),
            products: Arc::new(self.products.unwrap_or_default()),
            carts: Arc::new(self.carts.unwrap_or_default()),
            orders: Arc::new(self.orders.unwrap_or_default()),
            addresses: Arc::new(self.addresses.unwrap_or_default()),
            reviews: Arc::new(self.reviews.unwrap_or_default()),
            wishlist: Arc::new(self.wishlist.unwrap_or_default()),
            stats: Arc::new(self.stats.unwrap_or_default()),
            auth: Arc::new(self.auth.unwrap_or_default()),
        })
    }

    /// Mount `route` behind the same hoops the server uses.
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(prefer_json)
                .hoop(inject(self.into_state()))
                .hoop(authenticate)
                .push(route),
        )
    }
}

pub(crate) fn bearer() -> String {
    format!("Bearer {TEST_TOKEN}")
}

pub(crate) fn customer(user: UserUuid) -> Principal {
    Principal {
        user_uuid: user,
        role: Role::User,
    }
}

pub(crate) fn admin() -> Principal {
    Principal {
        user_uuid: UserUuid::new(),
        role: Role::Admin,
    }
}

pub(crate) fn make_user(uuid: UserUuid, role: Role) -> UserRecord {
    UserRecord {
        uuid,
        name: "Jo Bloggs".to_string(),
        email: "jo@example.com".to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        role,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid, price: u64) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Heritage Carrots".to_string(),
        price,
        description: "Mixed colour carrots".to_string(),
        details: String::new(),
        image: "/images/carrots.jpg".to_string(),
        weight: "1kg".to_string(),
        origin: "Kent".to_string(),
        season: "Autumn".to_string(),
        nutritional: String::new(),
        stock: 12,
        featured: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn shipping_details() -> ShippingDetails {
    ShippingDetails {
        full_name: "Jo Bloggs".to_string(),
        email: "jo@example.com".to_string(),
        phone: "01227 000000".to_string(),
        address: "1 High Street".to_string(),
        city: "Canterbury".to_string(),
        state: "Kent".to_string(),
        zip_code: "CT1 1AA".to_string(),
        country: "GB".to_string(),
    }
}

pub(crate) fn make_order(uuid: OrderUuid, user: UserUuid, status: OrderStatus) -> OrderDetail {
    OrderDetail {
        order: OrderRecord {
            uuid,
            order_number: "MFABCDEFGHJKLM".to_string(),
            user_uuid: user,
            idempotency_key: None,
            status,
            shipping: shipping_details(),
            totals: OrderTotals {
                subtotal: 1_200,
                shipping: 500,
                tax: 0,
                total: 1_700,
            },
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        },
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            product_uuid: ProductUuid::new(),
            product_name: "Heritage Carrots".to_string(),
            product_image: "/images/carrots.jpg".to_string(),
            quantity: 2,
            price: 600,
        }],
    }
}

pub(crate) fn make_address(uuid: AddressUuid, user: UserUuid, is_default: bool) -> AddressRecord {
    AddressRecord {
        uuid,
        user_uuid: user,
        full_name: "Jo Bloggs".to_string(),
        phone: "01227 000000".to_string(),
        address: "1 High Street".to_string(),
        city: "Canterbury".to_string(),
        state: "Kent".to_string(),
        zip_code: "CT1 1AA".to_string(),
        country: "GB".to_string(),
        is_default,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_review(
    uuid: ReviewUuid,
    user: UserUuid,
    product: ProductUuid,
    rating: u8,
) -> ReviewRecord {
    ReviewRecord {
        uuid,
        user_uuid: user,
        reviewer_name: "Jo Bloggs".to_string(),
        product_uuid: product,
        rating,
        comment: "Sweet and crunchy".to_string(),
        order_number: None,
        verified: false,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_wishlist_entry(user: UserUuid, product: ProductUuid) -> WishlistEntry {
    WishlistEntry {
        item: WishlistItemRecord {
            uuid: WishlistItemUuid::new(),
            user_uuid: user,
            product_uuid: product,
            created_at: Timestamp::UNIX_EPOCH,
        },
        product_name: "Heritage Carrots".to_string(),
        product_price: 350,
        product_image: "/images/carrots.jpg".to_string(),
    }
}
