//! App Router

use salvo::{
    http::header::{ACCEPT, HeaderValue},
    prelude::*,
};

use crate::{
    accounts, addresses, admin,
    auth::middleware::{authenticate, require_admin, require_user},
    cart, orders, products, reviews, wishlist,
};

/// Error bodies are rendered by salvo's catcher, which picks its format from
/// `Accept`. Clients of this API always get JSON.
#[handler]
pub(crate) async fn prefer_json(req: &mut Request) {
    req.headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("application/json"));
}

pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(prefer_json)
        .hoop(authenticate)
        .push(
            Router::with_path("auth")
                .push(Router::with_path("signup").post(accounts::signup::handler))
                .push(Router::with_path("login").post(accounts::login::handler))
                .push(
                    Router::with_path("password-reset")
                        .post(accounts::password_reset::request_handler)
                        .push(
                            Router::with_path("confirm")
                                .post(accounts::password_reset::confirm_handler),
                        ),
                ),
        )
        .push(
            Router::with_path("account")
                .hoop(require_user)
                .get(accounts::profile::get_handler)
                .put(accounts::profile::update_handler),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler))
                .push(
                    Router::new()
                        .hoop(require_admin)
                        .post(products::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(products::update::handler)
                                .delete(products::delete::handler),
                        ),
                ),
        )
        .push(Router::with_path("cart/quote").post(cart::quote::handler))
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(Router::with_path("track/{order_number}").get(orders::track::handler))
                .push(
                    Router::with_path("{order}")
                        .hoop(require_admin)
                        .put(orders::update::handler),
                ),
        )
        .push(
            Router::with_path("addresses")
                .get(addresses::index::handler)
                .post(addresses::create::handler)
                .put(addresses::update::handler)
                .delete(addresses::delete::handler),
        )
        .push(
            Router::with_path("reviews")
                .get(reviews::index::handler)
                .post(reviews::create::handler)
                .push(
                    Router::with_path("{review}")
                        .hoop(require_admin)
                        .delete(reviews::delete::handler),
                ),
        )
        .push(
            Router::with_path("wishlist")
                .get(wishlist::index::handler)
                .post(wishlist::create::handler)
                .delete(wishlist::delete::handler),
        )
        .push(
            Router::with_path("admin")
                .hoop(require_admin)
                .push(Router::with_path("users").get(admin::users::index_handler))
                .push(Router::with_path("users/{user}/role").put(admin::users::role_handler))
                .push(Router::with_path("stats").get(admin::stats::handler)),
        )
}
