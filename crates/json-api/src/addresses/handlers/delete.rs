//! Delete Address Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use crate::{addresses::errors::into_status_error, extensions::*, state::State};

/// Delete Address Handler
///
/// Takes `id` from the query string. The owner is `userId` when given,
/// otherwise the signed-in caller. Removing the default address promotes
/// the newest remaining one.
#[endpoint(
    tags("addresses"),
    summary = "Delete Address",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Address deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing id, or no userId and no signed-in caller"),
        (status_code = StatusCode::NOT_FOUND, description = "Address not found"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let address = req.require_query_uuid("id")?;
    let user = match req.query_uuid("userId")? {
        Some(user) => user,
        None => depot
            .principal()
            .map(|principal| principal.user_uuid.into_uuid())
            .ok_or_else(|| {
                StatusError::bad_request().brief("missing \"userId\" query parameter")
            })?,
    };

    depot.authorize_user(user.into())?;

    state
        .app
        .addresses
        .delete_address(address.into(), user.into())
        .await
        .map_err(into_status_error)?;

    info!(address_uuid = %address, user_uuid = %user, "deleted address");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use mayfield_app::domain::{
        addresses::{AddressesServiceError, MockAddressesService, records::AddressUuid},
        users::records::UserUuid,
    };

    use crate::test_helpers::{TestApp, bearer, customer};

    use super::*;

    fn make_service(addresses: MockAddressesService) -> Service {
        TestApp {
            addresses: Some(addresses),
            ..TestApp::default()
        }
        .service(Router::with_path("addresses").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_address_success() -> TestResult {
        let user = UserUuid::new();
        let address = AddressUuid::new();

        let mut addresses = MockAddressesService::new();

        addresses
            .expect_delete_address()
            .once()
            .withf(move |a, u| *a == address && *u == user)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!(
            "http://example.com/addresses?id={address}&userId={user}"
        ))
        .send(&make_service(addresses))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_address_returns_404() -> TestResult {
        let mut addresses = MockAddressesService::new();

        addresses
            .expect_delete_address()
            .once()
            .return_once(|_, _| Err(AddressesServiceError::NotFound));

        let res = TestClient::delete(format!(
            "http://example.com/addresses?id={}&userId={}",
            AddressUuid::new(),
            UserUuid::new()
        ))
        .send(&make_service(addresses))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_id_returns_400() -> TestResult {
        let mut addresses = MockAddressesService::new();

        addresses.expect_delete_address().never();

        let res = TestClient::delete(format!("http://example.com/addresses?userId={}", UserUuid::new()))
            .send(&make_service(addresses))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_owner_defaults_to_signed_in_user() -> TestResult {
        let user = UserUuid::new();
        let address = AddressUuid::new();

        let mut addresses = MockAddressesService::new();

        addresses
            .expect_delete_address()
            .once()
            .withf(move |a, u| *a == address && *u == user)
            .return_once(|_, _| Ok(()));

        let service = TestApp {
            addresses: Some(addresses),
            ..TestApp::default()
        }
        .signed_in(customer(user))
        .service(Router::with_path("addresses").delete(handler));

        let res = TestClient::delete(format!("http://example.com/addresses?id={address}"))
            .add_header("authorization", bearer(), true)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_owner_without_token_returns_400() -> TestResult {
        let mut addresses = MockAddressesService::new();

        addresses.expect_delete_address().never();

        let res = TestClient::delete(format!("http://example.com/addresses?id={}", AddressUuid::new()))
            .send(&make_service(addresses))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
