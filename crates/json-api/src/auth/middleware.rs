//! Auth middleware.
//!
//! [`authenticate`] runs on every route. A request without an `Authorization`
//! header proceeds anonymously; one with a header must carry a valid bearer
//! token, whose principal is stored in the depot. [`require_user`] and
//! [`require_admin`] guard routes that need a caller.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::debug;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn authenticate(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.headers().get(AUTHORIZATION).is_none() {
        ctrl.call_next(req, depot, res).await;

        return;
    }

    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    match state.app.auth.authenticate_bearer(token) {
        Ok(principal) => depot.insert_principal(principal),
        Err(error) => {
            debug!("rejected bearer token: {error}");

            res.render(StatusError::unauthorized().brief("Invalid or expired token"));
            ctrl.skip_rest();

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn require_user(depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
    if let Err(error) = depot.principal_or_401() {
        res.render(error);
        ctrl.skip_rest();
    }
}

#[salvo::handler]
pub(crate) async fn require_admin(depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
    match depot.principal_or_401() {
        Ok(principal) if principal.is_admin() => {}
        Ok(_) => {
            res.render(StatusError::forbidden().brief("Admin role required"));
            ctrl.skip_rest();
        }
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();
        }
    }
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use mayfield_app::{
        auth::{AuthServiceError, MockAuthService, Principal, TokenError},
        domain::users::records::{Role, UserUuid},
    };
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::TestApp;

    use super::*;

    #[salvo::handler]
    async fn whoami(depot: &mut Depot, res: &mut Response) {
        let caller = depot.principal().map_or_else(
            || "anonymous".to_string(),
            |principal| principal.user_uuid.to_string(),
        );

        res.render(caller);
    }

    fn make_service(auth: MockAuthService) -> Service {
        let mut app = TestApp::default();

        app.auth = Some(auth);

        Service::new(
            Router::new()
                .hoop(inject(app.into_state()))
                .hoop(authenticate)
                .push(Router::with_path("open").get(whoami))
                .push(Router::with_path("account").hoop(require_user).get(whoami))
                .push(Router::with_path("admin").hoop(require_admin).get(whoami)),
        )
    }

    fn accepting(principal: Principal) -> MockAuthService {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .withf(|token| token == "good")
            .returning(move |_| Ok(principal));

        auth
    }

    #[tokio::test]
    async fn anonymous_request_passes_open_routes() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let mut res = TestClient::get("http://example.com/open")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "anonymous");

        Ok(())
    }

    #[tokio::test]
    async fn non_bearer_scheme_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com/open")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn invalid_token_returns_401_even_on_open_routes() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "forged")
            .return_once(|_| Err(AuthServiceError::Invalid(TokenError::BadSignature)));

        let res = TestClient::get("http://example.com/open")
            .add_header(AUTHORIZATION, "Bearer forged", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn valid_token_binds_principal() -> TestResult {
        let user = UserUuid::new();

        let mut res = TestClient::get("http://example.com/account")
            .add_header(AUTHORIZATION, "Bearer good", true)
            .send(&make_service(accepting(Principal {
                user_uuid: user,
                role: Role::User,
            })))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, user.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn account_route_without_token_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com/account")
            .send(&make_service(MockAuthService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn admin_route_rejects_user_role_with_403() -> TestResult {
        let res = TestClient::get("http://example.com/admin")
            .add_header(AUTHORIZATION, "Bearer good", true)
            .send(&make_service(accepting(Principal {
                user_uuid: UserUuid::new(),
                role: Role::User,
            })))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn admin_route_accepts_admin_role() -> TestResult {
        let res = TestClient::get("http://example.com/admin")
            .add_header(AUTHORIZATION, "Bearer good", true)
            .send(&make_service(accepting(Principal {
                user_uuid: UserUuid::new(),
                role: Role::Admin,
            })))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
