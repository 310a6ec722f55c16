//! Store Stats Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use mayfield_app::domain::stats::{StatsServiceError, records::StoreStats};

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatusCountResponse {
    pub status: String,
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatsResponse {
    pub users: u64,
    pub products: u64,
    pub orders: u64,
    pub orders_by_status: Vec<StatusCountResponse>,

    /// Total of all orders that were not cancelled, in minor units
    pub revenue: u64,
}

impl From<StoreStats> for StatsResponse {
    fn from(stats: StoreStats) -> Self {
        StatsResponse {
            users: stats.users,
            products: stats.products,
            orders: stats.orders,
            orders_by_status: stats
                .orders_by_status
                .into_iter()
                .map(|entry| StatusCountResponse {
                    status: entry.status.to_string(),
                    count: entry.count,
                })
                .collect(),
            revenue: stats.revenue,
        }
    }
}

fn into_status_error(error: StatsServiceError) -> StatusError {
    match error {
        StatsServiceError::Sql(source) => {
            error!("stats query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Store Stats Handler
#[endpoint(
    tags("admin"),
    summary = "Store Stats",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Store totals"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state
        .app
        .stats
        .store_stats()
        .await
        .map_err(into_status_error)?;

    Ok(Json(stats.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use mayfield_app::domain::{
        orders::status::OrderStatus,
        stats::{MockStatsService, records::StatusCount},
    };

    use crate::{
        auth::middleware::require_admin,
        test_helpers::{TestApp, admin, bearer, customer},
    };

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service(
            Router::with_path("admin/stats")
                .hoop(require_admin)
                .get(handler),
        )
    }

    #[tokio::test]
    async fn test_stats_for_admin() -> TestResult {
        let mut stats = MockStatsService::new();

        stats.expect_store_stats().once().return_once(|| {
            Ok(StoreStats {
                users: 3,
                products: 7,
                orders: 4,
                orders_by_status: vec![
                    StatusCount {
                        status: OrderStatus::Processing,
                        count: 3,
                    },
                    StatusCount {
                        status: OrderStatus::Cancelled,
                        count: 1,
                    },
                ],
                revenue: 5_100,
            })
        });

        let app = TestApp {
            stats: Some(stats),
            ..TestApp::default()
        }
        .signed_in(admin());

        let mut res = TestClient::get("http://example.com/admin/stats")
            .add_header("authorization", bearer(), true)
            .send(&make_service(app))
            .await;

        let body: StatsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.revenue, 5_100);
        assert_eq!(
            body.orders_by_status.first().map(|entry| entry.status.as_str()),
            Some("processing")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_stats_for_customer_returns_403() -> TestResult {
        let mut stats = MockStatsService::new();

        stats.expect_store_stats().never();

        let app = TestApp {
            stats: Some(stats),
            ..TestApp::default()
        }
        .signed_in(customer(mayfield_app::domain::users::records::UserUuid::new()));

        let res = TestClient::get("http://example.com/admin/stats")
            .add_header("authorization", bearer(), true)
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
