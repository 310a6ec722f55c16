//! Order Errors

use salvo::http::StatusError;
use tracing::{debug, error};

use mayfield_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => {
            debug!("order not found");

            StatusError::not_found().brief("Order not found")
        }
        OrdersServiceError::Validation(message) => StatusError::bad_request().brief(message),
        OrdersServiceError::InvalidTransition(transition) => {
            StatusError::bad_request().brief(transition.to_string())
        }
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown user or product")
        }
        OrdersServiceError::MissingRequiredData | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Missing required fields")
        }
        OrdersServiceError::Sql(source) => {
            error!("order query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use mayfield_app::domain::orders::status::{InvalidTransition, OrderStatus};
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn invalid_transition_names_both_states() {
        let error = into_status_error(OrdersServiceError::InvalidTransition(InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Processing,
        }));

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(
            error.brief,
            "cannot change order status from delivered to processing"
        );
    }
}
