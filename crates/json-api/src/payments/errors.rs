//! Errors

use salvo::http::{StatusCode, StatusError};
use tracing::{error, warn};

use virtuele_app::domain::payments::{PaymentsServiceError, gateway::GatewayError};

use crate::{carts, transactions};

pub(crate) fn into_status_error(error: PaymentsServiceError) -> StatusError {
    match error {
        PaymentsServiceError::NoActiveCart | PaymentsServiceError::EmptyCart => {
            StatusError::bad_request().brief("cart is empty")
        }
        PaymentsServiceError::CartChanged => {
            StatusError::conflict().brief("Cart changed during checkout, review it and try again")
        }
        PaymentsServiceError::NotFound => StatusError::not_found().brief("Transaction not found"),
        PaymentsServiceError::PermissionDenied => {
            StatusError::forbidden().brief("Not permitted to access this transaction")
        }
        PaymentsServiceError::InvalidSignature => {
            StatusError::bad_request().brief("Invalid notification signature")
        }
        PaymentsServiceError::Gateway(source) => gateway_status_error(source),
        PaymentsServiceError::Cart(source) => carts::errors::into_status_error(source),
        PaymentsServiceError::Ledger(source) => transactions::errors::into_status_error(source),
        PaymentsServiceError::Sql(source) => {
            error!("payment storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Gateway rejections keep the gateway's own status code and message.
fn gateway_status_error(error: GatewayError) -> StatusError {
    match error {
        GatewayError::Api {
            status_code,
            message,
        } => {
            warn!(status_code, "payment gateway rejected request: {message}");

            StatusCode::from_u16(status_code)
                .ok()
                .and_then(StatusError::from_code)
                .unwrap_or_else(StatusError::bad_gateway)
                .brief(message)
        }
        GatewayError::Timeout => {
            StatusError::gateway_timeout().brief("Payment gateway timed out, try again")
        }
        GatewayError::Http(source) => {
            error!("payment gateway transport error: {source}");

            StatusError::bad_gateway().brief("Payment gateway unavailable")
        }
        GatewayError::InvalidResponse(detail) => {
            error!("unexpected payment gateway response: {detail}");

            StatusError::bad_gateway().brief("Unexpected payment gateway response")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_api_errors_pass_status_and_message_through() {
        let status = into_status_error(PaymentsServiceError::Gateway(GatewayError::Api {
            status_code: 406,
            message: "Duplicate order ID".to_string(),
        }));

        assert_eq!(status.code, StatusCode::NOT_ACCEPTABLE);
        assert_eq!(status.brief, "Duplicate order ID");
    }

    #[test]
    fn non_error_gateway_codes_become_bad_gateway() {
        let status = into_status_error(PaymentsServiceError::Gateway(GatewayError::Api {
            status_code: 201,
            message: "odd".to_string(),
        }));

        assert_eq!(status.code, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn cart_changed_during_charge_is_conflict() {
        let status = into_status_error(PaymentsServiceError::CartChanged);

        assert_eq!(status.code, StatusCode::CONFLICT);
    }

    #[test]
    fn timeouts_are_gateway_timeouts() {
        let status = into_status_error(PaymentsServiceError::Gateway(GatewayError::Timeout));

        assert_eq!(status.code, StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn access_errors_map_to_403_and_404() {
        assert_eq!(
            into_status_error(PaymentsServiceError::PermissionDenied).code,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            into_status_error(PaymentsServiceError::NotFound).code,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            into_status_error(PaymentsServiceError::InvalidSignature).code,
            StatusCode::BAD_REQUEST
        );
    }
}
