use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InitiatePaymentPayload {
    #[validate(range(min = 1, message = "plan_id must be positive"))]
    pub plan_id: i32,
}

/// Confirmation posted back after the checkout redirect.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ActivateSubscriptionPayload {
    #[validate(length(min = 1, message = "pidx is required"))]
    pub pidx: String,
    #[validate(length(min = 1, message = "transaction_id is required"))]
    pub transaction_id: String,
    #[validate(range(exclusive_min = 0.0, message = "amount must be positive"))]
    pub amount: f64,
    #[validate(range(exclusive_min = 0.0, message = "total_amount must be positive"))]
    pub total_amount: f64,
    #[validate(length(min = 1, message = "mobile is required"))]
    pub mobile: String,
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
    #[validate(range(min = 1, message = "plan_id must be positive"))]
    pub plan_id: i32,
}

/// Request body of the gateway's payment-initiation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayInitiateRequest {
    pub return_url: String,
    pub website_url: String,
    pub amount: String,
    pub purchase_order_id: String,
    pub purchase_order_name: String,
    pub customer_info: CustomerInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayInitiateResponse {
    pub pidx: String,
    pub payment_url: String,
    #[serde(default)]
    pub expires_at: String,
    #[serde(default)]
    pub expires_in: i64,
}

pub type InitiatedPaymentDto = GatewayInitiateResponse;

/// Converts a major-unit price into the minor-unit string the gateway expects.
pub fn minor_units(amount: f64) -> String {
    format!("{:.1}", amount * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_units_keeps_one_decimal_digit() {
        assert_eq!(minor_units(500.0), "50000.0");
        assert_eq!(minor_units(12.5), "1250.0");
    }
}
