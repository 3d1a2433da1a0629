use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Lifecycle of a gateway payment. Only `Initiated` can move, and only forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    Initiated,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Initiated => "Initiated",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Failed => "Failed",
        }
    }

    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "Initiated" => Some(PaymentStatus::Initiated),
            "Completed" => Some(PaymentStatus::Completed),
            "Failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }

    /// Maps the status reported by the gateway callback onto a settled status.
    /// Non-terminal gateway statuses (`Pending`, `Initiated`, ...) yield `None`.
    pub fn from_gateway(value: &str) -> Option<Self> {
        match value.trim() {
            "Completed" => Some(PaymentStatus::Completed),
            "Failed" | "Expired" | "User canceled" | "Refunded" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, PaymentStatus::Initiated)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_terminal_statuses_settle() {
        assert_eq!(PaymentStatus::from_gateway("Completed"), Some(PaymentStatus::Completed));
        assert_eq!(PaymentStatus::from_gateway("User canceled"), Some(PaymentStatus::Failed));
        assert_eq!(PaymentStatus::from_gateway("Expired"), Some(PaymentStatus::Failed));
    }

    #[test]
    fn gateway_pending_status_is_rejected() {
        assert_eq!(PaymentStatus::from_gateway("Pending"), None);
        assert_eq!(PaymentStatus::from_gateway("Initiated"), None);
        assert_eq!(PaymentStatus::from_gateway(""), None);
    }
}
