//! Order status lifecycle.
//!
//! Orders move forward through `processing`, `packed`, `shipped` and
//! `delivered`, possibly skipping steps. Any order that has not reached a
//! terminal state may be cancelled. `delivered` and `cancelled` are terminal.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Processing,
    Packed,
    Shipped,
    Delivered,
    Cancelled,
}

/// Outcome of applying a status to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Changed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot change order status from {from} to {to}")]
pub struct InvalidTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

#[derive(Debug, Error)]
#[error("unknown order status \"{0}\"")]
pub struct UnknownStatus(pub String);

impl OrderStatus {
    pub const ALL: [Self; 5] = [
        Self::Processing,
        Self::Packed,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Packed => "packed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Position along the fulfilment path; `None` for cancellation.
    const fn step(self) -> Option<u8> {
        match self {
            Self::Processing => Some(0),
            Self::Packed => Some(1),
            Self::Shipped => Some(2),
            Self::Delivered => Some(3),
            Self::Cancelled => None,
        }
    }

    /// Checks whether an order in this status may move to `next`.
    pub fn transition_to(self, next: Self) -> Result<Transition, InvalidTransition> {
        if self == next {
            return Ok(Transition::Unchanged);
        }

        let invalid = InvalidTransition {
            from: self,
            to: next,
        };

        if self.is_terminal() {
            return Err(invalid);
        }

        match (self.step(), next.step()) {
            (_, None) => Ok(Transition::Changed),
            (Some(current), Some(target)) if target > current => Ok(Transition::Changed),
            _ => Err(invalid),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use OrderStatus::{Cancelled, Delivered, Packed, Processing, Shipped};

    #[test]
    fn forward_steps_are_allowed() {
        assert_eq!(Processing.transition_to(Packed), Ok(Transition::Changed));
        assert_eq!(Packed.transition_to(Shipped), Ok(Transition::Changed));
        assert_eq!(Shipped.transition_to(Delivered), Ok(Transition::Changed));
    }

    #[test]
    fn forward_skips_are_allowed() {
        assert_eq!(Processing.transition_to(Shipped), Ok(Transition::Changed));
        assert_eq!(Processing.transition_to(Delivered), Ok(Transition::Changed));
    }

    #[test]
    fn backward_steps_are_rejected() {
        assert_eq!(
            Shipped.transition_to(Processing),
            Err(InvalidTransition {
                from: Shipped,
                to: Processing,
            })
        );
        assert!(Packed.transition_to(Processing).is_err());
    }

    #[test]
    fn cancellation_is_allowed_until_terminal() {
        for status in [Processing, Packed, Shipped] {
            assert_eq!(status.transition_to(Cancelled), Ok(Transition::Changed));
        }

        assert!(Delivered.transition_to(Cancelled).is_err());
    }

    #[test]
    fn terminal_states_cannot_move() {
        for next in [Processing, Packed, Shipped] {
            assert!(Delivered.transition_to(next).is_err());
            assert!(Cancelled.transition_to(next).is_err());
        }
    }

    #[test]
    fn same_status_is_a_no_op() {
        for status in OrderStatus::ALL {
            assert_eq!(status.transition_to(status), Ok(Transition::Unchanged));
        }
    }

    #[test]
    fn parses_lowercase_names_only() {
        assert_eq!("packed".parse::<OrderStatus>().ok(), Some(Packed));
        assert!("Packed".parse::<OrderStatus>().is_err());
        assert!("refunded".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn invalid_transition_names_both_states() {
        let error = InvalidTransition {
            from: Delivered,
            to: Processing,
        };

        assert_eq!(
            error.to_string(),
            "cannot change order status from delivered to processing"
        );
    }
}
