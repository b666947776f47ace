//! Bill status constants and payment rules.

use crate::error::CoreError;
use crate::types::Timestamp;

pub const BILL_PENDING: &str = "pending";
pub const BILL_PAID: &str = "paid";
pub const BILL_OVERDUE: &str = "overdue";

/// Utilities a bill can be raised for.
pub const BILL_UTILITIES: &[&str] = &["electricity", "water", "gas", "property_tax"];

/// Validate that a bill in `status` can be paid.
pub fn validate_payable(bill_id: &str, status: &str) -> Result<(), CoreError> {
    match status {
        BILL_PENDING | BILL_OVERDUE => Ok(()),
        BILL_PAID => Err(CoreError::Conflict(format!("Bill {bill_id} is already paid"))),
        other => Err(CoreError::Validation(format!(
            "Bill {bill_id} has unknown status '{other}'"
        ))),
    }
}

/// Receipt number stamped on a paid bill: `RCPT-<yyyymmdd>-<bill id>`.
pub fn receipt_number(bill_id: &str, paid_at: Timestamp) -> String {
    format!("RCPT-{}-{bill_id}", paid_at.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn pending_and_overdue_bills_are_payable() {
        assert!(validate_payable("BILL-1", BILL_PENDING).is_ok());
        assert!(validate_payable("BILL-1", BILL_OVERDUE).is_ok());
    }

    #[test]
    fn paid_bill_conflicts() {
        assert_matches!(validate_payable("BILL-1", BILL_PAID), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn receipt_embeds_date_and_bill() {
        let paid_at = Utc.with_ymd_and_hms(2026, 10, 5, 12, 0, 0).unwrap();
        assert_eq!(receipt_number("BILL-0007", paid_at), "RCPT-20261005-BILL-0007");
    }
}
