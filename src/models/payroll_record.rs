//! Persisted payroll records and their lifecycle status.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Payslip, RoleGroup};

/// Identifier assigned to a payroll record by the store.
pub type PayrollRecordId = u64;

/// Review status of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Awaiting review. Every record starts here.
    Pending,
    /// Approved for payout.
    Approved,
    /// Rejected by a reviewer.
    Rejected,
}

impl fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PayrollStatus::Pending => "pending",
            PayrollStatus::Approved => "approved",
            PayrollStatus::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

/// A payroll record ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayrollRecord {
    /// The employee being paid.
    pub employee_id: String,
    /// The employee's display name at the time of the run.
    pub employee_name: String,
    /// The role group of the run.
    pub role: RoleGroup,
    /// The computed payslip.
    pub payslip: Payslip,
}

/// A stored payroll record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Store-assigned identifier.
    pub id: PayrollRecordId,
    /// The employee being paid.
    pub employee_id: String,
    /// The employee's display name at the time of the run.
    pub employee_name: String,
    /// The role group of the run.
    pub role: RoleGroup,
    /// The computed payslip.
    pub payslip: Payslip,
    /// Review status.
    pub status: PayrollStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl PayrollRecord {
    /// Builds a pending record from an insert request.
    pub fn from_new(id: PayrollRecordId, created_at: DateTime<Utc>, new: NewPayrollRecord) -> Self {
        Self {
            id,
            employee_id: new.employee_id,
            employee_name: new.employee_name,
            role: new.role,
            payslip: new.payslip,
            status: PayrollStatus::Pending,
            created_at,
        }
    }

    /// Returns the payslip title, e.g. `"Payslip - March 2026"`.
    pub fn period_label(&self) -> String {
        format!("Payslip - {}", self.created_at.format("%B %Y"))
    }
}

/// Aggregates shown on the payroll terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollStats {
    /// Sum of net pay over approved records.
    pub total_payout: Decimal,
    /// Number of records still pending.
    pub pending_approvals: usize,
}

impl PayrollStats {
    /// Folds the stats over a set of records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a PayrollRecord>) -> Self {
        records.into_iter().fold(
            PayrollStats {
                total_payout: Decimal::ZERO,
                pending_approvals: 0,
            },
            |mut stats, record| {
                match record.status {
                    PayrollStatus::Approved => stats.total_payout += record.payslip.net_pay,
                    PayrollStatus::Pending => stats.pending_approvals += 1,
                    PayrollStatus::Rejected => {}
                }
                stats
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{PayComponentRules, calculate_payslip};
    use crate::test_support::{dec, employee, input, ph_2026_schedule};
    use chrono::TimeZone;

    fn record(id: PayrollRecordId, base_salary: &str, status: PayrollStatus) -> PayrollRecord {
        let emp = employee("EMP-1", "Maria Santos", RoleGroup::Staff);
        let calc = calculate_payslip(
            &emp,
            &input(RoleGroup::Staff, base_salary),
            &ph_2026_schedule(),
            &[],
            &PayComponentRules::default(),
        )
        .unwrap();
        let new = NewPayrollRecord {
            employee_id: emp.id,
            employee_name: emp.name,
            role: RoleGroup::Staff,
            payslip: calc.payslip,
        };
        let mut record = PayrollRecord::from_new(
            id,
            Utc.with_ymd_and_hms(2026, 3, 15, 8, 0, 0).unwrap(),
            new,
        );
        record.status = status;
        record
    }

    #[test]
    fn test_new_record_starts_pending() {
        let rec = record(1, "20000", PayrollStatus::Pending);
        assert_eq!(rec.status, PayrollStatus::Pending);
        assert_eq!(rec.id, 1);
    }

    #[test]
    fn test_period_label() {
        let rec = record(1, "20000", PayrollStatus::Pending);
        assert_eq!(rec.period_label(), "Payslip - March 2026");
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&PayrollStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&PayrollStatus::Approved).unwrap(),
            "\"approved\""
        );
        assert_eq!(
            serde_json::to_string(&PayrollStatus::Rejected).unwrap(),
            "\"rejected\""
        );
        assert_eq!(PayrollStatus::Rejected.to_string(), "rejected");
    }

    #[test]
    fn test_stats_sum_only_approved_net_pay() {
        let records = vec![
            record(1, "20000", PayrollStatus::Approved),
            record(2, "20000", PayrollStatus::Approved),
            record(3, "20000", PayrollStatus::Rejected),
            record(4, "20000", PayrollStatus::Pending),
        ];

        let stats = PayrollStats::from_records(&records);
        assert_eq!(stats.total_payout, dec("36800.00"));
        assert_eq!(stats.pending_approvals, 1);
    }

    #[test]
    fn test_stats_over_no_records() {
        let stats = PayrollStats::from_records(&Vec::new());
        assert_eq!(stats.total_payout, Decimal::ZERO);
        assert_eq!(stats.pending_approvals, 0);
    }
}
