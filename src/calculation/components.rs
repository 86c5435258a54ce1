//! Pluggable pay component rules.
//!
//! Sunday/special-day pay, holiday pay and lateness are carried on every
//! payslip but have no statutory formula in the current rule set. Each one
//! is a slot holding a [`PayComponentRule`]; the default rule yields zero so
//! the payslip shape is the same whether or not a real rule is plugged in.

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{Employee, Holiday, PayrollInput};

/// The legal reference for Sunday and rest-day premium pay.
pub const SUNDAY_SPECIAL_REF: &str = "Labor Code Art. 93";

/// The legal reference for holiday pay.
pub const HOLIDAY_REF: &str = "Labor Code Art. 94";

/// The reference for lateness deductions.
pub const LATENESS_REF: &str = "Payroll policy: tardiness";

/// Everything a component rule may look at for one employee.
#[derive(Debug, Clone, Copy)]
pub struct PayContext<'a> {
    /// The employee being paid.
    pub employee: &'a Employee,
    /// The run input.
    pub input: &'a PayrollInput,
    /// Base salary per working day, full precision.
    pub daily_rate: Decimal,
    /// Daily rate per working hour, full precision.
    pub hourly_rate: Decimal,
    /// The holiday calendar, ordered by date.
    pub holidays: &'a [Holiday],
}

/// The figures one component contributes to a payslip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentAmount {
    /// Hours, minutes or days the rate applies to.
    pub quantity: Decimal,
    /// Rate per unit of quantity.
    pub rate: Decimal,
    /// Amount paid or deducted. Must not be negative.
    pub amount: Decimal,
}

impl ComponentAmount {
    /// A component that contributes nothing.
    pub const ZERO: ComponentAmount = ComponentAmount {
        quantity: Decimal::ZERO,
        rate: Decimal::ZERO,
        amount: Decimal::ZERO,
    };
}

/// A rule computing one pay component.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{ComponentAmount, PayComponentRule, PayContext};
/// use payroll_engine::error::EngineResult;
/// use rust_decimal::Decimal;
///
/// /// Pays the Sunday hours at 130% of the hourly rate.
/// struct SundayPremium;
///
/// impl PayComponentRule for SundayPremium {
///     fn name(&self) -> &str {
///         "sunday_premium_130"
///     }
///
///     fn compute(&self, ctx: &PayContext<'_>) -> EngineResult<ComponentAmount> {
///         let hours = ctx.input.sunday_restday_hours();
///         let rate = ctx.hourly_rate * Decimal::new(130, 2);
///         Ok(ComponentAmount { quantity: hours, rate, amount: hours * rate })
///     }
/// }
/// ```
pub trait PayComponentRule: Send + Sync {
    /// Short identifier recorded in the audit trace.
    fn name(&self) -> &str;

    /// Computes the component for one employee.
    fn compute(&self, ctx: &PayContext<'_>) -> EngineResult<ComponentAmount>;
}

/// The rule installed in every slot by default. Always yields zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReservedComponent;

impl PayComponentRule for ReservedComponent {
    fn name(&self) -> &str {
        "reserved"
    }

    fn compute(&self, _ctx: &PayContext<'_>) -> EngineResult<ComponentAmount> {
        Ok(ComponentAmount::ZERO)
    }
}

/// The rule slots applied to every payslip.
#[derive(Clone)]
pub struct PayComponentRules {
    /// Sunday, rest-day and special-day pay. Adds to gross pay.
    pub sunday_special: Arc<dyn PayComponentRule>,
    /// Holiday pay. Adds to gross pay.
    pub holiday: Arc<dyn PayComponentRule>,
    /// Lateness. Adds to total deductions.
    pub lateness: Arc<dyn PayComponentRule>,
}

impl Default for PayComponentRules {
    fn default() -> Self {
        Self {
            sunday_special: Arc::new(ReservedComponent),
            holiday: Arc::new(ReservedComponent),
            lateness: Arc::new(ReservedComponent),
        }
    }
}

impl fmt::Debug for PayComponentRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayComponentRules")
            .field("sunday_special", &self.sunday_special.name())
            .field("holiday", &self.holiday.name())
            .field("lateness", &self.lateness.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoleGroup;
    use crate::test_support::{dec, employee, input};

    #[test]
    fn test_reserved_component_is_zero() {
        let emp = employee("EMP-1", "Maria Santos", RoleGroup::Staff);
        let mut run = input(RoleGroup::Staff, "20000");
        run.sunday_restday_hours = Some(dec("8"));
        let ctx = PayContext {
            employee: &emp,
            input: &run,
            daily_rate: dec("909.09"),
            hourly_rate: dec("113.64"),
            holidays: &[],
        };

        let amount = ReservedComponent.compute(&ctx).unwrap();
        assert_eq!(amount, ComponentAmount::ZERO);
    }

    #[test]
    fn test_default_rules_are_all_reserved() {
        let rules = PayComponentRules::default();
        assert_eq!(rules.sunday_special.name(), "reserved");
        assert_eq!(rules.holiday.name(), "reserved");
        assert_eq!(rules.lateness.name(), "reserved");
        assert_eq!(
            format!("{:?}", rules),
            "PayComponentRules { sunday_special: \"reserved\", holiday: \"reserved\", lateness: \"reserved\" }"
        );
    }
}
