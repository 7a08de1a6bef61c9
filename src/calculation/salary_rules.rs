//! Salary rule functionality.
//!
//! This module resolves the revenue-tiered bonus percentage for a day and
//! computes what a single shift pays: a base component (flat, halved or
//! hourly), a bonus on the day's revenue, and any delivery compensation.

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::SalaryConstants;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, EmployeeShift, ShiftType};

/// Rule identifier recorded in the audit step of a shift pay calculation.
pub const SHIFT_PAY_RULE: &str = "shift_pay";

/// The result of computing one shift's pay, including its breakdown and audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPayResult {
    /// The calendar day of the shift.
    pub date: NaiveDate,
    /// Total pay, rounded to the currency's minor unit.
    pub amount: Decimal,
    /// Unrounded base component.
    pub base: Decimal,
    /// Unrounded revenue bonus component.
    pub bonus: Decimal,
    /// Delivery compensation.
    pub delivery: Decimal,
    /// The bonus percentage resolved from the day's revenue.
    pub percentage: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Converts a floating-point revenue reading into a validated decimal.
///
/// Revenue series supplied by sales aggregation may arrive as floats; NaN,
/// infinities and negative values are rejected rather than coerced.
///
/// # Examples
///
/// ```
/// use cafe_payroll::calculation::revenue_from_f64;
/// use rust_decimal::Decimal;
///
/// assert_eq!(revenue_from_f64(1250.5).unwrap(), Decimal::new(12505, 1));
/// assert!(revenue_from_f64(f64::NAN).is_err());
/// assert!(revenue_from_f64(-1.0).is_err());
/// ```
pub fn revenue_from_f64(value: f64) -> EngineResult<Decimal> {
    if !value.is_finite() {
        return Err(EngineError::InvalidRevenue {
            value: value.to_string(),
            message: "revenue must be a finite number".to_string(),
        });
    }

    let revenue = Decimal::from_f64(value).ok_or_else(|| EngineError::InvalidRevenue {
        value: value.to_string(),
        message: "revenue is outside the representable range".to_string(),
    })?;

    validate_revenue(revenue)?;
    Ok(revenue)
}

/// Rejects negative revenue.
pub(crate) fn validate_revenue(daily_revenue: Decimal) -> EngineResult<()> {
    if daily_revenue < Decimal::ZERO {
        return Err(EngineError::invalid_revenue(
            daily_revenue,
            "revenue must not be negative",
        ));
    }
    Ok(())
}

/// Resolves the bonus percentage for a day's revenue.
///
/// Returns `percentage_above` when `daily_revenue >= revenue_threshold`,
/// otherwise `percentage_below`.
///
/// # Examples
///
/// ```
/// use cafe_payroll::calculation::resolve_percentage;
/// use cafe_payroll::config::SalaryConstants;
/// use rust_decimal::Decimal;
///
/// let constants = SalaryConstants {
///     base_rate: Decimal::from(1000),
///     hourly_rate: Decimal::from(100),
///     revenue_threshold: Decimal::from(50000),
///     percentage_below: Decimal::from(5),
///     percentage_above: Decimal::from(8),
/// };
///
/// assert_eq!(resolve_percentage(Decimal::from(49999), &constants).unwrap(), Decimal::from(5));
/// assert_eq!(resolve_percentage(Decimal::from(50000), &constants).unwrap(), Decimal::from(8));
/// ```
pub fn resolve_percentage(
    daily_revenue: Decimal,
    constants: &SalaryConstants,
) -> EngineResult<Decimal> {
    validate_revenue(daily_revenue)?;

    if daily_revenue >= constants.revenue_threshold {
        Ok(constants.percentage_above)
    } else {
        Ok(constants.percentage_below)
    }
}

/// The pay components of one shift, without its audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ShiftPrice {
    pub(crate) amount: Decimal,
    pub(crate) base: Decimal,
    pub(crate) bonus: Decimal,
    pub(crate) delivery: Decimal,
    pub(crate) percentage: Decimal,
}

/// Prices a shift with overflow-checked arithmetic.
///
/// Overflow on the hours or delivery side is `InvalidShift`, on the revenue
/// side `InvalidRevenue`.
pub(crate) fn price_shift(
    shift: &EmployeeShift,
    daily_revenue: Decimal,
    constants: &SalaryConstants,
    currency_scale: u32,
) -> EngineResult<ShiftPrice> {
    let percentage = resolve_percentage(daily_revenue, constants)?;

    if !shift.worked {
        return Ok(ShiftPrice {
            amount: Decimal::ZERO,
            base: Decimal::ZERO,
            bonus: Decimal::ZERO,
            delivery: Decimal::ZERO,
            percentage,
        });
    }

    let delivery = shift.delivery.unwrap_or(Decimal::ZERO);
    if delivery < Decimal::ZERO {
        return Err(invalid_shift(
            shift,
            format!("delivery must not be negative, got {}", delivery),
        ));
    }

    let base = match shift.hours {
        Some(hours) if hours < Decimal::ZERO => {
            return Err(invalid_shift(
                shift,
                format!("hours must not be negative, got {}", hours),
            ));
        }
        Some(hours) => hours.checked_mul(constants.hourly_rate).ok_or_else(|| {
            invalid_shift(
                shift,
                format!(
                    "{} hours at {} is out of range",
                    hours, constants.hourly_rate
                ),
            )
        })?,
        None => match shift.shift_type {
            ShiftType::Full => constants.base_rate,
            ShiftType::Half => constants.base_rate / Decimal::TWO,
        },
    };

    let bonus = daily_revenue
        .checked_mul(percentage)
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| {
            EngineError::invalid_revenue(
                daily_revenue,
                format!("bonus at {}% is out of range", percentage),
            )
        })?;

    let earned = base.checked_add(bonus).ok_or_else(|| {
        EngineError::invalid_revenue(daily_revenue, "base plus bonus is out of range")
    })?;
    let amount = earned
        .checked_add(delivery)
        .ok_or_else(|| {
            invalid_shift(
                shift,
                format!("delivery {} on top of {} is out of range", delivery, earned),
            )
        })?
        .round_dp_with_strategy(currency_scale, RoundingStrategy::MidpointAwayFromZero);

    Ok(ShiftPrice {
        amount,
        base,
        bonus,
        delivery,
        percentage,
    })
}

fn invalid_shift(shift: &EmployeeShift, message: String) -> EngineError {
    EngineError::InvalidShift {
        date: shift.date,
        message,
    }
}

/// Computes what a single shift pays.
///
/// # Rules
///
/// - An unworked day pays 0.
/// - Base: `hours * hourly_rate` when the shift is hour-tracked; otherwise
///   `base_rate` for a full day and `base_rate / 2` for a half day. Hours take
///   precedence over the shift type.
/// - Bonus: `daily_revenue * percentage / 100`.
/// - Delivery compensation is added as is.
/// - The sum is rounded once, to `currency_scale` decimal places.
///
/// # Returns
///
/// Returns a `ShiftPayResult`, or an error if:
/// - the revenue is negative, or the bonus leaves the `Decimal` range (`InvalidRevenue`)
/// - the shift carries negative hours or delivery, or either pushes the pay
///   out of range (`InvalidShift`)
///
/// # Examples
///
/// ```
/// use cafe_payroll::calculation::compute_shift_pay;
/// use cafe_payroll::config::SalaryConstants;
/// use cafe_payroll::models::{EmployeeShift, ShiftType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let constants = SalaryConstants {
///     base_rate: Decimal::from(1000),
///     hourly_rate: Decimal::from(100),
///     revenue_threshold: Decimal::from(50000),
///     percentage_below: Decimal::from(5),
///     percentage_above: Decimal::from(8),
/// };
/// let shift = EmployeeShift::worked(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), ShiftType::Full);
///
/// let result = compute_shift_pay(&shift, Decimal::from(60000), &constants, 2, 1).unwrap();
/// assert_eq!(result.amount, Decimal::from(5800));
/// ```
pub fn compute_shift_pay(
    shift: &EmployeeShift,
    daily_revenue: Decimal,
    constants: &SalaryConstants,
    currency_scale: u32,
    step_number: u32,
) -> EngineResult<ShiftPayResult> {
    let price = price_shift(shift, daily_revenue, constants, currency_scale)?;

    let audit_step = if shift.worked {
        let base_reasoning = match (shift.hours, shift.shift_type) {
            (Some(hours), _) => format!(
                "{}h × {}",
                hours.normalize(),
                constants.hourly_rate.normalize()
            ),
            (None, ShiftType::Full) => format!("full day {}", constants.base_rate.normalize()),
            (None, ShiftType::Half) => {
                format!("half day {} / 2", constants.base_rate.normalize())
            }
        };

        AuditStep {
            step_number,
            rule_id: SHIFT_PAY_RULE.to_string(),
            rule_name: "Shift Pay".to_string(),
            input: serde_json::json!({
                "date": shift.date.to_string(),
                "worked": true,
                "shift_type": shift.shift_type,
                "hours": shift.hours.map(|h| h.normalize().to_string()),
                "delivery": price.delivery.normalize().to_string(),
                "daily_revenue": daily_revenue.normalize().to_string(),
                "revenue_threshold": constants.revenue_threshold.normalize().to_string()
            }),
            output: serde_json::json!({
                "base": price.base.normalize().to_string(),
                "percentage": price.percentage.normalize().to_string(),
                "bonus": price.bonus.normalize().to_string(),
                "amount": price.amount.normalize().to_string()
            }),
            reasoning: format!(
                "{} + {} × {}% + delivery {} = {}",
                base_reasoning,
                daily_revenue.normalize(),
                price.percentage.normalize(),
                price.delivery.normalize(),
                price.amount.normalize()
            ),
        }
    } else {
        AuditStep {
            step_number,
            rule_id: SHIFT_PAY_RULE.to_string(),
            rule_name: "Shift Pay".to_string(),
            input: serde_json::json!({
                "date": shift.date.to_string(),
                "worked": false,
                "daily_revenue": daily_revenue.normalize().to_string()
            }),
            output: serde_json::json!({
                "amount": "0"
            }),
            reasoning: "Day not worked - no pay".to_string(),
        }
    };

    Ok(ShiftPayResult {
        date: shift.date,
        amount: price.amount,
        base: price.base,
        bonus: price.bonus,
        delivery: price.delivery,
        percentage: price.percentage,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn constants() -> SalaryConstants {
        SalaryConstants {
            base_rate: dec("1000"),
            hourly_rate: dec("100"),
            revenue_threshold: dec("50000"),
            percentage_below: dec("5"),
            percentage_above: dec("8"),
        }
    }

    fn full_shift() -> EmployeeShift {
        EmployeeShift::worked(make_date("2025-03-10"), ShiftType::Full)
    }

    /// SP-001: full-day shift above threshold
    #[test]
    fn test_full_day_above_threshold() {
        let result = compute_shift_pay(&full_shift(), dec("60000"), &constants(), 2, 1).unwrap();

        assert_eq!(result.amount, dec("5800"));
        assert_eq!(result.base, dec("1000"));
        assert_eq!(result.bonus, dec("4800"));
        assert_eq!(result.percentage, dec("8"));
    }

    /// SP-002: half-day shift below threshold
    #[test]
    fn test_half_day_below_threshold() {
        let shift = EmployeeShift::worked(make_date("2025-03-10"), ShiftType::Half);
        let result = compute_shift_pay(&shift, dec("40000"), &constants(), 2, 1).unwrap();

        assert_eq!(result.amount, dec("2500"));
        assert_eq!(result.base, dec("500"));
        assert_eq!(result.bonus, dec("2000"));
    }

    /// SP-003: hour-tracked shift overrides the flat rate
    #[test]
    fn test_hours_override_flat_rate() {
        let mut shift = full_shift();
        shift.hours = Some(dec("6"));

        let result = compute_shift_pay(&shift, dec("40000"), &constants(), 2, 1).unwrap();
        assert_eq!(result.amount, dec("2600"));
        assert_eq!(result.base, dec("600"));
    }

    /// SP-004: hours override the half-day rule as well
    #[test]
    fn test_hours_override_half_day() {
        let mut shift = EmployeeShift::worked(make_date("2025-03-10"), ShiftType::Half);
        shift.hours = Some(dec("3.5"));

        let result = compute_shift_pay(&shift, dec("0"), &constants(), 2, 1).unwrap();
        assert_eq!(result.amount, dec("350"));
    }

    /// SP-005: delivery is added regardless of revenue
    #[test]
    fn test_delivery_added() {
        let mut shift = full_shift();
        shift.delivery = Some(dec("350"));

        let result = compute_shift_pay(&shift, dec("60000"), &constants(), 2, 1).unwrap();
        assert_eq!(result.amount, dec("6150"));
        assert_eq!(result.delivery, dec("350"));
    }

    /// SP-006: unworked day pays nothing
    #[test]
    fn test_unworked_day_pays_zero() {
        let mut shift = EmployeeShift::placeholder(make_date("2025-03-10"));
        shift.hours = Some(dec("8"));
        shift.delivery = Some(dec("500"));

        let result = compute_shift_pay(&shift, dec("90000"), &constants(), 2, 1).unwrap();
        assert_eq!(result.amount, Decimal::ZERO);
        assert_eq!(result.audit_step.reasoning, "Day not worked - no pay");
    }

    /// SP-007: revenue exactly at threshold uses the upper percentage
    #[test]
    fn test_revenue_at_threshold() {
        assert_eq!(
            resolve_percentage(dec("50000"), &constants()).unwrap(),
            dec("8")
        );
        assert_eq!(
            resolve_percentage(dec("49999.99"), &constants()).unwrap(),
            dec("5")
        );
    }

    #[test]
    fn test_negative_revenue_rejected() {
        let result = resolve_percentage(dec("-0.01"), &constants());
        assert!(matches!(result, Err(EngineError::InvalidRevenue { .. })));

        let result = compute_shift_pay(&full_shift(), dec("-5"), &constants(), 2, 1);
        assert!(matches!(result, Err(EngineError::InvalidRevenue { .. })));
    }

    #[test]
    fn test_non_finite_revenue_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            match revenue_from_f64(value) {
                Err(EngineError::InvalidRevenue { message, .. }) => {
                    assert!(message.contains("finite"));
                }
                other => panic!("Expected InvalidRevenue, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_negative_hours_rejected() {
        let mut shift = full_shift();
        shift.hours = Some(dec("-1"));

        let result = compute_shift_pay(&shift, dec("1000"), &constants(), 2, 1);
        assert!(matches!(result, Err(EngineError::InvalidShift { .. })));
    }

    #[test]
    fn test_negative_delivery_rejected() {
        let mut shift = full_shift();
        shift.delivery = Some(dec("-100"));

        let result = compute_shift_pay(&shift, dec("1000"), &constants(), 2, 1);
        assert!(matches!(result, Err(EngineError::InvalidShift { .. })));
    }

    #[test]
    fn test_revenue_out_of_range_is_typed_error() {
        let result = compute_shift_pay(&full_shift(), Decimal::MAX, &constants(), 2, 1);
        match result {
            Err(EngineError::InvalidRevenue { message, .. }) => {
                assert!(message.contains("out of range"));
            }
            other => panic!("Expected InvalidRevenue, got {:?}", other),
        }
    }

    #[test]
    fn test_hours_out_of_range_is_typed_error() {
        let mut shift = full_shift();
        shift.hours = Some(Decimal::MAX);

        let result = compute_shift_pay(&shift, dec("1000"), &constants(), 2, 1);
        assert!(matches!(result, Err(EngineError::InvalidShift { .. })));
    }

    #[test]
    fn test_delivery_out_of_range_is_typed_error() {
        let mut shift = full_shift();
        shift.delivery = Some(Decimal::MAX);

        match compute_shift_pay(&shift, dec("60000"), &constants(), 2, 1) {
            Err(EngineError::InvalidShift { date, message }) => {
                assert_eq!(date, make_date("2025-03-10"));
                assert!(message.contains("delivery"));
            }
            other => panic!("Expected InvalidShift, got {:?}", other),
        }
    }

    #[test]
    fn test_unworked_day_ignores_out_of_range_fields() {
        let mut shift = EmployeeShift::placeholder(make_date("2025-03-10"));
        shift.hours = Some(Decimal::MAX);
        shift.delivery = Some(Decimal::MAX);

        let result = compute_shift_pay(&shift, dec("60000"), &constants(), 2, 1).unwrap();
        assert_eq!(result.amount, Decimal::ZERO);
    }

    #[test]
    fn test_price_matches_audited_result() {
        let mut shift = full_shift();
        shift.hours = Some(dec("6.5"));
        shift.delivery = Some(dec("120.25"));

        let price = price_shift(&shift, dec("55000"), &constants(), 2).unwrap();
        let result = compute_shift_pay(&shift, dec("55000"), &constants(), 2, 1).unwrap();
        assert_eq!(price.amount, result.amount);
        assert_eq!(price.base, result.base);
        assert_eq!(price.bonus, result.bonus);
        assert_eq!(price.percentage, result.percentage);
    }

    #[test]
    fn test_rounding_applies_to_final_sum() {
        // 0.333 + 0.333 would round to 0.33 + 0.33 = 0.66 per component;
        // rounding the sum gives 0.67.
        let constants = SalaryConstants {
            base_rate: dec("0"),
            hourly_rate: dec("0.333"),
            revenue_threshold: dec("1000000"),
            percentage_below: dec("33.3"),
            percentage_above: dec("33.3"),
        };
        let mut shift = full_shift();
        shift.hours = Some(dec("1"));

        let result = compute_shift_pay(&shift, dec("1"), &constants, 2, 1).unwrap();
        assert_eq!(result.amount, dec("0.67"));
    }

    #[test]
    fn test_rounding_midpoint_away_from_zero() {
        let mut shift = full_shift();
        shift.hours = Some(dec("0.125"));
        let constants = SalaryConstants {
            base_rate: dec("0"),
            hourly_rate: dec("1"),
            revenue_threshold: dec("0"),
            percentage_below: dec("0"),
            percentage_above: dec("0"),
        };

        let result = compute_shift_pay(&shift, dec("0"), &constants, 2, 1).unwrap();
        assert_eq!(result.amount, dec("0.13"));
    }

    #[test]
    fn test_audit_step_contents() {
        let result = compute_shift_pay(&full_shift(), dec("60000"), &constants(), 2, 7).unwrap();
        let step = result.audit_step;

        assert_eq!(step.step_number, 7);
        assert_eq!(step.rule_id, SHIFT_PAY_RULE);
        assert_eq!(step.input["shift_type"], "full");
        assert_eq!(step.output["percentage"], "8");
        assert_eq!(step.output["amount"], "5800");
        assert_eq!(step.reasoning, "full day 1000 + 60000 × 8% + delivery 0 = 5800");
    }

    fn revenue_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..10_000_000i64, 0u32..3).prop_map(|(units, scale)| Decimal::new(units, scale))
    }

    /// Constants that pass `SalaryConstants::validate`.
    fn valid_constants_strategy() -> impl Strategy<Value = SalaryConstants> {
        (
            revenue_strategy(),
            0i64..10_000i64,
            0i64..10_000i64,
        )
            .prop_map(|(threshold, p1, p2)| {
                let (below, above) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
                SalaryConstants {
                    base_rate: dec("1000"),
                    hourly_rate: dec("100"),
                    revenue_threshold: threshold,
                    percentage_below: Decimal::new(below, 2),
                    percentage_above: Decimal::new(above, 2),
                }
            })
    }

    proptest! {
        #[test]
        fn prop_percentage_is_one_of_the_configured_pair(
            revenue in revenue_strategy(),
            c in valid_constants_strategy(),
        ) {
            prop_assert!(c.validate().is_ok());
            let percentage = resolve_percentage(revenue, &c).unwrap();
            prop_assert!(percentage == c.percentage_below || percentage == c.percentage_above);
        }

        #[test]
        fn prop_percentage_monotonic_across_threshold(
            a in revenue_strategy(),
            b in revenue_strategy(),
            c in valid_constants_strategy(),
        ) {
            prop_assert!(c.validate().is_ok());
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let p_low = resolve_percentage(low, &c).unwrap();
            let p_high = resolve_percentage(high, &c).unwrap();
            prop_assert!(p_low <= p_high);
        }

        #[test]
        fn prop_unworked_shift_pays_zero(
            revenue in revenue_strategy(),
            hours in proptest::option::of(0i64..2_400i64),
            delivery in proptest::option::of(0i64..100_000i64),
            half in any::<bool>(),
        ) {
            let shift = EmployeeShift {
                date: make_date("2025-03-10"),
                worked: false,
                percentage: Decimal::ZERO,
                hours: hours.map(|h| Decimal::new(h, 2)),
                delivery: delivery.map(Decimal::from),
                shift_type: if half { ShiftType::Half } else { ShiftType::Full },
            };
            let result = compute_shift_pay(&shift, revenue, &constants(), 2, 1).unwrap();
            prop_assert_eq!(result.amount, Decimal::ZERO);
        }
    }
}
