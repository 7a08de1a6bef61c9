//! Monthly aggregation functionality.
//!
//! This module folds a month of per-day shift records and the daily revenue
//! series into per-employee half-month and month totals.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use super::salary_rules::{price_shift, validate_revenue};
use crate::config::SalaryConstants;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeSalary, EmployeeShift, MonthlyData, PayrollMonth};

/// Aggregates a month of shifts into [`MonthlyData`].
///
/// For every employee and every day `i` (0-based) the shift is paid against
/// `revenues[i]`. Days `1..=first_half_boundary_day` accumulate into
/// `first_half_total`, the rest into `second_half_total`, and `month_total`
/// is the sum of the two. Each returned shift carries the percentage resolved
/// for its day.
///
/// The function is pure and all-or-nothing: on any error no `MonthlyData` is
/// produced and the inputs are left untouched.
///
/// # Returns
///
/// Returns the aggregate, or an error if:
/// - the constants are invalid or the boundary day is not a day of the month (`InvalidConfig`)
/// - the revenue series or a shift list is not one entry per day (`LengthMismatch`)
/// - a revenue is negative, or a bonus leaves the `Decimal` range (`InvalidRevenue`)
/// - a shift is out of order, carries negative hours/delivery, or pushes a
///   half or month total out of range (`InvalidShift`)
///
/// # Examples
///
/// ```
/// use cafe_payroll::calculation::aggregate;
/// use cafe_payroll::config::SalaryConstants;
/// use cafe_payroll::models::{EmployeeShift, PayrollMonth, ShiftType};
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let month = PayrollMonth::new(2025, 2).unwrap();
/// let constants = SalaryConstants {
///     base_rate: Decimal::from(1000),
///     hourly_rate: Decimal::from(100),
///     revenue_threshold: Decimal::from(50000),
///     percentage_below: Decimal::from(5),
///     percentage_above: Decimal::from(8),
/// };
/// let shifts: Vec<EmployeeShift> = month
///     .dates()
///     .map(|d| EmployeeShift::worked(d, ShiftType::Full))
///     .collect();
/// let mut lists = BTreeMap::new();
/// lists.insert("anna".to_string(), shifts);
/// let revenues = vec![Decimal::from(40000); 28];
///
/// let data = aggregate(month, &revenues, &lists, &constants, 15, 2).unwrap();
/// let anna = data.employee("anna").unwrap();
/// assert_eq!(anna.first_half_total, Decimal::from(15 * 3000));
/// assert_eq!(anna.second_half_total, Decimal::from(13 * 3000));
/// assert_eq!(anna.month_total, anna.first_half_total + anna.second_half_total);
/// ```
pub fn aggregate(
    month: PayrollMonth,
    revenues: &[Decimal],
    employee_shifts: &BTreeMap<String, Vec<EmployeeShift>>,
    constants: &SalaryConstants,
    first_half_boundary_day: u32,
    currency_scale: u32,
) -> EngineResult<MonthlyData> {
    constants.validate()?;

    let days = month.days();
    if first_half_boundary_day == 0 || first_half_boundary_day > days {
        return Err(EngineError::InvalidConfig {
            field: "half_boundary_day".to_string(),
            message: format!(
                "must be between 1 and {} for {}-{:02}, got {}",
                days,
                month.year(),
                month.month(),
                first_half_boundary_day
            ),
        });
    }

    ensure_len("revenues", days as usize, revenues.len())?;
    for (i, revenue) in revenues.iter().enumerate() {
        validate_revenue(*revenue).map_err(|_| {
            EngineError::invalid_revenue(
                *revenue,
                format!("revenue for day {} must not be negative", i + 1),
            )
        })?;
    }

    let mut employees = BTreeMap::new();

    for (employee_id, shifts) in employee_shifts {
        ensure_len(
            &format!("shifts of '{}'", employee_id),
            revenues.len(),
            shifts.len(),
        )?;

        let mut first_half_total = Decimal::ZERO;
        let mut second_half_total = Decimal::ZERO;
        let mut resolved = Vec::with_capacity(shifts.len());

        for ((day, shift), revenue) in (1u32..).zip(shifts).zip(revenues) {
            if month.date_of_day(day) != Some(shift.date) {
                return Err(EngineError::InvalidShift {
                    date: shift.date,
                    message: format!(
                        "expected day {} of {}-{:02} for employee '{}'",
                        day,
                        month.year(),
                        month.month(),
                        employee_id
                    ),
                });
            }

            let price = price_shift(shift, *revenue, constants, currency_scale)?;

            let half_total = if day <= first_half_boundary_day {
                &mut first_half_total
            } else {
                &mut second_half_total
            };
            *half_total = half_total
                .checked_add(price.amount)
                .ok_or_else(|| total_out_of_range(employee_id, shift))?;

            resolved.push(EmployeeShift {
                percentage: price.percentage,
                ..shift.clone()
            });
        }

        let last = shifts.last();
        let salary = EmployeeSalary::new(
            employee_id.clone(),
            resolved,
            first_half_total,
            second_half_total,
        )
        .ok_or_else(|| match last {
            Some(shift) => total_out_of_range(employee_id, shift),
            None => EngineError::invalid_revenue(
                second_half_total,
                format!("month total of '{}' is out of range", employee_id),
            ),
        })?;

        debug!(
            employee_id = %employee_id,
            shift_count = salary.shift_count,
            month_total = %salary.month_total,
            "Aggregated employee month"
        );

        employees.insert(employee_id.clone(), salary);
    }

    Ok(MonthlyData {
        year: month.year(),
        month: month.month(),
        days,
        half_boundary_day: first_half_boundary_day,
        revenues: revenues.to_vec(),
        employees,
    })
}

fn total_out_of_range(employee_id: &str, shift: &EmployeeShift) -> EngineError {
    EngineError::InvalidShift {
        date: shift.date,
        message: format!("pay total of '{}' is out of range", employee_id),
    }
}

fn ensure_len(subject: &str, expected: usize, actual: usize) -> EngineResult<()> {
    if expected != actual {
        return Err(EngineError::LengthMismatch {
            subject: subject.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftType;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
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

    fn month(m: u32) -> PayrollMonth {
        PayrollMonth::new(2025, m).unwrap()
    }

    fn placeholders(month: PayrollMonth) -> Vec<EmployeeShift> {
        month.dates().map(EmployeeShift::placeholder).collect()
    }

    fn single(id: &str, shifts: Vec<EmployeeShift>) -> BTreeMap<String, Vec<EmployeeShift>> {
        let mut lists = BTreeMap::new();
        lists.insert(id.to_string(), shifts);
        lists
    }

    /// AG-001: days up to the boundary go to the first half
    #[test]
    fn test_split_at_boundary() {
        let april = month(4);
        let mut shifts = placeholders(april);
        shifts[14] = EmployeeShift::worked(shifts[14].date, ShiftType::Full); // day 15
        shifts[15] = EmployeeShift::worked(shifts[15].date, ShiftType::Half); // day 16

        let revenues = vec![dec("40000"); 30];
        let data = aggregate(april, &revenues, &single("anna", shifts), &constants(), 15, 2)
            .unwrap();

        let anna = data.employee("anna").unwrap();
        assert_eq!(anna.first_half_total, dec("3000"));
        assert_eq!(anna.second_half_total, dec("2500"));
        assert_eq!(anna.month_total, dec("5500"));
        assert_eq!(anna.shift_count, 2);
    }

    /// AG-002: revenue length mismatch fails with no result
    #[test]
    fn test_revenue_length_mismatch() {
        let april = month(4);
        let revenues = vec![dec("1000"); 28];
        let result = aggregate(
            april,
            &revenues,
            &single("anna", placeholders(april)),
            &constants(),
            15,
            2,
        );

        match result {
            Err(EngineError::LengthMismatch {
                subject,
                expected,
                actual,
            }) => {
                assert_eq!(subject, "revenues");
                assert_eq!(expected, 30);
                assert_eq!(actual, 28);
            }
            other => panic!("Expected LengthMismatch, got {:?}", other),
        }
    }

    /// AG-003: 30 revenues, 28 shifts fails with a length mismatch
    #[test]
    fn test_shift_list_length_mismatch() {
        let april = month(4);
        let revenues = vec![dec("1000"); 30];
        let mut shifts = placeholders(april);
        shifts.truncate(28);

        let result = aggregate(april, &revenues, &single("anna", shifts), &constants(), 15, 2);

        match result {
            Err(EngineError::LengthMismatch {
                subject,
                expected,
                actual,
            }) => {
                assert_eq!(subject, "shifts of 'anna'");
                assert_eq!(expected, 30);
                assert_eq!(actual, 28);
            }
            other => panic!("Expected LengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_order_shift_rejected() {
        let april = month(4);
        let mut shifts = placeholders(april);
        shifts.swap(0, 1);

        let result = aggregate(
            april,
            &vec![dec("0"); 30],
            &single("anna", shifts),
            &constants(),
            15,
            2,
        );
        assert!(matches!(result, Err(EngineError::InvalidShift { .. })));
    }

    #[test]
    fn test_negative_revenue_names_day() {
        let april = month(4);
        let mut revenues = vec![dec("100"); 30];
        revenues[9] = dec("-1");

        match aggregate(april, &revenues, &BTreeMap::new(), &constants(), 15, 2) {
            Err(EngineError::InvalidRevenue { message, .. }) => {
                assert!(message.contains("day 10"));
            }
            other => panic!("Expected InvalidRevenue, got {:?}", other),
        }
    }

    #[test]
    fn test_boundary_outside_month_rejected() {
        let february = month(2);
        let result = aggregate(
            february,
            &vec![dec("0"); 28],
            &BTreeMap::new(),
            &constants(),
            29,
            2,
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_resolved_percentage_written_to_shifts() {
        let april = month(4);
        let mut revenues = vec![dec("10000"); 30];
        revenues[0] = dec("70000");

        let data = aggregate(
            april,
            &revenues,
            &single("anna", placeholders(april)),
            &constants(),
            15,
            2,
        )
        .unwrap();

        let shifts = &data.employee("anna").unwrap().shifts;
        assert_eq!(shifts[0].percentage, dec("8"));
        assert_eq!(shifts[1].percentage, dec("5"));
        assert_eq!(data.employee("anna").unwrap().month_total, Decimal::ZERO);
    }

    #[test]
    fn test_multiple_employees_and_read_model_fields() {
        let april = month(4);
        let mut anna = placeholders(april);
        let mut boris = placeholders(april);
        anna[0] = EmployeeShift::worked(anna[0].date, ShiftType::Full);
        boris[20] = EmployeeShift {
            hours: Some(dec("6")),
            delivery: Some(dec("250.50")),
            ..EmployeeShift::worked(boris[20].date, ShiftType::Full)
        };

        let mut lists = BTreeMap::new();
        lists.insert("anna".to_string(), anna);
        lists.insert("boris".to_string(), boris);

        let revenues = vec![dec("60000"); 30];
        let data = aggregate(april, &revenues, &lists, &constants(), 15, 2).unwrap();

        assert_eq!(data.year, 2025);
        assert_eq!(data.month, 4);
        assert_eq!(data.days, 30);
        assert_eq!(data.half_boundary_day, 15);
        assert_eq!(data.revenues.len(), 30);
        assert_eq!(data.employees.len(), 2);
        assert_eq!(data.employee("anna").unwrap().first_half_total, dec("5800"));

        let boris = data.employee("boris").unwrap();
        assert_eq!(boris.first_half_total, Decimal::ZERO);
        assert_eq!(boris.second_half_total, dec("5650.50"));
        assert_eq!(data.total_payroll(), Some(dec("11450.50")));
    }

    #[test]
    fn test_out_of_range_shift_fails_whole_month() {
        let april = month(4);
        let mut anna = placeholders(april);
        anna[0] = EmployeeShift::worked(anna[0].date, ShiftType::Full);
        let mut boris = placeholders(april);
        boris[3] = EmployeeShift {
            hours: Some(Decimal::MAX),
            ..EmployeeShift::worked(boris[3].date, ShiftType::Full)
        };

        let mut lists = BTreeMap::new();
        lists.insert("anna".to_string(), anna);
        lists.insert("boris".to_string(), boris);

        match aggregate(april, &vec![dec("60000"); 30], &lists, &constants(), 15, 2) {
            Err(EngineError::InvalidShift { date, .. }) => {
                assert_eq!(date, april.date_of_day(4).unwrap());
            }
            other => panic!("Expected InvalidShift, got {:?}", other),
        }
    }

    #[test]
    fn test_half_total_overflow_is_typed_error() {
        let april = month(4);
        let huge = Decimal::MAX / Decimal::TWO;
        let mut shifts = placeholders(april);
        for day in [0, 1, 2] {
            shifts[day] = EmployeeShift {
                delivery: Some(huge),
                ..EmployeeShift::worked(shifts[day].date, ShiftType::Full)
            };
        }
        let constants = SalaryConstants {
            base_rate: Decimal::ZERO,
            ..constants()
        };

        let revenues = vec![Decimal::ZERO; 30];
        match aggregate(april, &revenues, &single("anna", shifts), &constants, 15, 2) {
            Err(EngineError::InvalidShift { message, .. }) => {
                assert!(message.contains("pay total of 'anna'"));
            }
            other => panic!("Expected InvalidShift, got {:?}", other),
        }
    }

    #[test]
    fn test_inputs_not_mutated() {
        let april = month(4);
        let lists = single("anna", placeholders(april));
        let before = lists.clone();
        let revenues = vec![dec("60000"); 30];

        aggregate(april, &revenues, &lists, &constants(), 15, 2).unwrap();
        assert_eq!(lists, before);
    }

    proptest! {
        #[test]
        fn prop_month_total_is_exact_sum_of_halves(
            worked in proptest::collection::vec(any::<bool>(), 31),
            halves in proptest::collection::vec(any::<bool>(), 31),
            revenue_units in proptest::collection::vec(0i64..10_000_000i64, 31),
            boundary in 1u32..=31,
        ) {
            let march = month(3);
            let shifts: Vec<EmployeeShift> = march
                .dates()
                .enumerate()
                .map(|(i, date)| EmployeeShift {
                    worked: worked[i],
                    shift_type: if halves[i] { ShiftType::Half } else { ShiftType::Full },
                    ..EmployeeShift::placeholder(date)
                })
                .collect();
            let revenues: Vec<Decimal> = revenue_units.iter().map(|u| Decimal::new(*u, 2)).collect();

            let data = aggregate(march, &revenues, &single("anna", shifts), &constants(), boundary, 2)
                .unwrap();
            let anna = data.employee("anna").unwrap();

            prop_assert_eq!(anna.month_total, anna.first_half_total + anna.second_half_total);
            prop_assert_eq!(anna.shifts.len(), 31);
            prop_assert_eq!(anna.shift_count as usize, worked.iter().filter(|w| **w).count());
        }
    }
}
