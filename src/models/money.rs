//! Overflow-checked money arithmetic.

use rust_decimal::Decimal;

/// Sums amounts, returning `None` if the total leaves the `Decimal` range.
///
/// # Example
///
/// ```
/// use cafe_payroll::models::checked_sum;
/// use rust_decimal::Decimal;
///
/// assert_eq!(checked_sum([Decimal::from(2), Decimal::from(3)]), Some(Decimal::from(5)));
/// assert_eq!(checked_sum([Decimal::MAX, Decimal::ONE]), None);
/// ```
pub fn checked_sum<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |total, value| total.checked_add(value))
}
