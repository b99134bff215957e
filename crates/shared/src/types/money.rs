//! Money as integer minor currency units.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `i64` minor units (e.g., cents); arithmetic that could
//! overflow goes through the checked constructors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount in minor currency units.
///
/// The ledger is single-currency; the unit (e.g., cents) is fixed by the
/// deployment. Amounts are signed so that folds over debit/credit ledgers
/// can go negative, but every public operation validates its own sign rules.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units.
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition; `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction; `None` on overflow.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Returns the smaller of two amounts.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_minor() {
        let m = Money::from_minor(50_000);
        assert_eq!(m.minor(), 50_000);
    }

    #[test]
    fn test_money_zero() {
        assert!(Money::ZERO.is_zero());
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::ZERO.is_negative());
    }

    #[test]
    fn test_money_signs() {
        assert!(Money::from_minor(1).is_positive());
        assert!(Money::from_minor(-1).is_negative());
        assert!(!Money::from_minor(-1).is_positive());
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_minor(20_000);
        let b = Money::from_minor(30_000);
        assert_eq!(a + b, Money::from_minor(50_000));
        assert_eq!(b - a, Money::from_minor(10_000));
        assert_eq!(-a, Money::from_minor(-20_000));
    }

    #[test]
    fn test_money_checked_overflow() {
        let max = Money::from_minor(i64::MAX);
        assert!(max.checked_add(Money::from_minor(1)).is_none());
        assert_eq!(
            max.checked_sub(Money::from_minor(1)),
            Some(Money::from_minor(i64::MAX - 1))
        );
    }

    #[test]
    fn test_money_min() {
        let a = Money::from_minor(100);
        let b = Money::from_minor(50);
        assert_eq!(a.min(b), b);
    }

    #[test]
    fn test_money_sum() {
        let total: Money = [10, 20, 30].map(Money::from_minor).into_iter().sum();
        assert_eq!(total, Money::from_minor(60));
    }

    #[test]
    fn test_money_ordering() {
        assert!(Money::from_minor(100) > Money::from_minor(99));
        assert!(Money::from_minor(-1) < Money::ZERO);
    }
}
