use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

/// Monetary amount in integer minor units.
///
/// Arithmetic saturates at the `i64` bounds instead of overflowing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cents(i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn amount(self) -> i64 {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }
}

/// Rounds half-up on the scaled value, so `-0.005` becomes `0` and `0.005` becomes `1`.
pub fn to_cents(value: f64) -> Cents {
    Cents((value * 100.0 + 0.5).floor() as i64)
}

pub fn to_dollars(cents: Cents) -> f64 {
    cents.0 as f64 / 100.0
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Cents {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Cents {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for Cents {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Cents::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::whole(120.0, 12_000)]
    #[case::float_noise(0.1 + 0.2, 30)]
    #[case::third(33.333_333, 3_333)]
    #[case::half_cent_up(1.005 + 1e-9, 101)]
    #[case::negative(-40.0, -4_000)]
    #[case::negative_half(-0.005, 0)]
    #[case::nan(f64::NAN, 0)]
    fn converts_to_cents(#[case] value: f64, #[case] expected: i64) {
        assert_eq!(to_cents(value), Cents::new(expected));
    }

    #[rstest]
    #[case(Cents::new(3_334), 33.34)]
    #[case(Cents::new(-4_000), -40.0)]
    #[case(Cents::ZERO, 0.0)]
    fn converts_to_dollars(#[case] cents: Cents, #[case] expected: f64) {
        assert_eq!(to_dollars(cents), expected);
    }

    #[rstest]
    #[case(Cents::new(1_205), "12.05")]
    #[case(Cents::new(-1_205), "-12.05")]
    #[case(Cents::new(-5), "-0.05")]
    #[case(Cents::ZERO, "0.00")]
    fn displays_two_decimals(#[case] cents: Cents, #[case] expected: &str) {
        assert_eq!(cents.to_string(), expected);
    }

    #[test]
    fn sums_and_negates() {
        let total: Cents = [Cents::new(3_333), Cents::new(3_333), Cents::new(3_334)]
            .into_iter()
            .sum();
        assert_eq!(total, Cents::new(10_000));
        assert_eq!(-total, Cents::new(-10_000));
        assert_eq!((total - Cents::new(20_000)).abs(), total);
    }

    #[rstest]
    #[case::add_past_max(Cents::new(i64::MAX) + Cents::new(1), i64::MAX)]
    #[case::sub_past_min(Cents::new(i64::MIN) - Cents::new(1), i64::MIN)]
    #[case::max_minus_min(Cents::new(i64::MAX) - Cents::new(i64::MIN), i64::MAX)]
    #[case::neg_min(-Cents::new(i64::MIN), i64::MAX)]
    #[case::abs_min(Cents::new(i64::MIN).abs(), i64::MAX)]
    #[case::sum_past_max([Cents::new(i64::MAX); 2].into_iter().sum(), i64::MAX)]
    fn arithmetic_saturates(#[case] result: Cents, #[case] expected: i64) {
        assert_eq!(result, Cents::new(expected));
    }

    #[test]
    fn assign_ops_saturate() {
        let mut cents = Cents::new(i64::MAX - 1);
        cents += Cents::new(10);
        assert_eq!(cents, Cents::new(i64::MAX));
        cents = Cents::new(i64::MIN + 1);
        cents -= Cents::new(10);
        assert_eq!(cents, Cents::new(i64::MIN));
    }

    #[rstest]
    #[case::infinity(f64::INFINITY, i64::MAX)]
    #[case::negative_infinity(f64::NEG_INFINITY, i64::MIN)]
    #[case::beyond_range(1e300, i64::MAX)]
    fn out_of_range_amounts_saturate(#[case] value: f64, #[case] expected: i64) {
        assert_eq!(to_cents(value), Cents::new(expected));
    }
}
