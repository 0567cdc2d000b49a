use std::{
    fmt::{Display, Formatter},
    ops::Mul,
};

use crate::quantity::{cost::Cost, rate::KilowattHourRate};

quantity!(
    /// Meter counter value, or the difference between two of them.
    KilowattHours,
    "kWh"
);

impl Display for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kWh", self.0)
    }
}

impl Mul<KilowattHourRate> for KilowattHours {
    type Output = Cost;

    fn mul(self, rhs: KilowattHourRate) -> Self::Output {
        Cost(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(KilowattHours(65.350_000_000_000_36).to_string(), "65.35 kWh");
    }

    #[test]
    fn test_mul_rate() {
        let cost = KilowattHours(10.0) * KilowattHourRate(0.5);
        assert_abs_diff_eq!(cost.0, 5.0);
    }
}
