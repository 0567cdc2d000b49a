use std::fmt::{Display, Formatter};

quantity!(
    /// Tariff component, currency per kilowatt-hour.
    KilowattHourRate,
    "R$/kWh"
);

impl Display for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "R$ {:.6}/kWh", self.0)
    }
}
