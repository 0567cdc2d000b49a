use chrono::NaiveDate;

use crate::{
    ledger::BillingRecord,
    quantity::{cost::Cost, energy::KilowattHours, proportion::Proportion, rate::KilowattHourRate},
};

/// Tariff components applied to every consumed kilowatt-hour.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tariff {
    /// TE, the energy component.
    pub energy_rate: KilowattHourRate,

    /// TUSD, the distribution component.
    pub distribution_rate: KilowattHourRate,
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            energy_rate: KilowattHourRate(0.373_617_03),
            distribution_rate: KilowattHourRate(0.551_968_09),
        }
    }
}

/// Consumption between two meter readings and what it costs.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bill {
    pub usage: KilowattHours,
    pub energy_cost: Cost,
    pub distribution_cost: Cost,

    /// Energy and distribution costs multiplied by the share.
    pub total_cost: Cost,
}

impl Bill {
    /// Compute the bill.
    ///
    /// The readings are taken as is: a current reading below the previous one
    /// yields a negative usage and negative costs.
    pub fn compute(
        previous: KilowattHours,
        current: KilowattHours,
        tariff: Tariff,
        share: Proportion,
    ) -> Self {
        let usage = current - previous;
        let energy_cost = usage * tariff.energy_rate;
        let distribution_cost = usage * tariff.distribution_rate;
        Self {
            usage,
            energy_cost,
            distribution_cost,
            total_cost: (energy_cost + distribution_cost) * share,
        }
    }

    pub fn into_record(self, date: NaiveDate, reading: KilowattHours) -> BillingRecord {
        BillingRecord::builder()
            .date(date)
            .reading(reading)
            .usage(self.usage)
            .energy_cost(self.energy_cost)
            .distribution_cost(self.distribution_cost)
            .total_cost(self.total_cost)
            .build()
    }
}
