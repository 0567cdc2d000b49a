use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::{Itertools, MinMaxResult};

use crate::{
    billing::{Bill, Tariff},
    ledger::{DATE_FORMAT, HEADERS, Ledger},
    quantity::{cost::Cost, proportion::Proportion},
};

/// Widest bar of the cost chart, in characters.
const CHART_WIDTH: usize = 40;

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn sign_color(value: f64) -> Color {
    if value < 0.0 { Color::Red } else { Color::Reset }
}

#[must_use]
pub fn build_bill_table(bill: &Bill, tariff: Tariff, share: Proportion) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Rate", "Amount"]);
    table.add_row(vec![
        Cell::new("Usage"),
        Cell::new(""),
        Cell::new(bill.usage).set_alignment(CellAlignment::Right).fg(sign_color(bill.usage.0)),
    ]);
    table.add_row(vec![
        Cell::new("TE"),
        Cell::new(tariff.energy_rate).add_attribute(Attribute::Dim),
        Cell::new(bill.energy_cost).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("TUSD"),
        Cell::new(tariff.distribution_rate).add_attribute(Attribute::Dim),
        Cell::new(bill.distribution_cost).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(share).add_attribute(Attribute::Dim),
        Cell::new(bill.total_cost)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold)
            .fg(sign_color(bill.total_cost.0)),
    ]);
    table
}

#[must_use]
pub fn build_ledger_table(ledger: &Ledger) -> Table {
    let mut table = new_table();
    table.set_header(HEADERS.to_vec());
    for record in ledger {
        table.add_row(vec![
            Cell::new(record.date.format(DATE_FORMAT)),
            Cell::new(format!("{:.2}", record.reading.0)).set_alignment(CellAlignment::Right),
            Cell::new(record.usage)
                .set_alignment(CellAlignment::Right)
                .fg(sign_color(record.usage.0)),
            Cell::new(record.energy_cost).set_alignment(CellAlignment::Right),
            Cell::new(record.distribution_cost).set_alignment(CellAlignment::Right),
            Cell::new(record.total_cost)
                .set_alignment(CellAlignment::Right)
                .fg(sign_color(record.total_cost.0)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(ledger.total_usage()).set_alignment(CellAlignment::Right),
        Cell::new(ledger.records().iter().map(|record| record.energy_cost).sum::<Cost>())
            .set_alignment(CellAlignment::Right),
        Cell::new(ledger.records().iter().map(|record| record.distribution_cost).sum::<Cost>())
            .set_alignment(CellAlignment::Right),
        Cell::new(ledger.total_cost())
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
    table
}

/// Total cost over the ledger dates, drawn as horizontal bars.
#[must_use]
pub fn build_chart_table(ledger: &Ledger) -> Table {
    let (floor, ceiling) = match ledger.records().iter().map(|record| record.total_cost).minmax() {
        MinMaxResult::NoElements => (Cost::ZERO, Cost::ZERO),
        MinMaxResult::OneElement(cost) => (cost.min(Cost::ZERO), cost.max(Cost::ZERO)),
        MinMaxResult::MinMax(min, max) => (min.min(Cost::ZERO), max.max(Cost::ZERO)),
    };
    let mut table = new_table();
    table.set_header(vec!["Date", "Total Cost", ""]);
    for record in ledger {
        let width = bar_width(record.total_cost, floor, ceiling);
        table.add_row(vec![
            Cell::new(record.date.format(DATE_FORMAT)),
            Cell::new(record.total_cost).set_alignment(CellAlignment::Right),
            Cell::new("█".repeat(width)).fg(if record.total_cost < Cost::ZERO {
                Color::Red
            } else {
                Color::Green
            }),
        ]);
    }
    table
}

/// Scale the cost onto `0..=CHART_WIDTH`.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn bar_width(cost: Cost, floor: Cost, ceiling: Cost) -> usize {
    let span = (ceiling - floor).0;
    if span.is_nan() || span <= 0.0 {
        return 0;
    }
    (((cost - floor).0 / span) * CHART_WIDTH as f64).round().clamp(0.0, CHART_WIDTH as f64) as usize
}
