use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{CostResult, accumulator::MatchedPeriod, tariff::DayOfWeek},
    quantity::cost::Cost,
    statistics::{monthly::MonthlyImportExport, top_days::DayTotal},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn cost_color(cost: Cost) -> Color {
    if cost.0 > 0.0 {
        Color::Red
    } else if cost.0 < 0.0 {
        Color::Green
    } else {
        Color::Reset
    }
}

#[must_use]
pub fn build_cost_table(result: &CostResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["From", "To", "Bucket", "Tariff", "Energy", "Fixed fee", "Total", "Unit"]);
    table.add_row(vec![
        Cell::new(result.window.from.format("%Y-%m-%d %H:%M")),
        Cell::new(result.window.to.format("%Y-%m-%d %H:%M")).add_attribute(Attribute::Dim),
        Cell::new(result.window.bucket),
        Cell::new(result.normalized_tariff.kind()),
        Cell::new(result.breakdown.energy).set_alignment(CellAlignment::Right),
        Cell::new(result.breakdown.fixed_fee).set_alignment(CellAlignment::Right),
        Cell::new(result.total)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold)
            .fg(cost_color(result.total)),
        Cell::new(&result.unit),
    ]);
    table
}

#[must_use]
pub fn build_trace_table(trace: &[MatchedPeriod]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Timestamp", "Local hour", "Day", "Period", "Cost"]);
    for matched in trace {
        let day = DayOfWeek::from_index(matched.day_of_week)
            .map_or_else(|| matched.day_of_week.to_string(), |day| format!("{day:?}"));
        table.add_row(vec![
            Cell::new(matched.timestamp.format("%Y-%m-%d %H:%M")),
            Cell::new(format!("{:02}:00", matched.local_hour)),
            Cell::new(day).add_attribute(Attribute::Dim),
            Cell::new(&matched.period),
            Cell::new(matched.cost).set_alignment(CellAlignment::Right).fg(cost_color(matched.cost)),
        ]);
    }
    table
}

#[must_use]
pub fn build_monthly_table(monthly: &MonthlyImportExport) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Month", "Import", "Export", "Net"]);
    for month in &monthly.months {
        table.add_row(vec![
            Cell::new(&month.month),
            Cell::new(month.import).set_alignment(CellAlignment::Right).fg(Color::Red),
            Cell::new(month.export).set_alignment(CellAlignment::Right).fg(Color::Green),
            Cell::new(month.import - month.export).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_top_days_table(top_days: &[DayTotal]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Day", "Total"]);
    for (rank, day) in top_days.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1).add_attribute(Attribute::Dim),
            Cell::new(day.day.format("%Y-%m-%d")),
            Cell::new(format!("{:.3}", day.total)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
