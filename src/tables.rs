use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use smt::api::{DayReadings, IntervalReads};

/// Days above this share of the highest daily total are highlighted.
const HIGH_PEAK_RATIO: f64 = 0.9;

pub fn build_interval_reads_table(reads: &IntervalReads) -> Table {
    let max_total = reads.into_iter().map(DayReadings::total).fold(0.0, f64::max);

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Date", "Readings", "Total, kWh", "Peak, kWh"]);
    for day in reads {
        let total = day.total();
        let peak = day.readings.iter().copied().fold(0.0, f64::max);
        table.add_row(vec![
            Cell::new(&day.date),
            Cell::new(day.readings.len()).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(format!("{total:.3}")).set_alignment(CellAlignment::Right).fg(
                if max_total > 0.0 && total >= max_total * HIGH_PEAK_RATIO { Color::Red } else { Color::Green },
            ),
            Cell::new(format!("{peak:.3}")).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_interval_reads_table_ok() {
        let reads = IntervalReads(vec![
            DayReadings { date: "01/18/2021".to_owned(), readings: vec![0.25, 0.5] },
            DayReadings { date: "01/19/2021".to_owned(), readings: vec![1.0] },
        ]);
        let rendered = build_interval_reads_table(&reads).to_string();
        assert!(rendered.contains("01/18/2021"));
        assert!(rendered.contains("0.750"));
        assert!(rendered.contains("1.000"));
    }
}
