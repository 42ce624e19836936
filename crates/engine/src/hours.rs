//! Flight-hour normalization: "HH:MM" strings or numeric cells to decimal
//! hours.

use crate::model::Cell;

/// Convert a raw flight-hours cell to decimal hours.
///
/// Numeric cells pass through unchanged. Strings are trimmed; "HH:MM"
/// becomes `hours + minutes/60` rounded to 2 decimals (minutes >= 60 are
/// accepted, no range validation); anything else is parsed as a decimal
/// after stripping thousands-separator commas. Unparseable values become
/// 0.0; normalization never fails, it degrades to zero. Parse failure and
/// legitimate absence are deliberately indistinguishable.
pub fn decimal_flight_hours(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(n) => *n,
        Cell::Empty => 0.0,
        Cell::Text(s) => parse_hours_text(s),
    }
}

fn parse_hours_text(raw: &str) -> f64 {
    let text = raw.trim();

    if let Some((hours_part, minutes_part)) = text.split_once(':') {
        let hours: i64 = match hours_part.trim().parse() {
            Ok(v) => v,
            Err(_) => return 0.0,
        };
        let minutes: i64 = match minutes_part.trim().parse() {
            Ok(v) => v,
            Err(_) => return 0.0,
        };
        return round2(hours as f64 + minutes as f64 / 60.0);
    }

    text.replace(',', "").parse::<f64>().unwrap_or(0.0)
}

/// Round to 2 decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
