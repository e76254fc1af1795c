//! Shared helpers for card rendering.

use chrono::{Datelike, NaiveDate};

/// Format a date as `DD/MM/YYYY` with zero padding.
///
/// Manual formatting, not a locale API, so the printed card is byte-identical
/// across runtimes.
pub fn format_card_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

/// Upper-case a card field value for printing.
pub fn print_upper(value: &str) -> String {
    value.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_card_date_zero_pads() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(format_card_date(date), "05/03/2025");
    }

    #[test]
    fn test_format_card_date_double_digits() {
        let date = NaiveDate::from_ymd_opt(1990, 11, 23).unwrap();
        assert_eq!(format_card_date(date), "23/11/1990");
    }

    #[test]
    fn test_print_upper_trims() {
        assert_eq!(print_upper("  Adaeze "), "ADAEZE");
        assert_eq!(print_upper("okafor-eze"), "OKAFOR-EZE");
    }
}
