//! Date and time extraction.

use chrono::NaiveDate;

use super::patterns::{
    DATE_DMY, DATE_DMY_SHORT, DATE_DUTCH_LONG, DATE_YMD, LABELED_DATE, LABELED_INVOICE_DATE,
    TIME_HM,
};
use crate::models::Field;

/// Extracted date and time of the transaction.
#[derive(Debug, Clone, Default)]
pub struct DocumentDateTime {
    pub date: Field<NaiveDate>,
    /// `HH:MM`.
    pub time: Field<String>,
}

/// Extract the document date and time.
///
/// Labeled dates (Factuurdatum, Datum) take precedence over the first bare
/// date in the text; receipts print day-first dates.
pub fn extract_datetime(text: &str) -> DocumentDateTime {
    let labeled = LABELED_INVOICE_DATE
        .captures(text)
        .or_else(|| LABELED_DATE.captures(text))
        .and_then(|caps| caps.get(1).map(|m| m.as_str().to_string()));

    let date = match labeled {
        Some(ref snippet) => first_date(snippet).or_else(|| first_date(text)),
        None => first_date(text),
    };

    DocumentDateTime {
        date: date.into(),
        time: first_time(text).into(),
    }
}

fn first_date(text: &str) -> Option<NaiveDate> {
    // Day-month-year, the dominant Dutch layout.
    if let Some(caps) = DATE_DMY.captures(text) {
        let day = caps[1].parse().unwrap_or(0);
        let month = caps[2].parse().unwrap_or(0);
        let year = caps[3].parse().unwrap_or(0);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }

    if let Some(caps) = DATE_YMD.captures(text) {
        let year = caps[1].parse().unwrap_or(0);
        let month = caps[2].parse().unwrap_or(0);
        let day = caps[3].parse().unwrap_or(0);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }

    if let Some(caps) = DATE_DUTCH_LONG.captures(text) {
        let day = caps[1].parse().unwrap_or(0);
        let month = dutch_month_to_number(&caps[2]);
        let year = caps[3].parse().unwrap_or(0);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }

    if let Some(caps) = DATE_DMY_SHORT.captures(text) {
        let day = caps[1].parse().unwrap_or(0);
        let month = caps[2].parse().unwrap_or(0);
        let two_digit: i32 = caps[3].parse().unwrap_or(-1);
        if (0..=99).contains(&two_digit) {
            if let Some(date) = NaiveDate::from_ymd_opt(2000 + two_digit, month, day) {
                return Some(date);
            }
        }
    }

    None
}

fn first_time(text: &str) -> Option<String> {
    for caps in TIME_HM.captures_iter(text) {
        let hour: u32 = caps[1].parse().unwrap_or(99);
        let minute: u32 = caps[2].parse().unwrap_or(99);
        if hour < 24 && minute < 60 {
            return Some(format!("{hour:02}:{minute:02}"));
        }
    }
    None
}

fn dutch_month_to_number(month: &str) -> u32 {
    match month.to_lowercase().as_str() {
        "januari" => 1,
        "februari" => 2,
        "maart" => 3,
        "april" => 4,
        "mei" => 5,
        "juni" => 6,
        "juli" => 7,
        "augustus" => 8,
        "september" => 9,
        "oktober" => 10,
        "november" => 11,
        "december" => 12,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn receipt_date_and_time() {
        let dt = extract_datetime("22/08/2025 12:55");
        assert_eq!(dt.date, Field::Known(date(2025, 8, 22)));
        assert_eq!(dt.time, Field::Known("12:55".to_string()));
    }

    #[test]
    fn compressed_date_and_time_still_parse() {
        let dt = extract_datetime("22/08/202512:55");
        assert_eq!(dt.date, Field::Known(date(2025, 8, 22)));
        assert_eq!(dt.time, Field::Known("12:55".to_string()));
    }

    #[test]
    fn labeled_invoice_date_wins_over_first_bare_date() {
        let text = "Vervaldatum: 15-09-2025\nFactuurdatum: 01-08-2025";
        let dt = extract_datetime(text);
        assert_eq!(dt.date, Field::Known(date(2025, 8, 1)));
    }

    #[test]
    fn dutch_long_month() {
        let dt = extract_datetime("22 augustus 2025");
        assert_eq!(dt.date, Field::Known(date(2025, 8, 22)));
    }

    #[test]
    fn invalid_calendar_date_degrades_to_unknown() {
        let dt = extract_datetime("31/02/2025");
        assert!(dt.date.is_unknown());
        assert!(dt.time.is_unknown());
    }

    #[test]
    fn no_date_is_unknown_not_an_error() {
        let dt = extract_datetime("");
        assert!(dt.date.is_unknown());
        assert!(dt.time.is_unknown());
    }
}
