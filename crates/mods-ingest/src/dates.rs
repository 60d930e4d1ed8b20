//! Heuristic normalization of text dates to `yyyy-mm-dd`.
//!
//! Cells in date-mapped columns often arrive as `mm/dd/yyyy` or
//! `dd-mm-yyyy` variants. When the value's shape is recognized and the
//! reading is unambiguous, it is reformatted; otherwise the original
//! text is returned unchanged and a warning is logged. In `xx/xx/xx`
//! and `xx-xx-xx` the year is assumed last, never first.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use tracing::warn;

static SLASH_SHORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{2}$").unwrap());
static SLASH_LONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap());
static DASH_SHORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}-\d{1,2}-\d{2}$").unwrap());
static DASH_LONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}$").unwrap());

/// Try to reformat a text date to `yyyy-mm-dd`.
///
/// Month-first is tried before day-first, since that is the more common
/// convention in the source spreadsheets. Ambiguous values (day and
/// month both ≤ 12 and different, or a two-digit year) are left alone
/// unless `force` is set.
pub fn normalize_text_date(raw: &str, force: bool) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let (month_first, day_first, short_year) = if SLASH_SHORT.is_match(raw) {
        ("%m/%d/%y", "%d/%m/%y", true)
    } else if SLASH_LONG.is_match(raw) {
        ("%m/%d/%Y", "%d/%m/%Y", false)
    } else if DASH_SHORT.is_match(raw) {
        ("%m-%d-%y", "%d-%m-%y", true)
    } else if DASH_LONG.is_match(raw) {
        ("%m-%d-%Y", "%d-%m-%Y", false)
    } else {
        return raw.to_string();
    };

    let parsed = NaiveDate::parse_from_str(raw, month_first)
        .or_else(|_| NaiveDate::parse_from_str(raw, day_first));
    let Ok(date) = parsed else {
        warn!(value = raw, "could not create a date from value");
        return raw.to_string();
    };

    // Day and month could be interchanged.
    if date.day() <= 12 && date.day() != date.month() {
        if force {
            warn!(value = raw, "ambiguous day/month, using it anyway");
            return iso(date);
        }
        warn!(value = raw, "ambiguous day/month");
        return raw.to_string();
    }
    // Two-digit year: the century is a guess, and the year could have
    // been interchanged with day or month.
    if short_year {
        if force {
            warn!(value = raw, "ambiguous year, using it anyway");
            return iso(date);
        }
        warn!(value = raw, "ambiguous year");
        return raw.to_string();
    }
    iso(date)
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unambiguous_slash_dates() {
        assert_eq!(normalize_text_date("5/14/2000", false), "2000-05-14");
        assert_eq!(normalize_text_date("14/5/2000", false), "2000-05-14");
    }

    #[test]
    fn unambiguous_dash_dates() {
        assert_eq!(normalize_text_date("3-17-2013", false), "2013-03-17");
        assert_eq!(normalize_text_date("17-3-2013", false), "2013-03-17");
    }

    #[test]
    fn ambiguous_dates_stay_unchanged() {
        for value in [
            "5/4/99", "5/14/00", "05/14/00", "14/5/00", "14/05/00", "3-17-13", "03-17-13",
            "17-3-13", "17-03-13", "3-3-03", "03-17-03", "05/14/01", "05-14-12",
        ] {
            assert_eq!(normalize_text_date(value, false), value);
        }
    }

    #[test]
    fn unrecognized_shapes_pass_through() {
        assert_eq!(normalize_text_date("", false), "");
        assert_eq!(normalize_text_date("about 1900", false), "about 1900");
        assert_eq!(normalize_text_date("2005-10-21", false), "2005-10-21");
    }

    #[test]
    fn force_resolves_ambiguity_month_first() {
        assert_eq!(normalize_text_date("5/4/99", true), "1999-05-04");
        assert_eq!(normalize_text_date("5/17/99", true), "1999-05-17");
    }
}
