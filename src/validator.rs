use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};

use crate::error::ValidationError;

/// Trims the raw value and rejects empty input. `field` names the value in
/// the error message.
pub fn require_non_empty_text(raw: &str, field: &str) -> Result<String, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyField(field.to_string()));
    }
    Ok(text.to_string())
}

/// Parses a strictly positive integer written in plain digits.
pub fn parse_positive_integer(raw: &str, field: &str) -> Result<u32, ValidationError> {
    let text = raw.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NotAnInteger(field.to_string()));
    }
    let value: u32 = text
        .parse()
        .map_err(|_| ValidationError::NotAnInteger(field.to_string()))?;
    if value == 0 {
        return Err(ValidationError::NotPositive(field.to_string()));
    }
    Ok(value)
}

/// Parses a calendar date from `YYYY-MM-DD`. The arity check comes first so
/// a wrong shape and an impossible date report different messages.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let parts: Vec<&str> = raw.trim().split('-').collect();
    if parts.len() != 3 {
        return Err(ValidationError::DateFormat);
    }
    let year: i32 = parts[0].parse().map_err(|_| ValidationError::InvalidDate)?;
    let month: u32 = parts[1].parse().map_err(|_| ValidationError::InvalidDate)?;
    let day: u32 = parts[2].parse().map_err(|_| ValidationError::InvalidDate)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ValidationError::InvalidDate)
}

/// Parses a wall-clock time from `HH:MM`, hour 0-23 and minute 0-59.
pub fn parse_hhmm_time(raw: &str) -> Result<NaiveTime, ValidationError> {
    let parts: Vec<&str> = raw.trim().split(':').collect();
    if parts.len() != 2 {
        return Err(ValidationError::TimeFormat);
    }
    let hours: u32 = parts[0].parse().map_err(|_| ValidationError::InvalidTime)?;
    let minutes: u32 = parts[1].parse().map_err(|_| ValidationError::InvalidTime)?;
    if hours > 23 || minutes > 59 {
        return Err(ValidationError::InvalidTime);
    }
    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or(ValidationError::InvalidTime)
}

/// Splits a comma-separated equipment list. Items are trimmed, empties
/// dropped, and duplicates removed by case-insensitive key while the
/// first-seen casing and order are kept.
pub fn parse_equipment_list(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut items = Vec::new();
    for item in raw.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        if seen.insert(item.to_lowercase()) {
            items.push(item.to_string());
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_is_trimmed() {
        assert_eq!(
            require_non_empty_text("  B101  ", "Room ID").unwrap(),
            "B101"
        );
        let result = require_non_empty_text("   ", "Room ID");
        assert!(matches!(result, Err(ValidationError::EmptyField(field)) if field == "Room ID"));
    }

    #[test]
    fn positive_integer_accepts_digits_only() {
        assert_eq!(parse_positive_integer(" 42 ", "Capacity").unwrap(), 42);
        assert!(matches!(
            parse_positive_integer("abc", "Capacity"),
            Err(ValidationError::NotAnInteger(_))
        ));
        assert!(matches!(
            parse_positive_integer("-3", "Capacity"),
            Err(ValidationError::NotAnInteger(_))
        ));
        assert!(matches!(
            parse_positive_integer("3.5", "Capacity"),
            Err(ValidationError::NotAnInteger(_))
        ));
        assert!(matches!(
            parse_positive_integer("0", "Capacity"),
            Err(ValidationError::NotPositive(_))
        ));
    }

    #[test]
    fn iso_date_checks_shape_before_value() {
        assert_eq!(
            parse_iso_date("2025-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert!(matches!(
            parse_iso_date("2025-03"),
            Err(ValidationError::DateFormat)
        ));
        assert!(matches!(
            parse_iso_date("2025/03/01"),
            Err(ValidationError::DateFormat)
        ));
        assert!(matches!(
            parse_iso_date("2025-13-01"),
            Err(ValidationError::InvalidDate)
        ));
        assert!(matches!(
            parse_iso_date("2025-02-30"),
            Err(ValidationError::InvalidDate)
        ));
        assert!(matches!(
            parse_iso_date("year-03-01"),
            Err(ValidationError::InvalidDate)
        ));
    }

    #[test]
    fn hhmm_time_rejects_out_of_range_values() {
        assert_eq!(
            parse_hhmm_time("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_hhmm_time("9:5").unwrap(),
            NaiveTime::from_hms_opt(9, 5, 0).unwrap()
        );
        assert!(matches!(
            parse_hhmm_time("0930"),
            Err(ValidationError::TimeFormat)
        ));
        assert!(matches!(
            parse_hhmm_time("09:30:00"),
            Err(ValidationError::TimeFormat)
        ));
        assert!(matches!(
            parse_hhmm_time("24:00"),
            Err(ValidationError::InvalidTime)
        ));
        assert!(matches!(
            parse_hhmm_time("12:60"),
            Err(ValidationError::InvalidTime)
        ));
    }

    #[test]
    fn equipment_dedup_keeps_first_casing_and_order() {
        let items = parse_equipment_list("Projector, whiteboard, PROJECTOR, , hdmi cable");
        assert_eq!(items, vec!["Projector", "whiteboard", "hdmi cable"]);
    }

    #[test]
    fn empty_equipment_input_yields_empty_list() {
        assert!(parse_equipment_list("").is_empty());
        assert!(parse_equipment_list("  ,  , ").is_empty());
    }
}
