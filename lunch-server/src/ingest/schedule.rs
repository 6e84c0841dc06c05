//! Schedule payload parsing
//!
//! Expected shape:
//!
//! ```json
//! {
//!   "business_lunch": {
//!     "time": "12:00 to 15:00",
//!     "price": 380,
//!     "days": {
//!       "понедельник": { "positions": ["Soup", "Salad"] }
//!     },
//!     "additional": "Bread included"
//!   }
//! }
//! ```
//!
//! Day names are matched case-insensitively against the fixed table in
//! [`day_code`]; unrecognized names are skipped with a warning. One row
//! per recognized day is produced, all sharing the payload's price and
//! time window.

use super::{IngestError, SkippedEntry};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Accepted "to" separators in the time field. The first is canonical,
/// the second keeps legacy payloads working.
const TIME_SEPARATORS: [&str; 2] = [" to ", " до "];

#[derive(Debug, Deserialize)]
struct ScheduleEnvelope {
    business_lunch: SchedulePayload,
}

#[derive(Debug, Deserialize)]
struct SchedulePayload {
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    days: BTreeMap<String, DayEntry>,
    #[serde(default)]
    additional: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DayEntry {
    #[serde(default)]
    positions: Vec<String>,
}

/// One schedule row produced from a payload day.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDay {
    pub weekday: i64,
    /// Day name as submitted
    pub day_name: String,
    pub description: String,
}

/// Result of a successful schedule payload parse.
#[derive(Debug, Clone)]
pub struct ParsedSchedule {
    pub price: f64,
    pub start_time: String,
    pub end_time: String,
    /// Recognized days, weekday code ascending
    pub days: Vec<ParsedDay>,
    /// Unrecognized days, in submitted-name order
    pub skipped: Vec<SkippedEntry>,
}

/// Weekday code for a submitted day name, or None when unrecognized.
/// Russian and English names are accepted, case-insensitively.
pub fn day_code(name: &str) -> Option<i64> {
    match name.trim().to_lowercase().as_str() {
        "каждый день" | "every day" => Some(0),
        "понедельник" | "monday" => Some(1),
        "вторник" | "tuesday" => Some(2),
        "среда" | "wednesday" => Some(3),
        "четверг" | "thursday" => Some(4),
        "пятница" | "friday" => Some(5),
        "суббота" | "saturday" => Some(6),
        "воскресенье" | "sunday" => Some(7),
        _ => None,
    }
}

fn split_time_range(time: &str) -> Result<(String, String), IngestError> {
    for separator in TIME_SEPARATORS {
        if let Some((start, end)) = time.split_once(separator) {
            let start = start.trim();
            let end = end.trim();
            if start.is_empty() || end.is_empty() {
                return Err(IngestError::Payload(
                    "Invalid time format, expected 'HH:MM to HH:MM'".into(),
                ));
            }
            return Ok((start.to_string(), end.to_string()));
        }
    }
    Err(IngestError::Payload(
        "Invalid time format, expected 'HH:MM to HH:MM'".into(),
    ))
}

fn build_description(positions: &[String], additional: &str) -> String {
    let mut description = positions.join("\n");
    if !additional.is_empty() {
        if description.is_empty() {
            description = additional.to_string();
        } else {
            description.push_str("\n\n");
            description.push_str(additional);
        }
    }
    description
}

/// Parse a schedule payload into per-day rows.
pub fn parse_schedule(text: &str) -> Result<ParsedSchedule, IngestError> {
    let envelope: ScheduleEnvelope =
        serde_json::from_str(text).map_err(|e| IngestError::Syntax(e.to_string()))?;
    let payload = envelope.business_lunch;

    let price = payload
        .price
        .ok_or_else(|| IngestError::Payload("Missing business lunch price".into()))?;
    if !(price > 0.0) {
        return Err(IngestError::Payload(format!(
            "Business lunch price must be positive: {price}"
        )));
    }

    let (start_time, end_time) = split_time_range(payload.time.as_deref().unwrap_or(""))?;
    let additional = payload.additional.unwrap_or_default();

    let mut days = Vec::new();
    let mut skipped = Vec::new();
    for (day_name, entry) in payload.days {
        match day_code(&day_name) {
            Some(weekday) => days.push(ParsedDay {
                weekday,
                description: build_description(&entry.positions, &additional),
                day_name,
            }),
            None => skipped.push(SkippedEntry::new(day_name, "unrecognized day name")),
        }
    }
    days.sort_by_key(|d| d.weekday);

    Ok(ParsedSchedule {
        price,
        start_time,
        end_time,
        days,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_day_payload_produces_one_row() {
        let text = r#"{"business_lunch":{"time":"12:00 to 15:00","price":380,"days":{"понедельник":{"positions":["Soup","Salad"]}},"additional":"Bread included"}}"#;
        let parsed = parse_schedule(text).expect("valid payload");
        assert_eq!(parsed.price, 380.0);
        assert_eq!(parsed.start_time, "12:00");
        assert_eq!(parsed.end_time, "15:00");
        assert_eq!(parsed.days.len(), 1);
        assert!(parsed.skipped.is_empty());

        let day = &parsed.days[0];
        assert_eq!(day.weekday, 1);
        assert_eq!(day.description, "Soup\nSalad\n\nBread included");
    }

    #[test]
    fn unrecognized_day_is_skipped_not_fatal() {
        let text = r#"{"business_lunch":{"time":"12:00 to 15:00","price":300,"days":{
            "monday":{"positions":["Soup"]},
            "вторник":{"positions":["Salad"]},
            "friday":{"positions":["Fish"]},
            "someday":{"positions":["Mystery"]}
        }}}"#;
        let parsed = parse_schedule(text).expect("valid payload");
        assert_eq!(parsed.days.len(), 3);
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].label, "someday");
        // All produced rows share the payload price and time window
        for day in &parsed.days {
            assert_eq!(parsed.price, 300.0);
            assert_eq!(parsed.start_time, "12:00");
            assert_eq!(parsed.end_time, "15:00");
            assert!((1..=7).contains(&day.weekday));
        }
        // Ordered by weekday code
        let codes: Vec<i64> = parsed.days.iter().map(|d| d.weekday).collect();
        assert_eq!(codes, vec![1, 2, 5]);
    }

    #[test]
    fn every_day_alias_maps_to_code_zero() {
        let text = r#"{"business_lunch":{"time":"11:30 to 16:00","price":250,"days":{"Каждый день":{"positions":["Soup of the day"]}}}}"#;
        let parsed = parse_schedule(text).expect("valid payload");
        assert_eq!(parsed.days.len(), 1);
        assert_eq!(parsed.days[0].weekday, 0);
    }

    #[test]
    fn missing_price_is_fatal() {
        let text = r#"{"business_lunch":{"time":"12:00 to 15:00","days":{"monday":{"positions":["Soup"]}}}}"#;
        assert!(matches!(
            parse_schedule(text),
            Err(IngestError::Payload(_))
        ));
    }

    #[test]
    fn non_positive_price_is_fatal() {
        let text = r#"{"business_lunch":{"time":"12:00 to 15:00","price":0,"days":{"monday":{"positions":["Soup"]}}}}"#;
        assert!(matches!(
            parse_schedule(text),
            Err(IngestError::Payload(_))
        ));
    }

    #[test]
    fn missing_time_separator_is_fatal() {
        let text = r#"{"business_lunch":{"time":"12:00-15:00","price":380,"days":{"monday":{"positions":["Soup"]}}}}"#;
        assert!(matches!(
            parse_schedule(text),
            Err(IngestError::Payload(_))
        ));
    }

    #[test]
    fn legacy_separator_is_accepted() {
        let text = r#"{"business_lunch":{"time":"12:00 до 15:00","price":380,"days":{"среда":{"positions":["Борщ"]}}}}"#;
        let parsed = parse_schedule(text).expect("valid payload");
        assert_eq!(parsed.start_time, "12:00");
        assert_eq!(parsed.end_time, "15:00");
        assert_eq!(parsed.days[0].weekday, 3);
    }

    #[test]
    fn malformed_json_is_a_syntax_error() {
        assert!(matches!(
            parse_schedule("not json at all"),
            Err(IngestError::Syntax(_))
        ));
        // Wrong top-level structure is a syntax error too
        assert!(matches!(
            parse_schedule(r#"{"something_else": 1}"#),
            Err(IngestError::Syntax(_))
        ));
    }

    #[test]
    fn additional_without_positions_becomes_the_description() {
        let text = r#"{"business_lunch":{"time":"12:00 to 15:00","price":380,"days":{"monday":{}},"additional":"Juice included"}}"#;
        let parsed = parse_schedule(text).expect("valid payload");
        assert_eq!(parsed.days[0].description, "Juice included");
    }
}
