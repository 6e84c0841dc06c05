//! Weekday resolution
//!
//! Weekday codes are 0..=7: 0 means "applies every day", 1..=7 map to
//! Monday..=Sunday (ISO numbering). Resolution prefers a day-specific row
//! and falls back to the code-0 row; duplicate rows for the same code are
//! broken deterministically by "most recently created wins" (greatest id).
//!
//! The current calendar weekday is computed at the call boundary and
//! passed in; nothing in here reads the clock on its own.

use crate::db::repository::{RepoResult, lunch};
use chrono::Datelike;
use shared::models::BusinessLunch;
use sqlx::SqlitePool;

/// Weekday code for rows that apply every day
pub const EVERY_DAY: i64 = 0;

/// Display name for a weekday code. Codes outside 0..=7 get an explicit
/// label instead of an error.
pub fn weekday_name(code: i64) -> &'static str {
    match code {
        0 => "every day",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        7 => "Sunday",
        _ => "unknown day",
    }
}

/// Today's weekday code in local time (ISO: Monday = 1 .. Sunday = 7)
pub fn current_weekday() -> i64 {
    chrono::Local::now().weekday().number_from_monday() as i64
}

/// Pick the applicable row among a venue's schedule rows.
///
/// Day-specific rows win over the "every day" row; among duplicates the
/// greatest id wins, so repeated submissions do not flap between requests.
pub fn resolve_for_weekday(rows: &[BusinessLunch], weekday: i64) -> Option<&BusinessLunch> {
    rows.iter()
        .filter(|r| r.weekday == weekday)
        .max_by_key(|r| r.id)
        .or_else(|| {
            rows.iter()
                .filter(|r| r.weekday == EVERY_DAY)
                .max_by_key(|r| r.id)
        })
}

/// Resolve the lunch offering of a venue for one weekday, with fallback.
pub async fn resolve(
    pool: &SqlitePool,
    place_id: i64,
    weekday: i64,
) -> RepoResult<Option<BusinessLunch>> {
    let rows = lunch::find_by_place(pool, place_id).await?;
    Ok(resolve_for_weekday(&rows, weekday).cloned())
}

/// Every stored row of a venue, weekday ascending (0 first). No fallback
/// collapsing: the full-week view shows what is actually stored.
pub async fn resolve_all(pool: &SqlitePool, place_id: i64) -> RepoResult<Vec<BusinessLunch>> {
    lunch::find_by_place(pool, place_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, weekday: i64) -> BusinessLunch {
        BusinessLunch {
            id,
            place_id: 1,
            weekday,
            price: 380.0,
            start_time: "12:00".to_string(),
            end_time: "15:00".to_string(),
            description: None,
        }
    }

    #[test]
    fn every_day_row_covers_all_weekdays() {
        let rows = vec![row(10, EVERY_DAY)];
        for weekday in 1..=7 {
            let picked = resolve_for_weekday(&rows, weekday).expect("fallback row");
            assert_eq!(picked.id, 10);
            assert_eq!(weekday_name(picked.weekday), "every day");
        }
    }

    #[test]
    fn day_specific_row_beats_fallback() {
        let rows = vec![row(10, EVERY_DAY), row(11, 3)];
        let picked = resolve_for_weekday(&rows, 3).expect("day row");
        assert_eq!(picked.id, 11);
        // Other days still fall back
        let picked = resolve_for_weekday(&rows, 4).expect("fallback row");
        assert_eq!(picked.id, 10);
    }

    #[test]
    fn duplicate_rows_resolve_to_most_recent() {
        let rows = vec![row(10, 2), row(15, 2), row(12, 2)];
        let picked = resolve_for_weekday(&rows, 2).expect("day row");
        assert_eq!(picked.id, 15);

        let rows = vec![row(3, EVERY_DAY), row(9, EVERY_DAY)];
        let picked = resolve_for_weekday(&rows, 5).expect("fallback row");
        assert_eq!(picked.id, 9);
    }

    #[test]
    fn no_rows_resolves_to_none() {
        assert!(resolve_for_weekday(&[], 1).is_none());
        let rows = vec![row(10, 2)];
        assert!(resolve_for_weekday(&rows, 3).is_none());
    }

    #[test]
    fn weekday_names_cover_the_domain() {
        assert_eq!(weekday_name(0), "every day");
        assert_eq!(weekday_name(1), "Monday");
        assert_eq!(weekday_name(7), "Sunday");
        assert_eq!(weekday_name(8), "unknown day");
        assert_eq!(weekday_name(-1), "unknown day");
    }

    #[test]
    fn current_weekday_is_in_iso_range() {
        let weekday = current_weekday();
        assert!((1..=7).contains(&weekday));
    }
}
