//! Date to theme mapping.

use crate::Theme;
use chrono::{Datelike, Local, NaiveDate, Weekday};
use strum::IntoEnumIterator;

/// Theme for a calendar date. Monday maps to the first theme, Sunday to the last.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fablecast_core::{theme_for_date, Theme};
///
/// let saturday = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// assert_eq!(theme_for_date(saturday), Theme::StorySaturday);
/// ```
pub fn theme_for_date(date: NaiveDate) -> Theme {
    match date.weekday() {
        Weekday::Mon => Theme::MagicalMonday,
        Weekday::Tue => Theme::TinyTalesTuesday,
        Weekday::Wed => Theme::WonderWednesday,
        Weekday::Thu => Theme::ThoughtfulThursday,
        Weekday::Fri => Theme::FantasyFriday,
        Weekday::Sat => Theme::StorySaturday,
        Weekday::Sun => Theme::SereneSunday,
    }
}

/// Theme for the local current date.
pub fn todays_theme() -> Theme {
    theme_for_date(Local::now().date_naive())
}

/// Whether a video accompanies the carousel on this date (Monday, Wednesday, Friday).
pub fn is_video_day(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Mon | Weekday::Wed | Weekday::Fri)
}

/// Seven consecutive dates starting at `start`, paired with their themes.
pub fn week_from(start: NaiveDate) -> Vec<(NaiveDate, Theme)> {
    start
        .iter_days()
        .take(Theme::iter().count())
        .map(|date| (date, theme_for_date(date)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_day_maps_to_a_theme() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for date in start.iter_days().take(400) {
            let theme = theme_for_date(date);
            assert!(Theme::iter().any(|t| t == theme));
        }
    }

    #[test]
    fn test_week_covers_each_theme_once() {
        for offset in 0..7 {
            let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap() + chrono::Days::new(offset);
            let week = week_from(start);
            assert_eq!(week.len(), 7);
            let themes: HashSet<Theme> = week.iter().map(|(_, theme)| *theme).collect();
            assert_eq!(themes.len(), 7, "week starting {start} repeated a theme");
        }
    }

    #[test]
    fn test_video_days() {
        // 2024-03-04 is a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let flags: Vec<bool> = monday.iter_days().take(7).map(is_video_day).collect();
        assert_eq!(flags, vec![true, false, true, false, true, false, false]);
    }
}
