//! Recurring day-of-week content themes.

use serde::{Deserialize, Serialize};

/// One of the seven fixed content themes, in calendar order starting Monday.
///
/// The wire form is the snake_case string used by every external interface.
///
/// # Examples
///
/// ```
/// use fablecast_core::Theme;
/// use std::str::FromStr;
///
/// let theme = Theme::from_str("story_saturday").unwrap();
/// assert_eq!(theme, Theme::StorySaturday);
/// assert!(theme.is_weekend());
/// assert_eq!(Theme::MagicalMonday.to_string(), "magical_monday_wisdom");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumCount,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
pub enum Theme {
    /// Monday
    #[serde(rename = "magical_monday_wisdom")]
    #[strum(serialize = "magical_monday_wisdom")]
    MagicalMonday,
    /// Tuesday
    #[serde(rename = "tiny_tales_tuesday")]
    #[strum(serialize = "tiny_tales_tuesday")]
    TinyTalesTuesday,
    /// Wednesday
    #[serde(rename = "wonder_wednesday")]
    #[strum(serialize = "wonder_wednesday")]
    WonderWednesday,
    /// Thursday
    #[serde(rename = "thoughtful_thursday")]
    #[strum(serialize = "thoughtful_thursday")]
    ThoughtfulThursday,
    /// Friday
    #[serde(rename = "fantasy_friday")]
    #[strum(serialize = "fantasy_friday")]
    FantasyFriday,
    /// Saturday
    #[serde(rename = "story_saturday")]
    #[strum(serialize = "story_saturday")]
    StorySaturday,
    /// Sunday
    #[serde(rename = "serene_sunday")]
    #[strum(serialize = "serene_sunday")]
    SereneSunday,
}

impl Theme {
    /// Whether this theme falls on the weekend.
    pub fn is_weekend(self) -> bool {
        match self {
            Theme::StorySaturday | Theme::SereneSunday => true,
            Theme::MagicalMonday
            | Theme::TinyTalesTuesday
            | Theme::WonderWednesday
            | Theme::ThoughtfulThursday
            | Theme::FantasyFriday => false,
        }
    }

    /// The two hashtags attached to every piece of this theme.
    pub fn hashtags(self) -> [&'static str; 2] {
        match self {
            Theme::MagicalMonday => ["#MondayMotivation", "#ParentingMindset"],
            Theme::TinyTalesTuesday => ["#TuesdayTales", "#Storytelling"],
            Theme::WonderWednesday => ["#WonderWednesday", "#ParentingQuestions"],
            Theme::ThoughtfulThursday => ["#ThoughtfulParenting", "#DeepThoughts"],
            Theme::FantasyFriday => ["#FantasyFriday", "#WeekendFun"],
            Theme::StorySaturday => ["#StorySaturday", "#FamilyTime"],
            Theme::SereneSunday => ["#SereneParenting", "#SelfCare"],
        }
    }
}
