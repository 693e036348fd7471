//! Deterministic hashtag lists.

use fablecast_core::{ContentKind, MAX_HASHTAGS, Theme};

/// Tags every piece starts with, in order.
pub const BASE_HASHTAGS: [&str; 9] = [
    "#MagicalParenting",
    "#ParentingWisdom",
    "#ParentingTips",
    "#ChildPsychology",
    "#ParentingSupport",
    "#BedtimeStories",
    "#ParentingCommunity",
    "#RaisingKids",
    "#ParentingAdvice",
];

/// Tags appended for video pieces.
pub const VIDEO_HASHTAGS: [&str; 3] = ["#ParentingVideo", "#InstagramVideo", "#ParentingReel"];

/// The topic as a PascalCase tag, plus the same tag with a `Tips` suffix.
///
/// Apostrophes are dropped and any other non-alphanumeric character splits words.
/// Returns nothing for a topic without letters or digits.
///
/// # Examples
///
/// ```
/// use fablecast_content::topic_hashtags;
///
/// assert_eq!(
///     topic_hashtags("social anxiety in kids"),
///     vec!["#SocialAnxietyInKids", "#SocialAnxietyInKidsTips"],
/// );
/// assert!(topic_hashtags("?!").is_empty());
/// ```
pub fn topic_hashtags(topic: &str) -> Vec<String> {
    let pascal: String = topic
        .chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .collect::<String>()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect();

    if pascal.is_empty() {
        return Vec::new();
    }
    vec![format!("#{pascal}"), format!("#{pascal}Tips")]
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Base tags, then theme tags, then topic tags, then video tags for videos.
///
/// Duplicates keep their first position and the list is capped at
/// [`MAX_HASHTAGS`].
pub fn build_hashtags(theme: Theme, topic: &str, kind: ContentKind) -> Vec<String> {
    let mut tags: Vec<String> = BASE_HASHTAGS.iter().map(|t| t.to_string()).collect();
    tags.extend(theme.hashtags().iter().map(|t| t.to_string()));
    tags.extend(topic_hashtags(topic));
    if kind == ContentKind::Video {
        tags.extend(VIDEO_HASHTAGS.iter().map(|t| t.to_string()));
    }

    let mut seen = std::collections::HashSet::new();
    tags.retain(|tag| seen.insert(tag.to_lowercase()));
    tags.truncate(MAX_HASHTAGS);
    tags
}
