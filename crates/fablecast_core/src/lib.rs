//! Core data types for Fablecast.
//!
//! Content pieces, their scheduling wrappers and engagement estimates, plus the
//! seven-day theme calendar every other crate keys off.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod calendar;
mod engagement;
mod kind;
mod piece;
mod post;
mod theme;

pub use calendar::{is_video_day, theme_for_date, todays_theme, week_from};
pub use engagement::EngagementEstimate;
pub use kind::ContentKind;
pub use piece::{
    ContentPiece, ContentPieceBuilder, ContentPieceBuilderError, MAX_HASHTAGS, PieceDraft,
};
pub use post::{PostStatus, PublishedPost, ScheduledPost};
pub use theme::Theme;
