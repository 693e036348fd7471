//! Advisory engagement scoring.

use fablecast_core::{ContentKind, ContentPiece, EngagementEstimate};
use rand::Rng;
use std::ops::RangeInclusive;

/// Psychology concepts that tend to draw more engagement.
pub const HIGH_PERFORMING_CONCEPTS: [&str; 4] = [
    "emotional regulation",
    "positive reinforcement",
    "growth mindset",
    "empathy development",
];

/// Motifs that tend to draw more engagement.
pub const ENGAGING_MOTIFS: [&str; 4] = [
    "fairy tale lessons",
    "dragon courage",
    "unicorn compassion",
    "enchanted forest wisdom",
];

const BASE_RATE: f64 = 0.05;
const CONCEPT_BONUS: f64 = 0.02;
const MOTIF_BONUS: f64 = 0.015;
const VIDEO_BONUS: f64 = 0.03;
const WEEKEND_BONUS: f64 = 0.01;
const REACH: RangeInclusive<u32> = 500..=2000;

/// Predicts reach and engagement from a piece's attributes.
///
/// The rate starts at 5% and each bonus applies independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngagementEstimator;

impl EngagementEstimator {
    /// Create an estimator.
    pub fn new() -> Self {
        Self
    }

    /// Expected engagement rate as a fraction.
    pub fn rate(&self, piece: &ContentPiece) -> f64 {
        let mut rate = BASE_RATE;
        if HIGH_PERFORMING_CONCEPTS.contains(&piece.psychology_concept().as_str()) {
            rate += CONCEPT_BONUS;
        }
        if ENGAGING_MOTIFS.contains(&piece.motif().as_str()) {
            rate += MOTIF_BONUS;
        }
        if *piece.kind() == ContentKind::Video {
            rate += VIDEO_BONUS;
        }
        if piece.theme().is_weekend() {
            rate += WEEKEND_BONUS;
        }
        rate
    }

    /// Draw a reach in 500..=2000 and split the expected engagements.
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        piece: &ContentPiece,
        rng: &mut R,
    ) -> EngagementEstimate {
        EngagementEstimate::from_reach(rng.gen_range(REACH), self.rate(piece))
    }
}
