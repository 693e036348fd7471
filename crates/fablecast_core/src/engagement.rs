//! Advisory engagement predictions.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Predicted reach and engagement for a piece. Recomputed on demand, never authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters)]
pub struct EngagementEstimate {
    /// Accounts expected to see the post
    estimated_reach: u32,
    /// Expected engagement rate, in percent
    estimated_engagement_rate: f64,
    /// Expected total engagements (`reach × rate`, truncated)
    estimated_engagements: u32,
    /// Expected likes
    estimated_likes: u32,
    /// Expected comments
    estimated_comments: u32,
    /// Expected saves
    estimated_saves: u32,
}

impl EngagementEstimate {
    /// Split `reach × rate` into likes (70%), comments (20%) and saves (10%), truncating.
    ///
    /// `rate` is a fraction (0.05 for 5%).
    ///
    /// # Examples
    ///
    /// ```
    /// use fablecast_core::EngagementEstimate;
    ///
    /// let estimate = EngagementEstimate::from_reach(1000, 0.05);
    /// assert_eq!(*estimate.estimated_likes(), 35);
    /// assert_eq!(*estimate.estimated_comments(), 10);
    /// assert_eq!(*estimate.estimated_saves(), 5);
    /// assert_eq!(*estimate.estimated_engagement_rate(), 5.0);
    /// ```
    pub fn from_reach(reach: u32, rate: f64) -> Self {
        let engagements = (f64::from(reach) * rate).trunc();
        Self {
            estimated_reach: reach,
            estimated_engagement_rate: (rate * 10_000.0).round() / 100.0,
            estimated_engagements: engagements as u32,
            estimated_likes: (engagements * 0.7) as u32,
            estimated_comments: (engagements * 0.2) as u32,
            estimated_saves: (engagements * 0.1) as u32,
        }
    }
}
