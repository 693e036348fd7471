//! Operation classes and their backoff bases.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Kind of operation being retried; determines the backoff base.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OperationClass {
    /// Single-piece generation, 60 s base
    ContentGeneration,
    /// Weekly batch generation, 300 s base
    WeeklyBatch,
    /// Campaign batch generation, 600 s base
    Campaign,
    /// Publishing, 300 s base
    Publish,
}

impl OperationClass {
    /// Delay before the first re-attempt.
    pub fn base_delay(&self) -> Duration {
        match self {
            OperationClass::ContentGeneration => Duration::from_secs(60),
            OperationClass::WeeklyBatch => Duration::from_secs(300),
            OperationClass::Campaign => Duration::from_secs(600),
            OperationClass::Publish => Duration::from_secs(300),
        }
    }

    /// `base · 2^retry`, where `retry` counts re-attempts already scheduled.
    ///
    /// # Examples
    ///
    /// ```
    /// use fablecast_tasks::OperationClass;
    /// use std::time::Duration;
    ///
    /// assert_eq!(OperationClass::ContentGeneration.delay(0), Duration::from_secs(60));
    /// assert_eq!(OperationClass::ContentGeneration.delay(1), Duration::from_secs(120));
    /// assert_eq!(OperationClass::Campaign.delay(2), Duration::from_secs(2400));
    /// ```
    pub fn delay(&self, retry: u32) -> Duration {
        self.base_delay()
            .saturating_mul(2u32.saturating_pow(retry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_weekly_share_base() {
        assert_eq!(
            OperationClass::Publish.delay(1),
            OperationClass::WeeklyBatch.delay(1)
        );
        assert_eq!(OperationClass::Publish.delay(1), Duration::from_secs(600));
    }

    #[test]
    fn test_display_is_snake_case() {
        assert_eq!(OperationClass::ContentGeneration.to_string(), "content_generation");
        assert_eq!(OperationClass::WeeklyBatch.to_string(), "weekly_batch");
    }

    #[test]
    fn test_huge_retry_saturates() {
        assert!(OperationClass::Campaign.delay(64) >= OperationClass::Campaign.delay(10));
    }
}
