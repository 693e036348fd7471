//! Posting-time computation.

use chrono::{DateTime, Days, NaiveTime, TimeDelta, Utc};
use fablecast_core::{ContentPiece, ScheduledPost};
use rand::Rng;

use crate::EngagementEstimator;

/// Default jitter, in minutes either side of the slot.
pub const DEFAULT_JITTER_MINUTES: u32 = 15;

/// Posting slots per day before the schedule wraps to the next day.
pub const SLOTS_PER_DAY: usize = 11;

const FIRST_HOUR: u32 = 9;
const LAST_HOUR: u32 = 21;

/// Spreads posts through the day between 09:00 and 21:00.
///
/// The first five posts land every three hours (9, 12, 15, 18, 21). Later posts
/// fill a two-hour grid starting at 11:00 (11, 13, 15, 17, 19, 21), and after
/// [`SLOTS_PER_DAY`] posts the pattern repeats on the following day. Each time
/// is shifted by a uniform random jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduler {
    jitter_minutes: u32,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_JITTER_MINUTES)
    }
}

impl Scheduler {
    /// Scheduler with `jitter_minutes` of random shift either side of each slot.
    pub fn new(jitter_minutes: u32) -> Self {
        Self { jitter_minutes }
    }

    /// Scheduler that always lands exactly on the slot.
    pub fn without_jitter() -> Self {
        Self::new(0)
    }

    /// Configured jitter.
    pub fn jitter_minutes(&self) -> u32 {
        self.jitter_minutes
    }

    /// Day offset and hour for the `index`th post of a batch.
    ///
    /// # Examples
    ///
    /// ```
    /// use fablecast_social::Scheduler;
    ///
    /// assert_eq!(Scheduler::slot(0), (0, 9));
    /// assert_eq!(Scheduler::slot(4), (0, 21));
    /// assert_eq!(Scheduler::slot(5), (0, 11));
    /// assert_eq!(Scheduler::slot(11), (1, 9));
    /// ```
    pub fn slot(index: usize) -> (u64, u32) {
        let day = (index / SLOTS_PER_DAY) as u64;
        let slot = (index % SLOTS_PER_DAY) as u32;
        let hour = FIRST_HOUR + 3 * slot;
        if hour <= LAST_HOUR {
            (day, hour)
        } else {
            (day, FIRST_HOUR + 2 * (slot - 4))
        }
    }

    /// Posting time for the `index`th piece of a batch starting on `start`'s date.
    pub fn compute_time<R: Rng + ?Sized>(
        &self,
        start: DateTime<Utc>,
        index: usize,
        rng: &mut R,
    ) -> DateTime<Utc> {
        let (day, hour) = Self::slot(index);
        let date = start.date_naive() + Days::new(day);
        let slot_time =
            date.and_time(NaiveTime::MIN).and_utc() + TimeDelta::hours(i64::from(hour));

        if self.jitter_minutes == 0 {
            return slot_time;
        }
        let spread = i64::from(self.jitter_minutes);
        slot_time + TimeDelta::minutes(rng.gen_range(-spread..=spread))
    }

    /// Wrap each piece in a [`ScheduledPost`] with its posting time and estimate.
    pub fn schedule<R: Rng + ?Sized>(
        &self,
        pieces: Vec<ContentPiece>,
        start: DateTime<Utc>,
        estimator: &EngagementEstimator,
        rng: &mut R,
    ) -> Vec<ScheduledPost> {
        pieces
            .into_iter()
            .enumerate()
            .map(|(index, piece)| {
                let time = self.compute_time(start, index, rng);
                let estimate = estimator.estimate(&piece, rng);
                ScheduledPost::new(piece, time, estimate)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 7, 30, 0).unwrap()
    }

    #[test]
    fn test_first_pass_every_three_hours() {
        let scheduler = Scheduler::without_jitter();
        let mut rng = StdRng::seed_from_u64(1);
        let hours: Vec<u32> = (0..5)
            .map(|i| scheduler.compute_time(start(), i, &mut rng).hour())
            .collect();
        assert_eq!(hours, vec![9, 12, 15, 18, 21]);
    }

    #[test]
    fn test_second_pass_two_hour_grid() {
        let scheduler = Scheduler::without_jitter();
        let mut rng = StdRng::seed_from_u64(1);
        let hours: Vec<u32> = (5..11)
            .map(|i| scheduler.compute_time(start(), i, &mut rng).hour())
            .collect();
        assert_eq!(hours, vec![11, 13, 15, 17, 19, 21]);
    }

    #[test]
    fn test_index_five_is_eleven_same_day() {
        let time = Scheduler::without_jitter().compute_time(start(), 5, &mut StdRng::seed_from_u64(0));
        assert_eq!(time, Utc.with_ymd_and_hms(2026, 5, 4, 11, 0, 0).unwrap());
    }

    #[test]
    fn test_wraps_to_next_day() {
        let time = Scheduler::without_jitter().compute_time(start(), 12, &mut StdRng::seed_from_u64(0));
        assert_eq!(time, Utc.with_ymd_and_hms(2026, 5, 5, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let scheduler = Scheduler::default();
        let mut rng = StdRng::seed_from_u64(42);
        let slot = Utc.with_ymd_and_hms(2026, 5, 4, 15, 0, 0).unwrap();
        for _ in 0..200 {
            let time = scheduler.compute_time(start(), 2, &mut rng);
            let offset = (time - slot).num_minutes();
            assert!((-15..=15).contains(&offset), "offset {offset} out of range");
        }
    }
}
