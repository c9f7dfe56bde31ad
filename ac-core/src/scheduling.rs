//! Decides whether a candidate auction slot is legal to request and free to
//! book, against a fixed policy and the current booked-auction set. Pure
//! logic: no clocks and no storage; the reference instant is a parameter.

use time::{Duration, OffsetDateTime};

use crate::models::Auction;

/// Booking policy for auction requests.
///
/// The per-day cap and the stop-to-start gap are independent constraints
/// composed conjunctively: both must hold for every conflicting auction.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulePolicy {
    /// Soonest a new auction may be scheduled, in days from the request
    pub min_lead_days: i64,

    /// Farthest out a new auction may be scheduled, in days from the request
    pub max_lead_days: i64,

    /// Maximum number of auctions sharing a start instant on one day
    pub max_per_day: u32,

    /// Minimum distance between the end of one auction and the start of the
    /// next on the same day
    pub stop_to_start_gap: Duration,
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        Self {
            min_lead_days: 14,
            max_lead_days: 60,
            max_per_day: 2,
            stop_to_start_gap: Duration::hours(2),
        }
    }
}

impl SchedulePolicy {
    /// Whether the candidate start falls inside the request window.
    ///
    /// The window is `[as_of + min_lead_days, as_of + max_lead_days]`,
    /// inclusive on both bounds. Both bounds are calendar-day comparisons:
    /// a boundary day is valid regardless of time of day.
    pub fn is_date_within_request_window(
        &self,
        candidate_start: OffsetDateTime,
        as_of: OffsetDateTime,
    ) -> bool {
        let earliest = as_of.date() + Duration::days(self.min_lead_days);
        let latest = as_of.date() + Duration::days(self.max_lead_days);
        let date = candidate_start.date();
        date >= earliest && date <= latest
    }

    /// Whether the candidate slot is free to book against `booked`.
    ///
    /// An empty booked set is trivially available. Otherwise, auctions whose
    /// start instant exactly equals the candidate's are counted against the
    /// per-day cap, and the presence of any such auction additionally
    /// triggers the time-of-day gap check.
    pub fn is_slot_available(
        &self,
        candidate_start: OffsetDateTime,
        candidate_end: OffsetDateTime,
        booked: &[Auction],
    ) -> bool {
        if booked.is_empty() {
            return true;
        }
        let mut same_start: u32 = 0;
        for auction in booked {
            if auction.start == candidate_start {
                same_start += 1;
                if same_start == self.max_per_day {
                    return false;
                }
                if !self.is_time_available(candidate_start, candidate_end, booked) {
                    return false;
                }
            }
        }
        true
    }

    /// The stop-to-start gap check, on time-of-day components only.
    ///
    /// The candidate's start time must not be earlier than a booked
    /// auction's end time plus the gap, and the candidate's end time must
    /// not be later than a booked auction's start time minus the gap.
    /// Arithmetic wraps at midnight; dates take no part in the comparison,
    /// so the check only carries meaning for auctions sharing a calendar
    /// day. Do not extend it to cross-day comparisons.
    pub fn is_time_available(
        &self,
        candidate_start: OffsetDateTime,
        candidate_end: OffsetDateTime,
        booked: &[Auction],
    ) -> bool {
        let start = candidate_start.time();
        let end = candidate_end.time();
        for auction in booked {
            if start < auction.end.time() + self.stop_to_start_gap {
                return false;
            }
            if end > auction.start.time() - self.stop_to_start_gap {
                return false;
            }
        }
        true
    }
}
