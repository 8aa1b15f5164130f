use std::collections::BTreeSet;

use crate::model::{
    id::{PropertyId, ReservationId, UserId},
    user::ReservationClient,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

pub mod event;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Rejected,
    Completed,
}

impl ReservationStatus {
    // A reservation only ever moves forward:
    // pending -> confirmed | rejected, confirmed -> completed.
    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Rejected) | (Confirmed, Completed)
        )
    }

    // Pending and confirmed reservations hold their dates;
    // rejected and completed ones free them.
    pub fn blocks_dates(self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }
}

#[derive(Debug)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub client: ReservationClient,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
    pub total_price: i64,
    pub deposit_amount: i64,
    pub status: ReservationStatus,
    pub deposit_released_at: Option<DateTime<Utc>>,
    pub reserved_at: DateTime<Utc>,
    pub property: ReservationProperty,
}

#[derive(Debug)]
pub struct ReservationProperty {
    pub property_id: PropertyId,
    pub property_name: String,
    pub location: String,
    pub price_per_night: i64,
    pub owner_id: UserId,
}

impl Reservation {
    pub fn is_party(&self, user_id: UserId) -> bool {
        self.client.user_id == user_id || self.property.owner_id == user_id
    }
}

/// Collects every date a property is booked on, as the calendar widget
/// needs it: each reservation blocks the half-open range
/// `[check_in, check_out)`, and only reservations whose status still
/// holds the dates are counted.
pub fn blocked_dates<'a, I>(reservations: I) -> BTreeSet<NaiveDate>
where
    I: IntoIterator<Item = &'a Reservation>,
{
    let mut dates = BTreeSet::new();
    for reservation in reservations {
        if !reservation.status.blocks_dates() {
            continue;
        }
        let mut day = reservation.check_in;
        while day < reservation.check_out {
            dates.insert(day);
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(
        check_in: (i32, u32, u32),
        check_out: (i32, u32, u32),
        status: ReservationStatus,
    ) -> Reservation {
        Reservation {
            reservation_id: ReservationId::new(),
            client: ReservationClient {
                user_id: UserId::new(),
                user_name: "client".into(),
                email: "client@example.com".into(),
            },
            check_in: NaiveDate::from_ymd_opt(check_in.0, check_in.1, check_in.2).unwrap(),
            check_out: NaiveDate::from_ymd_opt(check_out.0, check_out.1, check_out.2).unwrap(),
            guest_count: 2,
            total_price: 30000,
            deposit_amount: 5000,
            status,
            deposit_released_at: None,
            reserved_at: Utc::now(),
            property: ReservationProperty {
                property_id: PropertyId::new(),
                property_name: "Seaside flat".into(),
                location: "Lisbon".into(),
                price_per_night: 10000,
                owner_id: UserId::new(),
            },
        }
    }

    #[test]
    fn status_only_moves_forward() {
        use ReservationStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Confirmed.can_transition_to(Completed));

        assert!(!Pending.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Confirmed.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Confirmed));
        assert!(!Rejected.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Confirmed));
        assert!(!Completed.can_transition_to(Pending));
    }

    #[test]
    fn blocked_dates_covers_half_open_range() {
        let r = reservation((2025, 7, 1), (2025, 7, 4), ReservationStatus::Confirmed);
        let dates = blocked_dates([&r]);
        let expected: Vec<NaiveDate> = (1..4)
            .map(|d| NaiveDate::from_ymd_opt(2025, 7, d).unwrap())
            .collect();
        assert_eq!(dates.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn blocked_dates_merges_overlapping_reservations() {
        let a = reservation((2025, 7, 1), (2025, 7, 3), ReservationStatus::Pending);
        let b = reservation((2025, 7, 2), (2025, 7, 5), ReservationStatus::Confirmed);
        let dates = blocked_dates([&a, &b]);
        assert_eq!(dates.len(), 4);
        assert!(dates.contains(&NaiveDate::from_ymd_opt(2025, 7, 2).unwrap()));
        assert!(!dates.contains(&NaiveDate::from_ymd_opt(2025, 7, 5).unwrap()));
    }

    #[test]
    fn rejected_and_completed_reservations_free_their_dates() {
        let rejected = reservation((2025, 7, 1), (2025, 7, 3), ReservationStatus::Rejected);
        let completed = reservation((2025, 7, 3), (2025, 7, 6), ReservationStatus::Completed);
        assert!(blocked_dates([&rejected, &completed]).is_empty());
    }
}
