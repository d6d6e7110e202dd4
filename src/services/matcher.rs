// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Availability matching.
//!
//! Decides whether a programmer's weekly slots cover a requested day, time
//! and modality. Slots are single-day, end-exclusive intervals; a slot
//! whose end is not after its start never matches anything.

use crate::models::{AvailabilitySlot, DayOfWeek, Modality};
use crate::time_utils::minutes_since_midnight;
use chrono::{Datelike, NaiveDateTime, NaiveTime};

/// Whether `slot` can host a session at `time` on `day` in `modality`.
pub fn is_bookable(
    slot: &AvailabilitySlot,
    day: DayOfWeek,
    time: NaiveTime,
    modality: Modality,
) -> bool {
    if !slot.enabled || slot.modality != modality || slot.day_of_week != day {
        return false;
    }
    let minute = minutes_since_midnight(time);
    let start = minutes_since_midnight(slot.start_time);
    let end = minutes_since_midnight(slot.end_time);
    start <= minute && minute < end
}

/// First slot that can host the request, if any.
pub fn find_match(
    slots: &[AvailabilitySlot],
    day: DayOfWeek,
    time: NaiveTime,
    modality: Modality,
) -> Option<&AvailabilitySlot> {
    slots.iter().find(|s| is_bookable(s, day, time, modality))
}

/// Slots a client may pick for `modality`, ordered by day then start time.
pub fn offerable_slots(slots: &[AvailabilitySlot], modality: Modality) -> Vec<&AvailabilitySlot> {
    let mut offer: Vec<&AvailabilitySlot> = slots
        .iter()
        .filter(|s| s.enabled && s.modality == modality && s.is_well_formed())
        .collect();
    offer.sort_by_key(|s| (s.day_of_week, s.start_time));
    offer
}

/// Whether any slot covers the wall-clock instant `now`.
pub fn is_available_now(slots: &[AvailabilitySlot], modality: Modality, now: NaiveDateTime) -> bool {
    let day = DayOfWeek::from_weekday(now.weekday());
    find_match(slots, day, now.time(), modality).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn slot(id: i64, day: DayOfWeek, start: NaiveTime, end: NaiveTime, modality: Modality) -> AvailabilitySlot {
        AvailabilitySlot {
            id,
            programmer_id: 1,
            day_of_week: day,
            start_time: start,
            end_time: end,
            modality,
            enabled: true,
        }
    }

    #[test]
    fn test_end_is_exclusive() {
        let s = slot(1, DayOfWeek::Lunes, t(9, 0), t(12, 0), Modality::Virtual);
        assert!(is_bookable(&s, DayOfWeek::Lunes, t(9, 0), Modality::Virtual));
        assert!(is_bookable(&s, DayOfWeek::Lunes, t(11, 59), Modality::Virtual));
        assert!(!is_bookable(&s, DayOfWeek::Lunes, t(12, 0), Modality::Virtual));
        assert!(!is_bookable(&s, DayOfWeek::Lunes, t(8, 59), Modality::Virtual));
    }

    #[test]
    fn test_day_modality_and_enabled_must_match() {
        let mut s = slot(1, DayOfWeek::Lunes, t(9, 0), t(12, 0), Modality::Virtual);
        assert!(!is_bookable(&s, DayOfWeek::Martes, t(10, 0), Modality::Virtual));
        assert!(!is_bookable(&s, DayOfWeek::Lunes, t(10, 0), Modality::Presencial));
        s.enabled = false;
        assert!(!is_bookable(&s, DayOfWeek::Lunes, t(10, 0), Modality::Virtual));
    }

    #[test]
    fn test_inverted_slot_never_matches() {
        let s = slot(1, DayOfWeek::Viernes, t(22, 0), t(2, 0), Modality::Virtual);
        for time in [t(23, 0), t(1, 0), t(22, 0), t(12, 0)] {
            assert!(!is_bookable(&s, DayOfWeek::Viernes, time, Modality::Virtual));
        }
        assert!(offerable_slots(&[s], Modality::Virtual).is_empty());
    }

    #[test]
    fn test_offerable_slots_are_sorted() {
        let slots = vec![
            slot(1, DayOfWeek::Jueves, t(9, 0), t(10, 0), Modality::Virtual),
            slot(2, DayOfWeek::Lunes, t(15, 0), t(16, 0), Modality::Virtual),
            slot(3, DayOfWeek::Lunes, t(8, 0), t(9, 0), Modality::Virtual),
            slot(4, DayOfWeek::Lunes, t(7, 0), t(8, 0), Modality::Presencial),
        ];
        let ids: Vec<i64> = offerable_slots(&slots, Modality::Virtual).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_is_available_now() {
        let slots = vec![slot(1, DayOfWeek::Domingo, t(10, 0), t(11, 0), Modality::Hibrida)];
        // 2026-10-18 is a Sunday.
        let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert!(is_available_now(&slots, Modality::Hibrida, sunday.and_time(t(10, 30))));
        assert!(!is_available_now(&slots, Modality::Hibrida, sunday.and_time(t(11, 0))));
        assert!(!is_available_now(&slots, Modality::Virtual, sunday.and_time(t(10, 30))));
    }
}
