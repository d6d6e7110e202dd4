// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Booking workflow.
//!
//! Client-side state of "book a session": pick a programmer, a modality
//! and one of the programmer's offerable slots, describe the topic, then
//! submit. The state lives only as long as the workflow value.
//!
//! Steps are derived from what has been filled in:
//! ```text
//! SelectProgrammer -> SelectModality -> SelectSlot -> FillDetails -> Submitted
//! ```

use crate::error::{AppError, Result};
use crate::gateways::{AsesoriaGateway, AvailabilityGateway};
use crate::models::asesoria::{MAX_DURATION_MINUTES, MAX_TOPIC_LENGTH, MIN_DURATION_MINUTES};
use crate::models::{
    Asesoria, AvailabilitySlot, CreateAsesoriaDto, DayOfWeek, Modality, Programmer,
};
use crate::navigation::Route;
use crate::services::matcher;
use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use validator::Validate;

/// Where the workflow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    SelectProgrammer,
    SelectModality,
    SelectSlot,
    FillDetails,
    Submitted,
}

/// Successful submission.
#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    pub asesoria: Asesoria,
    /// Where the user goes next.
    pub next: Route,
}

/// State of one booking attempt.
#[derive(Debug, Clone)]
pub struct BookingWorkflow {
    duration_minutes: u32,
    min_topic_length: usize,
    loading: bool,
    programmers: Vec<Programmer>,
    programmer_id: Option<i64>,
    modality: Option<Modality>,
    slots: Vec<AvailabilitySlot>,
    slot_id: Option<i64>,
    topic: String,
    notes: Option<String>,
    submitted: Option<Asesoria>,
}

impl BookingWorkflow {
    pub fn new(duration_minutes: u32, min_topic_length: usize) -> Self {
        Self {
            duration_minutes,
            min_topic_length,
            loading: false,
            programmers: Vec::new(),
            programmer_id: None,
            modality: None,
            slots: Vec::new(),
            slot_id: None,
            topic: String::new(),
            notes: None,
            submitted: None,
        }
    }

    pub fn step(&self) -> WorkflowStep {
        if self.submitted.is_some() {
            WorkflowStep::Submitted
        } else if self.programmer_id.is_none() {
            WorkflowStep::SelectProgrammer
        } else if self.modality.is_none() {
            WorkflowStep::SelectModality
        } else if self.slot_id.is_none() {
            WorkflowStep::SelectSlot
        } else {
            WorkflowStep::FillDetails
        }
    }

    /// True while a backend call started by the workflow is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn programmers(&self) -> &[Programmer] {
        &self.programmers
    }

    pub fn selected_programmer(&self) -> Option<&Programmer> {
        let id = self.programmer_id?;
        self.programmers.iter().find(|p| p.id == id)
    }

    pub fn modality(&self) -> Option<Modality> {
        self.modality
    }

    /// Slots the client can choose from for the selected modality.
    pub fn available_slots(&self) -> Vec<&AvailabilitySlot> {
        match self.modality {
            Some(modality) => matcher::offerable_slots(&self.slots, modality),
            None => Vec::new(),
        }
    }

    pub fn selected_slot(&self) -> Option<&AvailabilitySlot> {
        let id = self.slot_id?;
        self.slots.iter().find(|s| s.id == id)
    }

    // ─── Steps ───────────────────────────────────────────────────

    pub async fn load_programmers(&mut self, gateway: &AsesoriaGateway) -> Result<&[Programmer]> {
        self.loading = true;
        let result = gateway.programmers(None).await;
        self.loading = false;

        self.programmers = result?;
        tracing::debug!(count = self.programmers.len(), "Programmers loaded");
        Ok(self.programmers.as_slice())
    }

    /// Choose a programmer and load their slots. Any previous slot choice
    /// is cleared; nothing changes if loading the slots fails.
    pub async fn select_programmer(
        &mut self,
        programmer_id: i64,
        gateway: &AvailabilityGateway,
    ) -> Result<()> {
        if !self.programmers.is_empty() && !self.programmers.iter().any(|p| p.id == programmer_id) {
            return Err(AppError::Workflow(format!(
                "El programador {programmer_id} no está disponible."
            )));
        }

        self.loading = true;
        let result = gateway.by_programmer(programmer_id).await;
        self.loading = false;

        self.slots = result?;
        self.programmer_id = Some(programmer_id);
        self.slot_id = None;
        self.submitted = None;
        Ok(())
    }

    /// Change the modality. Clears the slot choice, since slots are
    /// modality-specific.
    pub fn select_modality(&mut self, modality: Modality) {
        if self.modality != Some(modality) {
            self.slot_id = None;
        }
        self.modality = Some(modality);
    }

    /// Pick one of the offerable slots.
    pub fn select_slot(&mut self, slot_id: i64) -> Result<&AvailabilitySlot> {
        let modality = self
            .modality
            .ok_or_else(|| AppError::Workflow("Selecciona una modalidad.".to_string()))?;

        let offered = matcher::offerable_slots(&self.slots, modality)
            .into_iter()
            .any(|s| s.id == slot_id);
        if !offered {
            return Err(AppError::Workflow(
                "El horario seleccionado no está disponible.".to_string(),
            ));
        }

        self.slot_id = Some(slot_id);
        self.selected_slot()
            .ok_or_else(|| AppError::Workflow("El horario seleccionado no existe.".to_string()))
    }

    pub fn set_details(&mut self, topic: &str, notes: Option<&str>) {
        self.topic = topic.to_string();
        self.notes = notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
    }

    /// True exactly when [`BookingWorkflow::submit`] would send the request.
    pub fn can_submit(&self) -> bool {
        let topic_len = self.topic.trim().chars().count();
        self.submitted.is_none()
            && self.programmer_id.is_some()
            && self.selected_slot().is_some()
            && topic_len >= self.min_topic_length
            && (topic_len as u64) <= MAX_TOPIC_LENGTH
            && (MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&self.duration_minutes)
    }

    /// Send the booking request.
    ///
    /// The session starts at the next occurrence of the slot after `now`.
    /// On failure the error is returned and the selections are kept so
    /// the user can retry.
    pub async fn submit<Tz: TimeZone>(
        &mut self,
        gateway: &AsesoriaGateway,
        now: DateTime<Tz>,
    ) -> Result<BookingConfirmation> {
        if !self.can_submit() {
            return Err(AppError::Workflow(
                "Completa todos los campos requeridos.".to_string(),
            ));
        }
        let dto = self.build_request(&now)?;
        dto.validate()?;

        self.loading = true;
        let result = gateway.create(&dto).await;
        self.loading = false;

        let asesoria = result.map_err(|e| {
            tracing::warn!(programmer_id = dto.programmer_id, error = %e, "Booking failed");
            AppError::from(e)
        })?;

        tracing::info!(
            asesoria_id = asesoria.id,
            programmer_id = dto.programmer_id,
            start_at = %dto.start_at,
            "Booking requested"
        );
        self.submitted = Some(asesoria.clone());
        Ok(BookingConfirmation {
            asesoria,
            next: Route::MisAsesorias,
        })
    }

    fn build_request<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<CreateAsesoriaDto> {
        let (Some(programmer_id), Some(modality), Some(slot)) =
            (self.programmer_id, self.modality, self.selected_slot())
        else {
            return Err(AppError::Workflow("Selecciona un horario.".to_string()));
        };

        let start_at = next_occurrence(now, slot.day_of_week, slot.start_time).ok_or_else(|| {
            AppError::Workflow("No se pudo calcular la fecha de la asesoría.".to_string())
        })?;

        Ok(CreateAsesoriaDto {
            programmer_id,
            start_at,
            duration_minutes: self.duration_minutes,
            modality,
            topic: self.topic.trim().to_string(),
            notes: self.notes.clone(),
        })
    }
}

/// Next start of a weekly slot at or after `now`, in `now`'s time zone.
///
/// Today counts if the weekday matches and the start time has not passed
/// yet; otherwise the nearest later date with that weekday is used. A date
/// whose start time does not exist locally (a DST gap) is skipped.
pub fn next_occurrence<Tz: TimeZone>(
    now: &DateTime<Tz>,
    day: DayOfWeek,
    start: NaiveTime,
) -> Option<DateTime<Utc>> {
    let local = now.naive_local();
    let today = local.date();

    (0..=14).find_map(|offset| {
        let date = today + Duration::days(offset);
        if date.weekday() != day.weekday() || (offset == 0 && start < local.time()) {
            return None;
        }
        now.timezone()
            .from_local_datetime(&date.and_time(start))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult, NaiveDate, NaiveDateTime};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    // 2026-10-18 is a Sunday.

    #[test]
    fn test_next_occurrence_today_if_not_passed() {
        let now = utc(2026, 10, 18, 9, 0);
        assert_eq!(
            next_occurrence(&now, DayOfWeek::Domingo, t(10, 0)),
            Some(utc(2026, 10, 18, 10, 0))
        );
    }

    #[test]
    fn test_next_occurrence_skips_to_next_week_once_passed() {
        let now = utc(2026, 10, 18, 11, 0);
        assert_eq!(
            next_occurrence(&now, DayOfWeek::Domingo, t(10, 0)),
            Some(utc(2026, 10, 25, 10, 0))
        );
    }

    #[test]
    fn test_next_occurrence_other_weekday() {
        let now = utc(2026, 10, 18, 23, 0);
        assert_eq!(
            next_occurrence(&now, DayOfWeek::Miercoles, t(14, 30)),
            Some(utc(2026, 10, 21, 14, 30))
        );
    }

    #[test]
    fn test_next_occurrence_uses_local_wall_clock() {
        // Monday 08:00 at UTC-5 is Monday 13:00 UTC.
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2026, 10, 19, 7, 0, 0).unwrap();
        assert_eq!(
            next_occurrence(&now, DayOfWeek::Lunes, t(8, 0)),
            Some(utc(2026, 10, 19, 13, 0))
        );
    }

    /// UTC, except that Monday 2026-10-19 09:00 local never happens.
    #[derive(Debug, Clone, Copy)]
    struct GapZone;

    impl GapZone {
        fn offset_for(local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let gap = NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap();
            if *local == gap {
                LocalResult::None
            } else {
                LocalResult::Single(FixedOffset::east_opt(0).unwrap())
            }
        }
    }

    impl TimeZone for GapZone {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            GapZone
        }

        fn offset_from_local_date(&self, _: &NaiveDate) -> LocalResult<FixedOffset> {
            LocalResult::Single(FixedOffset::east_opt(0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            Self::offset_for(local)
        }

        fn offset_from_utc_date(&self, _: &NaiveDate) -> FixedOffset {
            FixedOffset::east_opt(0).unwrap()
        }

        fn offset_from_utc_datetime(&self, _: &NaiveDateTime) -> FixedOffset {
            FixedOffset::east_opt(0).unwrap()
        }
    }

    #[test]
    fn test_next_occurrence_skips_missing_local_time() {
        let now = GapZone.from_utc_datetime(&utc(2026, 10, 18, 12, 0).naive_utc());
        assert_eq!(
            next_occurrence(&now, DayOfWeek::Lunes, t(9, 0)),
            Some(utc(2026, 10, 26, 9, 0))
        );
        assert_eq!(
            next_occurrence(&now, DayOfWeek::Lunes, t(9, 30)),
            Some(utc(2026, 10, 19, 9, 30))
        );
    }

    fn slot(id: i64, modality: Modality, enabled: bool) -> AvailabilitySlot {
        AvailabilitySlot {
            id,
            programmer_id: 5,
            day_of_week: DayOfWeek::Lunes,
            start_time: t(9, 0),
            end_time: t(12, 0),
            modality,
            enabled,
        }
    }

    fn workflow_with_slots() -> BookingWorkflow {
        let mut wf = BookingWorkflow::new(60, 5);
        wf.programmer_id = Some(5);
        wf.slots = vec![
            slot(1, Modality::Virtual, true),
            slot(2, Modality::Virtual, false),
            slot(3, Modality::Presencial, true),
        ];
        wf
    }

    #[test]
    fn test_steps_follow_selections() {
        let mut wf = BookingWorkflow::new(60, 5);
        assert_eq!(wf.step(), WorkflowStep::SelectProgrammer);

        let mut wf2 = workflow_with_slots();
        assert_eq!(wf2.step(), WorkflowStep::SelectModality);
        wf2.select_modality(Modality::Virtual);
        assert_eq!(wf2.step(), WorkflowStep::SelectSlot);
        wf2.select_slot(1).unwrap();
        assert_eq!(wf2.step(), WorkflowStep::FillDetails);

        wf.select_modality(Modality::Virtual);
        assert_eq!(wf.step(), WorkflowStep::SelectProgrammer);
    }

    #[test]
    fn test_only_offerable_slots_can_be_selected() {
        let mut wf = workflow_with_slots();
        assert!(matches!(wf.select_slot(1), Err(AppError::Workflow(_))));

        wf.select_modality(Modality::Virtual);
        assert!(wf.select_slot(2).is_err());
        assert!(wf.select_slot(3).is_err());
        assert!(wf.select_slot(99).is_err());
        assert_eq!(wf.select_slot(1).unwrap().id, 1);
    }

    #[test]
    fn test_changing_modality_clears_slot() {
        let mut wf = workflow_with_slots();
        wf.select_modality(Modality::Virtual);
        wf.select_slot(1).unwrap();

        wf.select_modality(Modality::Virtual);
        assert!(wf.selected_slot().is_some());

        wf.select_modality(Modality::Presencial);
        assert!(wf.selected_slot().is_none());
        assert_eq!(wf.available_slots().len(), 1);
    }

    #[test]
    fn test_can_submit_requires_topic_length() {
        let mut wf = workflow_with_slots();
        wf.select_modality(Modality::Virtual);
        wf.select_slot(1).unwrap();

        wf.set_details("  abc  ", None);
        assert!(!wf.can_submit());

        wf.set_details("Ayuda con Angular", Some("  "));
        assert!(wf.can_submit());
        assert_eq!(wf.notes, None);
    }

    #[test]
    fn test_can_submit_matches_submit_validation() {
        let mut wf = workflow_with_slots();
        wf.min_topic_length = 3;
        wf.select_modality(Modality::Virtual);
        wf.select_slot(1).unwrap();
        wf.set_details("Git?", None);
        assert!(wf.can_submit());
        let dto = wf.build_request(&utc(2026, 10, 18, 12, 0)).unwrap();
        assert!(dto.validate().is_ok());

        wf.set_details(&"x".repeat(201), None);
        assert!(!wf.can_submit());

        let mut short = BookingWorkflow::new(10, 5);
        short.programmer_id = Some(5);
        short.slots = wf.slots.clone();
        short.select_modality(Modality::Virtual);
        short.select_slot(1).unwrap();
        short.set_details("Ayuda con Angular", None);
        assert!(!short.can_submit());
    }

    #[test]
    fn test_request_is_built_from_selection() {
        let mut wf = workflow_with_slots();
        wf.select_modality(Modality::Virtual);
        wf.select_slot(1).unwrap();
        wf.set_details(" Ayuda con Angular ", Some("Traigo el repo"));

        let dto = wf.build_request(&utc(2026, 10, 18, 12, 0)).unwrap();
        assert_eq!(dto.programmer_id, 5);
        assert_eq!(dto.duration_minutes, 60);
        assert_eq!(dto.modality, Modality::Virtual);
        assert_eq!(dto.topic, "Ayuda con Angular");
        assert_eq!(dto.start_at, utc(2026, 10, 19, 9, 0));
        assert!(dto.validate().is_ok());
    }
}
