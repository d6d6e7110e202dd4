// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly availability slots declared by programmers.

use crate::time_utils::{format_hhmm, hhmm, hhmm_option};
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

/// Day of the week, as the backend spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Lunes,
    Martes,
    Miercoles,
    Jueves,
    Viernes,
    Sabado,
    Domingo,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Lunes,
        DayOfWeek::Martes,
        DayOfWeek::Miercoles,
        DayOfWeek::Jueves,
        DayOfWeek::Viernes,
        DayOfWeek::Sabado,
        DayOfWeek::Domingo,
    ];

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Lunes,
            Weekday::Tue => DayOfWeek::Martes,
            Weekday::Wed => DayOfWeek::Miercoles,
            Weekday::Thu => DayOfWeek::Jueves,
            Weekday::Fri => DayOfWeek::Viernes,
            Weekday::Sat => DayOfWeek::Sabado,
            Weekday::Sun => DayOfWeek::Domingo,
        }
    }

    pub fn weekday(self) -> Weekday {
        match self {
            DayOfWeek::Lunes => Weekday::Mon,
            DayOfWeek::Martes => Weekday::Tue,
            DayOfWeek::Miercoles => Weekday::Wed,
            DayOfWeek::Jueves => Weekday::Thu,
            DayOfWeek::Viernes => Weekday::Fri,
            DayOfWeek::Sabado => Weekday::Sat,
            DayOfWeek::Domingo => Weekday::Sun,
        }
    }

    /// Wire name (`MIERCOLES`).
    pub fn as_str(self) -> &'static str {
        match self {
            DayOfWeek::Lunes => "LUNES",
            DayOfWeek::Martes => "MARTES",
            DayOfWeek::Miercoles => "MIERCOLES",
            DayOfWeek::Jueves => "JUEVES",
            DayOfWeek::Viernes => "VIERNES",
            DayOfWeek::Sabado => "SABADO",
            DayOfWeek::Domingo => "DOMINGO",
        }
    }

    /// Display name (`Miércoles`).
    pub fn label(self) -> &'static str {
        match self {
            DayOfWeek::Lunes => "Lunes",
            DayOfWeek::Martes => "Martes",
            DayOfWeek::Miercoles => "Miércoles",
            DayOfWeek::Jueves => "Jueves",
            DayOfWeek::Viernes => "Viernes",
            DayOfWeek::Sabado => "Sábado",
            DayOfWeek::Domingo => "Domingo",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase().replace('É', "E").replace('Á', "A");
        DayOfWeek::ALL
            .into_iter()
            .find(|d| d.as_str() == upper)
            .ok_or_else(|| format!("unknown day of week '{s}'"))
    }
}

/// Delivery mode of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    Presencial,
    Virtual,
    Hibrida,
}

impl Modality {
    pub fn as_str(self) -> &'static str {
        match self {
            Modality::Presencial => "PRESENCIAL",
            Modality::Virtual => "VIRTUAL",
            Modality::Hibrida => "HIBRIDA",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Modality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PRESENCIAL" => Ok(Modality::Presencial),
            "VIRTUAL" => Ok(Modality::Virtual),
            "HIBRIDA" | "HÍBRIDA" => Ok(Modality::Hibrida),
            other => Err(format!("unknown modality '{other}'")),
        }
    }
}

/// A recurring weekly availability window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub id: i64,
    #[serde(default)]
    pub programmer_id: i64,
    pub day_of_week: DayOfWeek,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub modality: Modality,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl AvailabilitySlot {
    /// `start < end` within the same day.
    pub fn is_well_formed(&self) -> bool {
        self.start_time < self.end_time
    }

    pub fn describe(&self) -> String {
        format!(
            "{} {}-{} ({})",
            self.day_of_week.label(),
            format_hhmm(self.start_time),
            format_hhmm(self.end_time),
            self.modality
        )
    }
}

/// Slots never span midnight: an end at or before the start is rejected
/// instead of being read as a wrap-around.
fn check_range(start: NaiveTime, end: NaiveTime) -> Result<(), ValidationError> {
    if start < end {
        return Ok(());
    }
    let mut err = ValidationError::new("time_range");
    err.message = Some("La hora de fin debe ser posterior a la hora de inicio.".into());
    Err(err)
}

/// New slot request.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_range"))]
pub struct CreateAvailabilityDto {
    pub day_of_week: DayOfWeek,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub modality: Modality,
}

fn validate_create_range(dto: &CreateAvailabilityDto) -> Result<(), ValidationError> {
    check_range(dto.start_time, dto.end_time)
}

/// Partial slot update. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_range"))]
pub struct UpdateAvailabilityDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<DayOfWeek>,
    #[serde(skip_serializing_if = "Option::is_none", with = "hhmm_option")]
    pub start_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none", with = "hhmm_option")]
    pub end_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modality: Option<Modality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

fn validate_update_range(dto: &UpdateAvailabilityDto) -> Result<(), ValidationError> {
    match (dto.start_time, dto.end_time) {
        (Some(start), Some(end)) => check_range(start, end),
        _ => Ok(()),
    }
}

impl UpdateAvailabilityDto {
    pub fn toggle(slot: &AvailabilitySlot) -> Self {
        Self {
            enabled: Some(!slot.enabled),
            ..Default::default()
        }
    }

    /// Validate the update merged onto the slot it applies to, so a lone
    /// new end time is still checked against the current start.
    pub fn validate_against(&self, slot: &AvailabilitySlot) -> Result<(), ValidationError> {
        check_range(
            self.start_time.unwrap_or(slot.start_time),
            self.end_time.unwrap_or(slot.end_time),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_slot_wire_format() {
        let json = r#"{"id":4,"programmerId":9,"dayOfWeek":"MIERCOLES","startTime":"09:00","endTime":"12:30:00","modality":"VIRTUAL","enabled":false}"#;
        let slot: AvailabilitySlot = serde_json::from_str(json).unwrap();
        assert_eq!(slot.day_of_week, DayOfWeek::Miercoles);
        assert_eq!(slot.end_time, t(12, 30));
        assert!(!slot.enabled);

        let out = serde_json::to_value(&slot).unwrap();
        assert_eq!(out["endTime"], "12:30");
        assert_eq!(out["dayOfWeek"], "MIERCOLES");
    }

    #[test]
    fn test_create_rejects_inverted_or_empty_range() {
        let mut dto = CreateAvailabilityDto {
            day_of_week: DayOfWeek::Lunes,
            start_time: t(22, 0),
            end_time: t(2, 0),
            modality: Modality::Virtual,
        };
        assert!(dto.validate().is_err());

        dto.end_time = t(22, 0);
        assert!(dto.validate().is_err());

        dto.end_time = t(23, 0);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_serializes_only_set_fields() {
        let slot = AvailabilitySlot {
            id: 1,
            programmer_id: 2,
            day_of_week: DayOfWeek::Lunes,
            start_time: t(9, 0),
            end_time: t(12, 0),
            modality: Modality::Virtual,
            enabled: true,
        };
        let dto = UpdateAvailabilityDto::toggle(&slot);
        assert_eq!(serde_json::to_value(&dto).unwrap(), serde_json::json!({"enabled": false}));

        let dto = UpdateAvailabilityDto {
            end_time: Some(t(8, 0)),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
        assert!(dto.validate_against(&slot).is_err());
    }

    #[test]
    fn test_day_parsing() {
        assert_eq!("miércoles".parse::<DayOfWeek>().unwrap(), DayOfWeek::Miercoles);
        assert_eq!("SABADO".parse::<DayOfWeek>().unwrap(), DayOfWeek::Sabado);
        assert!("funday".parse::<DayOfWeek>().is_err());
        assert_eq!(DayOfWeek::from_weekday(Weekday::Sun), DayOfWeek::Domingo);
    }
}
