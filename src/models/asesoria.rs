// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Advisory session (asesoría) bookings and their status machine.

use crate::models::Modality;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Booking status.
///
/// ```text
/// PENDIENTE  -> CONFIRMADA | RECHAZADA | CANCELADA
/// CONFIRMADA -> EN_CURSO | CANCELADA
/// EN_CURSO   -> COMPLETADA
/// ```
/// `RECHAZADA`, `CANCELADA` and `COMPLETADA` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AsesoriaStatus {
    Pendiente,
    Confirmada,
    EnCurso,
    Completada,
    Cancelada,
    Rechazada,
}

/// Which side of a booking is acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Client,
    Programmer,
}

impl AsesoriaStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AsesoriaStatus::Pendiente => "PENDIENTE",
            AsesoriaStatus::Confirmada => "CONFIRMADA",
            AsesoriaStatus::EnCurso => "EN_CURSO",
            AsesoriaStatus::Completada => "COMPLETADA",
            AsesoriaStatus::Cancelada => "CANCELADA",
            AsesoriaStatus::Rechazada => "RECHAZADA",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AsesoriaStatus::Rechazada | AsesoriaStatus::Cancelada | AsesoriaStatus::Completada
        )
    }

    /// Whether the state machine has an edge `self -> to`.
    pub fn can_transition_to(self, to: AsesoriaStatus) -> bool {
        use AsesoriaStatus::*;
        matches!(
            (self, to),
            (Pendiente, Confirmada)
                | (Pendiente, Rechazada)
                | (Pendiente, Cancelada)
                | (Confirmada, EnCurso)
                | (Confirmada, Cancelada)
                | (EnCurso, Completada)
        )
    }

    /// Who may move a booking into `to`: cancelling is open to both sides,
    /// every other move belongs to the assigned programmer.
    pub fn allowed_for(to: AsesoriaStatus, party: Party) -> bool {
        match to {
            AsesoriaStatus::Cancelada => true,
            AsesoriaStatus::Pendiente => false,
            _ => party == Party::Programmer,
        }
    }

    /// Statuses reachable from `self` by `party`.
    pub fn next_for(self, party: Party) -> Vec<AsesoriaStatus> {
        use AsesoriaStatus::*;
        [Confirmada, EnCurso, Completada, Cancelada, Rechazada]
            .into_iter()
            .filter(|to| self.can_transition_to(*to) && Self::allowed_for(*to, party))
            .collect()
    }
}

impl fmt::Display for AsesoriaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AsesoriaStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use AsesoriaStatus::*;
        match s.trim().to_uppercase().replace([' ', '-'], "_").as_str() {
            "PENDIENTE" => Ok(Pendiente),
            "CONFIRMADA" => Ok(Confirmada),
            "EN_CURSO" => Ok(EnCurso),
            "COMPLETADA" => Ok(Completada),
            "CANCELADA" => Ok(Cancelada),
            "RECHAZADA" => Ok(Rechazada),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

/// Summary of a user embedded in a booking response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySummary {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// A booking between a client and a programmer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AsesoriaWire")]
pub struct Asesoria {
    pub id: i64,
    pub programmer_id: i64,
    pub client_id: i64,
    pub start_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub modality: Modality,
    pub status: AsesoriaStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub programmer: Option<PartySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<PartySummary>,
}

/// Raw booking response. Some backend revisions send only the nested
/// `programmer`/`client` objects, others only the flat ids.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AsesoriaWire {
    id: i64,
    programmer_id: Option<i64>,
    client_id: Option<i64>,
    start_at: DateTime<Utc>,
    #[serde(default = "default_duration")]
    duration_minutes: u32,
    modality: Modality,
    status: AsesoriaStatus,
    topic: Option<String>,
    notes: Option<String>,
    programmer: Option<PartySummary>,
    client: Option<PartySummary>,
}

fn default_duration() -> u32 {
    60
}

impl TryFrom<AsesoriaWire> for Asesoria {
    type Error = String;

    fn try_from(wire: AsesoriaWire) -> Result<Self, Self::Error> {
        let programmer_id = wire
            .programmer_id
            .or(wire.programmer.as_ref().map(|p| p.id))
            .ok_or_else(|| format!("booking {} has no programmer", wire.id))?;
        let client_id = wire
            .client_id
            .or(wire.client.as_ref().map(|c| c.id))
            .ok_or_else(|| format!("booking {} has no client", wire.id))?;
        Ok(Self {
            id: wire.id,
            programmer_id,
            client_id,
            start_at: wire.start_at,
            duration_minutes: wire.duration_minutes,
            modality: wire.modality,
            status: wire.status,
            topic: wire.topic,
            notes: wire.notes,
            programmer: wire.programmer,
            client: wire.client,
        })
    }
}

impl Asesoria {
    /// Side `user_id` is on, if any.
    pub fn party_of(&self, user_id: i64) -> Option<Party> {
        if user_id == self.programmer_id {
            Some(Party::Programmer)
        } else if user_id == self.client_id {
            Some(Party::Client)
        } else {
            None
        }
    }

    pub fn programmer_name(&self) -> String {
        self.programmer
            .as_ref()
            .map(|p| p.display_name.clone().unwrap_or_else(|| p.username.clone()))
            .unwrap_or_else(|| format!("#{}", self.programmer_id))
    }

    pub fn client_name(&self) -> String {
        self.client
            .as_ref()
            .map(|c| c.display_name.clone().unwrap_or_else(|| c.username.clone()))
            .unwrap_or_else(|| format!("#{}", self.client_id))
    }
}

/// Shortest and longest session the backend accepts, in minutes.
pub const MIN_DURATION_MINUTES: u32 = 15;
pub const MAX_DURATION_MINUTES: u32 = 480;
/// Upper bound on a booking topic. The lower bound is configurable.
pub const MAX_TOPIC_LENGTH: u64 = 200;

/// New booking request. The backend creates it as `PENDIENTE`.
///
/// The minimum topic length is not checked here; it is configured and
/// enforced by the booking workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAsesoriaDto {
    pub programmer_id: i64,
    pub start_at: DateTime<Utc>,
    #[validate(range(min = MIN_DURATION_MINUTES, max = MAX_DURATION_MINUTES))]
    pub duration_minutes: u32,
    pub modality: Modality,
    #[validate(length(max = MAX_TOPIC_LENGTH, message = "Máximo 200 caracteres."))]
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateAsesoriaStatusDto {
    pub status: AsesoriaStatus,
}

/// Programmer as listed for booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Programmer {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl Programmer {
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}
