// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Booking status changes.
//!
//! The backend enforces the state machine as well; checking here first
//! keeps invalid requests from ever being sent.

use crate::error::{AppError, Result};
use crate::gateways::AsesoriaGateway;
use crate::models::{Asesoria, AsesoriaStatus, Identity, Party};
use crate::services::admin::Confirm;

#[derive(Clone)]
pub struct StatusService {
    gateway: AsesoriaGateway,
}

impl StatusService {
    pub fn new(gateway: AsesoriaGateway) -> Self {
        Self { gateway }
    }

    /// Move `asesoria` to `target` on behalf of `actor`.
    ///
    /// Rejecting a request asks `confirm` first; a declined confirmation
    /// returns `Ok(None)` and sends nothing.
    pub async fn respond(
        &self,
        asesoria: &Asesoria,
        target: AsesoriaStatus,
        actor: &Identity,
        confirm: &dyn Confirm,
    ) -> Result<Option<Asesoria>> {
        check_transition(asesoria, target, actor)?;

        if target == AsesoriaStatus::Rechazada
            && !confirm.confirm("¿Estás seguro de que deseas rechazar esta asesoría?")
        {
            return Ok(None);
        }

        let updated = self.gateway.update_status(asesoria.id, target).await?;
        tracing::info!(
            asesoria_id = asesoria.id,
            from = %asesoria.status,
            to = %updated.status,
            user_id = actor.id,
            "Booking status updated"
        );
        Ok(Some(updated))
    }

    /// Withdraw a request that has not been answered yet.
    ///
    /// Only `PENDIENTE` bookings are deleted; once the programmer has
    /// answered, cancelling goes through [`StatusService::respond`].
    pub async fn cancel_request(&self, asesoria: &Asesoria, actor: &Identity) -> Result<()> {
        if asesoria.party_of(actor.id).is_none() {
            return Err(AppError::NotPermitted(format!(
                "user {} is not part of booking {}",
                actor.id, asesoria.id
            )));
        }
        if asesoria.status != AsesoriaStatus::Pendiente {
            return Err(AppError::InvalidTransition {
                from: asesoria.status,
                to: AsesoriaStatus::Cancelada,
            });
        }

        self.gateway.delete(asesoria.id).await?;
        tracing::info!(asesoria_id = asesoria.id, user_id = actor.id, "Booking request withdrawn");
        Ok(())
    }
}

/// State machine and actor rules for a status change.
pub fn check_transition(asesoria: &Asesoria, target: AsesoriaStatus, actor: &Identity) -> Result<Party> {
    let party = asesoria.party_of(actor.id).ok_or_else(|| {
        AppError::NotPermitted(format!(
            "user {} is not part of booking {}",
            actor.id, asesoria.id
        ))
    })?;

    if !asesoria.status.can_transition_to(target) {
        return Err(AppError::InvalidTransition {
            from: asesoria.status,
            to: target,
        });
    }
    if !AsesoriaStatus::allowed_for(target, party) {
        return Err(AppError::NotPermitted(format!(
            "{party:?} cannot move a booking to {target}"
        )));
    }
    Ok(party)
}
