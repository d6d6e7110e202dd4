// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Administrative operations: accounts, roles and portfolio moderation.
//!
//! Destructive calls ask a [`Confirm`] first; a declined confirmation
//! returns `Ok(false)` and sends nothing.

use crate::error::{AppError, Result};
use crate::gateways::{PortfolioGateway, UsersGateway};
use crate::models::{Portfolio, Role, UpdateRolesDto, UserAccount};
use crate::session::SessionStore;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Clone)]
pub struct AdminService {
    users: UsersGateway,
    portfolios: PortfolioGateway,
    session: Arc<SessionStore>,
}

impl AdminService {
    pub fn new(users: UsersGateway, portfolios: PortfolioGateway, session: Arc<SessionStore>) -> Self {
        Self {
            users,
            portfolios,
            session,
        }
    }

    fn require_admin(&self) -> Result<()> {
        if self.session.is_admin() {
            Ok(())
        } else {
            Err(AppError::NotPermitted("admin role required".to_string()))
        }
    }

    pub async fn list_users(&self) -> Result<Vec<UserAccount>> {
        self.require_admin()?;
        Ok(self.users.list().await?)
    }

    pub async fn delete_user(&self, user: &UserAccount, confirm: &dyn Confirm) -> Result<bool> {
        self.require_admin()?;
        let prompt = format!(
            "¿Estás seguro de eliminar a {}? Esta acción no se puede deshacer.",
            user.username
        );
        if !confirm.confirm(&prompt) {
            return Ok(false);
        }

        self.users.delete(user.id).await?;
        tracing::info!(user_id = user.id, "User deleted");
        Ok(true)
    }

    /// Replace a user's roles. Names are sent bare (`ADMIN`); `USER` is
    /// always kept.
    pub async fn set_roles<S: AsRef<str>>(&self, user_id: i64, roles: &[S]) -> Result<UserAccount> {
        self.require_admin()?;
        let mut set: BTreeSet<Role> = roles.iter().filter_map(|r| Role::parse(r.as_ref())).collect();
        set.insert(Role::User);

        let dto = UpdateRolesDto::from_roles(&set);
        let updated = self.users.update_roles(user_id, &dto).await?;
        tracing::info!(user_id, roles = ?dto.role_names, "User roles updated");
        Ok(updated)
    }

    /// Promote a user to programmer, or demote a programmer back to a
    /// plain user.
    pub async fn toggle_programmer(&self, user: &UserAccount) -> Result<UserAccount> {
        if user.role_set().contains(&Role::Programador) {
            self.set_roles(user.id, &["USER"]).await
        } else {
            self.set_roles(user.id, &["PROGRAMADOR", "USER"]).await
        }
    }

    /// Delete a portfolio project. Allowed for its owner and for admins.
    pub async fn delete_portfolio(&self, project: &Portfolio, confirm: &dyn Confirm) -> Result<bool> {
        let state = self.session.snapshot();
        let owner = state
            .identity()
            .zip(project.owner_id)
            .is_some_and(|(identity, owner_id)| identity.owns(owner_id));
        if !owner && !state.is_admin() {
            return Err(AppError::NotPermitted(format!(
                "not allowed to delete project {}",
                project.id
            )));
        }

        let prompt = format!("¿Eliminar el proyecto \"{}\"?", project.title);
        if !confirm.confirm(&prompt) {
            return Ok(false);
        }

        self.portfolios.delete(project.id).await?;
        tracing::info!(portfolio_id = project.id, "Portfolio deleted");
        Ok(true)
    }
}
