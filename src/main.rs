// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Asesorías command-line client.
//!
//! Each command enters a route: the same guard a router would run is
//! checked first, then the command talks to the backend through the
//! library services.

use anyhow::{bail, Context};
use asesorias_client::{
    config::Config,
    error::AppError,
    middleware::{guard_for, GuardDecision},
    models::{
        AsesoriaStatus, CreateAvailabilityDto, DayOfWeek, Modality, Party, RegisterOutcome,
        RegisterRequest, ReportDocument, ReportFilters, ReportFormat, UpdateAvailabilityDto,
    },
    navigation::{Route, TracingNavigator},
    services::{matcher, Confirm},
    session::FileStorage,
    time_utils::{format_utc_rfc3339, parse_hhmm},
    AsesoriasClient,
};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

#[derive(Parser, Debug)]
#[command(name = "asesorias", version, about = "Book advisory sessions with programmers")]
struct Cli {
    /// Answer yes to every confirmation prompt.
    #[arg(long, global = true, default_value_t = false)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in with a username or email.
    Login {
        identifier: String,
        /// Read from stdin when omitted.
        #[arg(long, env = "ASESORIAS_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "ASESORIAS_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// List availability slots (your own, or a programmer's).
    Slots {
        #[arg(long)]
        programmer: Option<i64>,
        #[arg(long)]
        modality: Option<Modality>,
    },
    AddSlot {
        #[arg(long)]
        day: DayOfWeek,
        /// Start time, HH:MM.
        #[arg(long)]
        start: String,
        /// End time, HH:MM.
        #[arg(long)]
        end: String,
        #[arg(long)]
        modality: Modality,
    },
    /// Enable or disable one of your slots.
    ToggleSlot { id: i64 },
    DeleteSlot { id: i64 },
    /// Book a session. Without `--slot`, lists the bookable slots.
    Book {
        #[arg(long)]
        programmer: i64,
        #[arg(long)]
        modality: Modality,
        #[arg(long)]
        slot: Option<i64>,
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Your bookings.
    Bookings {
        #[arg(long, value_enum)]
        role: Option<RoleFilter>,
    },
    /// Bookings addressed to you as a programmer.
    Received,
    /// Change the status of a booking you received.
    Respond { id: i64, status: AsesoriaStatus },
    /// Cancel one of your bookings.
    Cancel { id: i64 },
    Users,
    /// Replace a user's roles.
    SetRoles {
        id: i64,
        #[arg(required = true)]
        roles: Vec<String>,
    },
    DeleteUser { id: i64 },
    /// Show the admin dashboard, or download a report document.
    Report {
        #[arg(long, value_enum)]
        document: Option<DocumentArg>,
        #[arg(long, value_enum, default_value_t = FormatArg::Pdf)]
        format: FormatArg,
        /// Directory the document is written to.
        #[arg(long, default_value = ".")]
        output: PathBuf,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        end_date: Option<NaiveDate>,
        #[arg(long)]
        programmer: Option<i64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RoleFilter {
    Client,
    Programmer,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DocumentArg {
    Asesorias,
    Projects,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Pdf,
    Xlsx,
}

impl Command {
    /// Route the command enters; `None` for commands open to everyone.
    fn route(&self) -> Option<Route> {
        match self {
            Command::Login { .. } => Some(Route::Login),
            Command::Register { .. } => Some(Route::Register),
            Command::Logout => None,
            Command::Whoami => Some(Route::Profile),
            Command::Slots {
                programmer: Some(_),
                ..
            }
            | Command::Book { .. } => Some(Route::BookAsesoria),
            Command::Slots { .. }
            | Command::AddSlot { .. }
            | Command::ToggleSlot { .. }
            | Command::DeleteSlot { .. } => Some(Route::Availability),
            Command::Bookings { .. } | Command::Cancel { .. } => Some(Route::MisAsesorias),
            Command::Received | Command::Respond { .. } => Some(Route::AsesoriasRecibidas),
            Command::Users | Command::SetRoles { .. } | Command::DeleteUser { .. } => {
                Some(Route::Admin)
            }
            Command::Report { .. } => Some(Route::Reports),
        }
    }
}

/// Confirmation on the terminal.
struct StdinConfirm {
    assume_yes: bool,
}

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{prompt} [s/N] ");
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let storage = FileStorage::open(&config.session_file).context("Failed to open session file")?;
    let client = AsesoriasClient::new(config, Arc::new(storage), Arc::new(TracingNavigator));

    if let Some(route) = cli.command.route() {
        if let GuardDecision::RedirectTo(target) = guard_for(route, &client.session.snapshot()) {
            bail!("{route} no está disponible para esta sesión (redirigido a {target})");
        }
    }

    let confirm = StdinConfirm { assume_yes: cli.yes };
    if let Err(e) = run(&client, cli.command, &confirm).await {
        let message = match &e {
            AppError::Api(_) => e.user_message("No se pudo completar la operación."),
            _ => e.user_message("Error inesperado."),
        };
        tracing::debug!(error = %e, "Command failed");
        bail!(message);
    }
    Ok(())
}

async fn run(client: &AsesoriasClient, command: Command, confirm: &StdinConfirm) -> Result<(), AppError> {
    match command {
        Command::Login {
            identifier,
            password,
        } => {
            let password = password_or_prompt(password)?;
            let identity = client
                .auth
                .login(&identifier, &password)
                .await
                .map_err(|e| AppError::InvalidInput(e.login_message()))?;
            println!("Bienvenido, {}", identity.name());
        }

        Command::Register {
            username,
            email,
            password,
        } => {
            let request = RegisterRequest {
                username,
                email,
                password: password_or_prompt(password)?,
            };
            match client.auth.register(&request).await? {
                RegisterOutcome::Session(s) => println!("Cuenta creada. Sesión iniciada como {}", s.username),
                RegisterOutcome::Message(msg) => println!("{msg}"),
            }
        }

        Command::Logout => {
            client.auth.logout();
            println!("Sesión cerrada.");
        }

        Command::Whoami => {
            if let Some(identity) = client.session.identity() {
                let roles: Vec<&str> = identity.roles.iter().map(|r| r.as_str()).collect();
                println!("{} <{}> [{}]", identity.name(), identity.email, roles.join(", "));
            }
        }

        Command::Slots {
            programmer,
            modality,
        } => {
            let slots = match programmer {
                Some(id) => client.availability.by_programmer(id).await?,
                None => client.availability.mine().await?,
            };
            let listed: Vec<_> = match modality {
                Some(m) => matcher::offerable_slots(&slots, m),
                None => slots.iter().collect(),
            };
            for slot in listed {
                let state = if slot.enabled { "" } else { " (deshabilitado)" };
                println!("#{} {}{state}", slot.id, slot.describe());
            }
        }

        Command::AddSlot {
            day,
            start,
            end,
            modality,
        } => {
            let dto = CreateAvailabilityDto {
                day_of_week: day,
                start_time: parse_hhmm(&start).map_err(AppError::InvalidInput)?,
                end_time: parse_hhmm(&end).map_err(AppError::InvalidInput)?,
                modality,
            };
            dto.validate()?;
            let slot = client.availability.create(&dto).await?;
            println!("Horario creado: #{} {}", slot.id, slot.describe());
        }

        Command::ToggleSlot { id } => {
            let slots = client.availability.mine().await?;
            let slot = slots
                .iter()
                .find(|s| s.id == id)
                .ok_or_else(|| AppError::InvalidInput(format!("No tienes un horario #{id}.")))?;
            let updated = client
                .availability
                .update(id, &UpdateAvailabilityDto::toggle(slot))
                .await?;
            let state = if updated.enabled { "habilitado" } else { "deshabilitado" };
            println!("Horario #{id} {state}.");
        }

        Command::DeleteSlot { id } => {
            if confirm.confirm("¿Estás seguro de que deseas eliminar este horario?") {
                client.availability.delete(id).await?;
                println!("Horario #{id} eliminado.");
            }
        }

        Command::Book {
            programmer,
            modality,
            slot,
            topic,
            notes,
        } => {
            let mut workflow = client.booking();
            workflow.load_programmers(&client.asesorias).await?;
            workflow.select_programmer(programmer, &client.availability).await?;
            workflow.select_modality(modality);

            let Some(slot_id) = slot else {
                for s in workflow.available_slots() {
                    println!("#{} {}", s.id, s.describe());
                }
                return Ok(());
            };
            workflow.select_slot(slot_id)?;
            workflow.set_details(topic.as_deref().unwrap_or_default(), notes.as_deref());

            let confirmation = workflow.submit(&client.asesorias, Local::now()).await?;
            println!(
                "Asesoría reservada (#{}) para {}.",
                confirmation.asesoria.id,
                format_utc_rfc3339(confirmation.asesoria.start_at)
            );
            tracing::debug!(route = %confirmation.next, "Booking submitted");
        }

        Command::Bookings { role } => {
            let role = role.map(|r| match r {
                RoleFilter::Client => Party::Client,
                RoleFilter::Programmer => Party::Programmer,
            });
            for a in client.asesorias.mine(role).await? {
                println!(
                    "#{} {} {} con {} ({})",
                    a.id,
                    a.status,
                    format_utc_rfc3339(a.start_at),
                    a.programmer_name(),
                    a.modality
                );
            }
        }

        Command::Received => {
            for a in client.asesorias.received().await? {
                println!(
                    "#{} {} {} de {}: {}",
                    a.id,
                    a.status,
                    format_utc_rfc3339(a.start_at),
                    a.client_name(),
                    a.topic.as_deref().unwrap_or("-")
                );
            }
        }

        Command::Respond { id, status } => {
            let actor = current_identity(client)?;
            let asesoria = client.asesorias.get(id).await?;
            if let Some(updated) = client.status.respond(&asesoria, status, &actor, confirm).await? {
                println!("Estado actualizado a {}", updated.status);
            }
        }

        Command::Cancel { id } => {
            let actor = current_identity(client)?;
            let asesoria = client.asesorias.get(id).await?;
            if !confirm.confirm("¿Estás seguro de que deseas cancelar esta asesoría?") {
                return Ok(());
            }
            if asesoria.status == AsesoriaStatus::Pendiente {
                client.status.cancel_request(&asesoria, &actor).await?;
            } else {
                client
                    .status
                    .respond(&asesoria, AsesoriaStatus::Cancelada, &actor, confirm)
                    .await?;
            }
            println!("Asesoría cancelada");
        }

        Command::Users => {
            for user in client.admin.list_users().await? {
                let roles: Vec<String> = user.role_set().iter().map(|r| r.to_string()).collect();
                println!("#{} {} <{}> [{}]", user.id, user.username, user.email, roles.join(", "));
            }
        }

        Command::SetRoles { id, roles } => {
            let updated = client.admin.set_roles(id, roles.as_slice()).await?;
            println!("Roles de {} actualizados.", updated.username);
        }

        Command::DeleteUser { id } => {
            let users = client.admin.list_users().await?;
            let user = users
                .iter()
                .find(|u| u.id == id)
                .ok_or_else(|| AppError::InvalidInput(format!("No existe el usuario #{id}.")))?;
            if client.admin.delete_user(user, confirm).await? {
                println!("Usuario eliminado exitosamente");
            }
        }

        Command::Report {
            document,
            format,
            output,
            start_date,
            end_date,
            programmer,
        } => {
            let filters = ReportFilters {
                start_date,
                end_date,
                programmer_id: programmer,
                ..Default::default()
            };
            match document {
                Some(doc) => {
                    let document = match doc {
                        DocumentArg::Asesorias => ReportDocument::Asesorias,
                        DocumentArg::Projects => ReportDocument::Projects,
                    };
                    let format = match format {
                        FormatArg::Pdf => ReportFormat::Pdf,
                        FormatArg::Xlsx => ReportFormat::Xlsx,
                    };
                    let file = client.reports.download(document, format, &filters).await?;
                    let path = output.join(&file.file_name);
                    std::fs::write(&path, &file.bytes).map_err(|e| {
                        AppError::Internal(anyhow::anyhow!("writing {}: {e}", path.display()))
                    })?;
                    println!("Reporte guardado en {}", path.display());
                }
                None => {
                    let dash = client.reports.dashboard(&filters).await?;
                    println!(
                        "Asesorías: {}  Programadores: {}  Usuarios: {}",
                        dash.total_asesorias, dash.total_programmers, dash.total_users
                    );
                    for s in &dash.asesorias_by_status {
                        println!("  {:<12} {}", s.status, s.count);
                    }
                }
            }
        }
    }
    Ok(())
}

fn current_identity(client: &AsesoriasClient) -> Result<asesorias_client::models::Identity, AppError> {
    client
        .session
        .identity()
        .ok_or_else(|| AppError::NotPermitted("no active session".to_string()))
}

fn password_or_prompt(password: Option<String>) -> Result<String, AppError> {
    if let Some(p) = password {
        return Ok(p);
    }
    eprint!("Contraseña: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Initialize structured JSON logging on stderr; stdout is for command output.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,asesorias_client=info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
