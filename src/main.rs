//! # pingdom-sync CLI (`pdsync`)
//!
//! Thin command-line front end over [`PingdomGateway`]. Every command
//! prints JSON on stdout; logs go to stderr (`RUST_LOG`, default `info`).
//!
//! ## Usage
//!
//! ```bash
//! export PINGDOM_USERNAME=ops@example.com PINGDOM_PASSWORD=... PINGDOM_APP_KEY=...
//! pdsync [--config ./pdsync.toml] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pdsync contacts list` | List notification contacts |
//! | `pdsync contacts show <id>` | Show one contact |
//! | `pdsync contacts upsert <email> [--name N]` | Create or rename a contact |
//! | `pdsync contacts remove <email>` | Delete a contact |
//! | `pdsync checks list` | List checks |
//! | `pdsync checks find <url>` | Find the check monitoring a URL |
//! | `pdsync parse <url>` | Show how a URL maps to check parameters |
//! | `pdsync alert <url> --contact "Name <email>"` | Reconcile a check's alerts |

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use pingdom_sync::config::{self, Config};
use pingdom_sync::gateway::PingdomGateway;
use pingdom_sync::models::DesiredContact;
use pingdom_sync::transport::{Credentials, HttpRequester};
use pingdom_sync::url::parse_check_url;

/// Reconcile uptime checks and alert contacts against the Pingdom API.
///
/// Credentials are read from `PINGDOM_USERNAME`, `PINGDOM_PASSWORD` and
/// `PINGDOM_APP_KEY`.
#[derive(Parser)]
#[command(name = "pdsync", version)]
struct Cli {
    /// Path to a configuration file (TOML). Built-in defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage notification contacts.
    Contacts {
        #[command(subcommand)]
        action: ContactsAction,
    },

    /// Inspect checks.
    Checks {
        #[command(subcommand)]
        action: ChecksAction,
    },

    /// Split a URL into the host, path and encryption a check would use.
    ///
    /// Runs offline; prints `null` for URLs no check can monitor.
    Parse { url: String },

    /// Point the check monitoring URL at the given contacts.
    ///
    /// Contacts are created or renamed as needed. The check itself must
    /// already exist.
    Alert {
        url: String,

        /// Contact as `Name <email>`. Repeatable.
        #[arg(long = "contact", value_parser = parse_contact, required = true)]
        contacts: Vec<DesiredContact>,

        /// Check interval in minutes (1, 5, 15, 30 or 60).
        #[arg(long)]
        resolution: Option<u32>,

        /// Also notify the contacts by email.
        #[arg(long)]
        send_email: bool,
    },
}

#[derive(Subcommand)]
enum ContactsAction {
    List,
    Show {
        id: u64,
    },
    /// Create the contact, or rename it if it exists with another name.
    Upsert {
        email: String,
        /// Defaults to the email.
        #[arg(long)]
        name: Option<String>,
    },
    Remove {
        email: String,
    },
}

#[derive(Subcommand)]
enum ChecksAction {
    List,
    Find { url: String },
}

/// Parse `Name <email>`, or a bare email.
fn parse_contact(s: &str) -> Result<DesiredContact, String> {
    let s = s.trim();
    let Some((name, rest)) = s.split_once('<') else {
        if s.is_empty() {
            return Err("contact must not be empty".to_string());
        }
        return Ok(DesiredContact::email_only(s));
    };
    let email = rest
        .strip_suffix('>')
        .ok_or_else(|| format!("invalid contact '{}': expected 'Name <email>'", s))?
        .trim();
    if email.is_empty() {
        return Err(format!("invalid contact '{}': empty email", s));
    }
    let name = name.trim();
    Ok(DesiredContact {
        name: (!name.is_empty()).then(|| name.to_string()),
        email: email.to_string(),
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn connect(cfg: &Config) -> Result<PingdomGateway<HttpRequester>> {
    let credentials = Credentials::from_env()?;
    let requester = HttpRequester::new(&cfg.api, credentials)?;
    Ok(PingdomGateway::with_settings(requester, cfg.alerts.clone()))
}

fn run(cli: Cli) -> Result<ExitCode> {
    // Commands that don't require config or credentials
    if let Commands::Parse { url } = &cli.command {
        print_json(&parse_check_url(url))?;
        return Ok(ExitCode::SUCCESS);
    }

    let cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => Config::default(),
    };
    let mut gateway = connect(&cfg)?;

    match cli.command {
        Commands::Contacts { action } => match action {
            ContactsAction::List => print_json(&gateway.notification_contacts()?)?,
            ContactsAction::Show { id } => {
                let contact = gateway
                    .notification_contact(id)?
                    .with_context(|| format!("no notification contact with id {}", id))?;
                print_json(&contact)?;
            }
            ContactsAction::Upsert { email, name } => {
                let contact = gateway.add_or_modify_contact(&DesiredContact { name, email })?;
                print_json(&contact)?;
            }
            ContactsAction::Remove { email } => {
                match gateway.remove_notification_contact(&email)? {
                    Some(message) => print_json(&serde_json::json!({ "message": message }))?,
                    None => eprintln!("No notification contact with email {}", email),
                }
            }
        },
        Commands::Checks { action } => match action {
            ChecksAction::List => print_json(&gateway.checks()?)?,
            ChecksAction::Find { url } => match gateway.find_check_by_url(&url)? {
                Some(check) => print_json(&serde_json::json!({
                    "check": check,
                    "url": gateway.check_url(&check),
                }))?,
                None => {
                    eprintln!("No check monitors {}", url);
                    return Ok(ExitCode::FAILURE);
                }
            },
        },
        Commands::Alert {
            url,
            contacts,
            resolution,
            send_email,
        } => {
            let resolution = resolution.unwrap_or(cfg.alerts.default_resolution);
            match gateway.add_or_modify_alert(&url, &contacts, resolution, send_email) {
                Ok(receipt) => print_json(&receipt)?,
                Err(_) => {
                    eprintln!(
                        "Error: {}",
                        gateway.last_error().unwrap_or("alert reconciliation failed")
                    );
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Parse { .. } => unreachable!(),
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
