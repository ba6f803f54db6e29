//! Command-line host.
//!
//! Thin wrapper that drives the containers the way a UI would and prints
//! results as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

use crate::api::{Credentials, ItemId, Registration, SortDirection};
use crate::config::{Config, FileTokenStore};
use crate::router::Navigation;
use crate::store::{FetchOptions, FetchOutcome};
use crate::Client;

#[derive(Debug, Parser)]
#[command(name = "itemdesk", version, about = "Client for the item service")]
pub struct Cli {
    /// Path to config.toml (default: <config_dir>/itemdesk/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log request details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and forget the stored token
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List a page of items
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Page size (default: list.per_page from config)
        #[arg(long)]
        per_page: Option<u32>,
        /// Sort key; `row_number` orders by display position
        #[arg(long)]
        sort_by: Option<String>,
        #[arg(long, value_parser = parse_direction)]
        sort_direction: Option<SortDirection>,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show one item
    Show { id: ItemId },
    /// Create an item from key=value pairs or a JSON object
    Create {
        #[arg(long = "set", value_name = "KEY=VALUE")]
        fields: Vec<String>,
        #[arg(long, conflicts_with = "fields")]
        json: Option<String>,
    },
    /// Update an item from key=value pairs or a JSON object
    Update {
        id: ItemId,
        #[arg(long = "set", value_name = "KEY=VALUE")]
        fields: Vec<String>,
        #[arg(long, conflicts_with = "fields")]
        json: Option<String>,
    },
    /// Delete an item
    Delete { id: ItemId },
    /// Show where navigating to a path would end up
    Open { path: String },
}

fn parse_direction(s: &str) -> Result<SortDirection, String> {
    SortDirection::parse(s).ok_or_else(|| format!("expected 'asc' or 'desc', got '{}'", s))
}

/// Build a JSON object payload from `--json` or `--set key=value` pairs.
///
/// Values that parse as JSON (numbers, booleans, quoted strings) keep their
/// type; anything else is sent as a string.
pub fn build_payload(fields: &[String], json: Option<&str>) -> Result<Value> {
    if let Some(raw) = json {
        let value: Value = serde_json::from_str(raw).context("--json is not valid JSON")?;
        if !value.is_object() {
            bail!("--json must be a JSON object");
        }
        return Ok(value);
    }

    let mut map = Map::new();
    for field in fields {
        let Some((key, raw)) = field.split_once('=') else {
            bail!("expected KEY=VALUE, got '{}'", field);
        };
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        map.insert(key.to_string(), value);
    }
    Ok(Value::Object(map))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run one command against the configured service.
pub async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    let tokens = Arc::new(FileTokenStore::new(config.token_path()));
    let client = Client::new(&config, tokens).context("Failed to build HTTP client")?;

    match cli.command {
        Command::Login { email, password } => {
            let ok = client.session.login(&Credentials { email, password }).await;
            if !ok {
                bail!(session_error(&client));
            }
            print_json(&client.session.user())?;
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            let registration = Registration {
                name,
                email,
                password_confirmation: password.clone(),
                password,
            };
            if !client.session.register(&registration).await {
                bail!(session_error(&client));
            }
            print_json(&client.session.user())?;
        }
        Command::Logout => {
            if !client.logout().await {
                bail!("Logout failed");
            }
            println!("Signed out");
        }
        Command::Whoami => {
            client.session.fetch_user().await;
            match client.session.user() {
                Some(user) => print_json(&user)?,
                None => bail!("Not signed in"),
            }
        }
        Command::List {
            page,
            per_page,
            sort_by,
            sort_direction,
            search,
        } => {
            let options = FetchOptions {
                page,
                per_page: per_page.unwrap_or(config.list.per_page),
                sort_by,
                sort_direction,
                search,
            };
            match client.items.fetch_items(options).await {
                FetchOutcome::Committed => {
                    let state = client.items.state();
                    print_json(&serde_json::json!({
                        "data": state.items,
                        "meta": state.pagination,
                    }))?;
                }
                FetchOutcome::Superseded => bail!("Request was superseded"),
                FetchOutcome::Failed { message } => bail!(message),
            }
        }
        Command::Show { id } => {
            let item = client.items.fetch_item(id).await?;
            print_json(&item)?;
        }
        Command::Create { fields, json } => {
            let payload = build_payload(&fields, json.as_deref())?;
            let item = client.items.create_item(&payload).await?;
            print_json(&item)?;
        }
        Command::Update { id, fields, json } => {
            let payload = build_payload(&fields, json.as_deref())?;
            let item = client.items.update_item(id, &payload).await?;
            print_json(&item)?;
        }
        Command::Delete { id } => {
            client.items.delete_item(id).await?;
            println!("Deleted item {}", id);
        }
        Command::Open { path } => match client.guard.before_each(&path).await {
            Navigation::Proceed(matched) => println!("{} ({})", matched.path, matched.name),
            Navigation::Redirect(to) => println!("redirect -> {}", to),
            Navigation::NotFound => bail!("No route matches '{}'", path),
        },
    }

    Ok(())
}

fn session_error(client: &Client) -> String {
    client
        .session
        .state()
        .error
        .unwrap_or_else(|| "Authentication failed".to_string())
}
