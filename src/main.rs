use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::env;
use std::path::PathBuf;
use timetable_client::conflicts::checker::check_conflicts;
use timetable_client::core::config::Config;
use timetable_client::core::startup::build_state;
use timetable_client::core::state::AppState;
use timetable_client::core::tracing_init::init_tracing;
use timetable_client::models::timetable::TimetableFilters;
use timetable_client::views::loader::load_admin_overview;
use tracing::{info, warn};

const DEFAULT_CONFIG: &str = "timetable-client.toml";
const USERNAME_ENV: &str = "TIMETABLE_USERNAME";
const PASSWORD_ENV: &str = "TIMETABLE_PASSWORD";

const USAGE: &str = "usage: timetable-client [config.toml] <command>

commands:
  login                   sign in with $TIMETABLE_USERNAME / $TIMETABLE_PASSWORD
  admin-login             same, against the admin login endpoint
  logout                  forget the stored session
  whoami                  print the stored profile
  timetable [k=v ...]     print the timetable (dept_name, year, section)
  conflicts [k=v ...]     list teacher and room double-bookings
  overview                load departments, faculty and rooms together
  ping                    check that the backend answers";

#[derive(Debug, PartialEq)]
enum Command {
    Login { admin: bool },
    Logout,
    WhoAmI,
    Timetable(Vec<String>),
    Conflicts(Vec<String>),
    Overview,
    Ping,
}

fn parse_args(args: &[String]) -> Result<(PathBuf, Command)> {
    let mut rest = args.iter().skip(1).peekable();

    let config_path = rest
        .next_if(|arg| arg.ends_with(".toml"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    let Some(name) = rest.next() else {
        bail!("missing command\n\n{}", USAGE);
    };
    let extra: Vec<String> = rest.cloned().collect();

    let command = match name.as_str() {
        "login" => Command::Login { admin: false },
        "admin-login" => Command::Login { admin: true },
        "logout" => Command::Logout,
        "whoami" => Command::WhoAmI,
        "timetable" => Command::Timetable(extra),
        "conflicts" => Command::Conflicts(extra),
        "overview" => Command::Overview,
        "ping" => Command::Ping,
        other => bail!("unknown command '{}'\n\n{}", other, USAGE),
    };

    Ok((config_path, command))
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let (config_path, command) = parse_args(&args)?;

    let config = Config::load_or_default(&config_path).context(format!(
        "Failed to load configuration from '{}'",
        config_path.display()
    ))?;

    init_tracing(&config.logging);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.runtime.num_threads)
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    runtime.block_on(async_main(config, config_path, command))
}

async fn async_main(config: Config, config_path: PathBuf, command: Command) -> Result<()> {
    let state = build_state(config)?;

    info!(
        config_path = %config_path.display(),
        base_url = %state.config.api.base_url,
        session_storage = %state.config.session.storage,
        session_path = %state.config.session.path.display(),
        num_threads = state.config.runtime.num_threads,
        "Timetable client starting"
    );

    match command {
        Command::Login { admin } => login(&state, admin).await,
        Command::Logout => {
            state.client.logout().context("Failed to clear session")?;
            println!("Logged out");
            Ok(())
        }
        Command::WhoAmI => {
            if !state.client.is_authenticated() {
                bail!("Not logged in");
            }
            print_json(&serde_json::to_value(state.client.current_user())?)
        }
        Command::Timetable(pairs) => timetable(&state, &pairs).await,
        Command::Conflicts(pairs) => conflicts(&state, &pairs).await,
        Command::Overview => overview(&state).await,
        Command::Ping => {
            if state.client.check_connection().await {
                println!("{} is reachable", state.client.base_url());
                Ok(())
            } else {
                bail!("{} is not reachable", state.client.base_url());
            }
        }
    }
}

async fn login(state: &AppState, admin: bool) -> Result<()> {
    let username = env::var(USERNAME_ENV).context(format!("{} is not set", USERNAME_ENV))?;
    let password = env::var(PASSWORD_ENV).context(format!("{} is not set", PASSWORD_ENV))?;

    let reply = if admin {
        state.client.admin_login(&username, &password).await?
    } else {
        state.client.login(&username, &password).await?
    };

    if reply.is_none() {
        bail!("Invalid credentials");
    }
    if !state.client.is_authenticated() {
        bail!("Login response did not include a session token");
    }

    let user = state.client.current_user();
    println!(
        "Logged in as {} ({})",
        user.full_name.filter(|n| !n.is_empty()).unwrap_or(username),
        user.role.map(|r| r.as_str()).unwrap_or("unknown role")
    );
    Ok(())
}

fn filters(pairs: &[String]) -> Result<TimetableFilters> {
    TimetableFilters::from_pairs(pairs.iter().map(String::as_str)).map_err(anyhow::Error::msg)
}

async fn timetable(state: &AppState, pairs: &[String]) -> Result<()> {
    let Some(payload) = state.client.get_timetable(&filters(pairs)?).await? else {
        bail!("Session expired, log in again");
    };
    print_json(&payload)
}

async fn conflicts(state: &AppState, pairs: &[String]) -> Result<()> {
    let Some(slots) = state.client.timetable_slots(&filters(pairs)?).await? else {
        bail!("Session expired, log in again");
    };

    let found = check_conflicts(&slots);
    info!(slots = slots.len(), conflicts = found.len(), "Conflict check finished");

    if found.is_empty() {
        println!("No conflicts in {} slots", slots.len());
    }
    for conflict in &found {
        println!("[{}] {}", conflict.kind, conflict.message);
    }
    Ok(())
}

async fn overview(state: &AppState) -> Result<()> {
    let overview = load_admin_overview(&state.client).await;

    if overview.signed_out() {
        bail!("Session expired, log in again");
    }

    let count = |value: &Value| value.as_array().map(Vec::len);

    match &overview.departments {
        Ok(Some(list)) => println!("departments: {}", count(list).unwrap_or(0)),
        Ok(None) => {}
        Err(e) => println!("departments: {}", e),
    }
    match &overview.faculty {
        Ok(Some(list)) => println!("faculty: {}", count(list).unwrap_or(0)),
        Ok(None) => {}
        Err(e) => println!("faculty: {}", e),
    }
    match &overview.rooms {
        Ok(Some(rooms)) => println!("rooms: {}", rooms.len()),
        Ok(None) => {}
        Err(e) => println!("rooms: {}", e),
    }

    let failed = overview.errors().len();
    if failed > 0 {
        warn!(failed = failed, "Overview loaded partially");
    }
    Ok(())
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
