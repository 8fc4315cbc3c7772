use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock, TrackerConfig};
use tokio::runtime::Handle;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt as log_fmt};
use ui::{App, UiApp, build_app_context};

const BUNDLED_CURRICULUM: &str = include_str!("../data/curriculum.json");

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidUserId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidUserId { raw } => write!(f, "invalid --user-id value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--curriculum <path|url>]");
    eprintln!("                      [--user-id <id>] [--user-name <name>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:tracker.sqlite3");
    eprintln!("  --curriculum <bundled>");
    eprintln!("  --user-id local");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRACKER_DB_URL, TRACKER_CURRICULUM, TRACKER_USER_ID, TRACKER_USER_NAME, RUST_LOG");
}

/// Flags override the environment-derived config.
fn parse_args(
    mut config: TrackerConfig,
    args: &mut impl Iterator<Item = String>,
) -> Result<Option<TrackerConfig>, ArgsError> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                let value = require_value(args, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value });
                }
                config.db_url = value;
            }
            "--curriculum" => {
                config.curriculum = Some(require_value(args, "--curriculum")?);
            }
            "--user-id" => {
                let value = require_value(args, "--user-id")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidUserId { raw: value });
                }
                config.user_id = value;
            }
            "--user-name" => {
                config.user_name = Some(require_value(args, "--user-name")?);
            }
            "--help" | "-h" => return Ok(None),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    config.db_url = normalize_sqlite_url(config.db_url);
    Ok(Some(config))
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let Some(config) = parse_args(TrackerConfig::from_env(), &mut args).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?
    else {
        print_usage();
        return Ok(());
    };

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&config.db_url)?;
    let services =
        AppServices::new_sqlite(&config, BUNDLED_CURRICULUM, Clock::system(), Handle::current())
            .await?;
    info!(db = %config.db_url, user = %config.user_id, "starting tracker");

    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Tracker")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    log_fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
