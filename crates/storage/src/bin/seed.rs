use std::fmt;

use chrono::{DateTime, Utc};
use storage::repository::Storage;
use tracker_core::model::{CompletionMap, ProblemKey, UserId};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    user_id: UserId,
    keys: Vec<ProblemKey>,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidUserId { raw: String },
    InvalidKey { raw: String },
    InvalidDbUrl { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidUserId { raw } => write!(f, "invalid --user-id value: {raw:?}"),
            ArgsError::InvalidKey { raw } => {
                write!(f, "invalid problem key (expected <step>_<problem>): {raw}")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
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

fn parse_keys(raw: &str) -> Result<Vec<ProblemKey>, ArgsError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<ProblemKey>()
                .map_err(|_| ArgsError::InvalidKey { raw: part.to_owned() })
        })
        .collect()
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("TRACKER_DB_URL").unwrap_or_else(|_| "sqlite:tracker.sqlite3".into());
        let raw_user = std::env::var("TRACKER_USER_ID").unwrap_or_else(|_| "local".into());
        let mut user_id =
            UserId::new(raw_user.clone()).map_err(|_| ArgsError::InvalidUserId { raw: raw_user })?;
        let mut keys = vec![
            ProblemKey::new(0, 0),
            ProblemKey::new(0, 1),
            ProblemKey::new(1, 0),
        ];
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--user-id" => {
                    let value = require_value(&mut args, "--user-id")?;
                    user_id = UserId::new(value.clone())
                        .map_err(|_| ArgsError::InvalidUserId { raw: value })?;
                }
                "--keys" => {
                    let value = require_value(&mut args, "--keys")?;
                    keys = parse_keys(&value)?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            user_id,
            keys,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:tracker.sqlite3)");
    eprintln!("  --user-id <id>            User whose progress is seeded (default: local)");
    eprintln!("  --keys <k1,k2,...>        Problem keys to mark completed (default: 0_0,0_1,1_0)");
    eprintln!("  --now <rfc3339>           Fixed current time for deterministic seeding");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  TRACKER_DB_URL, TRACKER_USER_ID");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let now = args.now.unwrap_or_else(Utc::now);

    let entries: CompletionMap = args.keys.iter().map(|key| (*key, true)).collect();
    storage
        .progress
        .merge_progress(&args.user_id, &entries, now)
        .await?;

    println!(
        "Seeded {} completed problems for {} into {}",
        entries.completed_count(),
        args.user_id,
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
