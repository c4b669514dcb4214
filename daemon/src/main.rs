//! verifybot daemon: offline administration of the record store and the
//! bot option document.
//!
//! Records added here get their roles the next time the member joins or is
//! seen by the bot; nothing is sent to the chat platform.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use verifybot_config::{BotConfig, Value};
use verifybot_node::{init_logging, LogFormat, NodeConfig, VerifyNode};
use verifybot_store::RecordStore;
use verifybot_store_lmdb::{check_integrity, IntegrityReport};
use verifybot_types::{normalize_email, AccountId, CohortYear, Timestamp, VerificationRecord};

#[derive(Parser)]
#[command(name = "verifybot-daemon", about = "verifybot record store and config admin")]
struct Cli {
    /// Path to a node TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "VERIFYBOT_NODE_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for the record store.
    #[arg(long, env = "VERIFYBOT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path of the bot option document.
    #[arg(long, env = "VERIFYBOT_BOT_CONFIG")]
    bot_config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "VERIFYBOT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "VERIFYBOT_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Read or change bot options.
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Look up or add verification records.
    #[command(name = "user")]
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Link alt accounts.
    #[command(name = "alt")]
    Alt {
        #[command(subcommand)]
        action: AltAction,
    },
    /// Open the record store and run its integrity check.
    Check,
}

#[derive(clap::Subcommand)]
enum ConfigAction {
    /// Print every option.
    List,
    /// Print one option.
    Get { name: String },
    /// Change one option. The value is parsed as TOML when possible
    /// (`42`, `"text"`, `["Gunn", "Paly"]`), otherwise taken as a string.
    Set { name: String, value: String },
}

#[derive(clap::Subcommand)]
enum UserAction {
    /// Print the effective record of an account.
    Get { account: AccountId },
    /// Add a record without any checks.
    Add {
        account: AccountId,
        name: String,
        school: String,
        year: CohortYear,
        email: String,
    },
}

#[derive(clap::Subcommand)]
enum AltAction {
    /// Link ALT to OWNER's record.
    Add { alt: AccountId, owner: AccountId },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let path = path.to_string_lossy();
            NodeConfig::from_toml_file(&path)
                .with_context(|| format!("failed to load node config {path}"))?
        }
        None => NodeConfig::default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(bot_config) = cli.bot_config {
        config.bot_config = bot_config;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    let format: LogFormat = config.log_format.parse()?;
    init_logging(format, &config.log_level)?;

    match cli.command {
        Command::Config { action } => {
            let bot_config = BotConfig::load(&config.bot_config).with_context(|| {
                format!("failed to load bot config {}", config.bot_config.display())
            })?;
            run_config(&bot_config, action)?;
        }
        Command::User { action } => {
            let node = VerifyNode::open(&config)?;
            match action {
                UserAction::Get { account } => match node.store().get_user(account)? {
                    Some(record) => println!("{record}"),
                    None => println!("No info associated with account {account}."),
                },
                UserAction::Add {
                    account,
                    name,
                    school,
                    year,
                    email,
                } => {
                    let record = VerificationRecord {
                        account_id: account,
                        name,
                        school,
                        cohort_year: year,
                        email: normalize_email(&email),
                        joined_at: Timestamp::now(),
                    };
                    node.store().add_user(&record)?;
                    tracing::info!(account = %account, "record added from the command line");
                    println!("{record}");
                }
            }
        }
        Command::Alt {
            action: AltAction::Add { alt, owner },
        } => {
            let node = VerifyNode::open(&config)?;
            let link = node.store().add_alt(alt, owner)?;
            tracing::info!(alt = %link.alt_id, owner = %link.owner_id, "alt linked from the command line");
            println!("{} is now an alt of {}", link.alt_id, link.owner_id);
        }
        Command::Check => {
            let node = VerifyNode::open(&config)?;
            let report = check_integrity(node.store())?;
            for line in describe_integrity(&report) {
                println!("{line}");
            }
            if !report.is_healthy() {
                anyhow::bail!("integrity check failed");
            }
        }
    }

    Ok(())
}

fn describe_integrity(report: &IntegrityReport) -> Vec<String> {
    if report.is_healthy() {
        return vec![format!(
            "record store healthy: {} records, {} alts",
            report.users, report.alts
        )];
    }
    let mut lines = vec![format!(
        "record store has {} problem(s) across {} records and {} alts:",
        report.errors.len(),
        report.users,
        report.alts
    )];
    lines.extend(report.errors.iter().map(|problem| format!("  {problem}")));
    lines
}

fn run_config(bot_config: &BotConfig, action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::List => {
            for (key, value) in bot_config.entries() {
                match value {
                    Some(value) => println!("{key} = {value}"),
                    None => println!("{key} (unset)"),
                }
            }
        }
        ConfigAction::Get { name } => {
            let value = bot_config.get(&name)?;
            println!("{value}");
        }
        ConfigAction::Set { name, value } => {
            bot_config.set(&name, parse_value(&value))?;
            println!("{name} updated");
        }
    }
    Ok(())
}

/// Interpret a command-line value as TOML, falling back to a bare string.
fn parse_value(raw: &str) -> Value {
    toml::from_str::<toml::Table>(&format!("value = {raw}"))
        .ok()
        .and_then(|mut table| table.remove("value"))
        .unwrap_or_else(|| Value::String(raw.to_string()))
}
