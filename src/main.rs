/// CLI entry point — analyze one finished combat log and print the report.
///
/// The report is plain JSON on stdout; logging goes to stderr so the two can
/// be piped independently. `RUST_LOG` controls verbosity as usual.
use anyhow::{bail, Context, Result};
use clap::Parser;
use combat_debrief::{config, profiles, replay};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "combat-debrief",
    version,
    about = "Post-fight ability usage and cooldown debrief from a combat log"
)]
struct Cli {
    /// Path to a finished combat log file.
    log: PathBuf,

    /// Actor to analyze, by name or GUID. Overrides the config file.
    #[arg(long)]
    actor: Option<String>,

    /// Profile key, e.g. "ROGUE/Outlaw". Overrides the config file.
    #[arg(long)]
    profile: Option<String>,

    /// Optional analysis config TOML.
    #[arg(long)]
    config: Option<PathBuf>,

    /// List embedded profiles and exit.
    #[arg(long)]
    list_profiles: bool,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list_profiles {
        for info in profiles::list_all() {
            println!("{}  ({})", info.key, info.ability);
        }
        return Ok(());
    }

    let cfg = match &cli.config {
        Some(path) => config::load_or_default(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => config::AnalysisConfig::default(),
    };

    let actor = cli.actor.unwrap_or(cfg.actor);
    if actor.is_empty() {
        bail!("no actor given — pass --actor or set `actor` in the config file");
    }

    let key = cli.profile.unwrap_or(cfg.profile);
    let profile = profiles::load_by_key(&key)
        .with_context(|| format!("unknown profile '{}' — try --list-profiles", key))?;

    // Lossy UTF-8: player names in logs are not always clean.
    let bytes = std::fs::read(&cli.log)
        .with_context(|| format!("reading log {}", cli.log.display()))?;
    let content = String::from_utf8_lossy(&bytes);

    let report = replay::analyze_log(&content, &actor, &profile);

    let out = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", out);
    Ok(())
}
