use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use common::config::Settings;
use connector::clock::{Clock, DEFAULT_UTC_OFFSET_HOURS, SystemClock};
use connector::{logging, pattern, run_file_import};
use std::process;

fn cli() -> Command {
    Command::new("File Connector")
        .version("1.0")
        .about("Resolves filename patterns and validates file imports")
        .subcommand_required(true)
        .subcommand(
            Command::new("resolve")
                .about("Resolve the date macros in a filename pattern")
                .arg(Arg::new("pattern").required(true).value_name("PATTERN"))
                .arg(
                    Arg::new("utc-offset")
                        .long("utc-offset")
                        .value_name("HOURS")
                        .value_parser(clap::value_parser!(i32))
                        .allow_negative_numbers(true)
                        .help("Offset from UTC used for \"now\" (default 7)"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Plan the configured file imports")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_name("FILE")
                        .help("Sets a custom config file"),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .value_name("NAME")
                        .help("Only plan the import with this name"),
                ),
        )
}

async fn run(matches: ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("resolve", resolve_matches)) => {
            logging::init("warn");
            let offset = resolve_matches
                .get_one::<i32>("utc-offset")
                .copied()
                .unwrap_or(DEFAULT_UTC_OFFSET_HOURS);
            let raw = resolve_matches
                .get_one::<String>("pattern")
                .context("missing pattern")?;

            let clock = SystemClock::new(offset)?;
            println!("{}", pattern::resolve_macro(raw, clock.now())?);
        }
        Some(("import", import_matches)) => {
            let config_path = import_matches
                .get_one::<String>("config")
                .map(|s| s.as_str())
                .unwrap_or("config/connector.toml");
            let settings = Settings::new(config_path)
                .with_context(|| format!("failed to load config from {}", config_path))?;
            logging::init(&settings.logging.level);

            let name = import_matches.get_one::<String>("name").map(|s| s.as_str());
            let plans = run_file_import(&settings, name).await?;
            println!("{}", serde_json::to_string_pretty(&plans)?);
        }
        _ => anyhow::bail!("Please specify a valid subcommand"),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run(cli().get_matches()).await {
        eprintln!("File connector error: {:#}", e);
        process::exit(1);
    }
}
