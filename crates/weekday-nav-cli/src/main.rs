//! `wdnav`: find the previous or next occurrence of a weekday.
//!
//! ```text
//! wdnav next friday --from 2024-04-15T09:00:00Z --tz America/New_York --end
//! wdnav previous mon --start --json
//! ```

mod logging;

use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{ArgAction, Parser};
use weekday_nav::{navigate, navigate_from, Boundary, Direction, NavigateOptions};

#[derive(Parser, Debug)]
#[command(
    name = "wdnav",
    version,
    about = "Find the previous or next occurrence of a weekday"
)]
struct Cli {
    /// `previous` (alias `prev`, `last`) or `next`
    #[arg(value_parser = clap::value_parser!(Direction))]
    direction: Direction,

    /// Target weekday, full or abbreviated (e.g. `friday`, `fri`)
    weekday: String,

    /// Reference datetime: RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` or `YYYY-MM-DD`
    /// (offset-free values are read in `--tz`). Defaults to now.
    #[arg(long)]
    from: Option<String>,

    /// IANA timezone or fixed offset the weekday is evaluated in
    #[arg(long, default_value = "UTC")]
    tz: String,

    /// Snap the result to the start of the day
    #[arg(long, conflicts_with = "end")]
    start: bool,

    /// Snap the result to the end of the day
    #[arg(long)]
    end: bool,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn boundary(&self) -> Boundary {
        match (self.start, self.end) {
            (true, _) => Boundary::Start,
            (_, true) => Boundary::End,
            _ => Boundary::Preserve,
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let options = NavigateOptions {
        direction: cli.direction,
        boundary: cli.boundary(),
        timezone: cli.tz.clone(),
    };

    let result = match &cli.from {
        Some(from) => navigate(from, &cli.weekday, &options)
            .with_context(|| format!("cannot navigate from '{from}'"))?,
        None => {
            let now = Utc::now();
            tracing::debug!(%now, "no --from given, using current time");
            navigate_from(now, &cli.weekday, &options).context("cannot navigate from now")?
        }
    };

    tracing::info!(
        reference = %result.reference_local,
        resolved = %result.resolved_local,
        days_moved = result.days_moved,
        "resolved {} {}",
        options.direction,
        result.weekday
    );

    if cli.json {
        Ok(serde_json::to_string_pretty(&result)?)
    } else {
        Ok(result.resolved_local)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
