/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use log::error;

use wxobs::{load_config, Config, HttpFetcher, Observation};

/// Current weather conditions from the National Weather Service
#[derive(Debug, Parser)]
#[command(name = "wxobs", version)]
struct Args {
    /// Station code to fetch, e.g. KLNK
    #[arg(long, value_name = "CODE")]
    location: Option<String>,

    /// List known station codes
    #[arg(long)]
    list_locations: bool,

    /// Configuration file
    #[arg(long, value_name = "PATH", default_value = "config.yml")]
    config: PathBuf,
}

async fn show_location(config: &Config, code: &str) -> Result<(), wxobs::ObservationError> {
    match config.stations.name(code) {
        Some(name) => println!("Location specified: {} ({})", code, name),
        None => println!("Location specified: {}", code),
    }

    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let mut obs = Observation::new(fetcher).with_feed_base(config.feed_base.clone());
    obs.set_station(code).await?;
    print!("{}", obs.to_display_string()?);

    Ok(())
}

fn print_usage(out: &mut impl Write) -> io::Result<()> {
    Args::command().write_help(out)
}

fn list_locations(config: &Config) {
    println!("Possible locations:");
    for line in config.stations.listing() {
        println!("{}", line);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.location.is_none() && !args.list_locations {
        if let Err(e) = print_usage(&mut io::stdout()) {
            error!("Could not print help: {}", e);
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    let config = match load_config(&args.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Could not get configuration: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(code) = &args.location {
        if let Err(e) = show_location(&config, code).await {
            error!("Could not get weather for {}: {}", code, e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    } else {
        list_locations(&config);
    }

    ExitCode::SUCCESS
}
