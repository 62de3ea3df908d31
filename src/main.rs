use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Instant;

use mapbox_geocoder::config::{ACCESS_TOKEN_ENV, FileConfig};
use mapbox_geocoder::{AddressRecord, Dataset, GeocodingProvider, Mapbox, MapboxConfig};

/// Geocode addresses and coordinates with the Mapbox Geocoding API
///
/// Examples:
///   # Forward geocoding
///   mapbox-geocoder geocode "10 Downing Street, London"
///
///   # Restrict to a country and print JSON
///   mapbox-geocoder --country fr --json geocode "Rue de Rivoli"
///
///   # Reverse geocoding
///   mapbox-geocoder reverse --lat 48.8584 --lon 2.2945
///
/// The access token is read from --token, then MAPBOX_ACCESS_TOKEN, then the
/// config file (mapbox-geocoder.toml).
#[derive(Parser, Debug)]
#[command(name = "mapbox-geocoder")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches mapbox-geocoder.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Mapbox access token
    #[arg(long, global = true)]
    token: Option<String>,

    /// Restrict results to a country (ISO 3166 alpha-2 code)
    #[arg(long, global = true)]
    country: Option<String>,

    /// Dataset to query
    #[arg(long, global = true)]
    dataset: Option<Dataset>,

    /// Use plain http instead of https
    #[arg(long, global = true)]
    insecure: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a free-form address
    Geocode {
        /// Address to look up
        address: String,
    },
    /// Resolve a latitude/longitude pair
    Reverse {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = if let Some(ref config_path) = args.config {
        if !config_path.exists() {
            bail!("Config file not found: {:?}", config_path);
        }
        Some(FileConfig::from_path(config_path)?)
    } else {
        FileConfig::load()
    };

    let verbose = args.verbose || file_config.as_ref().is_some_and(|c| c.verbose);
    let json = args.json || file_config.as_ref().is_some_and(|c| c.json);
    init_logger(verbose);

    let config = resolve_config(&args, file_config.as_ref());
    if config.access_token.is_none() {
        log::warn!(
            "No access token configured (use --token or {}); the request will likely be rejected",
            ACCESS_TOKEN_ENV
        );
    }

    let provider = Mapbox::with_reqwest(config).context("Failed to set up Mapbox provider")?;

    let (label, spinner_message) = match &args.command {
        Command::Geocode { address } => (address.clone(), format!("Geocoding {:?}...", address)),
        Command::Reverse { lat, lon } => (
            format!("{}, {}", lat, lon),
            format!("Reverse geocoding {}, {}...", lat, lon),
        ),
    };

    let spinner = create_spinner(&spinner_message);
    let start = Instant::now();

    let result = match &args.command {
        Command::Geocode { address } => provider.geocode(address),
        Command::Reverse { lat, lon } => provider.reverse(*lat, *lon),
    };

    let records = match result {
        Ok(records) => {
            spinner.finish_with_message(format!(
                "Found {} result(s) [{:.1}s]",
                records.len(),
                start.elapsed().as_secs_f32()
            ));
            records
        }
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e).context(format!("{} lookup failed for {}", provider.name(), label));
        }
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&records).context("Failed to serialize results")?
        );
    } else {
        println!();
        for (i, record) in records.iter().enumerate() {
            print_record(i + 1, record);
        }
    }

    Ok(())
}

fn resolve_config(args: &Args, file_config: Option<&FileConfig>) -> MapboxConfig {
    let mut config = file_config
        .map(FileConfig::to_mapbox_config)
        .unwrap_or_default();

    let env_token = std::env::var(ACCESS_TOKEN_ENV)
        .ok()
        .filter(|t| !t.is_empty());
    if let Some(token) = args.token.clone().or(env_token) {
        config.access_token = Some(token);
    }
    if let Some(ref country) = args.country {
        config.country = Some(country.clone());
    }
    if let Some(dataset) = args.dataset {
        config.dataset = dataset;
    }
    if args.insecure {
        config.use_ssl = false;
    }

    config
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_module("mapbox_geocoder", level);
    builder.filter_module("reqwest", LevelFilter::Warn);
    if builder.try_init().is_err() {
        eprintln!("Warning: logger was already initialized");
    }
}

fn print_record(index: usize, record: &AddressRecord) {
    let formatted = record.formatted();
    if formatted.is_empty() {
        println!("{}. (no address details)", index);
    } else {
        println!("{}. {}", index, formatted);
    }
    println!(
        "   Coordinates: {:.6}, {:.6}",
        record.latitude, record.longitude
    );
    if let Some(bounds) = record.bounds {
        println!(
            "   Bounds:      S {:.6} W {:.6} N {:.6} E {:.6}",
            bounds.south, bounds.west, bounds.north, bounds.east
        );
    }
    if let Some(ref street) = record.street_name {
        println!("   Street:      {}", street);
    }
    if let Some(ref sub_locality) = record.sub_locality {
        println!("   District:    {}", sub_locality);
    }
    if let Some(ref locality) = record.locality {
        println!("   Locality:    {}", locality);
    }
    if let Some(ref postal_code) = record.postal_code {
        println!("   Postal code: {}", postal_code);
    }
    for admin in &record.admin_levels {
        println!("   Admin {}:     {}", admin.level, admin.name);
    }
    if let Some(ref country) = record.country {
        match record.country_code {
            Some(ref code) => println!("   Country:     {} ({})", country, code.to_uppercase()),
            None => println!("   Country:     {}", country),
        }
    }
    println!();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
