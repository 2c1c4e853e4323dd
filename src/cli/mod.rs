use crate::{
    config::{GeneratorConfig, DEFAULT_BASE_URL, DEFAULT_MODEL},
    ItineraryGenerator, Preferences, TripRequest,
};
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde_json::{json, Value};
use std::{env, time::Duration};
use tracing::{info, warn};

fn command() -> Command {
    Command::new("trip-planner")
        .version("0.1.0")
        .about("Generate a day-by-day travel itinerary with a language model")
        .arg(
            Arg::new("destination")
                .help("Travel destination (e.g. \"Paris\")")
                .required_unless_present("request")
                .index(1),
        )
        .arg(
            Arg::new("start")
                .short('s')
                .long("start")
                .value_name("YYYY-MM-DD")
                .help("First day of the trip")
                .required_unless_present("request"),
        )
        .arg(
            Arg::new("end")
                .short('e')
                .long("end")
                .value_name("YYYY-MM-DD")
                .help("Last day of the trip")
                .required_unless_present("request"),
        )
        .arg(
            Arg::new("style")
                .long("style")
                .value_name("STYLE")
                .help("Travel style (default: general)"),
        )
        .arg(
            Arg::new("budget")
                .long("budget")
                .value_name("BUDGET")
                .help("Budget category (default: moderate)"),
        )
        .arg(
            Arg::new("request")
                .short('r')
                .long("request")
                .value_name("FILE")
                .help("Read the trip request from a JSON file instead")
                .conflicts_with_all(["destination", "start", "end", "style", "budget"]),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Model identifier (or set OPENAI_MODEL)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("API key (or set OPENAI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Completion API base URL (or set OPENAI_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("60"),
        )
        .arg(
            Arg::new("max-tokens")
                .long("max-tokens")
                .value_name("COUNT")
                .help("Output token ceiling for the completion")
                .value_parser(clap::value_parser!(u32))
                .default_value("300"),
        )
        .arg(
            Arg::new("show-raw")
                .long("show-raw")
                .help("Include the raw and repaired model output in the result")
                .action(ArgAction::SetTrue),
        )
}

fn trip_from_matches(matches: &ArgMatches) -> Result<TripRequest, Box<dyn std::error::Error>> {
    if let Some(path) = matches.get_one::<String>("request") {
        let payload: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        return Ok(TripRequest::from_json(&payload)?);
    }

    let field = |name: &str| {
        matches
            .get_one::<String>(name)
            .map(String::as_str)
            .unwrap_or_default()
    };

    let preferences = Preferences::new(
        matches.get_one::<String>("style").map(String::as_str),
        matches.get_one::<String>("budget").map(String::as_str),
    );

    Ok(TripRequest::new(
        field("destination"),
        field("start"),
        field("end"),
        preferences,
    )?)
}

/// CLI entry point for the trip-planner tool
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = command().get_matches();
    let trip = trip_from_matches(&matches)?;

    let api_key = matches
        .get_one::<String>("api-key")
        .cloned()
        .or_else(|| env::var("OPENAI_API_KEY").ok())
        .ok_or("API key is required. Set OPENAI_API_KEY environment variable or use --api-key")?;

    let base_url = matches
        .get_one::<String>("base-url")
        .cloned()
        .or_else(|| env::var("OPENAI_BASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let model = matches
        .get_one::<String>("model")
        .cloned()
        .or_else(|| env::var("OPENAI_MODEL").ok())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let timeout_seconds = matches.get_one::<u64>("timeout").copied().unwrap_or(60);
    let max_tokens = matches.get_one::<u32>("max-tokens").copied().unwrap_or(300);

    let config = GeneratorConfig::new(api_key)
        .with_base_url(base_url)
        .with_model(model)
        .with_timeout(Duration::from_secs(timeout_seconds))
        .with_max_tokens(max_tokens);

    info!("Generating itinerary for {}", trip.destination());
    info!("Using model: {}", config.model());
    info!("Base URL: {}", config.base_url());

    let generator = ItineraryGenerator::new(config)?;
    let result = generator.generate(&trip).await;

    if let Some(reason) = result.failure_reason() {
        warn!("No activities produced: {}", reason);
    }

    let mut output = serde_json::to_value(&result)?;
    if matches.get_flag("show-raw") {
        output["raw"] = json!(result.raw_text());
        output["repaired"] = json!(result.repaired_text());
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
