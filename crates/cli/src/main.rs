use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use yatra_core::respond;
use yatra_index::MonumentIndex;
use yatra_observability::init_tracing;

/// Fixed Delhi walking route used by the journey simulator.
const ROUTE: &[(&str, f64, f64)] = &[
    ("India Gate", 28.6129, 77.2295),
    ("Red Fort", 28.6562, 77.2410),
    ("Jama Masjid", 28.6507, 77.2334),
    ("Qutub Minar", 28.5244, 77.1855),
];

const CONNAUGHT_PLACE: (f64, f64) = (28.6315, 77.2167);
// Mumbai; nothing in the catalog is anywhere near it.
const FAR_AWAY: (f64, f64) = (19.0760, 72.8777);

#[derive(Debug, Parser)]
#[command(name = "yatra")]
#[command(about = "Yatra Guide CLI")]
struct Cli {
    #[arg(long, default_value = "data/monuments_data.json")]
    monuments: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive chat against the local rule engine, standing at a fixed
    /// coordinate.
    Chat {
        #[arg(long, default_value_t = 28.6129)]
        latitude: f64,
        #[arg(long, default_value_t = 77.2295)]
        longitude: f64,
        #[arg(long, default_value_t = 0.5)]
        radius_km: f64,
    },
    /// Drive a running API instance through a simulated tourist journey.
    Simulate {
        #[arg(long, default_value = "http://localhost:8001")]
        api_base: String,
    },
    /// Print one monument from the local dataset.
    Lookup { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("yatra_cli");
    let cli = Cli::parse();

    match cli.command {
        Command::Chat {
            latitude,
            longitude,
            radius_km,
        } => {
            let index = load_index(&cli.monuments)?;
            run_chat(&index, latitude, longitude, radius_km)?;
        }
        Command::Simulate { api_base } => run_simulation(&api_base).await?,
        Command::Lookup { id } => {
            let index = load_index(&cli.monuments)?;
            let monument = index
                .find_by_id(&id)
                .with_context(|| format!("no monument with id {id}"))?;
            println!("{}", serde_json::to_string_pretty(monument)?);
        }
    }

    Ok(())
}

fn load_index(path: &PathBuf) -> Result<MonumentIndex> {
    MonumentIndex::from_json_file(path)
        .with_context(|| format!("failed loading monuments dataset from {}", path.display()))
}

fn run_chat(index: &MonumentIndex, latitude: f64, longitude: f64, radius_km: f64) -> Result<()> {
    let nearby = index.nearby(latitude, longitude, radius_km);

    println!("Yatra guide chat mode. type 'exit' to quit.");
    match nearby.first() {
        Some(nearest) => println!(
            "Standing {:.1} km from {}.",
            nearest.distance_km, nearest.monument.name
        ),
        None => println!("No monuments within {radius_km} km of here."),
    }

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().read_line(&mut line)?;

        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        if message.is_empty() {
            continue;
        }

        println!("\n{}\n", respond(message, &nearby));
    }

    Ok(())
}

async fn run_simulation(api_base: &str) -> Result<()> {
    let client = reqwest::Client::new();

    println!("Simulating a tourist journey through Delhi against {api_base}");

    for (name, lat, lon) in ROUTE {
        println!("\nGPS: {name} ({lat}, {lon})");

        let found: Value = client
            .post(format!("{api_base}/api/check-location"))
            .json(&json!({ "latitude": lat, "longitude": lon, "radius_km": 1.0 }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        println!("  monuments found: {}", found["monuments_found"]);
        if let Some(monuments) = found["monuments"].as_array() {
            for monument in monuments.iter().take(2) {
                println!(
                    "  • {} - {} km away",
                    monument["name"].as_str().unwrap_or("?"),
                    monument["distance_km"]
                );
            }
        }

        let chat: Value = client
            .post(format!("{api_base}/api/chat"))
            .json(&json!({
                "user_message": "What's nearby?",
                "user_latitude": lat,
                "user_longitude": lon
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        println!(
            "  guide says ({}): {}",
            if chat["ai_powered"].as_bool().unwrap_or(false) {
                "ai"
            } else {
                "rules"
            },
            chat["response"].as_str().unwrap_or("")
        );
    }

    let (cp_lat, cp_lon) = CONNAUGHT_PLACE;
    let safety: Value = client
        .post(format!("{api_base}/api/safety-tips"))
        .json(&json!({ "latitude": cp_lat, "longitude": cp_lon }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    println!("\nSafety probe at Connaught Place:");
    if let Some(tips) = safety["safety_tips"].as_array() {
        for tip in tips.iter().take(5) {
            println!("  • {}", tip.as_str().unwrap_or(""));
        }
    }

    let (far_lat, far_lon) = FAR_AWAY;
    let far: Value = client
        .post(format!("{api_base}/api/check-location"))
        .json(&json!({ "latitude": far_lat, "longitude": far_lon, "radius_km": 1.0 }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    println!(
        "\nFar-away probe (Mumbai): {} monuments found",
        far["monuments_found"]
    );

    Ok(())
}
