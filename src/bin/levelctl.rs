use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "levelctl")]
#[command(about = "Inspect or change the log level of a running dynlog server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Level endpoint path on the server.
    #[arg(short, long, default_value = "/loglevel")]
    path: String,

    /// Bearer token, when the endpoint is guarded.
    #[arg(short, long)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current level
    Get,
    /// Change the level (debug, info, warn, error, fatal)
    Set { level: String },
    /// Check server status
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(key) = &cli.key {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {key}"))?);
    }

    let endpoint = format!("{}{}", cli.url.trim_end_matches('/'), cli.path);
    let res = match cli.command {
        Commands::Get => client.get(&endpoint).headers(headers).send().await?,
        Commands::Set { level } => {
            client
                .put(&endpoint)
                .headers(headers)
                .json(&json!({ "level": level }))
                .send()
                .await?
        }
        Commands::Status => {
            client
                .get(format!("{}/status", cli.url.trim_end_matches('/')))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
