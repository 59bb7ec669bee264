use clap::{Parser, Subcommand};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "dispatch-cli")]
#[command(about = "Client CLI for a route-dispatch server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the routes the server exposes
    Routes,
    /// Call a route and print the response
    Call {
        /// HTTP method (GET, POST, ...)
        method: String,
        /// Request path, including any query string
        path: String,
        /// JSON request body
        #[arg(short, long)]
        data: Option<String>,
    },
}

#[derive(Deserialize)]
struct Listing {
    code: i64,
    data: Vec<RouteSummary>,
}

#[derive(Deserialize)]
struct RouteSummary {
    name: String,
    method: String,
    path: String,
    descr: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Routes => {
            let res = client.get(format!("{}/", cli.url)).send().await?;
            if !res.status().is_success() {
                eprintln!("Error: listing returned status {}", res.status());
                return Ok(());
            }
            let listing: Listing = res.json().await?;
            if listing.code != 0 {
                eprintln!("Error: listing returned code {}", listing.code);
                return Ok(());
            }
            for route in listing.data {
                println!("{:<7} {:<32} {:<20} {}", route.method, route.path, route.name, route.descr);
            }
        }
        Commands::Call { method, path, data } => {
            let method = Method::from_bytes(method.to_uppercase().as_bytes())?;
            let mut req = client.request(method, format!("{}{}", cli.url, path));
            if let Some(data) = data {
                serde_json::from_str::<Value>(&data)?;
                req = req.header(CONTENT_TYPE, HeaderValue::from_static("application/json")).body(data);
            }
            print_response(req.send().await?).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    println!("{}", status);

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
