use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use web_tunnel::relay::ForwardDirective;

#[derive(Parser)]
#[command(name = "tunnel-cli")]
#[command(about = "Client for a running web-tunnel", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[arg(short, long, env = "TUNNEL_SHARED_SECRET", default_value = "super-secret-token")]
    secret: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the tunnel is up
    Status,
    /// Send a request through the tunnel
    Forward {
        /// Absolute URL the tunnel should call
        target: String,
        /// HTTP method (default POST)
        #[arg(short, long)]
        method: Option<String>,
        /// Plugin name sent as X-From-Tunnel-Plugin
        #[arg(short, long, default_value = "tunnel-cli")]
        plugin: String,
        /// JSON body for non-GET/HEAD requests
        #[arg(short, long)]
        body: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/", cli.url)).send().await?;
            let status = res.status();
            println!("{} {}", status, res.text().await?);
        }
        Commands::Forward {
            target,
            method,
            plugin,
            body,
        } => {
            let mut headers = HeaderMap::new();
            headers.insert("x-tunnel-secret", HeaderValue::from_str(&cli.secret)?);

            let directive = ForwardDirective {
                target: Some(target),
                method,
                plugin: Some(plugin),
                body,
            };

            let res = client
                .post(format!("{}/tunnel/forward", cli.url))
                .headers(headers)
                .json(&directive)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: tunnel returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    println!("{}", status);
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
