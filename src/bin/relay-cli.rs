use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Command line client for a running api-relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080", env = "RELAY_URL")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check relay liveness
    Health,
    /// Forward one request through the relay
    Proxy {
        /// Backend path, e.g. template-query/stats
        #[arg(short, long)]
        path: String,
        #[arg(long)]
        query_date: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
        #[arg(long)]
        biz_seq: Option<String>,
    },
    /// Ask the relay to probe its backend
    TestBackend,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/api/health", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Proxy {
            path,
            query_date,
            start_date,
            end_date,
            biz_seq,
        } => {
            let mut body = Map::new();
            body.insert("path".into(), json!(path));
            for (key, value) in [
                ("queryDate", query_date),
                ("startDate", start_date),
                ("endDate", end_date),
                ("bizSeq", biz_seq),
            ] {
                if let Some(value) = value {
                    body.insert(key.into(), json!(value));
                }
            }

            let res = client
                .post(format!("{}/api/proxy", base))
                .json(&Value::Object(body))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::TestBackend => {
            let res = client.post(format!("{}/api/test-backend", base)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
