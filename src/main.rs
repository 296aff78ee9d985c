use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use nutrilens::config::ProviderConfig;
use nutrilens::food::analyzer::FoodAnalyzer;
use nutrilens::food::api::fatsecret::FatSecretClient;
use nutrilens::food::config::FoodConfig;
use nutrilens::providers::openai::openai::OpenAiProvider;
use nutrilens::providers::traits::CompletionProvider;
use nutrilens::{api, commands};

const SYSTEM_MESSAGE: &str = "You are a nutrition analysis assistant.";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Analyze a single image file and exit instead of serving
    #[arg(long)]
    image: Option<String>,

    #[arg(long, default_value = "3000")]
    port: u16,

    #[arg(short, long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let api_key = match args.api_key.or_else(|| std::env::var("OPENAI_API_KEY").ok()) {
        Some(key) => key,
        None => {
            eprintln!("{}", "OPENAI_API_KEY not set".red());
            std::process::exit(1);
        }
    };

    let food_config = match FoodConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.red());
            std::process::exit(1);
        }
    };

    let provider = OpenAiProvider::new(api_key, SYSTEM_MESSAGE.to_string()).await?;
    let model = ProviderConfig::from_env().chat_model;
    let analyzer = FoodAnalyzer::new(
        Box::new(provider),
        Box::new(FatSecretClient::new(food_config)),
    );

    if let Some(path) = args.image {
        return commands::analyze_image_file(&analyzer, &path).await;
    }

    let app = api::create_api(analyzer);
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = TcpListener::bind(addr).await?;

    println!(
        "{}",
        format!("NutriLens API listening on {} (model: {})", addr, model).green()
    );
    axum::serve(listener, app).await?;

    Ok(())
}
