mod cli;

use std::sync::Mutex;

use actix_web::{App, HttpServer, web};
use faqbot::ChatBot;
use tracing_subscriber::EnvFilter;

const DEFAULT_DATA_PATH: &str = "data/qa_data.json";
const DEFAULT_BIND: &str = "0.0.0.0:7878";

#[actix_web::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        let mut bot = ChatBot::load(DEFAULT_DATA_PATH);
        cli::run_repl(&mut bot);
    } else if args[1] == "serve" {
        let data_path = args.get(2).cloned().unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
        let bot = web::Data::new(Mutex::new(ChatBot::load(&data_path)));

        tracing::info!("serving {} on {}", data_path, DEFAULT_BIND);
        HttpServer::new(move || App::new().app_data(bot.clone()).configure(faqbot::server::config))
            .bind(DEFAULT_BIND)?
            .run()
            .await?;
    } else {
        cli::run_single_command();
    }

    Ok(())
}
