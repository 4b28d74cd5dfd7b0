use clap::Parser;
use log::error;
use std::process;

use migrate_remote::cli::commands::{handle_check_command, handle_import_command};
use migrate_remote::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check(args) => handle_check_command(args),
        Commands::Import(args) => handle_import_command(args).await.map(|summary| {
            if summary.has_failures() {
                process::exit(2);
            }
        }),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        process::exit(1);
    }
}
