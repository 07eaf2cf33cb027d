use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use commandchan::core::config;
use commandchan::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "commandchan", version, about = "Keyboard-driven imageboard browser")]
struct Args {
    /// Path to a config file (defaults to ~/.commandchan/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let mut startup_log = config::StartupLog::default();
    let file_config = match config::load_config(args.config.as_deref(), &mut startup_log) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return Err(std::io::Error::other(e.to_string()));
        }
    };
    let resolved = config::resolve(&file_config, &mut startup_log);

    // File logger: the terminal belongs to the UI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }
    startup_log.replay();

    log::info!(
        "CommandChan starting up against {} (timeout {:?})",
        resolved.api_base_url,
        resolved.fetch_timeout
    );

    tui::run(resolved)
}
