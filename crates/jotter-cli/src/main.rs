mod cli;
mod config;
mod repl;
mod storage;
mod ui;

use std::io;

use crate::cli::ConfigCommand;
use clap::Parser;
use color_eyre::Result;
use jotter_engine::Engine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = cli::Cli::parse();
    let config = config::load()?;
    init_tracing(config.log_level.as_deref());

    match cli.command.unwrap_or(cli::Command::Repl) {
        cli::Command::Repl => {
            let store = storage::store_for(cli.data_file.as_deref(), &config)?;
            let mut engine = Engine::open(store);
            let stdin = io::stdin();
            repl::run(&mut engine, stdin.lock(), &mut io::stdout().lock())?
        }
        cli::Command::Exec { words } => {
            let store = storage::store_for(cli.data_file.as_deref(), &config)?;
            let mut engine = Engine::open(store);
            let response = engine.execute(&words.join(" "));
            print!("{}", ui::render(&response.reply));
        }
        cli::Command::Version => print_version(),
        cli::Command::Config(ConfigCommand::Init) => init_config(&config)?,
    }

    Ok(())
}

fn init_tracing(config_level: Option<&str>) {
    // RUST_LOG wins, then the config file; logs stay on stderr.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_level.unwrap_or(config::DEFAULT_LOG_LEVEL)))
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_LEVEL));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn print_version() {
    println!("jotter {}", env!("CARGO_PKG_VERSION"));
}

fn init_config(config: &config::Config) -> Result<()> {
    let defaults = config.clone().with_defaults(storage::default_data_file()?);
    let (path, written) = config::write_default_if_missing(&defaults)?;
    if written {
        println!("Config initialized at {}", path.display());
    } else {
        println!("Config already exists at {}", path.display());
    }
    Ok(())
}
