use std::process;

use portcall::{cli, config::Config};
use tracing_subscriber::EnvFilter;

fn main() {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = cli::run(&config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Log to stderr, filtered by `PORTCALL_LOG` (default `warn`).
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env("PORTCALL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}
