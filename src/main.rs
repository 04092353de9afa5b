use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kvbackend::command::Command;
use kvbackend::Backend;

/// Exercise the in-memory key-value backend from the command line.
#[derive(Parser, Debug)]
#[command(name = "kvbackend", version, about)]
struct Options {
    /// Number of entries to pre-allocate the store for
    #[arg(long, default_value_t = 0)]
    capacity: usize,

    /// Close the backend when done, terminating with exit status 3
    #[arg(long)]
    close: bool,

    /// Operations to run, e.g. `put k v get k delete k flush stats`. Runs a demo sequence
    /// when empty. Negative numbers are taken as values; pass other values starting with
    /// `-` after a `--` separator.
    #[arg(value_name = "OPS", allow_negative_numbers = true)]
    ops: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = Options::parse();

    let commands = if options.ops.is_empty() {
        info!("no operations given, running demo sequence");
        Command::demo()
    } else {
        Command::parse_all(options.ops.as_slice()).context("invalid operations")?
    };

    let mut backend = Backend::default().with_capacity(options.capacity);
    backend.initialize().context("failed to initialize backend")?;

    for command in &commands {
        match command.apply(&mut backend) {
            Ok(output) => println!("{command}: {output}"),
            Err(e) => println!("{command}: {e}"),
        }
    }

    if options.close {
        backend.close();
    }

    Ok(())
}
