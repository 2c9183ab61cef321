#![warn(clippy::correctness)]
#![warn(clippy::arithmetic_side_effects)]
#![warn(clippy::assertions_on_result_states)]
#![warn(clippy::float_cmp_const)]
#![warn(clippy::float_cmp)]
#![warn(clippy::get_unwrap)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::lossy_float_literal)]
#![warn(clippy::map_err_ignore)]
#![warn(clippy::str_to_string)]
#![warn(clippy::string_add)]
#![warn(clippy::try_err)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::manual_let_else)]
#![warn(clippy::nursery)]

use anyhow::Result;
use clap::Parser;
use lauscha::{
    cli::{App, Cli},
    settings::Settings,
};
use tracing::{info, Level};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    info!("Starting Lauscha...");

    let settings = Settings::new(cli.config.as_deref())?;
    let app = App::new(settings, &cli.ratio)?;
    let out = app.run(cli.command)?;
    println!("{out}");
    Ok(())
}
