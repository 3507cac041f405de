use anyhow::Result;
use std::process;
use log::error;
use deskfeed::{app, cli, logging};
use deskfeed::display::CompactFormat;

fn main() {
    // Set up panic handler with better error reporting
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Application panicked: {:?}", panic_info);
        eprintln!("Panic: {:?}", panic_info);
        process::exit(101);
    }));

    if let Err(e) = run() {
        error!("Application error: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args();

    cli::validate_args(&args)?;

    let config_manager = app::load_configuration(&args)?;

    let log_config = app::configure_logging(&args, &config_manager)?;
    logging::init_logger(log_config)?;

    let colours = app::create_colour_manager(&args, &config_manager)?;

    // Single current_thread runtime for the entire application
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let report = runtime.block_on(app::run_session(&args, &config_manager, colours))?;

    if args.dump_json {
        app::dump_json(&report, &mut std::io::stdout())?;
    }

    println!("{}", report.to_compact_format());
    Ok(())
}
