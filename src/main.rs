use clap::Parser;
use dochelper::{Config, generate_documentation, version};
use log::{error, info, warn};
use std::io;
use std::time::Instant;

fn main() -> io::Result<()> {
    // Initialize logger
    if std::env::var_os("RUST_LOG").is_none() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    let config = Config::parse();

    info!("dochelper v{}", version());
    info!(
        "Parsing {} input paths to output directory {:?}",
        config.paths.len(),
        config.output
    );
    info!("Using {} threads", config.thread_count());
    info!("Output format: {:?}", config.format);

    let start_time = Instant::now();

    let report = match generate_documentation(&config) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            return Err(io::Error::other(e));
        }
    };

    for failure in &report.failures {
        warn!("Failed: {} ({:?}): {}", failure.name, failure.path, failure.error);
    }
    if report.diagnostic_count() > 0 {
        warn!("{} diagnostics reported", report.diagnostic_count());
    }

    let elapsed = start_time.elapsed();
    info!("Documentation completed in {:.2?}", elapsed);

    println!("Produced files:");
    for file in report.produced_files() {
        println!("  {}", file.display());
    }

    if report.modules.is_empty() {
        return Err(io::Error::other("no module could be documented"));
    }

    Ok(())
}
