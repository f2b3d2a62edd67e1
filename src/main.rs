use anyhow::Context;

mod config;
mod convert;
mod error;
mod genres;
mod logging;
mod records;
mod source;
mod writer;

fn main() {
    // Initialize logging as early as possible.
    logging::init_logging();

    if let Err(err) = run() {
        eprintln!("movielens-genres error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = config::load()?;

    println!(
        "Generating {} with genres from {}...",
        config.output_path.display(),
        config.input_path.display()
    );

    let summary = convert::convert(&config).context("movie conversion failed")?;

    let stdout = std::io::stdout();
    summary
        .report(&mut stdout.lock())
        .context("failed to print summary")?;

    if summary.skipped > 0 {
        tracing::info!(skipped = summary.skipped, "dropped malformed lines");
    }

    Ok(())
}
