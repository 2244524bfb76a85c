use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG controls verbosity; warnings and up by default so API
    // failures stay visible without cluttering normal output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = habitctl::cli::run() {
        eprintln!("{e:#}"); // pretty anyhow chain
        std::process::exit(1);
    }
}
