use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install the global fmt subscriber. Logs go to stderr so `--json` output
/// on stdout stays machine-readable.
pub fn init_tracing(verbose: bool) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}
