use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

/// Log to stderr. `RUST_LOG` sets the filter; `ecowatt=info` otherwise.
/// `verbose` raises ecowatt targets to debug either way.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ecowatt=info"));
    let filter = if verbose {
        filter.add_directive(
            "ecowatt=debug"
                .parse()
                .unwrap_or_else(|_| Directive::from(LevelFilter::DEBUG)),
        )
    } else {
        filter
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
