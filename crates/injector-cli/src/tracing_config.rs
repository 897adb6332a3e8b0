//! Tracing configuration.
//!
//! The subscriber is only initialised when `INJECTOR_LOG` (or `RUST_LOG`) is
//! set, so normal runs pay nothing for it.
//!
//! ```bash
//! INJECTOR_LOG=debug injector lint src
//! INJECTOR_LOG="injector_lint=trace" injector lint --fix Foo.cs
//! ```

use tracing_subscriber::EnvFilter;

/// Build an `EnvFilter` from `INJECTOR_LOG`, falling back to `RUST_LOG`.
///
/// `INJECTOR_LOG` takes precedence when both are set. Values use the same
/// syntax as `RUST_LOG` (e.g. `debug`, `injector_lint=trace`).
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("INJECTOR_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// All output goes to stderr so it never mixes with diagnostics or JSON on
/// stdout.
pub fn init_tracing() {
    let has_injector_log = std::env::var("INJECTOR_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_injector_log && !has_rust_log {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .init();
}
