/*!
 * Contiguous Allocator - Main Entry Point
 *
 * Interactive simulator for contiguous memory management:
 * - Best-fit allocation
 * - Release with coalescing
 * - Compaction
 * - Status reports
 */

use anyhow::{bail, Context, Result};
use contig_allocator::{Region, Shell};
use std::io;
use tracing::info;

fn main() -> Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let size_arg = match (args.next(), args.next()) {
        (Some(size), None) => size,
        _ => bail!("Invalid number of arguments. Usage: allocator <memory-size>"),
    };

    let limit: usize = size_arg
        .parse()
        .with_context(|| format!("Invalid memory size: {}", size_arg))?;
    let region =
        Region::new(limit).with_context(|| format!("Invalid memory size: {}", limit))?;

    info!(limit, "Managing contiguous memory region");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(region).run(&mut stdin.lock(), &mut stdout.lock())?;

    Ok(())
}

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: log level filter (default: warn, keeps the prompt clean)
/// - ALLOCATOR_TRACE_JSON: enable JSON output
fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let use_json = std::env::var("ALLOCATOR_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(io::stderr)
                    .compact(),
            )
            .init();
    }
}
