#![forbid(unsafe_code)]

//! Replay a scripted xrange session and print one `v: .., nv: ..` line per
//! change notification.
//!
//! ```sh
//! cargo run -p xrange-harness                       # built-in demo
//! cargo run -p xrange-harness -- session.json       # replay a script
//! XRANGE_HARNESS_MAX=2048 XRANGE_HARNESS_LOG=xrange_widgets=debug \
//!     cargo run -p xrange-harness
//! ```

use std::io::{self, Write};

use xrange_harness::HarnessError;
use xrange_harness::config::{HarnessConfig, init_logging};
use xrange_harness::replay::replay;
use xrange_harness::script::Script;

fn run() -> Result<(), HarnessError> {
    let config = HarnessConfig::from_env(std::env::args().nth(1))?;
    init_logging(&config.log);

    let script = match &config.script {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading script");
            Script::load(path)?
        }
        None => Script::demo(),
    };
    let range = config.overrides.apply(script.config)?;
    let report = replay(&script.with_config(range))?;

    let mut stdout = io::stdout().lock();
    for line in &report.lines {
        writeln!(stdout, "{line}")?;
    }
    stdout.flush()?;
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("xrange-harness: {err}");
        std::process::exit(2);
    }
}
