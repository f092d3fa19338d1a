use std::time::Duration;

use anyhow::Result;

use rollclock_engine::logging::{LoggingConfig, init_logging};
use rollclock_engine::runtime::{Runtime, RuntimeConfig};
use rollclock_engine::sync::{DEFAULT_TIME_URL, WorldTimeApi};
use rollclock_engine::time::TimeSource;
use rollclock_ui::theme::Theme;

mod app;
mod terminal;

use app::ClockApp;
use terminal::TerminalSurface;

fn main() -> Result<()> {
    // The terminal is taken over by the clock, so records go to a file.
    let log_file = std::env::temp_dir().join("rollclock.log");

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║             ROLLCLOCK v0.1             ║");
    println!("  ╠════════════════════════════════════════╣");
    println!("  ║  t  theme     1-5  text color          ║");
    println!("  ║  r  resync    q    quit                ║");
    println!("  ╚════════════════════════════════════════╝");
    println!("  log: {}", log_file.display());
    println!();

    init_logging(LoggingConfig { log_file: Some(log_file), ..LoggingConfig::default() });

    let config = RuntimeConfig {
        title: "Rollclock".to_string(),
        ..RuntimeConfig::default()
    };

    let reference = match WorldTimeApi::new(DEFAULT_TIME_URL, Duration::from_secs(5)) {
        Ok(api) => Some(api),
        Err(e) => {
            log::warn!("time sync disabled: {e:#}");
            None
        }
    };

    let surface = TerminalSurface::stdout()?;
    let app = ClockApp::new(Theme::Dark).read_keys(true);

    Runtime::run(config, TimeSource::new(), reference, surface, app)
}
