//! Terminal output: the notice printer and log setup.

use colored::Colorize;
use favs_core::notice::{Notice, NoticeLevel, Notifier};
use tracing_subscriber::EnvFilter;

/// Prints notices to the terminal, errors on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => println!("{}", format!("✓ {}", notice.message).green()),
            NoticeLevel::Info => println!("{}", notice.message.cyan()),
            NoticeLevel::Error => eprintln!("{}", format!("✗ {}", notice.message).red()),
        }
    }
}

/// Installs the log subscriber on stderr. `RUST_LOG` wins over the
/// configured level.
pub fn init_tracing(configured_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
