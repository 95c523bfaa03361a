// SplitSmart - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod currency;
pub mod input;
pub mod participants;
pub mod split;          // Split engine: bill + tip → amount per participant
pub mod angles;         // Radial chart spans
pub mod tip;
pub mod summary;
pub mod session;
pub mod config;
pub mod pages;

// Re-export commonly used types
pub use currency::Currency;
pub use participants::{Participant, ParticipantSet, SharePolicy};
pub use split::{
    BillState, SplitAmount,
    compute_split, tip_amount, total_amount, total_shares, round_cents,
};
pub use angles::{AngleSpan, PALETTE, compute_angles, conic_gradient};
pub use tip::{TipSelection, TIP_PRESETS};
pub use summary::{SplitSummary, SummaryLine};
pub use session::Session;
pub use config::{Settings, load_settings};
pub use pages::Page;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the global `tracing` subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init_logging(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
