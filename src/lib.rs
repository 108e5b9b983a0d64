//! Pure Counterfactual Regret Minimization self-play solver for heads-up
//! and three-player limit/no-limit poker.
//!
//! The crate is a library plus two thin binaries (`src/bin/trainer.rs`,
//! `src/bin/player.rs`): [`worker::Coordinator`] drives self-play with
//! [`engine::walk`] against the packed counters in [`store::Store`],
//! indexed through the betting [`tree::Tree`] built from a [`game::GameDef`]
//! and an [`abstraction`] pair; [`checkpoint`] persists and reloads that
//! store; [`player::PlayerLookup`] answers "what should I do here" queries
//! from a finished dump.

pub mod abstraction;
pub mod checkpoint;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod hand;
pub mod player;
pub mod store;
pub mod tree;
pub mod worker;

/// A spinner-styled progress indicator for a long-running operation whose
/// completion fraction isn't known up front (the training loop runs until
/// a wallclock deadline, not to a fixed iteration count). Matches
/// `krukah-robopoker`'s `progress()` helper.
pub fn progress() -> indicatif::ProgressBar {
    let tick = std::time::Duration::from_millis(200);
    let style = "{spinner:.cyan} {elapsed} ~ {msg}";
    let style = indicatif::ProgressStyle::with_template(style).unwrap();
    let bar = indicatif::ProgressBar::new_spinner();
    bar.set_style(style);
    bar.enable_steady_tick(tick);
    bar
}

/// Initializes logging to both the terminal and a timestamped file under
/// `logs/`, matching `krukah-robopoker`'s `init()`.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let term_level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH)?.as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{time}.log"))?,
    );
    let term = simplelog::TermLogger::new(
        term_level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).map_err(|e| anyhow::anyhow!(e))
}
