//! `trainer <game-file> <output-prefix> [options]` — builds the betting
//! tree and entry store for a game definition, then runs Pure CFR self-play
//! until `--max-walltime` elapses, checkpointing on the configured
//! schedule.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use pure_cfr_solver::config::TrainerCli;
use pure_cfr_solver::game::{GameDef, HighCardRanker, Ranker};
use pure_cfr_solver::store::Store;
use pure_cfr_solver::tree::Tree;
use pure_cfr_solver::worker::Coordinator;

fn run() -> anyhow::Result<()> {
    let cli = TrainerCli::parse();
    let params = cli.resolve()?;
    pure_cfr_solver::init_logging(params.verbose)?;

    let game_text = std::fs::read_to_string(&params.game_file)
        .map_err(|e| anyhow::anyhow!("reading game file {}: {e}", params.game_file))?;
    let game = GameDef::parse(&game_text)?;
    if game.num_players > 2 && params.do_average {
        anyhow::bail!(
            "average-strategy accumulation is only defined for two-player games; \
             pass --no-average (or DO_AVERAGE FALSE) for a {}-player game",
            game.num_players
        );
    }
    let card_abs = params.card_abstraction()?;
    let action_abs = params.action_abstraction()?;
    let ranker: Arc<dyn Ranker + Send + Sync> = Arc::new(HighCardRanker);

    let tree = Tree::build(&game, &action_abs)?;
    let mut store = Store::new(&game, &card_abs, &tree.num_entries_per_bucket);

    if params.load_dump {
        let prefix = params
            .load_dump_prefix
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("--load-dump given with no prefix"))?;
        log::info!("loading checkpoint from {prefix}.*");
        pure_cfr_solver::checkpoint::load_dump(&mut store, prefix)?;
    }

    let game = Arc::new(game);
    let card_abs = Arc::new(card_abs);
    let tree = Arc::new(tree);
    let store = Arc::new(store);

    log::info!("starting {} worker thread(s) on {}", params.num_threads, params.game_file);
    let bar = pure_cfr_solver::progress();
    bar.set_message("training");

    let coordinator = Coordinator::spawn(&params, game, ranker, card_abs, tree, store.clone());
    let result = coordinator.run_until_done(&params, &store, &params.output_prefix);
    bar.finish_and_clear();
    result
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("trainer: {err:#}");
            ExitCode::from(1)
        }
    }
}
