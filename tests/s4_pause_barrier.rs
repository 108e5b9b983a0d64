//! Pause barrier visibility: while `Coordinator::pause` is held, no
//! worker's iteration counter may advance; once resumed, progress resumes.

use std::sync::Arc;
use std::time::Duration;

use pure_cfr_solver::abstraction::{ActionAbstractionKind, CardAbstractionKind};
use pure_cfr_solver::config::Parameters;
use pure_cfr_solver::game::{GameDef, HighCardRanker, Ranker};
use pure_cfr_solver::store::Store;
use pure_cfr_solver::tree::Tree;
use pure_cfr_solver::worker::Coordinator;

#[test]
fn no_iteration_counter_advances_while_paused() {
    let game = GameDef::toy_one_card();
    let action_abs = ActionAbstractionKind::Null;
    let card_abs = CardAbstractionKind::Null;
    let tree = Tree::build(&game, &action_abs).unwrap();

    let mut params = Parameters::default();
    params.game_file = "toy_one_card".to_string();
    params.num_threads = 8;
    params.rng_seeds = [6, 12, 1983, 28];

    let store = Arc::new(Store::new(&game, &card_abs, &tree.num_entries_per_bucket));
    let game = Arc::new(game);
    let ranker: Arc<dyn Ranker + Send + Sync> = Arc::new(HighCardRanker);
    let card_abs = Arc::new(card_abs);
    let tree = Arc::new(tree);

    let coordinator = Coordinator::spawn(&params, game, ranker, card_abs, tree, store.clone());

    let deadline = std::time::Instant::now() + Duration::from_secs(10);
    while coordinator.total_iterations() == 0 && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(coordinator.total_iterations() > 0, "workers should have made progress before the first pause");

    // `pause()` only returns once every worker has observed `do_pause` and
    // parked itself, so the barrier's visibility guarantee is exercised by
    // its own return contract.
    coordinator.pause();
    let held = coordinator.total_iterations();
    std::thread::sleep(Duration::from_millis(200));
    assert_eq!(coordinator.total_iterations(), held, "no worker should advance its counter while paused");

    coordinator.resume();
    let deadline = std::time::Instant::now() + Duration::from_secs(10);
    while coordinator.total_iterations() == held && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(coordinator.total_iterations() > held, "workers should resume progress after resume()");

    coordinator.quit();
}
