//! Checkpoint round-trip under a multi-threaded training run: dumping,
//! reloading, and dumping again with zero intervening iterations must
//! produce byte-identical files.

use std::sync::Arc;
use std::time::Duration;

use pure_cfr_solver::abstraction::{ActionAbstractionKind, CardAbstractionKind};
use pure_cfr_solver::checkpoint::{load_dump, write_dump};
use pure_cfr_solver::config::Parameters;
use pure_cfr_solver::game::{GameDef, HighCardRanker, Ranker};
use pure_cfr_solver::store::Store;
use pure_cfr_solver::tree::Tree;
use pure_cfr_solver::worker::Coordinator;

#[test]
fn round_trip_dump_is_byte_identical_with_no_intervening_iterations() {
    let game = GameDef::toy_one_card();
    let action_abs = ActionAbstractionKind::Null;
    let card_abs = CardAbstractionKind::Null;
    let tree = Tree::build(&game, &action_abs).unwrap();

    let mut params = Parameters::default();
    params.game_file = "toy_one_card".to_string();
    params.num_threads = 4;
    params.rng_seeds = [6, 12, 1983, 28];

    let store = Arc::new(Store::new(&game, &card_abs, &tree.num_entries_per_bucket));
    let game = Arc::new(game);
    let ranker: Arc<dyn Ranker + Send + Sync> = Arc::new(HighCardRanker);
    let card_abs = Arc::new(card_abs);
    let tree = Arc::new(tree);

    let coordinator = Coordinator::spawn(&params, game.clone(), ranker, card_abs.clone(), tree.clone(), store.clone());

    let deadline = std::time::Instant::now() + Duration::from_secs(10);
    while coordinator.total_iterations() < 5 && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(coordinator.total_iterations() >= 1, "workers should have made progress within the deadline");

    let dir = tempfile::tempdir().unwrap();
    let prefix1 = dir.path().join("first").to_str().unwrap().to_string();

    coordinator.pause();
    write_dump(&store, &prefix1, true).unwrap();
    coordinator.quit();

    let mut reloaded = Store::new(&game, &card_abs, &tree.num_entries_per_bucket);
    load_dump(&mut reloaded, &prefix1).unwrap();

    let prefix2 = dir.path().join("second").to_str().unwrap().to_string();
    write_dump(&reloaded, &prefix2, true).unwrap();

    let regrets1 = std::fs::read(format!("{prefix1}.regrets")).unwrap();
    let regrets2 = std::fs::read(format!("{prefix2}.regrets")).unwrap();
    assert_eq!(regrets1, regrets2);

    let avg1 = std::fs::read(format!("{prefix1}.avg-strategy")).unwrap();
    let avg2 = std::fs::read(format!("{prefix2}.avg-strategy")).unwrap();
    assert_eq!(avg1, avg2);
}
