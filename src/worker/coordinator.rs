use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::abstraction::CardAbstractionKind;
use crate::checkpoint::checkpoint_prefix;
use crate::config::{DumpTimer, Parameters};
use crate::engine;
use crate::game::{GameDef, Ranker};
use crate::hand::Hand;
use crate::store::Store;
use crate::tree::Tree;

/// Number of iterations each worker runs before checking the shared
/// pause/quit flags again. Matches `ITERATION_BLOCK_SIZE` in the
/// original's `constants.hpp`.
pub const ITERATION_BLOCK_SIZE: u64 = 1000;

struct WorkerSlot {
    am_paused: AtomicBool,
    iterations: AtomicU64,
}

/// Coordinates a fixed pool of long-lived worker threads that each deal a
/// hand and walk every player's viewpoint of it, batched in blocks of
/// [`ITERATION_BLOCK_SIZE`] between checks of the shared `do_pause`/
/// `do_quit` flags.
pub struct Coordinator {
    do_pause: Arc<AtomicBool>,
    do_quit: Arc<AtomicBool>,
    slots: Vec<Arc<WorkerSlot>>,
    handles: Vec<std::thread::JoinHandle<()>>,
}

impl Coordinator {
    pub fn spawn(
        params: &Parameters,
        game: Arc<GameDef>,
        ranker: Arc<dyn Ranker + Send + Sync>,
        card_abs: Arc<CardAbstractionKind>,
        tree: Arc<Tree>,
        store: Arc<Store>,
    ) -> Coordinator {
        let do_pause = Arc::new(AtomicBool::new(false));
        let do_quit = Arc::new(AtomicBool::new(false));
        let mut slots = Vec::with_capacity(params.num_threads);
        let mut handles = Vec::with_capacity(params.num_threads);

        for thread_id in 0..params.num_threads {
            let slot = Arc::new(WorkerSlot { am_paused: AtomicBool::new(false), iterations: AtomicU64::new(0) });
            slots.push(slot.clone());

            let do_pause = do_pause.clone();
            let do_quit = do_quit.clone();
            let game = game.clone();
            let ranker = ranker.clone();
            let card_abs = card_abs.clone();
            let tree = tree.clone();
            let store = store.clone();
            let do_average = params.do_average;
            // seeds[i] = base[i] + 1234 + 4*thread_id + i for all four
            // configured RNG words, folded into the single u64 `SmallRng`
            // takes. Using only `rng_seeds[0]` would leave three of the
            // four documented `--rng=s1:s2:s3:s4` words dead.
            let seed = (0..4u64).fold(0u64, |acc, i| {
                let word = params.rng_seeds[i as usize] as u64 + 1234 + 4 * thread_id as u64 + i;
                acc.wrapping_mul(0x9E3779B97F4A7C15).wrapping_add(word)
            });

            let handle = std::thread::spawn(move || {
                worker_loop(seed, game, ranker, card_abs, tree, store, do_average, do_pause, do_quit, slot)
            });
            handles.push(handle);
        }

        Coordinator { do_pause, do_quit, slots, handles }
    }

    pub fn total_iterations(&self) -> u64 {
        self.slots.iter().map(|s| s.iterations.load(Ordering::Relaxed)).sum()
    }

    /// Sets `do_pause`, spin-waits until every worker has observed it and
    /// set its own `am_paused`, and returns. The only mutual-exclusion
    /// point in the system: callers run `write_dump` while paused, then
    /// call [`Coordinator::resume`].
    pub fn pause(&self) {
        self.do_pause.store(true, Ordering::SeqCst);
        while !self.slots.iter().all(|s| s.am_paused.load(Ordering::SeqCst)) {
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    pub fn resume(&self) {
        self.do_pause.store(false, Ordering::SeqCst);
    }

    pub fn quit(self) {
        self.do_quit.store(true, Ordering::SeqCst);
        for handle in self.handles {
            let _ = handle.join();
        }
    }

    /// Periodically logs progress, checkpoints on the `DUMP_TIMER`
    /// schedule (`next = max(next*mult+add, next_from_current_work_seconds)`),
    /// and quits once `max_walltime_seconds` elapses.
    pub fn run_until_done(self, params: &Parameters, store: &Store, output_prefix: &str) -> anyhow::Result<()> {
        let started = Instant::now();
        let mut dumping_secs = 0u64;
        let mut next_status = params.status_freq_seconds;
        let mut next_checkpoint = params.dump_timer.start;

        loop {
            std::thread::sleep(Duration::from_secs(1));
            let wallclock = started.elapsed().as_secs();
            let work_seconds = wallclock.saturating_sub(dumping_secs);

            if wallclock >= params.max_walltime_seconds {
                log::info!("max walltime reached at {wallclock}s, stopping");
                break;
            }
            if work_seconds >= next_status {
                log::info!("{}", super::status_line(self.total_iterations(), work_seconds));
                next_status += params.status_freq_seconds;
            }
            if work_seconds >= next_checkpoint {
                dumping_secs += self.checkpoint(params, store, output_prefix, work_seconds)?;
                next_checkpoint = schedule_next(next_checkpoint, work_seconds, &params.dump_timer);
            }
        }

        let work_seconds = started.elapsed().as_secs().saturating_sub(dumping_secs);
        self.checkpoint(params, store, output_prefix, work_seconds)?;
        self.quit();
        Ok(())
    }

    /// Pauses every worker, writes `<prefix>.regrets`/`.avg-strategy`/
    /// `.player`, resumes, and returns how many seconds the dump itself
    /// took — the caller folds this into the excluded `dumping_secs`
    /// counter so checkpoint/status cadence is measured in work-seconds,
    /// not wallclock.
    fn checkpoint(&self, params: &Parameters, store: &Store, output_prefix: &str, work_seconds: u64) -> anyhow::Result<u64> {
        let dump_started = Instant::now();
        self.pause();
        let prefix = checkpoint_prefix(output_prefix, self.total_iterations(), work_seconds);
        crate::checkpoint::write_dump(store, &prefix, params.do_average)?;
        crate::checkpoint::write_player_file(params, &prefix, &format!("{prefix}.player"))?;
        log::info!("checkpoint written to {prefix}.*");
        self.resume();
        Ok(dump_started.elapsed().as_secs())
    }
}

fn schedule_next(current: u64, elapsed_work_seconds: u64, timer: &DumpTimer) -> u64 {
    let from_schedule = current.saturating_mul(timer.mult).saturating_add(timer.add);
    from_schedule.max(elapsed_work_seconds + 1)
}

#[allow(clippy::too_many_arguments)]
fn worker_loop(
    seed: u64,
    game: Arc<GameDef>,
    ranker: Arc<dyn Ranker + Send + Sync>,
    card_abs: Arc<CardAbstractionKind>,
    tree: Arc<Tree>,
    store: Arc<Store>,
    do_average: bool,
    do_pause: Arc<AtomicBool>,
    do_quit: Arc<AtomicBool>,
    slot: Arc<WorkerSlot>,
) {
    let mut rng = SmallRng::seed_from_u64(seed);
    loop {
        if do_quit.load(Ordering::SeqCst) {
            return;
        }
        if do_pause.load(Ordering::SeqCst) {
            slot.am_paused.store(true, Ordering::SeqCst);
            while do_pause.load(Ordering::SeqCst) && !do_quit.load(Ordering::SeqCst) {
                std::thread::sleep(Duration::from_millis(1));
            }
            slot.am_paused.store(false, Ordering::SeqCst);
            continue;
        }

        for _ in 0..ITERATION_BLOCK_SIZE {
            let hand = Hand::deal(&game, ranker.as_ref(), &card_abs, &mut rng);
            for position in 0..game.num_players {
                match engine::walk(&tree, tree.root, &hand, position, &store, &mut rng, do_average) {
                    Ok(_) => {}
                    Err(err) => {
                        log::error!("fatal: {err}");
                        do_quit.store(true, Ordering::SeqCst);
                        return;
                    }
                }
            }
            slot.iterations.fetch_add(1, Ordering::Relaxed);
        }
    }
}
