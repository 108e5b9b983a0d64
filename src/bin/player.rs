//! `player <player-file> <host> <port>` — connects to a dealer, sends the
//! `VERSION:` handshake, and for every inbound match-state line where it is
//! this seat's turn to act, appends `:<action>\r\n`. The dealer-network
//! wire protocol itself is an external collaborator; this is a minimal
//! blocking client, not a general ACPC protocol implementation.

mod matchstate;

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::process::ExitCode;

use clap::Parser;
use pure_cfr_solver::config::PlayerCli;
use pure_cfr_solver::game::State;
use pure_cfr_solver::player::PlayerLookup;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use matchstate::MatchState;

const VERSION_MAJOR: u32 = 2;
const VERSION_MINOR: u32 = 0;
const VERSION_REVISION: u32 = 0;

fn run() -> anyhow::Result<()> {
    let cli = PlayerCli::parse();
    pure_cfr_solver::init_logging(false)?;

    let lookup = PlayerLookup::load(&cli.player_file)?;
    // Fold the `.player` file's four RNG_SEEDS words into one u64 seed for
    // the action/translation RNG, the same way the worker pool folds its
    // four words per thread (src/worker/coordinator.rs), so the file's
    // documented seed actually determines this client's play.
    let seeds = lookup.rng_seeds();
    let seed = (0..4u64).fold(0u64, |acc, i| {
        acc.wrapping_mul(0x9E3779B97F4A7C15).wrapping_add(seeds[i as usize] as u64)
    });
    let mut rng = SmallRng::seed_from_u64(seed);

    let stream = TcpStream::connect((cli.host.as_str(), cli.port))?;
    let mut writer = stream.try_clone()?;
    let mut reader = BufReader::new(stream);

    write!(writer, "VERSION:{VERSION_MAJOR}.{VERSION_MINOR}.{VERSION_REVISION}\r\n")?;
    writer.flush()?;
    log::info!("connected to {}:{}, sent version handshake", cli.host, cli.port);

    let mut line = String::new();
    loop {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            log::info!("dealer closed the connection");
            break;
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }
        let Some(state) = MatchState::parse(trimmed) else {
            log::warn!("unrecognized line from dealer: {trimmed:?}");
            continue;
        };

        let mut sim = State::new(lookup.game());
        for &action in &state.history {
            if sim.finished {
                break;
            }
            sim.apply(lookup.game(), action);
        }
        if sim.finished || sim.acting != state.viewing_player() {
            continue;
        }

        let action = lookup.act(&state.hole, &state.board, &state.history, &mut rng);
        write!(writer, "{trimmed}:{action}\r\n")?;
        writer.flush()?;
    }
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("player: {err:#}");
            ExitCode::from(1)
        }
    }
}
