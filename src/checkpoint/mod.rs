//! Checkpoint I/O: the `.regrets`/`.avg-strategy` binary dumps and the
//! `.player` text header, plus the unit-suffixed filename scheme the
//! worker coordinator uses when scheduling checkpoints. Grounded on
//! `PureCfrMachine::write_dump`/`load_dump` and `PlayerModule`'s player-file
//! handling in the original.

mod dump;
mod filename;

pub use dump::{dump_exists, load_dump, write_dump};
pub use filename::{checkpoint_prefix, format_units, parse_units};

use crate::config::Parameters;
use std::io::Write;

/// Writes `<prefix>.player`: the parameters header plus
/// `BINARY_FILENAME_PREFIX` and `PLAYER_END`, exactly as
/// `print_player_file` does in the original's `player_module.cpp`.
pub fn write_player_file(params: &Parameters, binary_prefix: &str, path: &str) -> anyhow::Result<()> {
    let mut file = std::fs::File::create(path)?;
    params.write(&mut file)?;
    writeln!(file, "BINARY_FILENAME_PREFIX {binary_prefix}")?;
    writeln!(file, "PLAYER_END")?;
    Ok(())
}
