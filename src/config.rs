//! Run configuration: the `Parameters` struct, its keyword-per-line text
//! format (shared between `--config=` files, `.player` files, and the
//! printed config header), and the CLI surface built on top of it with
//! `clap`. Grounded on `Parameters` in the original's `parameters.cpp`/
//! `parameters.hpp`.

use std::io::{BufRead, Write};

use clap::Parser;

use crate::abstraction::{ActionAbstractionKind, CardAbstractionKind};
use crate::checkpoint::parse_units;
use crate::error::SolverError;
use crate::worker::duration::parse_duration;

/// `--checkpoint=start[,mult[,add]]`: the next checkpoint fires at
/// `max(next*mult+add, next_from_current_work_seconds)`. Grounded on
/// `dump_timer` in the original.
#[derive(Debug, Clone, Copy)]
pub struct DumpTimer {
    pub start: u64,
    pub mult: u64,
    pub add: u64,
}

impl Default for DumpTimer {
    fn default() -> DumpTimer {
        DumpTimer { start: i32::MAX as u64, mult: 1, add: 0 }
    }
}

#[derive(Debug, Clone)]
pub struct Parameters {
    pub game_file: String,
    pub output_prefix: String,
    pub rng_seeds: [u32; 4],
    pub card_abs: String,
    pub action_abs: String,
    pub load_dump: bool,
    pub load_dump_prefix: Option<String>,
    pub num_threads: usize,
    pub status_freq_seconds: u64,
    pub dump_timer: DumpTimer,
    pub max_walltime_seconds: u64,
    pub do_average: bool,
    pub verbose: bool,
}

impl Default for Parameters {
    fn default() -> Parameters {
        Parameters {
            game_file: String::new(),
            output_prefix: String::new(),
            rng_seeds: [6, 12, 1983, 28],
            card_abs: "NULL".to_string(),
            action_abs: "NULL".to_string(),
            load_dump: false,
            load_dump_prefix: None,
            num_threads: 1,
            status_freq_seconds: 60,
            dump_timer: DumpTimer::default(),
            max_walltime_seconds: i32::MAX as u64,
            do_average: true,
            verbose: false,
        }
    }
}

impl Parameters {
    pub fn card_abstraction(&self) -> anyhow::Result<CardAbstractionKind> {
        CardAbstractionKind::parse(&self.card_abs)
    }

    pub fn action_abstraction(&self) -> anyhow::Result<ActionAbstractionKind> {
        ActionAbstractionKind::parse(&self.action_abs)
    }

    /// Writes the keyword-per-line config header, terminated by
    /// `PARAMETERS_END`. Grounded on `print_params` in the original.
    pub fn write(&self, w: &mut impl Write) -> anyhow::Result<()> {
        writeln!(w, "GAME_FILE {}", self.game_file)?;
        writeln!(w, "OUTPUT_PREFIX {}", self.output_prefix)?;
        writeln!(
            w,
            "RNG_SEEDS {}:{}:{}:{}",
            self.rng_seeds[0], self.rng_seeds[1], self.rng_seeds[2], self.rng_seeds[3]
        )?;
        writeln!(w, "CARD_ABSTRACTION {}", self.card_abs)?;
        writeln!(w, "ACTION_ABSTRACTION {}", self.action_abs)?;
        if let Some(prefix) = &self.load_dump_prefix {
            writeln!(w, "LOAD_DUMP_PREFIX {prefix}")?;
        }
        writeln!(w, "NUM_THREADS {}", self.num_threads)?;
        writeln!(w, "STATUS_FREQ_SECONDS {}", self.status_freq_seconds)?;
        writeln!(w, "DUMP_TIMER {} {} {}", self.dump_timer.start, self.dump_timer.mult, self.dump_timer.add)?;
        writeln!(w, "MAX_WALLTIME_SECONDS {}", self.max_walltime_seconds)?;
        writeln!(w, "DO_AVERAGE {}", if self.do_average { "TRUE" } else { "FALSE" })?;
        writeln!(w, "PARAMETERS_END")?;
        Ok(())
    }

    /// Parses the same keyword vocabulary [`Parameters::write`] emits, also
    /// accepting the `.player` file's trailing `BINARY_FILENAME_PREFIX`/
    /// `VERBOSE` keywords, stopping at `PARAMETERS_END`/`PLAYER_END`.
    /// Blank lines and `#`-comments are ignored. Grounded on `read_params`
    /// in the original.
    pub fn read(r: &mut impl BufRead) -> anyhow::Result<(Parameters, Option<String>)> {
        let mut params = Parameters::default();
        let mut binary_prefix = None;
        for line in r.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line == "PARAMETERS_END" || line == "PLAYER_END" {
                break;
            }
            let mut parts = line.split_whitespace();
            let keyword = parts.next().unwrap_or_default();
            let rest: Vec<&str> = parts.collect();
            match keyword {
                "GAME_FILE" => params.game_file = rest.join(" "),
                "OUTPUT_PREFIX" => params.output_prefix = rest.join(" "),
                "RNG_SEEDS" => {
                    let fields: Vec<&str> = rest[0].split(':').collect();
                    for (i, f) in fields.iter().enumerate().take(4) {
                        params.rng_seeds[i] = f.parse()?;
                    }
                }
                "CARD_ABSTRACTION" => params.card_abs = rest[0].to_string(),
                "ACTION_ABSTRACTION" => params.action_abs = rest[0].to_string(),
                "LOAD_DUMP_PREFIX" => {
                    params.load_dump = true;
                    params.load_dump_prefix = Some(rest[0].to_string());
                }
                "NUM_THREADS" => params.num_threads = rest[0].parse()?,
                "STATUS_FREQ_SECONDS" => params.status_freq_seconds = rest[0].parse()?,
                "DUMP_TIMER" => {
                    let start: u64 = rest[0].parse()?;
                    // Same "add defaults to start only when mult is also
                    // absent" rule as the `--checkpoint=` flag; this keyword
                    // is normally fed all three already-written fields, but
                    // the default should still match the original when it
                    // isn't.
                    let (mult, add) = match rest.get(1) {
                        None => (1, start),
                        Some(mult_field) => {
                            let mult = mult_field.parse()?;
                            let add = rest.get(2).map(|s| s.parse()).transpose()?.unwrap_or(0);
                            (mult, add)
                        }
                    };
                    params.dump_timer = DumpTimer { start, mult, add };
                }
                "MAX_WALLTIME_SECONDS" => params.max_walltime_seconds = rest[0].parse()?,
                "DO_AVERAGE" => params.do_average = rest[0] == "TRUE",
                "BINARY_FILENAME_PREFIX" => binary_prefix = Some(rest[0].to_string()),
                "VERBOSE" => params.verbose = true,
                other => {
                    return Err(SolverError::BadPlayerFile(format!("unknown keyword {other}")).into());
                }
            }
        }
        Ok((params, binary_prefix))
    }
}

/// `trainer` CLI flags, layered on top of [`Parameters`]. Grounded on the
/// flag vocabulary `Parameters::parse` accepts in the original, expressed
/// with `clap::Parser` the way `krukah-robopoker`'s `analysis::Query` uses
/// it.
#[derive(Parser, Debug)]
#[command(author, version, about = "Pure CFR self-play trainer", long_about = None)]
pub struct TrainerCli {
    /// Path to the game definition file.
    pub game_file: String,
    /// Prefix for every file this run produces (`<prefix>.player`,
    /// `<prefix>.regrets`, ...).
    pub output_prefix: String,

    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// `s1:s2:s3:s4`, or `TIME` to seed from the current wall clock.
    #[arg(long, value_name = "SEEDS")]
    pub rng: Option<String>,

    #[arg(long = "card-abs", value_name = "NULL|BLIND")]
    pub card_abs: Option<String>,

    #[arg(long = "action-abs", value_name = "NULL|FCPA")]
    pub action_abs: Option<String>,

    #[arg(long = "load-dump", value_name = "PREFIX")]
    pub load_dump: Option<String>,

    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// `dd:hh:mm:ss`, or a plain integer number of seconds.
    #[arg(long, value_name = "TIME")]
    pub status: Option<String>,

    /// `start[,mult[,add]]`, each accepting a `k`/`m`/`b` unit suffix.
    #[arg(long, value_name = "START[,MULT[,ADD]]")]
    pub checkpoint: Option<String>,

    #[arg(long = "max-walltime", value_name = "TIME")]
    pub max_walltime: Option<String>,

    #[arg(long = "no-average")]
    pub no_average: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

impl TrainerCli {
    /// Folds the CLI flags onto a base [`Parameters`] (the defaults, or
    /// whatever `--config=` loaded), matching the override order
    /// `Parameters::parse` applies in the original: file-or-default first,
    /// then each flag in argv order.
    pub fn resolve(self) -> anyhow::Result<Parameters> {
        let mut params = match &self.config {
            Some(path) => {
                let file = std::fs::File::open(path)?;
                Parameters::read(&mut std::io::BufReader::new(file))?.0
            }
            None => Parameters::default(),
        };
        params.game_file = self.game_file;
        params.output_prefix = self.output_prefix;

        if let Some(rng) = &self.rng {
            if rng == "TIME" {
                let now = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)?
                    .as_secs();
                for seed in &mut params.rng_seeds {
                    *seed = now as u32;
                }
            } else {
                let fields: Vec<&str> = rng.split(':').collect();
                for (i, f) in fields.iter().enumerate().take(4) {
                    params.rng_seeds[i] = f.parse()?;
                }
            }
        }
        if let Some(card_abs) = self.card_abs {
            params.card_abs = card_abs;
        }
        if let Some(action_abs) = self.action_abs {
            params.action_abs = action_abs;
        }
        if let Some(prefix) = self.load_dump {
            params.load_dump = true;
            params.load_dump_prefix = Some(prefix);
        }
        if let Some(threads) = self.threads {
            params.num_threads = threads;
        }
        if let Some(status) = &self.status {
            params.status_freq_seconds = parse_duration(status)?;
        }
        if let Some(checkpoint) = &self.checkpoint {
            let fields: Vec<&str> = checkpoint.split(',').collect();
            let start = parse_units(fields[0])?;
            // Only `start` given: mult=1, add=start. `start,mult` given (no
            // `add`): add=0. `start,mult,add` given: all as written. Mirrors
            // the original's `num_args` branching exactly (`parameters.cpp`):
            // the "add defaults to start" case applies only when `mult`
            // itself was omitted, not whenever `add` is missing.
            let (mult, add) = match fields.get(1) {
                None => (1, start),
                Some(mult_field) => {
                    let mult = parse_units(mult_field)?;
                    let add = fields.get(2).map(|s| parse_units(s)).transpose()?.unwrap_or(0);
                    (mult, add)
                }
            };
            params.dump_timer = DumpTimer { start, mult, add };
        }
        if let Some(max_walltime) = &self.max_walltime {
            params.max_walltime_seconds = parse_duration(max_walltime)?;
        }
        if self.no_average {
            params.do_average = false;
        }
        if self.verbose {
            params.verbose = true;
        }
        Ok(params)
    }
}

/// `player` CLI flags: a dealer host/port plus the player file to load.
#[derive(Parser, Debug)]
#[command(author, version, about = "Pure CFR dealer-network player", long_about = None)]
pub struct PlayerCli {
    pub player_file: String,
    pub host: String,
    pub port: u16,
}
