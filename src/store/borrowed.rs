use memmap2::Mmap;
use std::fs::File;

use super::layout::EntryType;
use crate::error::SolverError;
use crate::game::R_MAX;

/// One round's worth of entries borrowed directly out of a memory-mapped
/// file, with no copy into owned memory. Mirrors `new_loaded_entries`
/// advancing a raw pointer through the mmap'd region in the original's
/// `entries.cpp`; here the "raw pointer" is a byte offset plus a width,
/// replacing the original's `void**` pointer-advancing idiom with an index.
struct BorrowedRound {
    entry_type: EntryType,
    offset: usize,
}

/// A read-only, process-shared view of a dump file, used by the player
/// binary so many concurrent lookups can share one mapping instead of each
/// loading its own copy. Grounded on `PlayerModule`'s `mmap(..., PROT_READ,
/// MAP_SHARED, ...)` path in the original's `player_module.cpp`.
pub struct BorrowedStore {
    mmap: Mmap,
    rounds: Vec<BorrowedRound>,
}

impl BorrowedStore {
    pub fn open(path: &std::path::Path, total_num_entries: &[u64; R_MAX], num_rounds: usize) -> anyhow::Result<BorrowedStore> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        let mut rounds = Vec::with_capacity(num_rounds);
        let mut offset = 0usize;
        for round in 0..num_rounds {
            let tag = *mmap.get(offset).ok_or_else(|| anyhow::anyhow!("dump file truncated at round {round}"))?;
            let entry_type = EntryType::from_tag(tag)
                .ok_or_else(|| SolverError::EntryTypeMismatch { round, expected: 0, found: tag })?;
            offset += 1;
            rounds.push(BorrowedRound { entry_type, offset });
            offset += entry_type.width() * total_num_entries[round] as usize;
        }
        Ok(BorrowedStore { mmap, rounds })
    }

    /// Reads `num_choices` consecutive elements starting at `base` in
    /// `round`, clamped to non-negative, returning the clamped values and
    /// their sum — the same contract as [`super::RegretArray::positive_values`]
    /// and [`super::AvgStrategyArray::positive_values`], but over borrowed
    /// bytes instead of atomics.
    pub fn positive_values(&self, round: usize, base: usize, num_choices: usize) -> (Vec<u64>, u64) {
        let r = &self.rounds[round];
        let mut values = Vec::with_capacity(num_choices);
        let mut sum = 0u64;
        for i in 0..num_choices {
            let idx = base + i;
            let start = r.offset + idx * r.entry_type.width();
            let clamped = match r.entry_type {
                EntryType::U8 => self.mmap[start] as u64,
                EntryType::I32 => {
                    let bytes: [u8; 4] = self.mmap[start..start + 4].try_into().unwrap();
                    let v = i32::from_ne_bytes(bytes);
                    if v > 0 { v as u64 } else { 0 }
                }
                EntryType::U32 => {
                    let bytes: [u8; 4] = self.mmap[start..start + 4].try_into().unwrap();
                    u32::from_ne_bytes(bytes) as u64
                }
                EntryType::U64 => {
                    let bytes: [u8; 8] = self.mmap[start..start + 8].try_into().unwrap();
                    u64::from_ne_bytes(bytes)
                }
            };
            sum += clamped;
            values.push(clamped);
        }
        (values, sum)
    }
}
