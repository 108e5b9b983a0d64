use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};
use std::sync::atomic::{AtomicI32, AtomicU32, AtomicU64, Ordering};

use super::layout::EntryType;
use crate::error::SolverError;

/// Per-round regret counters, one `i32` per `(bucket, soln_idx)` slot.
/// Grounded on `Entries_der<int>` in the original's `entries.hpp`. Always
/// `i32` regardless of round (see [`super::layout::REGRET_TYPES`]).
pub struct RegretArray {
    data: Vec<AtomicI32>,
}

impl RegretArray {
    pub fn new(total_num_entries: u64) -> RegretArray {
        RegretArray { data: (0..total_num_entries).map(|_| AtomicI32::new(0)).collect() }
    }

    /// Reads `num_choices` consecutive slots starting at `base`, clamping
    /// negatives to zero, and returns both the clamped values and their
    /// sum. Mirrors `get_pos_values` in the original's `entries.hpp`.
    pub fn positive_values(&self, base: usize, num_choices: usize) -> (Vec<u64>, u64) {
        let mut values = Vec::with_capacity(num_choices);
        let mut sum = 0u64;
        for i in 0..num_choices {
            let v = self.data[base + i].load(Ordering::Relaxed);
            let clamped = if v > 0 { v as u64 } else { 0 };
            sum += clamped;
            values.push(clamped);
        }
        (values, sum)
    }

    /// Applies `values[c] - retval` to each of `num_choices` slots at
    /// `base`, *unless* doing so would overflow `i32` and flip the stored
    /// value's sign — in which case that slot's update is silently
    /// dropped. Mirrors `update_regret` in the original's `entries.hpp`
    /// exactly, including the drop-on-overflow behavior.
    pub fn update_regret(&self, base: usize, values: &[i64], retval: i64) {
        for (i, &value) in values.iter().enumerate() {
            let slot = &self.data[base + i];
            let diff = value - retval;
            let current = slot.load(Ordering::Relaxed) as i64;
            let new_regret = current + diff;
            let overflowed = (diff < 0 && new_regret > current) || (diff > 0 && new_regret < current);
            let in_range = (i32::MIN as i64..=i32::MAX as i64).contains(&new_regret);
            if !overflowed && in_range {
                slot.store(new_regret as i32, Ordering::Relaxed);
            }
        }
    }

    pub fn write(&self, w: &mut impl Write) -> std::io::Result<()> {
        w.write_u8(EntryType::I32.tag())?;
        for slot in &self.data {
            w.write_i32::<NativeEndian>(slot.load(Ordering::Relaxed))?;
        }
        Ok(())
    }

    pub fn load(r: &mut impl Read, total_num_entries: u64, round: usize) -> anyhow::Result<RegretArray> {
        let tag = r.read_u8()?;
        if tag != EntryType::I32.tag() {
            return Err(
                SolverError::EntryTypeMismatch { round, expected: EntryType::I32.tag(), found: tag }.into()
            );
        }
        let mut data = Vec::with_capacity(total_num_entries as usize);
        for _ in 0..total_num_entries {
            data.push(AtomicI32::new(r.read_i32::<NativeEndian>()?));
        }
        Ok(RegretArray { data })
    }
}

/// Per-round average-strategy counters, widened to `u64` for round 0 and
/// `u32` for later rounds (see [`super::layout::AVG_STRATEGY_TYPES`]).
/// Grounded on `Entries_der<uint64_t>`/`Entries_der<uint32_t>` in the
/// original's `entries.hpp`.
pub enum AvgStrategyArray {
    U32(Vec<AtomicU32>),
    U64(Vec<AtomicU64>),
}

/// Raised when an average-strategy counter would wrap around to a
/// nonpositive value on increment. Mirrors `increment_entry`'s `return 1`
/// overflow signal in the original, which there triggers a fatal exit with
/// remediation instructions; here it becomes a typed error the caller (the
/// worker loop) turns into the same fatal behavior via [`SolverError`].
pub struct Overflow;

impl AvgStrategyArray {
    pub fn new(round: usize, total_num_entries: u64) -> AvgStrategyArray {
        match super::layout::AVG_STRATEGY_TYPES[round] {
            EntryType::U64 => AvgStrategyArray::U64((0..total_num_entries).map(|_| AtomicU64::new(0)).collect()),
            _ => AvgStrategyArray::U32((0..total_num_entries).map(|_| AtomicU32::new(0)).collect()),
        }
    }

    /// Increments slot `index` by one. Mirrors `increment_entry` in the
    /// original: overflow (wraparound to a nonpositive value) is detected
    /// and reported rather than silently corrupting the counter.
    pub fn increment(&self, index: usize) -> Result<(), Overflow> {
        match self {
            AvgStrategyArray::U32(data) => {
                let prev = data[index].fetch_add(1, Ordering::Relaxed);
                if prev == u32::MAX { Err(Overflow) } else { Ok(()) }
            }
            AvgStrategyArray::U64(data) => {
                let prev = data[index].fetch_add(1, Ordering::Relaxed);
                if prev == u64::MAX { Err(Overflow) } else { Ok(()) }
            }
        }
    }

    pub fn positive_values(&self, base: usize, num_choices: usize) -> (Vec<u64>, u64) {
        let mut values = Vec::with_capacity(num_choices);
        let mut sum = 0u64;
        match self {
            AvgStrategyArray::U32(data) => {
                for i in 0..num_choices {
                    let v = data[base + i].load(Ordering::Relaxed) as u64;
                    sum += v;
                    values.push(v);
                }
            }
            AvgStrategyArray::U64(data) => {
                for i in 0..num_choices {
                    let v = data[base + i].load(Ordering::Relaxed);
                    sum += v;
                    values.push(v);
                }
            }
        }
        (values, sum)
    }

    pub fn entry_type(&self) -> EntryType {
        match self {
            AvgStrategyArray::U32(_) => EntryType::U32,
            AvgStrategyArray::U64(_) => EntryType::U64,
        }
    }

    pub fn write(&self, w: &mut impl Write) -> std::io::Result<()> {
        w.write_u8(self.entry_type().tag())?;
        match self {
            AvgStrategyArray::U32(data) => {
                for slot in data {
                    w.write_u32::<NativeEndian>(slot.load(Ordering::Relaxed))?;
                }
            }
            AvgStrategyArray::U64(data) => {
                for slot in data {
                    w.write_u64::<NativeEndian>(slot.load(Ordering::Relaxed))?;
                }
            }
        }
        Ok(())
    }

    pub fn load(r: &mut impl Read, total_num_entries: u64, round: usize) -> anyhow::Result<AvgStrategyArray> {
        let tag = r.read_u8()?;
        let expected = super::layout::AVG_STRATEGY_TYPES[round];
        if tag != expected.tag() {
            return Err(SolverError::EntryTypeMismatch { round, expected: expected.tag(), found: tag }.into());
        }
        Ok(match expected {
            EntryType::U64 => {
                let mut data = Vec::with_capacity(total_num_entries as usize);
                for _ in 0..total_num_entries {
                    data.push(AtomicU64::new(r.read_u64::<NativeEndian>()?));
                }
                AvgStrategyArray::U64(data)
            }
            _ => {
                let mut data = Vec::with_capacity(total_num_entries as usize);
                for _ in 0..total_num_entries {
                    data.push(AtomicU32::new(r.read_u32::<NativeEndian>()?));
                }
                AvgStrategyArray::U32(data)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    /// Clamped values are non-negative and `sum` equals their 64-bit total.
    #[test]
    fn positive_values_clamps_and_sums() {
        let regrets = RegretArray::new(4);
        regrets.data[0].store(-100, Ordering::Relaxed);
        regrets.data[1].store(50, Ordering::Relaxed);
        regrets.data[2].store(0, Ordering::Relaxed);
        regrets.data[3].store(i32::MAX, Ordering::Relaxed);

        let (values, sum) = regrets.positive_values(0, 4);
        assert_eq!(values, vec![0, 50, 0, i32::MAX as u64]);
        assert_eq!(sum, values.iter().sum::<u64>());
    }

    /// Invariant 6: a single update never flips a stored regret's sign via
    /// overflow; an update that would is dropped entirely.
    #[test]
    fn update_regret_drops_on_sign_flip() {
        let regrets = RegretArray::new(1);
        regrets.data[0].store(i32::MAX, Ordering::Relaxed);
        regrets.update_regret(0, &[i32::MAX as i64 + 10], 0);
        assert_eq!(regrets.data[0].load(Ordering::Relaxed), i32::MAX);

        regrets.data[0].store(i32::MIN, Ordering::Relaxed);
        regrets.update_regret(0, &[0], i32::MAX as i64);
        assert_eq!(regrets.data[0].load(Ordering::Relaxed), i32::MIN);
    }

    #[test]
    fn update_regret_applies_ordinary_diffs() {
        let regrets = RegretArray::new(2);
        regrets.update_regret(0, &[10, -3], 4);
        assert_eq!(regrets.data[0].load(Ordering::Relaxed), 6);
        assert_eq!(regrets.data[1].load(Ordering::Relaxed), -7);
    }

    /// Boundary behavior: `num_choices = 1` degenerates the regret update
    /// to `values[0] - retval == 0`, a true no-op.
    #[test]
    fn single_choice_regret_update_is_noop() {
        let regrets = RegretArray::new(1);
        regrets.update_regret(0, &[7], 7);
        assert_eq!(regrets.data[0].load(Ordering::Relaxed), 0);
    }

    /// An average-strategy increment that would wrap a counter to a
    /// nonpositive value is reported, not silently corrupted.
    #[test]
    fn avg_strategy_increment_overflow_is_fatal() {
        let avg = AvgStrategyArray::U32(vec![std::sync::atomic::AtomicU32::new(u32::MAX)]);
        assert!(avg.increment(0).is_err());
    }

    #[test]
    fn avg_strategy_increment_ordinary_case_succeeds() {
        let avg = AvgStrategyArray::new(1, 4);
        for _ in 0..3 {
            assert!(avg.increment(2).is_ok());
        }
        let (values, sum) = avg.positive_values(0, 4);
        assert_eq!(values[2], 3);
        assert_eq!(sum, 3);
    }

    #[test]
    fn write_load_round_trips_regret_array() {
        let regrets = RegretArray::new(3);
        regrets.data[0].store(-5, Ordering::Relaxed);
        regrets.data[1].store(12, Ordering::Relaxed);
        regrets.data[2].store(0, Ordering::Relaxed);

        let mut buf = Vec::new();
        regrets.write(&mut buf).unwrap();
        let loaded = RegretArray::load(&mut buf.as_slice(), 3, 0).unwrap();
        for i in 0..3 {
            assert_eq!(regrets.data[i].load(Ordering::Relaxed), loaded.data[i].load(Ordering::Relaxed));
        }
    }

    #[test]
    fn load_rejects_mismatched_type_tag() {
        let avg = AvgStrategyArray::new(0, 2); // round 0 is u64
        let mut buf = Vec::new();
        avg.write(&mut buf).unwrap();
        let err = AvgStrategyArray::load(&mut buf.as_slice(), 2, 1).unwrap_err(); // round 1 expects u32
        assert!(err.to_string().contains("entry type tag"));
    }
}
