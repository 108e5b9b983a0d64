/// Folds a count into a `k`/`m`/`b` unit-suffixed string when it divides
/// evenly, else falls back to the plain decimal digits. Used for the
/// `P.iter-<N>.secs-<S>` checkpoint filename suffix. Grounded on
/// `int64tostr_units` in the original's `utility.cpp`.
pub fn format_units(n: u64) -> String {
    if n != 0 && n % 1_000_000_000 == 0 {
        format!("{}b", n / 1_000_000_000)
    } else if n != 0 && n % 1_000_000 == 0 {
        format!("{}m", n / 1_000_000)
    } else if n != 0 && n % 1_000 == 0 {
        format!("{}k", n / 1_000)
    } else {
        n.to_string()
    }
}

/// Inverse of [`format_units`]. Grounded on `strtoint64_units` in the
/// original's `utility.cpp`.
pub fn parse_units(s: &str) -> anyhow::Result<u64> {
    let s = s.trim();
    let (digits, mult) = match s.chars().last() {
        Some('k') | Some('K') => (&s[..s.len() - 1], 1_000),
        Some('m') | Some('M') => (&s[..s.len() - 1], 1_000_000),
        Some('b') | Some('B') => (&s[..s.len() - 1], 1_000_000_000),
        _ => (s, 1),
    };
    Ok(digits.parse::<u64>()? * mult)
}

/// Builds the checkpoint filename prefix `<prefix>.iter-<N>.secs-<S>`.
pub fn checkpoint_prefix(prefix: &str, iterations: u64, seconds: u64) -> String {
    format!("{prefix}.iter-{}.secs-{}", format_units(iterations), format_units(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_round_numbers() {
        assert_eq!(format_units(3_000), "3k");
        assert_eq!(format_units(2_000_000), "2m");
        assert_eq!(format_units(1_000_000_000), "1b");
        assert_eq!(format_units(1_234), "1234");
    }

    #[test]
    fn units_round_trip() {
        for &n in &[0u64, 7, 3_000, 2_000_000, 1_000_000_000] {
            assert_eq!(parse_units(&format_units(n)).unwrap(), n);
        }
    }
}
