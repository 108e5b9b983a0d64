/// Parses `dd:hh:mm:ss`-style durations (1 to 4 colon-separated fields,
/// the rightmost always seconds), or a bare integer number of seconds.
/// Grounded on `time_string_to_seconds` in the original's `utility.cpp`.
/// The CLI's `--status=`/`--checkpoint=`/`--max-walltime=` flags all
/// accept this format.
pub fn parse_duration(s: &str) -> anyhow::Result<u64> {
    let fields: Vec<&str> = s.split(':').collect();
    if fields.len() > 4 {
        anyhow::bail!("duration {s:?} has more than 4 colon-separated fields");
    }
    let mut seconds = 0u64;
    let multipliers = [1u64, 60, 3600, 86400];
    for (field, mult) in fields.iter().rev().zip(multipliers.iter()) {
        seconds += field.trim().parse::<u64>()? * mult;
    }
    Ok(seconds)
}

/// Inverse of [`parse_duration`], showing only the fields that matter
/// (skips leading zero components). Grounded on `time_seconds_to_string`
/// in the original's `utility.cpp`.
pub fn format_duration(mut seconds: u64) -> String {
    let days = seconds / 86400;
    seconds %= 86400;
    let hours = seconds / 3600;
    seconds %= 3600;
    let minutes = seconds / 60;
    seconds %= 60;

    if days > 0 {
        format!("{days}:{hours:02}:{minutes:02}:{seconds:02}")
    } else if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else if minutes > 0 {
        format!("{minutes}:{seconds:02}")
    } else {
        format!("{seconds}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_seconds() {
        assert_eq!(parse_duration("90").unwrap(), 90);
    }

    #[test]
    fn parses_full_dd_hh_mm_ss() {
        assert_eq!(parse_duration("1:02:03:04").unwrap(), 86400 + 2 * 3600 + 3 * 60 + 4);
    }

    #[test]
    fn formats_without_empty_leading_fields() {
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(5), "5");
    }
}
