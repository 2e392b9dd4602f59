const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * 60;
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;
const SECONDS_PER_MONTH: u64 = 30 * SECONDS_PER_DAY;
const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// Map a lower-cased unit suffix to its length in seconds.
///
/// A lone `m` is a month, not a minute; minutes are spelled `min` or `minute`.
pub fn duration_unit_seconds(unit: &str) -> Option<u64> {
    match unit {
        "s" => Some(1),
        "min" | "minute" => Some(SECONDS_PER_MINUTE),
        "h" => Some(SECONDS_PER_HOUR),
        "d" | "day" => Some(SECONDS_PER_DAY),
        "m" | "month" => Some(SECONDS_PER_MONTH),
        "y" | "year" => Some(SECONDS_PER_YEAR),
        _ => None,
    }
}

/// Parse a human duration like `1d12h`, `10min` or `2m` into seconds.
///
/// Every `<digits><letters>` token in the input is summed; anything between
/// tokens is skipped. One unknown unit rejects the whole input. Input without
/// any token resolves to zero seconds.
///
/// Only ASCII digits and ASCII letters form tokens. Other scripts' digits
/// (e.g. Arabic-Indic `٥`) are skipped like any other separator.
pub fn parse_duration_seconds(raw: &str) -> Option<u64> {
    let lowered = raw.to_lowercase();
    let bytes = lowered.as_bytes();
    let mut cursor = 0;
    let mut total_seconds = 0_u64;

    while cursor < bytes.len() {
        if !bytes[cursor].is_ascii_digit() {
            cursor += 1;
            continue;
        }

        let number_start = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        let number_end = cursor;

        while cursor < bytes.len() && bytes[cursor].is_ascii_lowercase() {
            cursor += 1;
        }

        if cursor == number_end {
            continue;
        }

        let number = lowered[number_start..number_end].parse::<u64>().ok()?;
        let multiplier = duration_unit_seconds(&lowered[number_end..cursor])?;

        let part_seconds = number.checked_mul(multiplier)?;
        total_seconds = total_seconds.checked_add(part_seconds)?;
    }

    Some(total_seconds)
}

/// Parse a raw snowflake id typed by a user. Zero is never a valid id.
pub fn parse_snowflake(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|id| *id > 0)
}
