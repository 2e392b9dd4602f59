use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Discord's snowflake epoch (2015-01-01T00:00:00Z) in unix milliseconds.
pub const DISCORD_EPOCH_MILLIS: u64 = 1_420_070_400_000;

/// Return the current unix timestamp in seconds.
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

/// Unix timestamp, in seconds, `duration` from now. Saturates instead of overflowing.
pub fn unix_secs_after(duration: Duration) -> u64 {
    now_unix_secs().saturating_add(duration.as_secs())
}

/// Creation time of a snowflake id in unix milliseconds.
pub fn snowflake_unix_millis(id: u64) -> u64 {
    (id >> 22).saturating_add(DISCORD_EPOCH_MILLIS)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{DISCORD_EPOCH_MILLIS, now_unix_secs, snowflake_unix_millis, unix_secs_after};

    #[test]
    fn decodes_snowflake_timestamps() {
        // Example id from the Discord developer docs.
        assert_eq!(snowflake_unix_millis(175928847299117063), 1_462_015_105_796);
        assert_eq!(snowflake_unix_millis(0), DISCORD_EPOCH_MILLIS);
    }

    #[test]
    fn offsets_from_now() {
        let before = now_unix_secs();
        let until = unix_secs_after(Duration::from_secs(60));
        assert!(until >= before + 60);
    }
}
