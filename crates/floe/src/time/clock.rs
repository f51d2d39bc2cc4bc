use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::TimeSource;

/// Tick origin: Wednesday, January 1, 2025 00:00:00 UTC.
pub const GENERATOR_EPOCH: Duration = Duration::from_millis(1_735_689_600_000);

/// Length of one raw clock unit: 100 nanoseconds.
pub const RAW_UNIT_NANOS: u128 = 100;

/// Raw units are right-shifted by this amount to form a tick, so one tick
/// spans 2^14 raw units, about 1.64 ms.
///
/// Together with [`GENERATOR_EPOCH`] and [`RAW_UNIT_NANOS`], this fixes the
/// meaning of every timestamp field: a 41-bit tick count runs out roughly
/// 114 years after the epoch. None of the three constants can change once
/// ids have been persisted, since that would re-label every stored id.
pub const TICK_SHIFT: u32 = 14;

/// System-clock tick source anchored at a fixed epoch.
///
/// Each reading takes the wall clock, subtracts the epoch, and compresses
/// the 100 ns raw units down to ticks by [`TICK_SHIFT`]. Readings never
/// fail; a wall clock behind the epoch reads as tick 0. Backward clock
/// jumps are not corrected here: the generator clamps to its last
/// consumed timestamp instead.
#[derive(Clone)]
pub struct TickClock {
    epoch: Duration,
}

impl Default for TickClock {
    /// Constructs a tick clock aligned to [`GENERATOR_EPOCH`].
    fn default() -> Self {
        Self::with_epoch(GENERATOR_EPOCH)
    }
}

impl TickClock {
    /// Constructs a tick clock using a custom epoch as the origin (t = 0),
    /// specified as a [`Duration`] since 1970-01-01 UTC.
    ///
    /// Ids produced against different epochs are not mutually ordered, so
    /// every generator in a fleet must share one epoch.
    pub fn with_epoch(epoch: Duration) -> Self {
        Self { epoch }
    }
}

impl TimeSource for TickClock {
    fn current_tick(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        let raw = now.saturating_sub(self.epoch).as_nanos() / RAW_UNIT_NANOS;
        (raw as u64) >> TICK_SHIFT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_count_from_the_epoch() {
        let clock = TickClock::default();
        let tick = clock.current_tick();
        assert!(tick > 0);
        assert!(tick <= crate::FloeId::max_timestamp());
    }

    #[test]
    fn pre_epoch_reads_clamp_to_zero() {
        // An epoch far in the future puts the wall clock behind it.
        let clock = TickClock::with_epoch(Duration::from_secs(u32::MAX as u64 * 100));
        assert_eq!(clock.current_tick(), 0);
    }

    #[test]
    fn ticks_advance_with_wall_time() {
        let clock = TickClock::default();
        let before = clock.current_tick();
        std::thread::sleep(Duration::from_millis(50));
        let after = clock.current_tick();
        assert!(after > before);
    }

    #[test]
    fn later_epoch_yields_smaller_ticks() {
        // One year past the default epoch.
        let shifted = GENERATOR_EPOCH + Duration::from_secs(365 * 24 * 60 * 60);
        let default_tick = TickClock::default().current_tick();
        let shifted_tick = TickClock::with_epoch(shifted).current_tick();
        assert!(shifted_tick < default_tick);
    }
}
