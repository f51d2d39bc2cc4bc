/// A source of generator time.
///
/// This abstraction allows plugging in the real system clock or a mocked
/// time source in tests. The unit is the generator **tick**; see
/// [`TickClock`] for how ticks are derived from wall-clock time.
///
/// # Example
///
/// ```
/// use floe::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_tick(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_tick(), 1234);
/// ```
///
/// [`TickClock`]: crate::TickClock
pub trait TimeSource {
    /// Returns the current time in ticks since the configured epoch.
    fn current_tick(&self) -> u64;
}
