use std::sync::OnceLock;

use crate::{FloeGenerator, Result, TickClock};

static PROCESS_GENERATOR: OnceLock<FloeGenerator<TickClock>> = OnceLock::new();

/// Returns the process-wide generator, constructing it on first call.
///
/// Exactly one generator is ever published per process. The first call to
/// succeed constructs it against [`TickClock::default`] with the supplied
/// `node_id`; every later call returns that same instance and ignores its
/// argument, so the node id in effect is whichever was supplied first.
/// After construction the fast path is a single atomic read.
///
/// # Errors
///
/// Returns [`Error::NodeIdOutOfRange`] when `node_id` exceeds
/// [`FloeId::max_node_id`] and no instance has been published yet. Once an
/// instance exists, the argument is not validated.
///
/// # Example
///
/// ```
/// let generator = floe::process_generator(7).unwrap();
/// let id = generator.next_id();
/// assert_eq!(id.node_id(), 7);
///
/// // Later callers share the same instance; their argument is ignored.
/// let same = floe::process_generator(500).unwrap();
/// assert_eq!(same.node_id(), 7);
/// ```
///
/// [`Error::NodeIdOutOfRange`]: crate::Error::NodeIdOutOfRange
/// [`FloeId::max_node_id`]: crate::FloeId::max_node_id
pub fn process_generator(node_id: u64) -> Result<&'static FloeGenerator<TickClock>> {
    if let Some(generator) = PROCESS_GENERATOR.get() {
        return Ok(generator);
    }
    // Validate and build outside the cell; in a first-call race the losing
    // candidate is dropped and the published instance returned.
    let generator = FloeGenerator::new(node_id, TickClock::default())?;
    Ok(PROCESS_GENERATOR.get_or_init(|| generator))
}
