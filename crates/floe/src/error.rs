use crate::FloeId;

pub type Result<T> = core::result::Result<T, Error>;

/// All errors `floe` can produce.
///
/// Generation itself is infallible; the only failure point is constructing
/// a generator with a node id that does not fit the 10-bit node field.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The supplied node id does not fit the node id field.
    #[error("node id {0} is out of range (0..={max})", max = FloeId::max_node_id())]
    NodeIdOutOfRange(u64),
}
