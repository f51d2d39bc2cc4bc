use core::fmt;

/// A 64-bit node-scoped, time-ordered identifier.
///
/// - 1 bit reserved (always zero, so the id is non-negative as `i64`)
/// - 41 bits timestamp (ticks since [`GENERATOR_EPOCH`])
/// - 10 bits node ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            22 21          12 11             0
///              +--------------+----------------+--------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | node ID (10) | sequence (12) |
///              +--------------+----------------+--------------+---------------+
///              |<----------- MSB ---------- 64 bits -------- LSB ------------>|
/// ```
///
/// Issued sequence values wrap at [`FloeId::MAX_SEQUENCE`], which is
/// narrower than the field itself; see the constant docs.
///
/// [`GENERATOR_EPOCH`]: crate::GENERATOR_EPOCH
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FloeId {
    id: u64,
}

impl FloeId {
    /// Bitmask for extracting the 41-bit timestamp field. Occupies bits 22
    /// through 62.
    pub const TIMESTAMP_MASK: u64 = (1 << 41) - 1;

    /// Bitmask for extracting the 10-bit node ID field. Occupies bits 12
    /// through 21.
    pub const NODE_ID_MASK: u64 = (1 << 10) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: u64 = (1 << 12) - 1;

    /// Highest sequence value ever issued.
    ///
    /// The packed field is 12 bits wide, but issued values wrap after 1023,
    /// so bits 10 and 11 are zero in every id. Both the field width and the
    /// narrower wrap point are part of the format: ids already stored by
    /// deployments of this layout encode the node id at bit 12 and never
    /// carry a sequence above 1023.
    pub const MAX_SEQUENCE: u64 = (1 << 10) - 1;

    /// Number of bits to shift the timestamp to its position (bit 22).
    pub const TIMESTAMP_SHIFT: u64 = 22;

    /// Number of bits to shift the node ID to its position (bit 12).
    pub const NODE_ID_SHIFT: u64 = 12;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u64 = 0;

    pub const fn from(timestamp: u64, node_id: u64, sequence: u64) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let node_id = (node_id & Self::NODE_ID_MASK) << Self::NODE_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | node_id | sequence,
        }
    }

    /// Constructs an id from its components, debug-asserting field bounds.
    pub fn from_components(timestamp: u64, node_id: u64, sequence: u64) -> Self {
        debug_assert!(timestamp <= Self::TIMESTAMP_MASK, "timestamp overflow");
        debug_assert!(node_id <= Self::NODE_ID_MASK, "node_id overflow");
        debug_assert!(sequence <= Self::MAX_SEQUENCE, "sequence overflow");
        Self::from(timestamp, node_id, sequence)
    }

    /// Extracts the timestamp from the packed ID.
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the node ID from the packed ID.
    pub const fn node_id(&self) -> u64 {
        (self.id >> Self::NODE_ID_SHIFT) & Self::NODE_ID_MASK
    }

    /// Extracts the sequence number from the packed ID.
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Returns the maximum possible value for the timestamp field.
    pub const fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK
    }

    /// Returns the maximum possible value for the node ID field.
    pub const fn max_node_id() -> u64 {
        Self::NODE_ID_MASK
    }

    /// Returns the maximum sequence value an issued id can carry.
    pub const fn max_sequence() -> u64 {
        Self::MAX_SEQUENCE
    }

    /// Converts this id into its raw `u64` representation.
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Converts a raw `u64` into an id.
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns the ID as a zero-padded 20-digit string.
    ///
    /// Padded decimal strings sort lexicographically in the same order as
    /// the underlying integers.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

impl fmt::Display for FloeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for FloeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloeId")
            .field("id", &format_args!("{} (0x{:016x})", self.id, self.id))
            .field("timestamp", &self.timestamp())
            .field("node_id", &self.node_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_and_bounds_round_trip() {
        let ts = FloeId::max_timestamp();
        let node = FloeId::max_node_id();
        let seq = FloeId::max_sequence();

        let id = FloeId::from(ts, node, seq);
        assert_eq!(id.timestamp(), ts);
        assert_eq!(id.node_id(), node);
        assert_eq!(id.sequence(), seq);
        assert_eq!(FloeId::from_components(ts, node, seq), id);
        assert_eq!(FloeId::from_raw(id.to_raw()), id);
    }

    #[test]
    fn low_bit_fields() {
        let id = FloeId::from_components(0, 0, 0);
        assert_eq!(id.to_raw(), 0);

        let id = FloeId::from_components(1, 1, 1);
        assert_eq!(id.timestamp(), 1);
        assert_eq!(id.node_id(), 1);
        assert_eq!(id.sequence(), 1);
    }

    #[test]
    fn reserved_bit_stays_clear() {
        let id = FloeId::from(
            FloeId::max_timestamp(),
            FloeId::max_node_id(),
            FloeId::max_sequence(),
        );
        assert_eq!(id.to_raw() >> 63, 0);
        assert!(id.to_raw() as i64 >= 0);
    }

    #[test]
    fn issued_sequence_cap_is_narrower_than_field() {
        assert!(FloeId::MAX_SEQUENCE < FloeId::SEQUENCE_MASK);
        // The two high field bits are never set by an in-cap sequence.
        let id = FloeId::from_components(0, 0, FloeId::MAX_SEQUENCE);
        assert_eq!((id.to_raw() >> 10) & 0b11, 0);
    }

    #[test]
    fn field_layout_matches_manual_shifts() {
        let id = FloeId::from_components(42, 7, 3);
        assert_eq!(id.to_raw(), (42 << 22) | (7 << 12) | 3);
        assert_eq!((id.to_raw() >> 12) & 0x3FF, 7);
    }

    #[test]
    fn ordering_follows_raw_value() {
        let a = FloeId::from_components(1, 0, FloeId::max_sequence());
        let b = FloeId::from_components(2, 0, 0);
        assert!(a < b);
        assert!(a.to_raw() < b.to_raw());
    }

    #[test]
    fn padded_string_sorts_like_the_integer() {
        let a = FloeId::from_components(1, 3, 1);
        let b = FloeId::from_components(2, 3, 0);
        assert_eq!(a.to_padded_string().len(), 20);
        assert!(a.to_padded_string() < b.to_padded_string());
    }

    #[test]
    #[should_panic(expected = "timestamp overflow")]
    fn timestamp_overflow_panics() {
        let ts = FloeId::max_timestamp() + 1;
        FloeId::from_components(ts, 0, 0);
    }

    #[test]
    #[should_panic(expected = "node_id overflow")]
    fn node_id_overflow_panics() {
        let node = FloeId::max_node_id() + 1;
        FloeId::from_components(0, node, 0);
    }

    #[test]
    #[should_panic(expected = "sequence overflow")]
    fn sequence_overflow_panics() {
        let seq = FloeId::max_sequence() + 1;
        FloeId::from_components(0, 0, seq);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let id = FloeId::from_components(42, 7, 3);
        let encoded = serde_json::to_string(&id).unwrap();
        let decoded: FloeId = serde_json::from_str(&encoded).unwrap();
        assert_eq!(id, decoded);
    }
}
