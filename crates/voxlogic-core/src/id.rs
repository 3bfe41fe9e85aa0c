//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a block type within a grid's block catalog.
///
/// Block ids occupy a single byte; id 0 is always air.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u8);

impl BlockId {
    /// The empty block.
    pub const AIR: BlockId = BlockId(0);

    /// Map an arbitrary signal number onto the id range: floored, then
    /// wrapped modulo 256. Non-finite input maps to air.
    pub fn from_signal(value: f64) -> Self {
        if !value.is_finite() {
            return Self::AIR;
        }
        // rem_euclid(256.0) lands in [0, 256); the cast cannot truncate.
        Self(value.floor().rem_euclid(256.0) as u8)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for BlockId {
    fn from(v: u8) -> Self {
        Self(v)
    }
}

/// Serial number of a net, assigned in discovery order during tracing.
///
/// Serials are unique within one trace and are never reused after pruning,
/// so retained nets may have gaps between their serials.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetId(pub u32);

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "net#{}", self.0)
    }
}

impl From<u32> for NetId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_wraps_and_floors() {
        assert_eq!(BlockId::from_signal(3.9), BlockId(3));
        assert_eq!(BlockId::from_signal(256.0), BlockId(0));
        assert_eq!(BlockId::from_signal(300.5), BlockId(44));
        assert_eq!(BlockId::from_signal(-1.0), BlockId(255));
        assert_eq!(BlockId::from_signal(-0.5), BlockId(255));
        assert_eq!(BlockId::from_signal(f64::NAN), BlockId::AIR);
    }
}
