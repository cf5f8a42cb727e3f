//! The opaque per-agent decision value.
//!
//! A `Decision` is produced by whatever decision model drives the agents and
//! consumed by lane routing.  The core never interprets it: each lane maps
//! decisions to destination lanes, and an unmapped decision means "stay".

use std::fmt;

/// Lookup key into a lane's routing table.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision(pub u16);

impl Decision {
    /// Stay on the current lane.  Never mapped by a routing table.
    pub const KEEP: Decision = Decision(0);

    /// Conventional key for a move towards the left neighbour lane.
    pub const LEFT: Decision = Decision(1);

    /// Conventional key for a move towards the right neighbour lane.
    pub const RIGHT: Decision = Decision(2);

    #[inline]
    pub fn is_keep(self) -> bool {
        self == Decision::KEEP
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Decision::KEEP  => f.write_str("keep"),
            Decision::LEFT  => f.write_str("left"),
            Decision::RIGHT => f.write_str("right"),
            Decision(n)     => write!(f, "decision#{n}"),
        }
    }
}
