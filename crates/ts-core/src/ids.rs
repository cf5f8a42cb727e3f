//! Typed indices into the road network and the agent store.
//!
//! Every id is a `u32` position in the arena `Vec` that owns the element, so
//! `id.index()` is a direct lookup.  Ids are handed out in creation order by
//! the network builder and the agent store and are never renumbered.  The
//! `u32::MAX` value is reserved as [`INVALID`](LaneId::INVALID), e.g. for
//! "no predecessor edge" while reconstructing a route.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Reserved "none" value; never handed out.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Position in the owning arena.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        /// `Name(n)`, as used in console output and log fields.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        /// Fails once an arena outgrows the id space; `INVALID` itself is
        /// rejected too.
        impl TryFrom<usize> for $name {
            type Error = crate::CoreError;

            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n)
                    .ok()
                    .map($name)
                    .filter(|id| id.is_valid())
                    .ok_or_else(|| {
                        crate::CoreError::invalid(stringify!($name), format!("{n} exceeds the id space"))
                    })
            }
        }
    };
}

typed_id! {
    /// Slot of an agent in the agent store.  Slots of removed agents stay
    /// empty, so an id names one agent for the whole run.
    pub struct AgentId(u32);
}

typed_id! {
    /// A junction (graph node), in the order junctions were added.
    pub struct JunctionId(u32);
}

typed_id! {
    /// A directed edge, in the order edges were added.
    pub struct EdgeId(u32);
}

typed_id! {
    /// A lane.  Lanes are numbered network-wide in creation order, not per
    /// edge; an edge lists its own lanes in declared order.
    pub struct LaneId(u32);
}
