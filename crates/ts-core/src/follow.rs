//! Distance following: consume a travel budget across a chain of segments.
//!
//! The same walk positions a point on a polyline (segments are consecutive
//! point pairs) and moves an agent through the road graph (segments are
//! lanes, and the successor of a lane is chosen at the junction its edge
//! ends in).  Callers describe their chain through [`SegmentChain`]; the walk
//! itself lives in [`follow`] only.
//!
//! # Semantics
//!
//! Starting at relative `offset ∈ [0, 1)` on `start`, with `budget ≥ 0`:
//!
//! - if `budget` is strictly less than what is left of the current segment
//!   (`length * (1 - offset)`), the walk stops there with
//!   `offset + budget / length`;
//! - otherwise the remainder of the segment is consumed, the chain is asked
//!   for the next segment and the walk continues at offset 0.
//!
//! Landing exactly on a segment end therefore rolls over to the successor at
//! offset 0, so every `Within` result satisfies `offset ∈ [0, 1)`.  When the
//! chain has no successor the walk reports [`Followed::Exhausted`] with the
//! unconsumed remainder; what that means is up to the caller.
//!
//! The walk is a plain loop, so stack usage does not grow with the number of
//! segments crossed.  Chains must not cycle through zero-length segments.

use crate::{CoreError, CoreResult};

/// Relative slack for float error accumulated over many segments when an
/// open chain is walked exactly to its end.
const END_TOLERANCE: f64 = 1e-9;

/// A sequence of bounded segments walked by [`follow`].
pub trait SegmentChain {
    /// Segment handle (an index, a lane id, …).
    type Segment: Copy;

    /// Error raised while choosing a successor.
    type Error: From<CoreError>;

    /// Length of `segment`.  Must be finite and non-negative.
    fn length(&self, segment: Self::Segment) -> f64;

    /// Successor of `segment`, or `None` at the end of the chain.
    fn next(&mut self, segment: Self::Segment) -> Result<Option<Self::Segment>, Self::Error>;
}

/// Outcome of a [`follow`] walk.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Followed<S> {
    /// The budget was consumed on `segment`; `offset ∈ [0, 1)`.
    Within { segment: S, offset: f64 },

    /// The chain ended after `segment` with `remainder` still unspent.
    Exhausted { segment: S, remainder: f64 },
}

/// Walk `budget` along `chain`, starting at relative `start_offset` on
/// `start`.  See the module docs for the exact rules.
///
/// # Errors
///
/// - `CoreError::InvalidArgument` if `start_offset ∉ [0, 1)` or `budget` is
///   negative or not finite.
/// - Any error raised by [`SegmentChain::next`].
pub fn follow<C: SegmentChain>(
    chain:        &mut C,
    start:        C::Segment,
    start_offset: f64,
    budget:       f64,
) -> Result<Followed<C::Segment>, C::Error> {
    if !(0.0..1.0).contains(&start_offset) {
        let err = CoreError::invalid("start_offset", format!("{start_offset} is outside [0, 1)"));
        return Err(err.into());
    }
    if !budget.is_finite() || budget < 0.0 {
        let err = CoreError::invalid("budget", format!("{budget} is not a finite distance >= 0"));
        return Err(err.into());
    }
    if budget == 0.0 {
        return Ok(Followed::Within { segment: start, offset: start_offset });
    }

    let mut segment   = start;
    let mut offset    = start_offset;
    let mut remaining = budget;

    loop {
        let length = chain.length(segment);
        let left   = length * (1.0 - offset);

        if remaining < left {
            let landed = offset + remaining / length;
            // Rounding can push `landed` onto the boundary; that rolls over.
            if landed < 1.0 {
                return Ok(Followed::Within { segment, offset: landed });
            }
        }

        remaining = (remaining - left).max(0.0);
        match chain.next(segment)? {
            Some(next) => {
                segment = next;
                offset  = 0.0;
            }
            None => return Ok(Followed::Exhausted { segment, remainder: remaining }),
        }
    }
}

// ── SliceChain ────────────────────────────────────────────────────────────────

/// A chain over a fixed list of segment lengths, optionally closed (the
/// successor of the last segment is segment 0).
#[derive(Clone, Debug)]
pub struct SliceChain<'a> {
    lengths: &'a [f64],
    closed:  bool,
    total:   f64,
}

impl<'a> SliceChain<'a> {
    pub fn new(lengths: &'a [f64], closed: bool) -> Self {
        Self { lengths, closed, total: lengths.iter().sum() }
    }

    /// Sum of all segment lengths.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Walk `budget` from `offset` on segment `start`.
    ///
    /// Exhausting an open chain is an error unless the remainder is zero, in
    /// which case the walk ends on the far end of the last segment
    /// (`offset == 1.0`, the only result where that value can appear).
    pub fn walk(&mut self, start: usize, offset: f64, budget: f64) -> CoreResult<(usize, f64)> {
        if start >= self.lengths.len() {
            return Err(CoreError::invalid("start", format!("segment {start} out of {}", self.lengths.len())));
        }
        match follow(self, start, offset, budget)? {
            Followed::Within { segment, offset } => Ok((segment, offset)),
            Followed::Exhausted { segment, remainder } if remainder <= END_TOLERANCE * self.total.max(1.0) => {
                Ok((segment, 1.0))
            }
            Followed::Exhausted { remainder, .. } => Err(CoreError::BudgetExceedsPathLength { remainder }),
        }
    }
}

impl SegmentChain for SliceChain<'_> {
    type Segment = usize;
    type Error   = CoreError;

    fn length(&self, segment: usize) -> f64 {
        self.lengths[segment]
    }

    fn next(&mut self, segment: usize) -> CoreResult<Option<usize>> {
        if segment + 1 < self.lengths.len() {
            Ok(Some(segment + 1))
        } else if self.closed && self.total > 0.0 {
            Ok(Some(0))
        } else {
            Ok(None)
        }
    }
}
