//! Line measurement: geometry batching, vertical clustering, and the
//! per-line character sums.
//!
//! One pass runs as a single uninterrupted unit of work: fragment the
//! container, batch every geometry read, group, revert. Nothing yields
//! between the structural mutation and the paired revert; a partially
//! transformed container exposed to an intervening event (resize, another
//! pass) would break the reversibility guarantee.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use log::{debug, warn};

use crate::error::{ErrorPhase, GaugeError};
use crate::fragment::{split_container, FragmentLimits, TextHost};

/// Geometry capability for materialized fragments.
///
/// Reports the top edge of one fragment wrapper in viewport coordinates,
/// or `None` when the fragment has no renderable position (for example
/// under a `display: none` ancestor). Each query may force a synchronous
/// layout recomputation in the host environment, so the engine performs all
/// reads in one batch after the structural mutation, never interleaving
/// reads with writes.
pub trait LayoutOracle {
    /// Fragment handle type, matching the paired [`TextHost`].
    type Handle;

    /// Top edge of one fragment wrapper, if renderable.
    fn position_of(&self, handle: &Self::Handle) -> Option<f64>;
}

/// Options for a [`LineGauge`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeasureOptions {
    /// Fragmentation limits.
    pub limits: FragmentLimits,
}

impl MeasureOptions {
    /// Embedded-focused preset with smaller fragmentation bounds.
    pub fn embedded() -> Self {
        Self {
            limits: FragmentLimits::embedded(),
        }
    }
}

/// Measurement engine.
///
/// One engine serves any number of passes; all per-pass state (fragments,
/// handles, line groups) is transient and torn down by the paired revert
/// before the pass returns. There is no shared state across passes.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineGauge {
    options: MeasureOptions,
}

impl LineGauge {
    /// Create an engine with the given options.
    pub fn new(options: MeasureOptions) -> Self {
        Self { options }
    }

    /// Options this engine was built with.
    pub fn options(&self) -> &MeasureOptions {
        &self.options
    }

    /// Measure the per-visual-line character counts of `host`'s container.
    ///
    /// Fragments whose oracle query returns `None` do not contribute to any
    /// line. The result is ordered by ascending top coordinate; callers
    /// that only need the statistics may treat it as an unordered multiset.
    /// An empty result means the container held no measurable text.
    ///
    /// `revert` is invoked exactly once per pass, including the
    /// zero-fragment case. On a fragmentation failure the revert is still
    /// attempted best-effort before the error is surfaced.
    pub fn measure_lines<H, O>(&self, host: &mut H, oracle: &O) -> Result<Vec<usize>, GaugeError>
    where
        H: TextHost,
        O: LayoutOracle<Handle = H::Handle>,
    {
        let fragments = match split_container(host, &self.options.limits) {
            Ok(fragments) => fragments,
            Err(err) => {
                // A half-applied transformation cannot be recovered.
                if let Err(revert_err) = host.revert() {
                    warn!(
                        "best-effort revert after failed fragmentation also failed: {}",
                        revert_err
                    );
                }
                return Err(err);
            }
        };

        // Batch every geometry read before touching the structure again.
        let positions: Vec<Option<f64>> = fragments
            .iter()
            .map(|fragment| oracle.position_of(&fragment.handle))
            .collect();

        let mut lines: BTreeMap<u64, usize> = BTreeMap::new();
        let mut skipped = 0usize;
        for (fragment, position) in fragments.iter().zip(positions) {
            match position.and_then(group_key) {
                Some(key) => *lines.entry(key).or_insert(0) += fragment.len_chars(),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!(
                "excluded {} fragment(s) without a renderable position",
                skipped
            );
        }

        host.revert()
            .map_err(|e| GaugeError::host(ErrorPhase::Revert, e))?;

        Ok(lines.into_values().collect())
    }
}

/// Measure with default options. See [`LineGauge::measure_lines`].
pub fn measure_lines<H, O>(host: &mut H, oracle: &O) -> Result<Vec<usize>, GaugeError>
where
    H: TextHost,
    O: LayoutOracle<Handle = H::Handle>,
{
    LineGauge::default().measure_lines(host, oracle)
}

/// Grouping key for one top coordinate.
///
/// Same-line fragments report bit-identical tops within one layout pass, so
/// grouping uses exact equality, with no tolerance. The key is the coordinate's
/// IEEE-754 bit pattern mapped to an order-preserving integer, which gives
/// the same equivalence classes as `==` (negative zero normalized first)
/// plus a total order for deterministic top-down output. A NaN position
/// cannot belong to any line and counts as a failed geometry query.
fn group_key(top: f64) -> Option<u64> {
    if top.is_nan() {
        return None;
    }
    let normalized = if top == 0.0 { 0.0 } else { top };
    let bits = normalized.to_bits();
    Some(if bits >> 63 == 1 {
        !bits
    } else {
        bits | (1u64 << 63)
    })
}
