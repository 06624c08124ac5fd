//! Per-dimension key sequences
//!
//! An [`AxisKeys`] value holds the ordered keys for one dimension of a
//! wrapped array. The representation doubles as the resolution strategy,
//! chosen once at construction:
//!
//! - `IntRange` / `FloatRange`: structured arithmetic ranges. Exact and
//!   interval queries resolve in constant time by the range's own formula,
//!   and growth extends the range by one step without a supplied key.
//! - `Values`: a general sequence. Queries scan; growth requires an
//!   explicit new key.
//!
//! Invariant: the sequence length always equals the wrapped array's extent
//! in that dimension. Construction reconciles mismatches where the input
//! declares enough structure to do so (see [`AxisKeys::reconcile`]).

use crate::error::{Error, Result};
use crate::key::Key;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Ordered key sequence for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AxisKeys {
    /// Arithmetic integer range: keys are `start + i * step`
    IntRange {
        /// First key
        start: i64,
        /// Step between consecutive keys (nonzero)
        step: i64,
        /// Number of keys
        len: usize,
    },
    /// Arithmetic float range: keys are `start + i * step`
    FloatRange {
        /// First key
        start: f64,
        /// Step between consecutive keys (nonzero)
        step: f64,
        /// Number of keys
        len: usize,
    },
    /// General key sequence, one stored value per position
    Values(Vec<Key>),
}

impl AxisKeys {
    /// Positional default: keys `0, 1, .., len-1`.
    ///
    /// Used when a dimension is wrapped without explicit keys, so key
    /// lookup degenerates to positional lookup.
    pub fn positional(len: usize) -> Self {
        AxisKeys::IntRange {
            start: 0,
            step: 1,
            len,
        }
    }

    /// Arithmetic integer range `start, start+step, ..` of `len` keys.
    pub fn int_range(start: i64, step: i64, len: usize) -> Result<Self> {
        if step == 0 {
            return Err(Error::InvalidKeys("range step must be nonzero".into()));
        }
        Ok(AxisKeys::IntRange { start, step, len })
    }

    /// Arithmetic float range `start, start+step, ..` of `len` keys.
    pub fn float_range(start: f64, step: f64, len: usize) -> Result<Self> {
        if step == 0.0 || !step.is_finite() || !start.is_finite() {
            return Err(Error::InvalidKeys(
                "range start and step must be finite, step nonzero".into(),
            ));
        }
        Ok(AxisKeys::FloatRange { start, step, len })
    }

    /// General key sequence from explicit values.
    pub fn values<K: Into<Key>>(keys: impl IntoIterator<Item = K>) -> Self {
        AxisKeys::Values(keys.into_iter().map(Into::into).collect())
    }

    /// Number of keys in the sequence.
    pub fn len(&self) -> usize {
        match self {
            AxisKeys::IntRange { len, .. } | AxisKeys::FloatRange { len, .. } => *len,
            AxisKeys::Values(v) => v.len(),
        }
    }

    /// True when the sequence holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True for the structured arithmetic representations.
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            AxisKeys::IntRange { .. } | AxisKeys::FloatRange { .. }
        )
    }

    /// Key at position `i`, or None past the end.
    pub fn at(&self, i: usize) -> Option<Key> {
        if i >= self.len() {
            return None;
        }
        Some(match self {
            AxisKeys::IntRange { start, step, .. } => Key::Int(start + (i as i64) * step),
            AxisKeys::FloatRange { start, step, .. } => {
                Key::Float(start + (i as f64) * step)
            }
            AxisKeys::Values(v) => v[i].clone(),
        })
    }

    /// Iterate the keys in positional order.
    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        (0..self.len()).map(move |i| match self {
            AxisKeys::IntRange { start, step, .. } => Key::Int(start + (i as i64) * step),
            AxisKeys::FloatRange { start, step, .. } => {
                Key::Float(start + (i as f64) * step)
            }
            AxisKeys::Values(v) => v[i].clone(),
        })
    }

    /// Key sequence for a selected subset of positions.
    ///
    /// A selection covering the whole axis in order keeps the structured
    /// representation; any narrower selection materializes to `Values`.
    /// `dim` only labels errors.
    pub fn subset(&self, dim: usize, picks: &[usize]) -> Result<AxisKeys> {
        let full = picks.len() == self.len() && picks.iter().enumerate().all(|(k, &i)| k == i);
        if full {
            return Ok(self.clone());
        }
        let mut keys = Vec::with_capacity(picks.len());
        for &i in picks {
            match self.at(i) {
                Some(k) => keys.push(k),
                None => {
                    return Err(Error::IndexOutOfBounds {
                        dim,
                        index: i,
                        extent: self.len(),
                    })
                }
            }
        }
        Ok(AxisKeys::Values(keys))
    }

    /// Key sequence after appending one position (growth).
    ///
    /// Ranges extend arithmetically by one step; a supplied `new_key` that
    /// equals the next step keeps the range, any other supplied key
    /// materializes the range to `Values` first. A general sequence
    /// requires `new_key` and fails with `UnextendableKeys` without one.
    ///
    /// Pure: returns the extended sequence, leaving `self` untouched, so
    /// callers can prepare the extension before committing any mutation.
    pub fn extended(&self, dim: usize, new_key: Option<Key>) -> Result<AxisKeys> {
        match self {
            AxisKeys::IntRange { start, step, len } => {
                let next = Key::Int(start + (*len as i64) * step);
                match new_key {
                    None => Ok(AxisKeys::IntRange {
                        start: *start,
                        step: *step,
                        len: len + 1,
                    }),
                    Some(k) if k == next => Ok(AxisKeys::IntRange {
                        start: *start,
                        step: *step,
                        len: len + 1,
                    }),
                    Some(k) => {
                        let mut keys: Vec<Key> = self.iter().collect();
                        keys.push(k);
                        Ok(AxisKeys::Values(keys))
                    }
                }
            }
            AxisKeys::FloatRange { start, step, len } => {
                let next = Key::Float(start + (*len as f64) * step);
                match new_key {
                    None => Ok(AxisKeys::FloatRange {
                        start: *start,
                        step: *step,
                        len: len + 1,
                    }),
                    Some(k) if k == next => Ok(AxisKeys::FloatRange {
                        start: *start,
                        step: *step,
                        len: len + 1,
                    }),
                    Some(k) => {
                        let mut keys: Vec<Key> = self.iter().collect();
                        keys.push(k);
                        Ok(AxisKeys::Values(keys))
                    }
                }
            }
            AxisKeys::Values(v) => match new_key {
                Some(k) => {
                    let mut keys = v.clone();
                    keys.push(k);
                    Ok(AxisKeys::Values(keys))
                }
                None => Err(Error::UnextendableKeys { dim }),
            },
        }
    }

    /// Reconcile a supplied key sequence with the array extent for `dim`.
    ///
    /// Rules, applied once at wrapper construction:
    /// - `None` defaults to positional keys of the right length;
    /// - a range of the wrong length is truncated or extended to match,
    ///   with a rate-limited warning;
    /// - a general sequence of the wrong length fails with
    ///   `DimensionMismatch`.
    pub fn reconcile(spec: Option<AxisKeys>, dim: usize, extent: usize) -> Result<AxisKeys> {
        match spec {
            None => Ok(AxisKeys::positional(extent)),
            Some(keys) if keys.len() == extent => Ok(keys),
            Some(AxisKeys::IntRange { start, step, len }) => {
                note_adjustment(
                    dim,
                    &format!("range of {len} keys adjusted to extent {extent}"),
                );
                Ok(AxisKeys::IntRange {
                    start,
                    step,
                    len: extent,
                })
            }
            Some(AxisKeys::FloatRange { start, step, len }) => {
                note_adjustment(
                    dim,
                    &format!("range of {len} keys adjusted to extent {extent}"),
                );
                Ok(AxisKeys::FloatRange {
                    start,
                    step,
                    len: extent,
                })
            }
            Some(AxisKeys::Values(v)) => Err(Error::DimensionMismatch {
                dim,
                keys_len: v.len(),
                extent,
            }),
        }
    }
}

static ADJUSTMENT_COUNT: AtomicU64 = AtomicU64::new(0);

/// Emit a rate-limited warning for a silent metadata adjustment.
///
/// Reconciliation that succeeds by adjusting its input (range truncation or
/// extension, index-origin shifts) must stay observable without flooding the
/// log: the first 10 adjustments warn, then every 100th.
pub fn note_adjustment(dim: usize, detail: &str) {
    let n = ADJUSTMENT_COUNT.fetch_add(1, Ordering::Relaxed);
    if n < 10 || n % 100 == 0 {
        tracing::warn!(dim, detail, suppressed = n >= 10, "axis metadata adjusted");
    }
}
