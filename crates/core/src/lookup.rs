//! Key Index: selector resolution against a key sequence
//!
//! Pure functions that turn a [`Selector`] into positional indices for one
//! dimension. No state; dispatch follows the [`AxisKeys`] strategy tag, so
//! exact and interval queries on arithmetic ranges resolve by the range's
//! own formula instead of scanning.

use crate::axis::AxisKeys;
use crate::error::{Error, Result};
use crate::key::Key;
use crate::selector::{AxisPick, IntervalBounds, Selector};
use std::cmp::Ordering;

/// Resolve one selector against one dimension's key sequence.
///
/// Scalar selectors yield [`AxisPick::One`]; set-valued selectors yield
/// [`AxisPick::Many`] with positions in ascending key-sequence order.
/// `dim` labels errors only.
pub fn resolve(keys: &AxisKeys, dim: usize, sel: &Selector) -> Result<AxisPick> {
    match sel {
        Selector::Exact(v) => exact(keys, dim, v).map(AxisPick::One),
        Selector::Where(pred) => {
            let hits = keys
                .iter()
                .enumerate()
                .filter(|(_, k)| pred(k))
                .map(|(i, _)| i)
                .collect();
            Ok(AxisPick::Many(hits))
        }
        Selector::Nearest(target) => nearest(keys, dim, target).map(AxisPick::One),
        Selector::Between { lo, hi, bounds } => {
            between(keys, dim, lo, hi, *bounds).map(AxisPick::Many)
        }
        Selector::Index(i) => {
            if *i < keys.len() {
                Ok(AxisPick::One(*i))
            } else {
                Err(Error::IndexOutOfBounds {
                    dim,
                    index: *i,
                    extent: keys.len(),
                })
            }
        }
        Selector::All => Ok(AxisPick::Many((0..keys.len()).collect())),
    }
}

/// Resolve a full N-dimensional query, one selector per leading dimension.
///
/// Unspecified trailing dimensions pass through unchanged (full selection);
/// more selectors than dimensions is an arity error. Each dimension
/// resolves independently; the picks combine as a Cartesian selection.
pub fn resolve_all(axes: &[AxisKeys], queries: &[Selector]) -> Result<Vec<AxisPick>> {
    if queries.len() > axes.len() {
        return Err(Error::Arity {
            expected: axes.len(),
            actual: queries.len(),
        });
    }
    let mut picks = Vec::with_capacity(axes.len());
    for (dim, keys) in axes.iter().enumerate() {
        let pick = match queries.get(dim) {
            Some(sel) => resolve(keys, dim, sel)?,
            None => AxisPick::Many((0..keys.len()).collect()),
        };
        picks.push(pick);
    }
    Ok(picks)
}

fn exact(keys: &AxisKeys, dim: usize, v: &Key) -> Result<usize> {
    let miss = || Error::KeyLookup {
        dim,
        key: v.clone(),
    };
    match keys {
        AxisKeys::IntRange { start, step, len } => {
            let Key::Int(x) = v else { return Err(miss()) };
            let d = x - start;
            if d % step != 0 {
                return Err(miss());
            }
            let i = d / step;
            if i >= 0 && (i as usize) < *len {
                Ok(i as usize)
            } else {
                Err(miss())
            }
        }
        AxisKeys::FloatRange { start, step, len } => {
            let Key::Float(x) = v else { return Err(miss()) };
            let i = ((x - start) / step).round();
            if i >= 0.0 && (i as usize) < *len && start + i * step == *x {
                Ok(i as usize)
            } else {
                Err(miss())
            }
        }
        AxisKeys::Values(seq) => seq.iter().position(|k| k == v).ok_or_else(miss),
    }
}

fn nearest(keys: &AxisKeys, dim: usize, target: &Key) -> Result<usize> {
    if keys.is_empty() {
        return Err(Error::KeyLookup {
            dim,
            key: target.clone(),
        });
    }
    match keys {
        AxisKeys::IntRange { start, step, len } => {
            let t = numeric_target(dim, target)?;
            Ok(nearest_in_range(*start as f64, *step as f64, *len, t))
        }
        AxisKeys::FloatRange { start, step, len } => {
            let t = numeric_target(dim, target)?;
            Ok(nearest_in_range(*start, *step, *len, t))
        }
        AxisKeys::Values(seq) => {
            let mut best: Option<(usize, f64)> = None;
            for (i, k) in seq.iter().enumerate() {
                let d = k.distance(target).ok_or_else(|| Error::InvalidSelector {
                    dim,
                    reason: format!(
                        "nearest has no distance between {} and {} keys",
                        target.kind(),
                        k.kind()
                    ),
                })?;
                // strict < keeps the first occurrence on ties
                if best.map_or(true, |(_, bd)| d < bd) {
                    best = Some((i, d));
                }
            }
            match best {
                Some((i, _)) => Ok(i),
                None => Err(Error::KeyLookup {
                    dim,
                    key: target.clone(),
                }),
            }
        }
    }
}

fn numeric_target(dim: usize, target: &Key) -> Result<f64> {
    target.as_f64().ok_or_else(|| Error::InvalidSelector {
        dim,
        reason: format!("nearest target must be numeric for range keys, got {}", target.kind()),
    })
}

// Closed form around floor((t-start)/step); the two bracketing positions
// are the only candidates, tie broken toward the smaller index.
fn nearest_in_range(start: f64, step: f64, len: usize, t: f64) -> usize {
    let last = (len - 1) as i64;
    let f = ((t - start) / step).floor() as i64;
    let mut best = 0usize;
    let mut best_d = f64::INFINITY;
    for c in [f - 1, f, f + 1] {
        let i = c.clamp(0, last) as usize;
        let d = (start + (i as f64) * step - t).abs();
        if d < best_d || (d == best_d && i < best) {
            best = i;
            best_d = d;
        }
    }
    best
}

fn between(
    keys: &AxisKeys,
    dim: usize,
    lo: &Key,
    hi: &Key,
    bounds: IntervalBounds,
) -> Result<Vec<usize>> {
    if lo.compare(hi).is_none() {
        return Err(Error::InvalidSelector {
            dim,
            reason: format!(
                "interval bounds {} and {} are not mutually ordered",
                lo.kind(),
                hi.kind()
            ),
        });
    }
    match keys {
        AxisKeys::IntRange { start, step, len } => {
            if let (Key::Int(l), Key::Int(h)) = (lo, hi) {
                Ok(between_int_range(*start, *step, *len, *l, *h, bounds))
            } else {
                let (l, h) = numeric_bounds(dim, lo, hi)?;
                Ok(between_numeric_range(
                    *start as f64,
                    *step as f64,
                    *len,
                    l,
                    h,
                    bounds,
                ))
            }
        }
        AxisKeys::FloatRange { start, step, len } => {
            let (l, h) = numeric_bounds(dim, lo, hi)?;
            Ok(between_numeric_range(*start, *step, *len, l, h, bounds))
        }
        AxisKeys::Values(seq) => {
            let hits = seq
                .iter()
                .enumerate()
                .filter(|(_, k)| {
                    let above = matches!(
                        k.compare(lo),
                        Some(Ordering::Greater) | Some(Ordering::Equal)
                    );
                    let below = match bounds {
                        IntervalBounds::Closed => matches!(
                            k.compare(hi),
                            Some(Ordering::Less) | Some(Ordering::Equal)
                        ),
                        IntervalBounds::RightOpen => {
                            matches!(k.compare(hi), Some(Ordering::Less))
                        }
                    };
                    above && below
                })
                .map(|(i, _)| i)
                .collect();
            Ok(hits)
        }
    }
}

fn numeric_bounds(dim: usize, lo: &Key, hi: &Key) -> Result<(f64, f64)> {
    match (lo.as_f64(), hi.as_f64()) {
        (Some(l), Some(h)) => Ok((l, h)),
        _ => Err(Error::InvalidSelector {
            dim,
            reason: format!(
                "interval bounds must be numeric for range keys, got {} and {}",
                lo.kind(),
                hi.kind()
            ),
        }),
    }
}

fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    let r = a % b;
    if r != 0 && ((r < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

fn ceil_div(a: i64, b: i64) -> i64 {
    -floor_div(-a, b)
}

// Exact integer arithmetic for integer bounds on an integer range.
fn between_int_range(
    start: i64,
    step: i64,
    len: usize,
    lo: i64,
    hi: i64,
    bounds: IntervalBounds,
) -> Vec<usize> {
    if len == 0 || lo > hi {
        return Vec::new();
    }
    let last = (len - 1) as i64;
    let (mut first_i, mut last_i);
    if step > 0 {
        first_i = ceil_div(lo - start, step);
        last_i = floor_div(hi - start, step);
        if bounds == IntervalBounds::RightOpen && (hi - start) % step == 0 {
            last_i -= 1;
        }
    } else {
        first_i = ceil_div(hi - start, step);
        if bounds == IntervalBounds::RightOpen && (hi - start) % step == 0 {
            first_i += 1;
        }
        last_i = floor_div(lo - start, step);
    }
    let first_i = first_i.max(0);
    let last_i = last_i.min(last);
    if first_i > last_i {
        Vec::new()
    } else {
        (first_i as usize..=last_i as usize).collect()
    }
}

// Arithmetic bounds with small corrective steps against float rounding.
fn between_numeric_range(
    start: f64,
    step: f64,
    len: usize,
    lo: f64,
    hi: f64,
    bounds: IntervalBounds,
) -> Vec<usize> {
    if len == 0 || lo > hi {
        return Vec::new();
    }
    let last = (len - 1) as i64;
    let key = |i: i64| start + (i as f64) * step;
    let below_hi = |k: f64| match bounds {
        IntervalBounds::Closed => k <= hi,
        IntervalBounds::RightOpen => k < hi,
    };
    let (mut first_i, mut last_i);
    if step > 0.0 {
        first_i = (((lo - start) / step).ceil() as i64).clamp(0, last);
        while first_i > 0 && key(first_i - 1) >= lo {
            first_i -= 1;
        }
        while first_i <= last && key(first_i) < lo {
            first_i += 1;
        }
        last_i = (((hi - start) / step).floor() as i64).clamp(0, last);
        while last_i < last && below_hi(key(last_i + 1)) {
            last_i += 1;
        }
        while last_i >= 0 && !below_hi(key(last_i)) {
            last_i -= 1;
        }
    } else {
        first_i = (((hi - start) / step).ceil() as i64).clamp(0, last);
        while first_i > 0 && below_hi(key(first_i - 1)) {
            first_i -= 1;
        }
        while first_i <= last && !below_hi(key(first_i)) {
            first_i += 1;
        }
        last_i = (((lo - start) / step).floor() as i64).clamp(0, last);
        while last_i < last && key(last_i + 1) >= lo {
            last_i += 1;
        }
        while last_i >= 0 && key(last_i) < lo {
            last_i -= 1;
        }
    }
    if first_i > last_i {
        Vec::new()
    } else {
        (first_i as usize..=last_i as usize).collect()
    }
}
