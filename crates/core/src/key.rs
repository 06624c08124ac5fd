//! Key values for axis lookup
//!
//! This module defines:
//! - Key: unified enum for per-dimension lookup key values
//!
//! ## Type Rules
//!
//! - Different key kinds are NEVER equal: `Int(1) != Float(1.0)`
//! - Float equality follows IEEE-754: `NaN != NaN`, `-0.0 == 0.0`
//! - Ordering and distance are only defined where the kinds support them
//!   (numeric kinds mix, `Str` compares with `Str`, `Time` with `Time`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single lookup key attached to one position along one dimension.
///
/// Keys are domain-meaningful values (a timestamp, a label, a coordinate)
/// used to retrieve elements without knowing their position.
///
/// ## Equality
///
/// Different kinds are never equal, even when they look alike:
/// - `Int(1) != Float(1.0)`
/// - `Str("true") != Bool(true)`
///
/// Float equality is IEEE-754: `NaN != NaN`, `-0.0 == 0.0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Key {
    /// 64-bit signed integer key
    Int(i64),
    /// 64-bit float key (IEEE-754)
    Float(f64),
    /// UTF-8 string key (a label)
    Str(String),
    /// Boolean key
    Bool(bool),
    /// UTC timestamp key
    Time(DateTime<Utc>),
}

// Cross-kind comparisons are always false; floats keep IEEE-754 semantics.
impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Int(a), Key::Int(b)) => a == b,
            (Key::Float(a), Key::Float(b)) => a == b,
            (Key::Str(a), Key::Str(b)) => a == b,
            (Key::Bool(a), Key::Bool(b)) => a == b,
            (Key::Time(a), Key::Time(b)) => a == b,
            _ => false,
        }
    }
}

impl Key {
    /// Get the kind name as a string (for diagnostics)
    pub fn kind(&self) -> &'static str {
        match self {
            Key::Int(_) => "Int",
            Key::Float(_) => "Float",
            Key::Str(_) => "Str",
            Key::Bool(_) => "Bool",
            Key::Time(_) => "Time",
        }
    }

    /// Check if this key is numeric (Int or Float)
    pub fn is_numeric(&self) -> bool {
        matches!(self, Key::Int(_) | Key::Float(_))
    }

    /// View a numeric key as f64; None for non-numeric kinds
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Key::Int(v) => Some(*v as f64),
            Key::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Absolute distance between two keys, where defined.
    ///
    /// Defined for numeric kinds (Int and Float mix freely) and for pairs
    /// of Time keys (milliseconds). Returns None otherwise; `Nearest`
    /// selectors reject key kinds without a distance.
    pub fn distance(&self, other: &Key) -> Option<f64> {
        match (self, other) {
            (Key::Time(a), Key::Time(b)) => {
                Some((*a - *b).num_milliseconds().abs() as f64)
            }
            _ => {
                let a = self.as_f64()?;
                let b = other.as_f64()?;
                Some((a - b).abs())
            }
        }
    }

    /// Order two keys, where defined.
    ///
    /// Numeric kinds compare through f64; Str/Str and Time/Time compare
    /// directly. Bool and cross-kind pairs have no order (None), and a
    /// Float NaN compares as None. `Between` selectors reject unordered
    /// bound pairs.
    pub fn compare(&self, other: &Key) -> Option<Ordering> {
        match (self, other) {
            (Key::Str(a), Key::Str(b)) => Some(a.cmp(b)),
            (Key::Time(a), Key::Time(b)) => Some(a.cmp(b)),
            (Key::Bool(_), _) | (_, Key::Bool(_)) => None,
            _ => {
                let a = self.as_f64()?;
                let b = other.as_f64()?;
                a.partial_cmp(&b)
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(v) => write!(f, "{v}"),
            Key::Float(v) => write!(f, "{v}"),
            Key::Str(v) => write!(f, "{v:?}"),
            Key::Bool(v) => write!(f, "{v}"),
            Key::Time(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Key::Int(v)
    }
}

impl From<i32> for Key {
    fn from(v: i32) -> Self {
        Key::Int(v as i64)
    }
}

impl From<f64> for Key {
    fn from(v: f64) -> Self {
        Key::Float(v)
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Key::Str(v.to_string())
    }
}

impl From<String> for Key {
    fn from(v: String) -> Self {
        Key::Str(v)
    }
}

impl From<bool> for Key {
    fn from(v: bool) -> Self {
        Key::Bool(v)
    }
}

impl From<DateTime<Utc>> for Key {
    fn from(v: DateTime<Utc>) -> Self {
        Key::Time(v)
    }
}
