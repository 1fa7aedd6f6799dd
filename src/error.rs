//! Registry error types.
//!
//! Every failure the registry can report falls into one of three families:
//!
//! - [`LookupError`]: a consumer asked for a name, role, catalog or type that
//!   is not registered, or read a value with the wrong shape.
//! - [`ConsistencyError`]: the data itself is malformed (misaligned parallel
//!   arrays, unsorted milestones, bad hex colours, incomplete descriptors).
//!   Only produced while the registry is being built.
//! - `Load`: `assets/tuning.toml` exists but could not be read or parsed.
//!
//! None of these are recoverable at runtime. They are defects in the data or
//! in the consumer, so callers propagate them with `?` instead of substituting
//! a default.
//!
//! ## Usage
//!
//! ```rust
//! use starfall::error::RegistryResult;
//! use starfall::registry::ConfigRegistry;
//!
//! fn ship_thrust(registry: &ConfigRegistry) -> RegistryResult<f32> {
//!     registry.get_float("ship_thrust")
//! }
//! # assert!(ship_thrust(&ConfigRegistry::defaults().unwrap()).is_ok());
//! ```

use std::fmt;

/// Top-level error enum for the tuning registry.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// A lookup against the built registry failed.
    Lookup(LookupError),
    /// The registry data failed validation during construction.
    Consistency(ConsistencyError),
    /// The TOML override file exists but could not be read or decoded.
    Load {
        /// Path of the override file.
        path: String,
        /// Underlying I/O or TOML message.
        message: String,
    },
}

/// A name, role, catalog or identifier that is not registered, or a value read
/// with the wrong shape.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    UnknownName {
        name: String,
    },
    UnknownColorRole {
        role: String,
    },
    UnknownCatalog {
        catalog: String,
    },
    UnknownType {
        catalog: String,
        id: String,
    },
    UnknownMilestones {
        list: String,
    },
    /// The name exists but holds a different kind of value.
    ///
    /// Typed reads never coerce (e.g. an integer is not silently widened to
    /// a float) so a shape change in the data surfaces at the call site.
    WrongShape {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Construction-time validation failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsistencyError {
    /// Two positionally aligned arrays have different lengths.
    LengthMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },
    /// A milestone list is not strictly ascending.
    NotAscending {
        list: &'static str,
        /// Index of the first value that is not greater than its predecessor.
        index: usize,
    },
    /// A list that must hold at least `min` values holds fewer.
    EmptyList {
        name: String,
        min: usize,
    },
    /// A colour string is not `#rgb` / `#rrggbb`.
    InvalidColor {
        context: String,
        value: String,
    },
    /// A catalog descriptor is missing or has a malformed required field.
    InvalidDescriptor {
        catalog: &'static str,
        id: String,
        reason: String,
    },
    /// A required palette role or catalog entry is absent.
    MissingEntry {
        context: &'static str,
        key: String,
    },
    /// The same identifier was registered twice in one catalog.
    DuplicateEntry {
        catalog: &'static str,
        id: String,
    },
    /// A numeric value lies outside its permitted range.
    OutOfRange {
        name: String,
        value: f32,
        range: &'static str,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Lookup(err) => write!(f, "lookup error: {}", err),
            RegistryError::Consistency(err) => write!(f, "configuration error: {}", err),
            RegistryError::Load { path, message } => {
                write!(f, "failed to load {}: {}", path, message)
            }
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::UnknownName { name } => write!(f, "no value registered as '{}'", name),
            LookupError::UnknownColorRole { role } => {
                write!(f, "no palette entry for colour role '{}'", role)
            }
            LookupError::UnknownCatalog { catalog } => {
                write!(f, "no catalog named '{}'", catalog)
            }
            LookupError::UnknownType { catalog, id } => {
                write!(f, "catalog '{}' has no type '{}'", catalog, id)
            }
            LookupError::UnknownMilestones { list } => {
                write!(f, "no milestone list named '{}'", list)
            }
            LookupError::WrongShape {
                name,
                expected,
                found,
            } => write!(
                f,
                "'{}' holds {} but was read as {}",
                name, found, expected
            ),
        }
    }
}

impl fmt::Display for ConsistencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyError::LengthMismatch {
                left,
                left_len,
                right,
                right_len,
            } => write!(
                f,
                "'{}' has {} entries but '{}' has {}; they must line up one-to-one",
                left, left_len, right, right_len
            ),
            ConsistencyError::NotAscending { list, index } => write!(
                f,
                "milestone list '{}' is not strictly ascending at index {}",
                list, index
            ),
            ConsistencyError::EmptyList { name, min } => {
                write!(f, "'{}' needs at least {} entries", name, min)
            }
            ConsistencyError::InvalidColor { context, value } => write!(
                f,
                "'{}' is not a valid hex colour (in {})",
                value, context
            ),
            ConsistencyError::InvalidDescriptor {
                catalog,
                id,
                reason,
            } => write!(f, "{}/{}: {}", catalog, id, reason),
            ConsistencyError::MissingEntry { context, key } => {
                write!(f, "{} is missing required entry '{}'", context, key)
            }
            ConsistencyError::DuplicateEntry { catalog, id } => {
                write!(f, "catalog '{}' registers '{}' more than once", catalog, id)
            }
            ConsistencyError::OutOfRange { name, value, range } => write!(
                f,
                "'{}' = {} is outside permitted range {}",
                name, value, range
            ),
        }
    }
}

impl std::error::Error for RegistryError {}
impl std::error::Error for LookupError {}
impl std::error::Error for ConsistencyError {}

impl From<LookupError> for RegistryError {
    fn from(err: LookupError) -> Self {
        RegistryError::Lookup(err)
    }
}

impl From<ConsistencyError> for RegistryError {
    fn from(err: ConsistencyError) -> Self {
        RegistryError::Consistency(err)
    }
}

impl RegistryError {
    #[inline]
    pub fn is_lookup(&self) -> bool {
        matches!(self, RegistryError::Lookup(_))
    }

    #[inline]
    pub fn is_consistency(&self) -> bool {
        matches!(self, RegistryError::Consistency(_))
    }
}

/// Convenience alias: a `Result` using `RegistryError` as the error type.
pub type RegistryResult<T> = Result<T, RegistryError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error if two parallel arrays differ in length.
pub fn ensure_same_len(
    left: &'static str,
    left_len: usize,
    right: &'static str,
    right_len: usize,
) -> RegistryResult<()> {
    if left_len != right_len {
        Err(ConsistencyError::LengthMismatch {
            left,
            left_len,
            right,
            right_len,
        }
        .into())
    } else {
        Ok(())
    }
}

/// Returns an error if `value` is not a probability in [0, 1].
pub fn ensure_unit_interval(name: &str, value: f32) -> RegistryResult<()> {
    if !(0.0..=1.0).contains(&value) {
        Err(ConsistencyError::OutOfRange {
            name: name.to_string(),
            value,
            range: "[0.0, 1.0]",
        }
        .into())
    } else {
        Ok(())
    }
}

/// Returns an error if `value` is not strictly positive.
pub fn ensure_positive(name: &str, value: f32) -> RegistryResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConsistencyError::OutOfRange {
            name: name.to_string(),
            value,
            range: "(0.0, ∞)",
        }
        .into())
    }
}
