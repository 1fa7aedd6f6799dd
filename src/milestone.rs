//! Strictly ascending integer threshold lists (boss levels, combo milestones).

use crate::error::{ConsistencyError, RegistryResult};

/// A non-empty, strictly ascending list of thresholds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestones {
    name: &'static str,
    values: Vec<u32>,
}

impl Milestones {
    pub fn new(name: &'static str, values: Vec<u32>) -> RegistryResult<Self> {
        if values.is_empty() {
            return Err(ConsistencyError::EmptyList {
                name: name.to_string(),
                min: 1,
            }
            .into());
        }
        if let Some(index) = values.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ConsistencyError::NotAscending {
                list: name,
                index: index + 1,
            }
            .into());
        }
        Ok(Self { name, values })
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }

    /// `true` if `value` is exactly one of the thresholds.
    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        self.values.binary_search(&value).is_ok()
    }

    /// Largest threshold `<= value`.
    pub fn highest_reached(&self, value: u32) -> Option<u32> {
        let idx = self.values.partition_point(|&m| m <= value);
        idx.checked_sub(1).map(|i| self.values[i])
    }

    /// Smallest threshold `> value`.
    pub fn next_after(&self, value: u32) -> Option<u32> {
        let idx = self.values.partition_point(|&m| m <= value);
        self.values.get(idx).copied()
    }
}
