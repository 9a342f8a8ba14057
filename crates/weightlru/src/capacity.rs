//! Weighted size accounting

use crate::error::{Error, Result};

/// Capacity state: a ceiling and a uniform per-entry weight.
///
/// The occupied size is never stored; it is derived from the entry count so
/// it cannot drift from the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Capacity {
    max_size: usize,
    item_weight: usize,
}

impl Capacity {
    /// Validate and build a capacity state
    pub(crate) fn new(max_size: usize, item_weight: usize) -> Result<Self> {
        check(max_size, item_weight)?;
        Ok(Self {
            max_size,
            item_weight,
        })
    }

    pub(crate) fn max_size(&self) -> usize {
        self.max_size
    }

    pub(crate) fn item_weight(&self) -> usize {
        self.item_weight
    }

    /// Size occupied by `entries` entries
    pub(crate) fn size_of(&self, entries: usize) -> usize {
        entries.saturating_mul(self.item_weight)
    }

    /// Whether `entries` entries exceed the ceiling
    pub(crate) fn exceeded_by(&self, entries: usize) -> bool {
        self.size_of(entries) > self.max_size
    }

    /// Change the ceiling, leaving the state untouched on error
    pub(crate) fn set_max_size(&mut self, max_size: usize) -> Result<()> {
        check(max_size, self.item_weight)?;
        self.max_size = max_size;
        Ok(())
    }
}

fn check(max_size: usize, item_weight: usize) -> Result<()> {
    if max_size == 0 || max_size < item_weight {
        return Err(Error::InvalidCapacity {
            max_size,
            item_weight,
        });
    }
    Ok(())
}
