//! Store construction options.

use crate::model::id::IdStrategy;

/// Options applied when a `RegistrationStore` is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Populate the demo dataset when no usable state is stored.
    pub seed: bool,
    /// Identifier generation strategy for new records.
    pub id_strategy: IdStrategy,
    /// Re-run reference and uniqueness checks on `update_enrollment`.
    ///
    /// Off by default: patches are merged without re-validation.
    pub revalidate_updates: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            seed: true,
            id_strategy: IdStrategy::Random,
            revalidate_updates: false,
        }
    }
}

impl StoreOptions {
    /// Options for an empty store: no demo data.
    pub fn unseeded() -> Self {
        Self {
            seed: false,
            ..Self::default()
        }
    }
}
