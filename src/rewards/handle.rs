//! Scoped access to a provider.

use std::sync::{Arc, Weak};

use crate::rewards::error::{RewardsError, RewardsResult};
use crate::rewards::provider::RewardsProvider;

/// A non-owning reference to a [`RewardsProvider`].
///
/// Components hold a handle instead of the provider itself; once the
/// provider is dropped every handle reports [`RewardsError::OutsideProvider`].
#[derive(Debug, Clone, Default)]
pub struct RewardsHandle {
    inner: Weak<RewardsProvider>,
}

impl RewardsHandle {
    pub(crate) fn new(provider: &Arc<RewardsProvider>) -> Self {
        Self {
            inner: Arc::downgrade(provider),
        }
    }

    /// The provider this handle belongs to.
    pub fn provider(&self) -> RewardsResult<Arc<RewardsProvider>> {
        self.inner.upgrade().ok_or(RewardsError::OutsideProvider)
    }
}
