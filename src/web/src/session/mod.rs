mod propagator;
mod retry;

pub use propagator::*;
pub use retry::*;

use league_core::LeagueData;
use std::ops::{Deref, DerefMut};
use tokio::sync::RwLockWriteGuard;

/// Write access to the store with the caller context pushed for its lifetime.
pub struct SessionWrite<'a> {
    pub(crate) _session: SessionGuard<'a>,
    pub(crate) data: RwLockWriteGuard<'a, LeagueData>,
}

impl Deref for SessionWrite<'_> {
    type Target = LeagueData;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl DerefMut for SessionWrite<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}
