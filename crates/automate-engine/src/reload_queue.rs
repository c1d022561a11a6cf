use automate_core::id::LocationId;
use std::collections::BTreeSet;

/// Locations whose groups must be rebuilt before the next cycle runs.
///
/// Any number of tile changes to one location between two cycles collapse
/// into a single entry. A full rebuild (cold start, reset, config change)
/// supersedes the per-location entries.
#[derive(Debug, Clone)]
pub struct ReloadQueue {
    pending: BTreeSet<LocationId>,
    full_rebuild: bool,
}

impl Default for ReloadQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ReloadQueue {
    /// A new queue starts out asking for a full rebuild.
    pub fn new() -> Self {
        Self {
            pending: BTreeSet::new(),
            full_rebuild: true,
        }
    }

    /// Mark one location. Returns `false` if it was already queued.
    pub fn queue(&mut self, location: LocationId) -> bool {
        self.pending.insert(location)
    }

    /// Mark every location, known or not.
    pub fn queue_all(&mut self) {
        self.pending.clear();
        self.full_rebuild = true;
    }

    pub fn contains(&self, location: &LocationId) -> bool {
        self.full_rebuild || self.pending.contains(location)
    }

    pub fn needs_full_rebuild(&self) -> bool {
        self.full_rebuild
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        !self.full_rebuild && self.pending.is_empty()
    }

    /// Take everything queued, leaving the queue clean. `None` means rebuild
    /// every location.
    pub fn drain(&mut self) -> Option<Vec<LocationId>> {
        let pending = std::mem::take(&mut self.pending);
        if std::mem::take(&mut self.full_rebuild) {
            return None;
        }
        Some(pending.into_iter().collect())
    }

    /// Drop everything queued without asking for a rebuild.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.full_rebuild = false;
    }
}
