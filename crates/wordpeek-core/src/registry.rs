use std::collections::BTreeMap;

use wordpeek_types::{ResultSurface, SurfaceId};

/// Live result windows, keyed by id.
///
/// Sole owner of each window handle `H`; removal hands the handle back so
/// the caller can close it. Only touched from the UI thread.
pub struct SurfaceRegistry<H> {
    surfaces: BTreeMap<SurfaceId, (ResultSurface, H)>,
    next_id: u64,
}

impl<H> SurfaceRegistry<H> {
    pub fn new() -> Self {
        Self {
            surfaces: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Reserve an id for a surface about to be opened
    pub fn next_id(&mut self) -> SurfaceId {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, surface: ResultSurface, handle: H) {
        self.surfaces.insert(surface.id, (surface, handle));
    }

    /// `None` when the surface was already removed
    pub fn remove(&mut self, id: SurfaceId) -> Option<(ResultSurface, H)> {
        self.surfaces.remove(&id)
    }

    pub fn get(&self, id: SurfaceId) -> Option<&ResultSurface> {
        self.surfaces.get(&id).map(|(surface, _)| surface)
    }

    pub fn contains(&self, id: SurfaceId) -> bool {
        self.surfaces.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Empty the registry, yielding every handle
    pub fn drain(&mut self) -> Vec<(ResultSurface, H)> {
        std::mem::take(&mut self.surfaces).into_values().collect()
    }
}

impl<H> Default for SurfaceRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
