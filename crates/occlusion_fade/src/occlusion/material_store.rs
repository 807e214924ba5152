//! Pre-fade material snapshots

use std::collections::HashMap;

use crate::scene::{MaterialState, ObjectId};

/// Appearance of an object captured right before it was first faded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialSnapshot {
    /// Original blend flag
    pub transparent: bool,
    /// Original opacity
    pub opacity: f32,
}

impl MaterialSnapshot {
    /// Appearance used when a snapshot is unexpectedly missing: fully opaque
    pub const FALLBACK: Self = Self {
        transparent: false,
        opacity: 1.0,
    };

    /// Capture the appearance fields of a material
    pub fn capture(material: &MaterialState) -> Self {
        Self {
            transparent: material.transparent,
            opacity: material.opacity,
        }
    }

    /// Write the captured appearance back into a material
    pub fn apply_to(&self, material: &mut MaterialState) {
        material.transparent = self.transparent;
        material.opacity = self.opacity;
    }
}

impl From<&MaterialState> for MaterialSnapshot {
    fn from(material: &MaterialState) -> Self {
        Self::capture(material)
    }
}

/// Snapshots keyed by object, owned by a single obstruction manager
#[derive(Debug, Default)]
pub struct MaterialStateStore {
    snapshots: HashMap<ObjectId, MaterialSnapshot>,
}

impl MaterialStateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `material` for `id` unless a snapshot already exists
    ///
    /// Returns `true` when a new snapshot was stored. An existing snapshot is
    /// never overwritten, since the object may already show the fade.
    pub fn capture(&mut self, id: ObjectId, material: &MaterialState) -> bool {
        if self.snapshots.contains_key(&id) {
            return false;
        }
        self.snapshots.insert(id, MaterialSnapshot::capture(material));
        true
    }

    /// Remove and return the snapshot for `id`
    pub fn take(&mut self, id: ObjectId) -> Option<MaterialSnapshot> {
        self.snapshots.remove(&id)
    }

    /// Snapshot for `id`, if one is held
    pub fn get(&self, id: ObjectId) -> Option<&MaterialSnapshot> {
        self.snapshots.get(&id)
    }

    /// Whether a snapshot is held for `id`
    pub fn contains(&self, id: ObjectId) -> bool {
        self.snapshots.contains_key(&id)
    }

    /// Number of snapshots held
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no snapshots are held
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drop every snapshot
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_does_not_overwrite() {
        let mut store = MaterialStateStore::new();
        let id = ObjectId(1);

        assert!(store.capture(id, &MaterialState::translucent(0.8)));
        assert!(!store.capture(id, &MaterialState::translucent(0.3)));

        assert_eq!(store.get(id), Some(&MaterialSnapshot { transparent: true, opacity: 0.8 }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_take_consumes() {
        let mut store = MaterialStateStore::new();
        let id = ObjectId(2);
        store.capture(id, &MaterialState::opaque());

        assert_eq!(store.take(id), Some(MaterialSnapshot::FALLBACK));
        assert!(store.take(id).is_none());
        assert!(!store.contains(id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_apply_to_leaves_dirty_flag_alone() {
        let mut material = MaterialState::translucent(0.3);
        MaterialSnapshot { transparent: false, opacity: 0.9 }.apply_to(&mut material);
        assert!(!material.transparent);
        assert_eq!(material.opacity, 0.9);
        assert!(!material.needs_update);
    }
}
