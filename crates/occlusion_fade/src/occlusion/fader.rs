//! Applying and undoing the fade appearance

use crate::scene::{ObjectId, SceneQuery};
use super::material_store::{MaterialSnapshot, MaterialStateStore};

/// Fade `id` to `opacity`, capturing its appearance first
///
/// Does nothing and returns `false` if the object is already faded (a
/// snapshot exists) or has no material.
pub fn apply_fade<S: SceneQuery + ?Sized>(
    scene: &mut S,
    store: &mut MaterialStateStore,
    id: ObjectId,
    opacity: f32,
) -> bool {
    if store.contains(id) {
        return false;
    }
    let Some(material) = scene.material_mut(id) else {
        return false;
    };

    store.capture(id, material);
    material.transparent = true;
    material.opacity = opacity;
    material.mark_dirty();

    log::debug!("Occlusion: faded {} to opacity {:.2}", id, opacity);
    true
}

/// Put `id` back to its snapshot and discard the snapshot
///
/// Without a snapshot the object falls back to fully opaque. Returns `false`
/// when the object no longer has a material to restore; its snapshot is
/// dropped all the same.
pub fn restore<S: SceneQuery + ?Sized>(scene: &mut S, store: &mut MaterialStateStore, id: ObjectId) -> bool {
    let snapshot = store.take(id);
    let Some(material) = scene.material_mut(id) else {
        log::debug!("Occlusion: {} disappeared while faded", id);
        return false;
    };

    let snapshot = snapshot.unwrap_or_else(|| {
        log::warn!("Occlusion: no snapshot for {}, restoring as opaque", id);
        MaterialSnapshot::FALLBACK
    });
    snapshot.apply_to(material);
    material.mark_dirty();

    log::debug!(
        "Occlusion: restored {} (transparent={}, opacity={:.2})",
        id,
        snapshot.transparent,
        snapshot.opacity
    );
    true
}
