//! Teardown: detach, scoped attachments and snapshot pairing

use super::add_crate;
use crate::foundation::math::Vec3;
use crate::occlusion::{FadeConfig, ObstructionManager, TrackedTarget};
use crate::scene::{Camera, MaterialState, ObjectId, SceneQuery, SceneTree};

/// Three crates lined up between the origin and a camera at z = 10
fn corridor() -> (SceneTree, Vec<ObjectId>, Vec<MaterialState>) {
    let originals = vec![
        MaterialState::opaque(),
        MaterialState::translucent(0.75),
        MaterialState::translucent(0.3),
    ];
    let mut scene = SceneTree::new();
    let ids = originals
        .iter()
        .zip([3.0, 5.0, 7.0])
        .map(|(material, z)| add_crate(&mut scene, Vec3::new(0.0, 0.0, z), *material))
        .collect();
    (scene, ids, originals)
}

fn attached() -> ObstructionManager {
    let mut manager = ObstructionManager::new(FadeConfig::default().with_throttle_period(1)).unwrap();
    manager.attach(TrackedTarget::Point(Vec3::zeros()));
    manager
}

fn camera() -> Camera {
    Camera::at(Vec3::new(0.0, 0.0, 10.0))
}

#[test]
fn test_detach_restores_every_original_exactly() {
    let (mut scene, ids, originals) = corridor();
    let mut manager = attached();

    let report = manager.update(&mut scene, &camera());
    // Nearest obstruction first
    assert_eq!(report.faded, ids);
    assert_eq!(manager.snapshot_count(), 3);

    assert_eq!(manager.detach(&mut scene), 3);
    assert_eq!(manager.snapshot_count(), 0);
    assert!(manager.faded().is_empty());
    assert!(!manager.is_attached());

    for (id, original) in ids.iter().zip(&originals) {
        let material = scene.material(*id).unwrap();
        assert!(material.same_appearance(original), "{} not restored", id);
        assert!(material.needs_update);
    }
}

#[test]
fn test_snapshots_pair_with_faded_set_every_frame() {
    let (mut scene, ids, _) = corridor();
    let mut manager = attached();

    let offsets = [Vec3::zeros(), Vec3::new(4.0, 0.0, 0.0), Vec3::new(-4.0, 0.0, 0.0)];
    for step in 0..9 {
        // Shuffle crates on and off the line of sight
        for (i, id) in ids.iter().enumerate() {
            let offset = offsets[(step + i) % offsets.len()];
            let z = 3.0 + 2.0 * i as f32;
            scene.set_position(*id, Vec3::new(0.0, 0.0, z) + offset).unwrap();
        }
        manager.update(&mut scene, &camera());

        for id in &ids {
            assert_eq!(manager.is_faded(*id), manager.snapshot(*id).is_some());
            let material = scene.material(*id).unwrap();
            if manager.is_faded(*id) {
                assert!(material.transparent);
                assert_eq!(material.opacity, 0.3);
            }
        }
    }
    manager.detach(&mut scene);
}

#[test]
fn test_detach_tolerates_removed_objects() {
    let (mut scene, ids, _) = corridor();
    let mut manager = attached();
    manager.update(&mut scene, &camera());

    scene.remove(ids[1]).unwrap();
    assert_eq!(manager.detach(&mut scene), 2);
    assert_eq!(manager.snapshot_count(), 0);
}

#[test]
fn test_detach_when_never_attached_is_noop() {
    let (mut scene, ids, originals) = corridor();
    let mut manager = ObstructionManager::new(FadeConfig::default()).unwrap();

    assert_eq!(manager.detach(&mut scene), 0);
    for (id, original) in ids.iter().zip(&originals) {
        assert_eq!(scene.material(*id).unwrap(), original);
    }
}

#[test]
fn test_reattach_starts_throttle_from_scratch() {
    let (mut scene, _, _) = corridor();
    let mut manager = ObstructionManager::new(FadeConfig::default()).unwrap();
    manager.attach(TrackedTarget::Point(Vec3::zeros()));
    manager.update(&mut scene, &camera());
    manager.update(&mut scene, &camera());
    manager.detach(&mut scene);

    manager.attach(TrackedTarget::Point(Vec3::zeros()));
    assert!(!manager.update(&mut scene, &camera()).admitted);
    assert!(!manager.update(&mut scene, &camera()).admitted);
    assert!(manager.update(&mut scene, &camera()).admitted);
    manager.detach(&mut scene);
}

#[test]
fn test_scope_drop_restores_scene() {
    let (mut scene, ids, originals) = corridor();
    let mut manager = attached();

    {
        let mut scope = manager.scope(&mut scene);
        scope.tick(&camera());
        assert_eq!(scope.manager().faded().len(), 3);
        assert!(scope.scene().material(ids[0]).unwrap().transparent);
    }

    assert!(!manager.is_attached());
    assert_eq!(manager.snapshot_count(), 0);
    for (id, original) in ids.iter().zip(&originals) {
        assert!(scene.material(*id).unwrap().same_appearance(original));
    }
}

#[test]
fn test_scope_finish_reports_restored_count() {
    let (mut scene, ids, _) = corridor();
    let mut manager = attached();

    let mut scope = manager.scope(&mut scene);
    scope.tick(&camera());
    scope.scene_mut().set_position(ids[2], Vec3::new(6.0, 0.0, 7.0)).unwrap();
    let report = scope.tick(&camera());
    assert_eq!(report.restored, vec![ids[2]]);

    assert_eq!(scope.finish(), 2);
    assert!(!scene.material(ids[0]).unwrap().transparent);
}

#[test]
fn test_scope_restores_during_unwind() {
    let (mut scene, ids, _) = corridor();
    let mut manager = attached();

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut scope = manager.scope(&mut scene);
        scope.tick(&camera());
        panic!("frame callback failed");
    }));

    assert!(outcome.is_err());
    assert!(!scene.material(ids[0]).unwrap().transparent);
    assert_eq!(manager.snapshot_count(), 0);
}
