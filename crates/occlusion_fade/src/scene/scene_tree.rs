//! Hierarchical reference scene
//!
//! Nodes live in a slot map and form a tree of groups and objects. Each node
//! has a local transform; world transforms are composed parent to child on
//! demand, so moving a group moves everything under it.

use std::collections::HashMap;

use thiserror::Error;

use crate::foundation::collections::{HandleMap, NodeKey};
use crate::foundation::math::{Quat, Transform, Vec3};
use crate::physics::{CollisionShape, Ray};
use super::object::{MaterialState, ObjectId, RenderLayers};
use super::scene_graph::{RayIntersection, SceneQuery};

/// Scene tree errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// No node carries this identifier
    #[error("Unknown scene object {0}")]
    UnknownObject(ObjectId),
}

/// Description of a node to insert
///
/// # Examples
/// ```
/// # use occlusion_fade::scene::{NodeDesc, MaterialState, RenderLayers};
/// # use occlusion_fade::physics::CollisionShape;
/// # use occlusion_fade::foundation::math::Vec3;
/// let pole = NodeDesc::new("pole")
///     .at(Vec3::new(0.0, 2.0, 5.0))
///     .with_shape(CollisionShape::cuboid(0.2, 4.0, 0.2))
///     .with_material(MaterialState::opaque())
///     .on_layers(RenderLayers::ENVIRONMENT);
/// ```
#[derive(Debug, Clone)]
pub struct NodeDesc {
    name: String,
    local: Transform,
    shape: Option<CollisionShape>,
    material: Option<MaterialState>,
    layers: RenderLayers,
}

impl NodeDesc {
    /// Start describing a node; by default an empty group at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local: Transform::identity(),
            shape: None,
            material: None,
            layers: RenderLayers::DEFAULT,
        }
    }

    /// Local position relative to the parent
    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.local.position = position;
        self
    }

    /// Local rotation relative to the parent
    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.local.rotation = rotation;
        self
    }

    /// Local scale relative to the parent
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.local.scale = scale;
        self
    }

    /// Geometry the ray cast can hit
    #[must_use]
    pub fn with_shape(mut self, shape: CollisionShape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Give the node a material (makes it fadeable)
    #[must_use]
    pub fn with_material(mut self, material: MaterialState) -> Self {
        self.material = Some(material);
        self
    }

    /// Render layers the node lives on
    #[must_use]
    pub fn on_layers(mut self, layers: RenderLayers) -> Self {
        self.layers = layers;
        self
    }
}

#[derive(Debug)]
struct SceneNode {
    id: ObjectId,
    name: String,
    local: Transform,
    shape: Option<CollisionShape>,
    material: Option<MaterialState>,
    layers: RenderLayers,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

/// Hierarchical scene of groups and objects
#[derive(Debug, Default)]
pub struct SceneTree {
    nodes: HandleMap<SceneNode>,
    index: HashMap<ObjectId, NodeKey>,
    roots: Vec<NodeKey>,
    next_id: u64,
}

impl SceneTree {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under `parent` (or at the root) and return its identifier
    pub fn add(&mut self, parent: Option<ObjectId>, desc: NodeDesc) -> Result<ObjectId, SceneError> {
        let parent_key = parent.map(|p| self.key(p)).transpose()?;
        Ok(self.insert(parent_key, desc))
    }

    /// Insert an empty group node at the root
    pub fn add_group(&mut self, name: impl Into<String>, position: Vec3) -> ObjectId {
        self.insert(None, NodeDesc::new(name).at(position))
    }

    /// Remove a node and its whole subtree, returning how many nodes went away
    pub fn remove(&mut self, id: ObjectId) -> Result<usize, SceneError> {
        let key = self.key(id)?;

        match self.nodes[key].parent {
            Some(parent) => self.nodes[parent].children.retain(|child| *child != key),
            None => self.roots.retain(|root| *root != key),
        }

        let mut removed = 0;
        let mut stack = vec![key];
        while let Some(key) = stack.pop() {
            if let Some(node) = self.nodes.remove(key) {
                self.index.remove(&node.id);
                stack.extend(node.children);
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Set a node's local position
    pub fn set_position(&mut self, id: ObjectId, position: Vec3) -> Result<(), SceneError> {
        let key = self.key(id)?;
        self.nodes[key].local.position = position;
        Ok(())
    }

    /// Move a node by `delta` in its parent's space
    pub fn translate(&mut self, id: ObjectId, delta: Vec3) -> Result<(), SceneError> {
        let key = self.key(id)?;
        self.nodes[key].local.position += delta;
        Ok(())
    }

    /// Local transform of a node
    pub fn local_transform(&self, id: ObjectId) -> Option<Transform> {
        self.index.get(&id).map(|key| self.nodes[*key].local)
    }

    /// World transform of a node, composed through all of its ancestors
    pub fn world_transform(&self, id: ObjectId) -> Option<Transform> {
        let mut key = *self.index.get(&id)?;
        let mut world = self.nodes[key].local;
        while let Some(parent) = self.nodes[key].parent {
            world = self.nodes[parent].local.combine(&world);
            key = parent;
        }
        Some(world)
    }

    /// Name given at insertion
    pub fn name(&self, id: ObjectId) -> Option<&str> {
        self.index.get(&id).map(|key| self.nodes[*key].name.as_str())
    }

    /// First node with the given name
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects().into_iter().find(|id| self.name(*id) == Some(name))
    }

    /// All object identifiers, depth first in insertion order
    pub fn objects(&self) -> Vec<ObjectId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeKey> = self.roots.iter().rev().copied().collect();
        while let Some(key) = stack.pop() {
            let node = &self.nodes[key];
            out.push(node.id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Clear every redraw marker and return the objects that had one set
    pub fn take_dirty(&mut self) -> Vec<ObjectId> {
        let mut dirty = Vec::new();
        for node in self.nodes.values_mut() {
            if let Some(material) = node.material.as_mut() {
                if material.needs_update {
                    material.needs_update = false;
                    dirty.push(node.id);
                }
            }
        }
        dirty.sort_unstable();
        dirty
    }

    /// Number of nodes in the scene
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert(&mut self, parent_key: Option<NodeKey>, desc: NodeDesc) -> ObjectId {
        self.next_id += 1;
        let id = ObjectId(self.next_id);
        let key = self.nodes.insert(SceneNode {
            id,
            name: desc.name,
            local: desc.local,
            shape: desc.shape,
            material: desc.material,
            layers: desc.layers,
            parent: parent_key,
            children: Vec::new(),
        });
        self.index.insert(id, key);

        match parent_key {
            Some(parent_key) => self.nodes[parent_key].children.push(key),
            None => self.roots.push(key),
        }

        log::trace!("Scene: added {} '{}'", id, self.nodes[key].name);
        id
    }

    fn key(&self, id: ObjectId) -> Result<NodeKey, SceneError> {
        self.index.get(&id).copied().ok_or(SceneError::UnknownObject(id))
    }

    fn collect_crossings(
        &self,
        key: NodeKey,
        parent_world: &Transform,
        ray: &Ray,
        layers: RenderLayers,
        out: &mut Vec<RayIntersection>,
    ) {
        let node = &self.nodes[key];
        let world = parent_world.combine(&node.local);

        if let Some(shape) = node.shape {
            if node.layers.intersects(layers) {
                out.extend(
                    shape
                        .to_world_space(&world)
                        .ray_crossings(ray)
                        .into_iter()
                        .map(|distance| RayIntersection { object: node.id, distance }),
                );
            }
        }

        for child in &node.children {
            self.collect_crossings(*child, &world, ray, layers, out);
        }
    }
}

impl SceneQuery for SceneTree {
    fn cast_ray(&self, ray: &Ray, layers: RenderLayers) -> Vec<RayIntersection> {
        let mut hits = Vec::new();
        let root = Transform::identity();
        for key in &self.roots {
            self.collect_crossings(*key, &root, ray, layers, &mut hits);
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn world_position(&self, id: ObjectId) -> Option<Vec3> {
        self.world_transform(id).map(|transform| transform.position)
    }

    fn material(&self, id: ObjectId) -> Option<&MaterialState> {
        let key = self.index.get(&id)?;
        self.nodes[*key].material.as_ref()
    }

    fn material_mut(&mut self, id: ObjectId) -> Option<&mut MaterialState> {
        let key = self.index.get(&id)?;
        self.nodes[*key].material.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pillar(scene: &mut SceneTree, parent: Option<ObjectId>, z: f32) -> ObjectId {
        scene
            .add(
                parent,
                NodeDesc::new("pillar")
                    .at(Vec3::new(0.0, 0.0, z))
                    .with_shape(CollisionShape::sphere(1.0))
                    .with_material(MaterialState::opaque()),
            )
            .unwrap()
    }

    #[test]
    fn test_add_and_enumerate_recursively() {
        let mut scene = SceneTree::new();
        let group = scene.add_group("props", Vec3::zeros());
        let a = pillar(&mut scene, Some(group), 3.0);
        let b = pillar(&mut scene, None, 6.0);
        let c = pillar(&mut scene, Some(a), 1.0);

        assert_eq!(scene.objects(), vec![group, a, c, b]);
        assert_eq!(scene.len(), 4);
        assert_eq!(scene.find("props"), Some(group));
    }

    #[test]
    fn test_unknown_parent_is_rejected() {
        let mut scene = SceneTree::new();
        let err = scene.add(Some(ObjectId(42)), NodeDesc::new("orphan")).unwrap_err();
        assert_eq!(err, SceneError::UnknownObject(ObjectId(42)));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_world_transform_composes_ancestors() {
        let mut scene = SceneTree::new();
        let group = scene.add_group("group", Vec3::new(1.0, 0.0, 0.0));
        let child = pillar(&mut scene, Some(group), 5.0);

        assert_relative_eq!(scene.world_position(child).unwrap(), Vec3::new(1.0, 0.0, 5.0));

        scene.translate(group, Vec3::new(0.0, 2.0, 0.0)).unwrap();
        assert_relative_eq!(scene.world_position(child).unwrap(), Vec3::new(1.0, 2.0, 5.0));
        assert_relative_eq!(scene.local_transform(child).unwrap().position, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_cast_ray_recurses_and_sorts() {
        let mut scene = SceneTree::new();
        let group = scene.add_group("group", Vec3::zeros());
        let far = pillar(&mut scene, Some(group), 8.0);
        let near = pillar(&mut scene, None, 3.0);

        let hits = scene.cast_ray(&Ray::new(Vec3::zeros(), Vec3::z()), RenderLayers::all());
        let objects: Vec<_> = hits.iter().map(|h| h.object).collect();
        assert_eq!(objects, vec![near, near, far, far]);
        assert_relative_eq!(hits[0].distance, 2.0, epsilon = 1e-5);
        assert_relative_eq!(hits[3].distance, 9.0, epsilon = 1e-5);
    }

    #[test]
    fn test_cast_ray_respects_layers() {
        let mut scene = SceneTree::new();
        scene
            .add(
                None,
                NodeDesc::new("floor")
                    .at(Vec3::new(0.0, 0.0, 5.0))
                    .with_shape(CollisionShape::cuboid(10.0, 10.0, 1.0))
                    .with_material(MaterialState::opaque())
                    .on_layers(RenderLayers::GROUND),
            )
            .unwrap();

        let ray = Ray::new(Vec3::zeros(), Vec3::z());
        assert_eq!(scene.cast_ray(&ray, RenderLayers::all()).len(), 2);
        assert!(scene.cast_ray(&ray, RenderLayers::all() - RenderLayers::GROUND).is_empty());
    }

    #[test]
    fn test_remove_drops_subtree() {
        let mut scene = SceneTree::new();
        let group = scene.add_group("group", Vec3::zeros());
        let child = pillar(&mut scene, Some(group), 5.0);
        let other = pillar(&mut scene, None, 2.0);

        assert_eq!(scene.remove(group).unwrap(), 2);
        assert!(scene.world_position(child).is_none());
        assert_eq!(scene.objects(), vec![other]);
        assert!(scene.remove(group).is_err());
    }

    #[test]
    fn test_take_dirty_clears_markers() {
        let mut scene = SceneTree::new();
        let a = pillar(&mut scene, None, 2.0);
        let group = scene.add_group("group", Vec3::zeros());

        scene.material_mut(a).unwrap().mark_dirty();
        assert!(scene.material_mut(group).is_none());
        assert!(!scene.has_material(group));

        assert_eq!(scene.take_dirty(), vec![a]);
        assert!(scene.take_dirty().is_empty());
    }
}
