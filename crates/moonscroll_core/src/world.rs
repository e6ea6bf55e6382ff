//! World container for entities
//!
//! The World owns every entity in the scene, the lights, and the background
//! texture. Entities are addressed by generational [`EntityKey`]s, so a key for a
//! removed entity never aliases a newer one.

use moonscroll_math::{mat4, Mat4, Vec3};
use slotmap::{new_key_type, SlotMap};
use crate::{Entity, Light, TextureHandle};

new_key_type! {
    /// Generational key to an entity in the world
    pub struct EntityKey;
}

/// The scene containing all entities
pub struct World {
    entities: SlotMap<EntityKey, Entity>,
    lights: Vec<Light>,
    background: Option<TextureHandle>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a world with pre-allocated capacity for entities
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: SlotMap::with_capacity_and_key(capacity),
            lights: Vec::new(),
            background: None,
        }
    }

    /// Add an entity to the world, returning its key
    pub fn add_entity(&mut self, entity: Entity) -> EntityKey {
        self.entities.insert(entity)
    }

    /// Remove an entity, detaching its children
    pub fn remove_entity(&mut self, key: EntityKey) -> Option<Entity> {
        let removed = self.entities.remove(key)?;
        for (_, entity) in self.entities.iter_mut() {
            if entity.parent == Some(key) {
                entity.parent = None;
            }
        }
        Some(removed)
    }

    /// Get a reference to an entity by key
    pub fn get_entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Get a mutable reference to an entity by key
    pub fn get_entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Find the first entity with the given name
    pub fn find_by_name(&self, name: &str) -> Option<EntityKey> {
        self.entities
            .iter()
            .find(|(_, e)| e.name.as_deref() == Some(name))
            .map(|(key, _)| key)
    }

    /// Keys of all entities carrying `tag`
    pub fn keys_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = EntityKey> + 'a {
        self.entities
            .iter()
            .filter(move |(_, e)| e.has_tag(tag))
            .map(|(key, _)| key)
    }

    /// Get the number of entities
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Check if the world is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over keys and entities
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    /// Iterate over keys and entities mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityKey, &mut Entity)> {
        self.entities.iter_mut()
    }

    /// Local-to-world matrix of an entity, composed through its parent chain
    ///
    /// A parent key that no longer resolves ends the chain. Returns `None` if `key`
    /// itself is not in the world.
    pub fn world_matrix(&self, key: EntityKey) -> Option<Mat4> {
        let entity = self.entities.get(key)?;
        let mut matrix = entity.transform.to_matrix();
        let mut parent = entity.parent;
        let mut depth = 0;

        while let Some(parent_key) = parent {
            // A cycle cannot be longer than the entity count
            if depth >= self.entities.len() {
                log::warn!("Parent cycle detected while resolving an entity transform");
                break;
            }
            let Some(p) = self.entities.get(parent_key) else {
                break;
            };
            matrix = mat4::mul(p.transform.to_matrix(), matrix);
            parent = p.parent;
            depth += 1;
        }

        Some(matrix)
    }

    /// World-space position of an entity's origin
    pub fn world_position(&self, key: EntityKey) -> Option<Vec3> {
        self.world_matrix(key).map(mat4::get_translation)
    }

    /// Add every entity's per-tick `spin`, multiplied by `scale`, to its rotation
    ///
    /// Returns the number of entities rotated.
    pub fn advance_spin(&mut self, scale: f32) -> usize {
        let mut rotated = 0;
        for (_, entity) in self.entities.iter_mut() {
            if entity.is_animated() {
                entity.rotate(entity.spin * scale);
                rotated += 1;
            }
        }
        rotated
    }

    /// Add every entity's `scroll_spin` to its rotation once per scroll event
    pub fn apply_scroll_spin(&mut self, events: usize) {
        if events == 0 {
            return;
        }
        let factor = events as f32;
        for (_, entity) in self.entities.iter_mut() {
            entity.rotate(entity.scroll_spin * factor);
        }
    }

    /// Check whether any entity needs re-uploading
    pub fn has_dirty_entities(&self) -> bool {
        self.entities.values().any(Entity::is_dirty)
    }

    /// Clear dirty flags on every entity
    pub fn clear_all_dirty(&mut self) {
        for entity in self.entities.values_mut() {
            entity.clear_dirty();
        }
    }

    /// Add a light to the scene
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// All lights in the scene
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Set the background texture
    pub fn set_background(&mut self, texture: Option<TextureHandle>) {
        self.background = texture;
    }

    /// Background texture, if any
    pub fn background(&self) -> Option<&TextureHandle> {
        self.background.as_ref()
    }

    /// Clear all entities and lights from the world
    pub fn clear(&mut self) {
        self.entities.clear();
        self.lights.clear();
        self.background = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ShapeRef, Transform3D};
    use moonscroll_math::CuboidMesh;

    const EPSILON: f32 = 1e-4;

    fn make_test_entity() -> Entity {
        Entity::new(ShapeRef::owned(CuboidMesh::cube(1.0)))
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).max_abs_component() < EPSILON
    }

    #[test]
    fn test_world_new() {
        let world = World::new();
        assert!(world.is_empty());
        assert_eq!(world.entity_count(), 0);
        assert!(world.lights().is_empty());
        assert!(world.background().is_none());
    }

    #[test]
    fn test_world_add_and_get_entity() {
        let mut world = World::new();
        let key = world.add_entity(make_test_entity().with_name("cube"));

        assert_eq!(world.entity_count(), 1);
        let entity = world.get_entity(key).unwrap();
        assert_eq!(entity.shape().unwrap().vertex_count(), 24);
        assert_eq!(world.find_by_name("cube"), Some(key));
        assert_eq!(world.find_by_name("moon"), None);
    }

    #[test]
    fn test_removed_key_is_stale() {
        let mut world = World::new();
        let key = world.add_entity(make_test_entity());
        assert!(world.remove_entity(key).is_some());

        let replacement = world.add_entity(make_test_entity());
        assert!(world.get_entity(key).is_none());
        assert!(world.get_entity(replacement).is_some());
    }

    #[test]
    fn test_remove_parent_detaches_children() {
        let mut world = World::new();
        let group = world.add_entity(Entity::group());
        let child = world.add_entity(make_test_entity().with_parent(group));

        world.remove_entity(group);
        assert_eq!(world.get_entity(child).unwrap().parent, None);
    }

    #[test]
    fn test_keys_with_tag() {
        let mut world = World::new();
        world.add_entity(make_test_entity().with_tag("star"));
        world.add_entity(make_test_entity().with_tag("star"));
        world.add_entity(make_test_entity().with_tag("ring"));

        assert_eq!(world.keys_with_tag("star").count(), 2);
        assert_eq!(world.keys_with_tag("moon").count(), 0);
    }

    #[test]
    fn test_world_matrix_composes_parent() {
        let mut world = World::new();
        let group = world.add_entity(
            Entity::group().at(Transform3D::from_position(Vec3::new(2.0, 0.0, 0.0))),
        );
        let child = world.add_entity(
            make_test_entity()
                .at(Transform3D::from_position(Vec3::new(0.0, 1.0, 0.0)))
                .with_parent(group),
        );

        assert!(vec_approx_eq(world.world_position(child).unwrap(), Vec3::new(2.0, 1.0, 0.0)));
    }

    #[test]
    fn test_world_matrix_parent_rotation_moves_child() {
        let mut world = World::new();
        let group = world.add_entity(Entity::group().at(Transform3D::from_position_rotation(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2),
        )));
        let child = world.add_entity(
            make_test_entity()
                .at(Transform3D::from_position(Vec3::X))
                .with_parent(group),
        );

        assert!(vec_approx_eq(world.world_position(child).unwrap(), Vec3::Y));
    }

    #[test]
    fn test_world_matrix_survives_cycle() {
        let mut world = World::new();
        let a = world.add_entity(Entity::group());
        let b = world.add_entity(Entity::group().with_parent(a));
        world.get_entity_mut(a).unwrap().parent = Some(b);

        assert!(world.world_matrix(a).is_some());
    }

    #[test]
    fn test_advance_spin_accumulates() {
        let mut world = World::new();
        let spinning = world.add_entity(make_test_entity().with_spin(Vec3::new(0.001, 0.005, 0.0)));
        let still = world.add_entity(make_test_entity());

        for _ in 0..1000 {
            assert_eq!(world.advance_spin(1.0), 1);
        }

        let rotation = world.get_entity(spinning).unwrap().transform.rotation;
        assert!((rotation.x - 1.0).abs() < 1e-3);
        assert!((rotation.y - 5.0).abs() < 1e-3);
        assert_eq!(rotation.z, 0.0);
        assert_eq!(world.get_entity(still).unwrap().transform.rotation, Vec3::ZERO);
    }

    #[test]
    fn test_apply_scroll_spin() {
        let mut world = World::new();
        let key = world.add_entity(make_test_entity().with_scroll_spin(Vec3::new(0.05, 0.0, 0.0)));

        world.apply_scroll_spin(0);
        assert_eq!(world.get_entity(key).unwrap().transform.rotation, Vec3::ZERO);

        world.apply_scroll_spin(3);
        assert!((world.get_entity(key).unwrap().transform.rotation.x - 0.15).abs() < EPSILON);
    }

    #[test]
    fn test_dirty_tracking() {
        let mut world = World::new();
        let key = world.add_entity(make_test_entity().with_spin(Vec3::Y));
        assert!(world.has_dirty_entities());

        world.clear_all_dirty();
        assert!(!world.has_dirty_entities());

        world.advance_spin(1.0);
        assert!(world.get_entity(key).unwrap().is_dirty());
    }

    #[test]
    fn test_lights_and_background() {
        let mut world = World::new();
        world.add_light(Light::ambient(0.15));
        world.add_light(Light::point(Vec3::new(13.0, 5.0, 15.0), 1.5));
        assert_eq!(world.lights().len(), 2);

        world.clear();
        assert!(world.lights().is_empty());
        assert!(world.is_empty());
    }
}
