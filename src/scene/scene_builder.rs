//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for building the Moonscroll scene: a scattered star
//! field, torus rings, a textured cube, the moon, lights and a background.

use std::sync::Arc;

use moonscroll_core::{
    Entity, EntityKey, Light, Material, ShapeRef, ShapeTemplate, TextureCache, Transform3D, World,
};
use moonscroll_math::Vec3;
use moonscroll_render::PerspectiveCamera;
use rand::Rng;

use crate::config::{
    AppConfig, CameraConfig, CubeConfig, LightsConfig, MoonConfig, RingConfig, StarfieldConfig,
};

/// Keys of the entities built by name
#[derive(Debug, Clone, Default)]
pub struct SceneHandles {
    pub stars: Vec<EntityKey>,
    pub group: Option<EntityKey>,
    pub rings: Vec<EntityKey>,
    pub cube: Option<EntityKey>,
    pub moon: Option<EntityKey>,
}

/// A fully built scene
pub struct BuiltScene {
    pub world: World,
    pub camera: PerspectiveCamera,
    pub handles: SceneHandles,
}

/// Builder for constructing the scene
///
/// # Example
/// ```ignore
/// let mut textures = TextureCache::new();
/// let scene = SceneBuilder::new()
///     .add_starfield(&StarfieldConfig::default(), &mut rand::thread_rng())
///     .add_group(Vec3::new(2.0, 0.0, 0.0))
///     .add_ring(&RingConfig::default())
///     .add_moon(&MoonConfig::default(), &mut textures)
///     .build();
/// ```
pub struct SceneBuilder {
    world: World,
    camera: PerspectiveCamera,
    handles: SceneHandles,
}

impl SceneBuilder {
    /// Create a new scene builder
    pub fn new() -> Self {
        Self {
            world: World::new(),
            camera: PerspectiveCamera::default(),
            handles: SceneHandles::default(),
        }
    }

    /// Create a scene builder with a pre-allocated world capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            world: World::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Build the whole scene described by `config`
    ///
    /// Texture loads are requested from `textures` and finish in the background.
    pub fn from_config<R: Rng + ?Sized>(
        config: &AppConfig,
        textures: &mut TextureCache,
        rng: &mut R,
    ) -> BuiltScene {
        let capacity = config.starfield.count + config.rings.len() + 3;
        let mut builder = Self::with_capacity(capacity)
            .with_camera(&config.camera)
            .add_starfield(&config.starfield, rng)
            .add_group(Vec3::from_array(config.group.position));

        for ring in &config.rings {
            builder = builder.add_ring(ring);
        }

        let scene = builder
            .add_cube(&config.cube, textures)
            .add_moon(&config.moon, textures)
            .add_lights(&config.lights)
            .with_background(config.rendering.background_texture.as_deref(), textures)
            .build();

        log::info!(
            "Built scene: {} entities ({} stars, {} rings), {} lights",
            scene.world.entity_count(),
            scene.handles.stars.len(),
            scene.handles.rings.len(),
            scene.world.lights().len()
        );
        scene
    }

    /// Set the camera projection and start pose
    pub fn with_camera(mut self, config: &CameraConfig) -> Self {
        self.camera = PerspectiveCamera::new(config.fov, 1.0, config.near, config.far).with_start(
            Vec3::from_array(config.start_position),
            Vec3::from_array(config.start_rotation),
        );
        self
    }

    /// Scatter `count` stars uniformly in a cube of width `spread` around the origin
    ///
    /// Every star shares one sphere mesh. Positions may coincide.
    pub fn add_starfield<R: Rng + ?Sized>(mut self, config: &StarfieldConfig, rng: &mut R) -> Self {
        let template = ShapeTemplate::sphere_with_segments(
            config.radius,
            config.width_segments,
            config.height_segments,
        );
        let shape = ShapeRef::Shared(Arc::from(template.create_shape()));
        let material = Material::from_hex(config.color.0);
        let half = config.spread.abs() / 2.0;

        self.handles.stars.reserve(config.count);
        for i in 0..config.count {
            let position = Vec3::new(
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
            );
            let Some(star_shape) = shape.share() else {
                continue;
            };
            let key = self.world.add_entity(
                Entity::with_transform(star_shape, Transform3D::from_position(position), material.clone())
                    .with_name(format!("star_{}", i))
                    .with_tag("star"),
            );
            self.handles.stars.push(key);
        }

        self
    }

    /// Add the group node that rings and the cube may be parented to
    pub fn add_group(mut self, position: Vec3) -> Self {
        let key = self.world.add_entity(
            Entity::group()
                .at(Transform3D::from_position(position))
                .with_name("group"),
        );
        self.handles.group = Some(key);
        self
    }

    /// Add a torus ring
    pub fn add_ring(mut self, config: &RingConfig) -> Self {
        let template = ShapeTemplate::torus(
            config.radius,
            config.tube,
            config.radial_segments,
            config.tubular_segments,
        );
        let transform = Transform3D::from_position_rotation(Vec3::ZERO, Vec3::from_array(config.rotation));
        let entity = Entity::with_transform(
            ShapeRef::Owned(template.create_shape()),
            transform,
            Material::from_hex(config.color.0),
        )
        .with_name(format!("ring_{}", self.handles.rings.len()))
        .with_tag("ring")
        .with_spin(Vec3::from_array(config.spin));

        let key = self.world.add_entity(self.grouped(entity, config.in_group));
        self.handles.rings.push(key);
        self
    }

    /// Add the textured cube
    pub fn add_cube(mut self, config: &CubeConfig, textures: &mut TextureCache) -> Self {
        let mut material = Material::WHITE;
        if let Some(path) = texture_path(config.texture.as_deref()) {
            material = material.with_texture(textures.request(path));
        }

        let transform = Transform3D::from_position_rotation(Vec3::ZERO, Vec3::from_array(config.rotation));
        let entity = Entity::with_transform(
            ShapeRef::Owned(ShapeTemplate::cube(config.size).create_shape()),
            transform,
            material,
        )
        .with_name("cube")
        .with_spin(Vec3::from_array(config.spin))
        .with_scroll_spin(Vec3::from_array(config.scroll_spin));

        let key = self.world.add_entity(self.grouped(entity, config.in_group));
        self.handles.cube = Some(key);
        self
    }

    /// Add the moon sphere
    pub fn add_moon(mut self, config: &MoonConfig, textures: &mut TextureCache) -> Self {
        let mut material = Material::from_hex(config.color.0);
        if config.lit {
            material = material.lit();
        }
        if let Some(path) = texture_path(config.texture.as_deref()) {
            material = material.with_texture(textures.request(path));
        }

        let template = ShapeTemplate::sphere_with_segments(
            config.radius,
            config.width_segments,
            config.height_segments,
        );
        let key = self.world.add_entity(
            Entity::with_transform(
                ShapeRef::Owned(template.create_shape()),
                Transform3D::from_position(Vec3::from_array(config.position)),
                material,
            )
            .with_name("moon")
            .with_spin(Vec3::from_array(config.spin))
            .with_scroll_spin(Vec3::from_array(config.scroll_spin)),
        );
        self.handles.moon = Some(key);
        self
    }

    /// Add the point and ambient lights
    pub fn add_lights(mut self, config: &LightsConfig) -> Self {
        self.world.add_light(
            Light::point(Vec3::from_array(config.point_position), config.point_intensity)
                .with_color(config.point_color.to_linear()),
        );
        self.world.add_light(
            Light::ambient(config.ambient_intensity).with_color(config.ambient_color.to_linear()),
        );
        self
    }

    /// Request the background texture
    pub fn with_background(mut self, path: Option<&str>, textures: &mut TextureCache) -> Self {
        let handle = texture_path(path).map(|p| textures.request(p));
        self.world.set_background(handle);
        self
    }

    /// Add a custom entity to the scene
    ///
    /// For entities that don't fit the standard patterns.
    pub fn add_entity(mut self, entity: Entity) -> Self {
        self.world.add_entity(entity);
        self
    }

    /// Build the scene
    pub fn build(self) -> BuiltScene {
        BuiltScene {
            world: self.world,
            camera: self.camera,
            handles: self.handles,
        }
    }

    fn grouped(&self, entity: Entity, in_group: bool) -> Entity {
        match self.handles.group {
            Some(group) if in_group => entity.with_parent(group),
            None if in_group => {
                log::warn!("No group node for {:?}, adding at top level", entity.name);
                entity
            }
            _ => entity,
        }
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configured texture path, with an empty string meaning none
fn texture_path(path: Option<&str>) -> Option<&str> {
    path.map(str::trim).filter(|p| !p.is_empty())
}
