//! Entity and Material types
//!
//! An Entity represents an object in the scene with a transform, an optional shape,
//! and a material. Entities without a shape are group nodes that only carry a
//! transform for their children.

use std::collections::HashSet;
use std::sync::Arc;
use bitflags::bitflags;
use moonscroll_math::{TriangleMesh, Vec3};
use serde::{Serialize, Deserialize};
use crate::{EntityKey, TextureHandle, Transform3D};

bitflags! {
    /// Flags indicating which parts of an entity have changed and need updating
    ///
    /// Used for dirty tracking so the renderer only re-uploads geometry and
    /// material data for entities that actually changed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Transform (position, rotation, scale) has changed
        const TRANSFORM = 1 << 0;
        /// Mesh/shape has changed
        const MESH = 1 << 1;
        /// Material has changed
        const MATERIAL = 1 << 2;
        /// All flags set - entity needs full rebuild
        const ALL = Self::TRANSFORM.bits() | Self::MESH.bits() | Self::MATERIAL.bits();
    }
}

/// How a surface responds to scene lights
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shading {
    /// Flat base colour (and texture), lights are ignored
    #[default]
    Unlit,
    /// Diffuse response to the point and ambient lights
    Lit,
}

/// Convert one sRGB-encoded channel to linear light
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a `0xRRGGBB` colour to linear RGB
pub fn linear_rgb_from_hex(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

/// Surface appearance of an entity
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Base color as linear RGBA (each component 0.0-1.0)
    pub base_color: [f32; 4],
    /// Colour map multiplied with the base colour
    pub texture: Option<TextureHandle>,
    /// Lighting model
    pub shading: Shading,
}

impl Default for Material {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Material {
    /// Create a new unlit material with the given RGBA color
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            base_color: [r, g, b, a],
            texture: None,
            shading: Shading::Unlit,
        }
    }

    /// Create a new opaque material with the given RGB color
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create an opaque material from a `0xRRGGBB` sRGB colour
    pub fn from_hex(hex: u32) -> Self {
        let [r, g, b] = linear_rgb_from_hex(hex);
        Self::from_rgb(r, g, b)
    }

    /// Use a texture as colour map
    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Respond to scene lights
    pub fn lit(mut self) -> Self {
        self.shading = Shading::Lit;
        self
    }

    /// White material
    pub const WHITE: Self = Self {
        base_color: [1.0, 1.0, 1.0, 1.0],
        texture: None,
        shading: Shading::Unlit,
    };
}

/// Reference to a shape - either shared (Arc) or owned (Box)
///
/// Use `Shared` when multiple entities use the same geometry (the starfield shares
/// one sphere). Use `Owned` when an entity has geometry of its own.
pub enum ShapeRef {
    /// A shared reference to a shape (multiple entities can share this)
    Shared(Arc<dyn TriangleMesh>),
    /// An owned shape (unique to this entity)
    Owned(Box<dyn TriangleMesh>),
}

impl ShapeRef {
    /// Create a shared shape reference
    pub fn shared<S: TriangleMesh + 'static>(shape: S) -> Self {
        Self::Shared(Arc::new(shape))
    }

    /// Create an owned shape reference
    pub fn owned<S: TriangleMesh + 'static>(shape: S) -> Self {
        Self::Owned(Box::new(shape))
    }

    /// Get a reference to the underlying shape
    pub fn as_shape(&self) -> &dyn TriangleMesh {
        match self {
            ShapeRef::Shared(arc) => arc.as_ref(),
            ShapeRef::Owned(boxed) => boxed.as_ref(),
        }
    }

    /// Another reference to the same geometry, `None` for owned shapes
    pub fn share(&self) -> Option<Self> {
        match self {
            ShapeRef::Shared(arc) => Some(ShapeRef::Shared(Arc::clone(arc))),
            ShapeRef::Owned(_) => None,
        }
    }

    /// Address of the geometry, equal for every reference to the same `Shared` shape
    ///
    /// Used as a GPU buffer cache key.
    pub fn geometry_id(&self) -> usize {
        match self {
            ShapeRef::Shared(arc) => Arc::as_ptr(arc) as *const () as usize,
            ShapeRef::Owned(boxed) => boxed.as_ref() as *const dyn TriangleMesh as *const () as usize,
        }
    }
}

/// An entity in the scene
///
/// Each entity has:
/// - An optional name (for lookup by name)
/// - Tags (for categorization and filtering)
/// - A transform relative to its parent
/// - An optional shape (`None` for group nodes)
/// - A material (visual properties)
/// - An optional parent key
/// - A per-tick rotation delta (`spin`) and a per-scroll-event delta (`scroll_spin`)
/// - Dirty flags (for change tracking)
pub struct Entity {
    /// Optional name for this entity (for lookup)
    pub name: Option<String>,
    /// Tags for categorization (e.g., "star", "ring")
    pub tags: HashSet<String>,
    /// The entity's transform relative to its parent
    pub transform: Transform3D,
    /// The entity's shape, `None` for group nodes
    pub shape: Option<ShapeRef>,
    /// The entity's material
    pub material: Material,
    /// Parent in the scene graph
    pub parent: Option<EntityKey>,
    /// Radians added to the rotation on every tick
    pub spin: Vec3,
    /// Radians added to the rotation on every scroll event
    pub scroll_spin: Vec3,
    /// Dirty flags for change tracking (what needs rebuilding)
    dirty: DirtyFlags,
}

impl Entity {
    /// Create a new entity with the given shape
    pub fn new(shape: ShapeRef) -> Self {
        Self::with_material(shape, Material::default())
    }

    /// Create a group node without geometry
    pub fn group() -> Self {
        Self {
            name: None,
            tags: HashSet::new(),
            transform: Transform3D::identity(),
            shape: None,
            material: Material::default(),
            parent: None,
            spin: Vec3::ZERO,
            scroll_spin: Vec3::ZERO,
            dirty: DirtyFlags::ALL, // New entities are dirty
        }
    }

    /// Create a new entity with shape and material
    pub fn with_material(shape: ShapeRef, material: Material) -> Self {
        Self {
            shape: Some(shape),
            material,
            ..Self::group()
        }
    }

    /// Create a new entity with shape, transform, and material
    pub fn with_transform(shape: ShapeRef, transform: Transform3D, material: Material) -> Self {
        Self {
            transform,
            ..Self::with_material(shape, material)
        }
    }

    /// Set the name of this entity (for lookup)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a tag to this entity
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Check if this entity has a specific tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Set the transform relative to the parent
    pub fn at(mut self, transform: Transform3D) -> Self {
        self.transform = transform;
        self
    }

    /// Attach this entity to a parent
    pub fn with_parent(mut self, parent: EntityKey) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the per-tick rotation delta
    pub fn with_spin(mut self, spin: Vec3) -> Self {
        self.spin = spin;
        self
    }

    /// Set the per-scroll-event rotation delta
    pub fn with_scroll_spin(mut self, scroll_spin: Vec3) -> Self {
        self.scroll_spin = scroll_spin;
        self
    }

    /// Whether the frame driver rotates this entity
    #[inline]
    pub fn is_animated(&self) -> bool {
        !self.spin.is_zero()
    }

    /// Get the shape of this entity, if it has one
    pub fn shape(&self) -> Option<&dyn TriangleMesh> {
        self.shape.as_ref().map(ShapeRef::as_shape)
    }

    /// Add `delta` to the rotation and mark the transform dirty
    pub fn rotate(&mut self, delta: Vec3) {
        if delta.is_zero() {
            return;
        }
        self.transform.rotate(delta);
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    // --- Dirty tracking methods ---

    /// Check if this entity has any dirty flags set
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Get the current dirty flags
    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Mark this entity as dirty with the given flags
    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Clear all dirty flags
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }

    /// Set the position and mark the transform as dirty
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// Set the transform and mark it as dirty
    pub fn set_transform(&mut self, transform: Transform3D) {
        self.transform = transform;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// Set the material and mark it as dirty
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
        self.mark_dirty(DirtyFlags::MATERIAL);
    }
}
