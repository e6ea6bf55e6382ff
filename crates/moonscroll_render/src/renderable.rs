//! GPU resources mirrored from the World
//!
//! [`RenderableScene`] keeps one vertex/index buffer pair per distinct geometry
//! (every star shares one), one uniform buffer and bind group per drawn entity, and
//! one GPU texture per loaded image. [`RenderableScene::sync`] brings it up to date
//! with the world before each draw.

use std::collections::{HashMap, HashSet};

use wgpu::util::DeviceExt;
use moonscroll_core::{EntityKey, TextureCache, TextureHandle, TextureId, TriangleMesh, World};

use crate::pipeline::{BackgroundPipeline, ObjectUniforms, Vertex};
use crate::texture::{create_sampler, GpuTexture};

/// Uploaded geometry
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, mesh: &dyn TriangleMesh) -> Self {
        let vertices: Vec<Vertex> = mesh.vertices().iter().map(Vertex::from).collect();
        let indices = mesh.index_list();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }
}

struct GpuObject {
    geometry_id: usize,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    /// Texture bound in `bind_group`, `None` for the default white texture
    bound_texture: Option<TextureId>,
}

/// GPU mirror of the drawable entities in a World
pub struct RenderableScene {
    meshes: HashMap<usize, GpuMesh>,
    objects: HashMap<EntityKey, GpuObject>,
    textures: HashMap<TextureId, GpuTexture>,
    default_texture: GpuTexture,
    sampler: wgpu::Sampler,
    background: Option<TextureId>,
}

impl RenderableScene {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self {
            meshes: HashMap::new(),
            objects: HashMap::new(),
            textures: HashMap::new(),
            default_texture: GpuTexture::white(device, queue),
            sampler: create_sampler(device, "Object Sampler"),
            background: None,
        }
    }

    /// Bring GPU resources up to date with `world`
    ///
    /// Uploads new geometry and finished textures, creates or rebinds per-entity
    /// resources, rewrites object uniforms when anything in the world is dirty, and
    /// releases resources for entities that are gone.
    pub fn sync(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        world: &World,
        textures: &TextureCache,
        object_layout: &wgpu::BindGroupLayout,
        background: &mut BackgroundPipeline,
    ) {
        self.upload_textures(device, queue, world, textures);

        let rewrite_all = world.has_dirty_entities();
        let mut live = HashSet::with_capacity(self.objects.len());
        let mut used_geometry = HashSet::new();

        for (key, entity) in world.iter() {
            let Some(shape) = entity.shape.as_ref() else {
                continue;
            };
            live.insert(key);

            let geometry_id = shape.geometry_id();
            used_geometry.insert(geometry_id);
            self.meshes
                .entry(geometry_id)
                .or_insert_with(|| GpuMesh::upload(device, shape.as_shape()));

            let wanted_texture = entity
                .material
                .texture
                .as_ref()
                .map(TextureHandle::id)
                .filter(|id| self.textures.contains_key(id));

            let Some(model_matrix) = world.world_matrix(key) else {
                continue;
            };
            let uniforms = ObjectUniforms::new(model_matrix, &entity.material);

            match self.objects.get_mut(&key) {
                Some(object) if object.bound_texture == wanted_texture => {
                    object.geometry_id = geometry_id;
                    if rewrite_all {
                        queue.write_buffer(&object.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
                    }
                }
                Some(object) => {
                    let view = texture_view(&self.textures, &self.default_texture, wanted_texture);
                    object.geometry_id = geometry_id;
                    object.bind_group = object_bind_group(
                        device,
                        object_layout,
                        &object.uniform_buffer,
                        view,
                        &self.sampler,
                    );
                    object.bound_texture = wanted_texture;
                    queue.write_buffer(&object.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
                }
                None => {
                    let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Object Uniform Buffer"),
                        contents: bytemuck::bytes_of(&uniforms),
                        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    });
                    let view = texture_view(&self.textures, &self.default_texture, wanted_texture);
                    let bind_group =
                        object_bind_group(device, object_layout, &uniform_buffer, view, &self.sampler);
                    self.objects.insert(
                        key,
                        GpuObject {
                            geometry_id,
                            uniform_buffer,
                            bind_group,
                            bound_texture: wanted_texture,
                        },
                    );
                }
            }
        }

        self.objects.retain(|key, _| live.contains(key));
        self.meshes.retain(|id, _| used_geometry.contains(id));

        let wanted_background = world
            .background()
            .map(TextureHandle::id)
            .filter(|id| self.textures.contains_key(id));
        if wanted_background != self.background {
            match wanted_background.and_then(|id| self.textures.get(&id)) {
                Some(texture) => background.set_texture(device, texture),
                None => background.clear_texture(),
            }
            self.background = wanted_background;
        }
    }

    fn upload_textures(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        world: &World,
        textures: &TextureCache,
    ) {
        let referenced = world
            .iter()
            .filter_map(|(_, e)| e.material.texture.as_ref())
            .chain(world.background());

        for handle in referenced {
            if self.textures.contains_key(&handle.id()) {
                continue;
            }
            if let Some(data) = textures.get(handle) {
                let label = handle.path().display().to_string();
                self.textures
                    .insert(handle.id(), GpuTexture::from_data(device, queue, &data, &label));
                log::info!("Uploaded texture {} ({}x{})", label, data.width, data.height);
            }
        }
    }

    /// Geometry and bind group of every drawable entity
    pub fn draw_items(&self) -> impl Iterator<Item = (&GpuMesh, &wgpu::BindGroup)> {
        self.objects.values().filter_map(|object| {
            self.meshes
                .get(&object.geometry_id)
                .map(|mesh| (mesh, &object.bind_group))
        })
    }

    /// Number of drawable entities
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of distinct geometries uploaded
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}

/// View of an uploaded texture, or of the default white texture
fn texture_view<'a>(
    textures: &'a HashMap<TextureId, GpuTexture>,
    default_texture: &'a GpuTexture,
    texture: Option<TextureId>,
) -> &'a wgpu::TextureView {
    texture
        .and_then(|id| textures.get(&id))
        .map_or(&default_texture.view, |t| &t.view)
}

fn object_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniform_buffer: &wgpu::Buffer,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Object Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
