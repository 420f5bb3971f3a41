use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Rect;
use crate::paint::Color;
use crate::texture::TextureUpload;

use super::common::{premul_alpha_blend, QuadVertex, ViewportUniform, QUAD_INDICES, QUAD_VERTICES};
use super::{RenderCtx, RenderTarget};

// ── texture ───────────────────────────────────────────────────────────────

/// A sampled GPU texture bound for the sprite pipeline.
///
/// Released when dropped.
pub struct Texture {
    _texture: wgpu::Texture,
    _view: wgpu::TextureView,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
    optimized: bool,
}

impl Texture {
    /// Pixel dimensions.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The whole texture as a texel rect.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Whether the pixels were converted to the surface layout before upload.
    #[inline]
    pub fn is_optimized(&self) -> bool {
        self.optimized
    }
}

// ── draw input ────────────────────────────────────────────────────────────

/// One textured quad: `src` in texels, `dst` in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpriteQuad {
    pub src: Rect,
    pub dst: Rect,
}

/// Quads sampling the same texture, drawn in order.
pub struct SpriteBatch<'t> {
    pub texture: &'t Texture,
    pub quads: Vec<SpriteQuad>,
    pub tint: Color,
}

impl<'t> SpriteBatch<'t> {
    pub fn new(texture: &'t Texture) -> Self {
        Self { texture, quads: Vec::new(), tint: Color::WHITE }
    }

    /// Draws the whole texture at `(x, y)`, unscaled.
    pub fn single(texture: &'t Texture, x: f32, y: f32) -> Self {
        let src = texture.rect();
        let mut batch = Self::new(texture);
        batch.push(src, src.at(x, y));
        batch
    }

    pub fn push(&mut self, src: Rect, dst: Rect) {
        self.quads.push(SpriteQuad { src, dst });
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Instanced textured-quad renderer.
///
/// Bind group 0 holds the viewport uniform, group 1 the texture + sampler of
/// the batch being drawn. All batches of a frame share one instance buffer and
/// a single render pass.
#[derive(Default)]
pub struct SpriteRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bindings: Option<SpriteBindings>,
    viewport_ubo: Option<wgpu::Buffer>,
    viewport_bind_group: Option<wgpu::BindGroup>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,
    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads `upload` and binds it for this renderer.
    pub fn create_texture(&mut self, ctx: &RenderCtx<'_>, upload: &TextureUpload) -> Texture {
        let size = wgpu::Extent3d {
            width: upload.width,
            height: upload.height,
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("lumen sprite texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: upload.format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &upload.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(upload.bytes_per_row()),
                rows_per_image: Some(upload.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bindings = self.bindings.get_or_insert_with(|| SpriteBindings::new(ctx.device));
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lumen sprite texture bind group"),
            layout: &bindings.texture_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&bindings.sampler),
                },
            ],
        });

        Texture {
            _texture: texture,
            _view: view,
            bind_group,
            width: upload.width,
            height: upload.height,
            optimized: upload.optimized,
        }
    }

    /// Draws `batches` in order on top of the current target contents.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, batches: &[SpriteBatch<'_>]) {
        let mut instances: Vec<SpriteInstance> = Vec::new();
        let mut ranges: Vec<(usize, std::ops::Range<u32>)> = Vec::with_capacity(batches.len());

        for (i, batch) in batches.iter().enumerate() {
            let start = instances.len() as u32;
            let (tw, th) = batch.texture.size();
            instances.extend(
                batch
                    .quads
                    .iter()
                    .filter(|q| !q.dst.is_empty() && !q.src.is_empty())
                    .map(|q| SpriteInstance::new(*q, tw, th, batch.tint)),
            );
            let end = instances.len() as u32;
            if end > start {
                ranges.push((i, start..end));
            }
        }

        if instances.is_empty() || !ctx.viewport.is_valid() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_viewport_binding(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_instance_capacity(ctx, instances.len());

        let Some(ubo) = self.viewport_ubo.as_ref() else { return; };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(ctx.viewport)));

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return; };
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&instances));

        let Some(pipeline)    = self.pipeline.as_ref()            else { return; };
        let Some(viewport_bg) = self.viewport_bind_group.as_ref() else { return; };
        let Some(quad_vbo)    = self.quad_vbo.as_ref()            else { return; };
        let Some(quad_ibo)    = self.quad_ibo.as_ref()            else { return; };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lumen sprite pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, viewport_bg, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);

        for (i, range) in ranges {
            rpass.set_bind_group(1, &batches[i].texture.bind_group, &[]);
            rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, range);
        }
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bindings = self.bindings.get_or_insert_with(|| SpriteBindings::new(ctx.device));

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lumen sprite shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lumen sprite pipeline layout"),
            bind_group_layouts: &[&bindings.viewport_bgl, &bindings.texture_bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("lumen sprite pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), SpriteInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_viewport_binding(&mut self, ctx: &RenderCtx<'_>) {
        if self.viewport_bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let bindings = self.bindings.get_or_insert_with(|| SpriteBindings::new(ctx.device));

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumen sprite viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lumen sprite viewport bind group"),
            layout: &bindings.viewport_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(ubo);
        self.viewport_bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }
        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lumen sprite quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lumen sprite quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(64);
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumen sprite instance vbo"),
            size: (new_cap * std::mem::size_of::<SpriteInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

// ── bindings ──────────────────────────────────────────────────────────────

/// Layouts and sampler shared by the pipeline and every texture.
///
/// Created once; they do not depend on the surface format.
struct SpriteBindings {
    viewport_bgl: wgpu::BindGroupLayout,
    texture_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl SpriteBindings {
    fn new(device: &wgpu::Device) -> Self {
        let viewport_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lumen sprite viewport bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: ViewportUniform::min_binding_size(),
                },
                count: None,
            }],
        });

        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lumen sprite texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        // Sprites are drawn texel-aligned; nearest keeps tiles and glyphs crisp.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("lumen sprite sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Self { viewport_bgl, texture_bgl, sampler }
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  tint     [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct SpriteInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min:  [f32; 2],
    uv_max:  [f32; 2],
    tint:    [f32; 4],
}

impl SpriteInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // tint
    ];

    /// Maps a texel-space `src` onto normalized UVs for a `tex_w × tex_h` texture.
    fn new(quad: SpriteQuad, tex_w: u32, tex_h: u32, tint: Color) -> Self {
        let tw = tex_w.max(1) as f32;
        let th = tex_h.max(1) as f32;
        let src_max = quad.src.max();
        let dst_max = quad.dst.max();
        Self {
            dst_min: [quad.dst.origin.x, quad.dst.origin.y],
            dst_max: [dst_max.x, dst_max.y],
            uv_min:  [quad.src.origin.x / tw, quad.src.origin.y / th],
            uv_max:  [src_max.x / tw, src_max.y / th],
            tint:    tint.to_array(),
        }
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_is_48_bytes() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 48);
    }

    #[test]
    fn full_texture_maps_to_unit_uvs() {
        let quad = SpriteQuad {
            src: Rect::from_size(64, 16),
            dst: Rect::new(10.0, 10.0, 64.0, 16.0),
        };
        let inst = SpriteInstance::new(quad, 64, 16, Color::WHITE);
        assert_eq!(inst.uv_min, [0.0, 0.0]);
        assert_eq!(inst.uv_max, [1.0, 1.0]);
        assert_eq!(inst.dst_min, [10.0, 10.0]);
        assert_eq!(inst.dst_max, [74.0, 26.0]);
        assert_eq!(inst.tint, [1.0; 4]);
    }

    #[test]
    fn sub_rect_maps_to_fractional_uvs() {
        // Second 32px tile of a 128x64 sheet.
        let quad = SpriteQuad {
            src: Rect::new(32.0, 0.0, 32.0, 32.0),
            dst: Rect::new(0.0, 0.0, 32.0, 32.0),
        };
        let inst = SpriteInstance::new(quad, 128, 64, Color::WHITE);
        assert_eq!(inst.uv_min, [0.25, 0.0]);
        assert_eq!(inst.uv_max, [0.5, 0.5]);
    }
}
