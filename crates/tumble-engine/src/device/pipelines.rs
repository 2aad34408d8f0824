use wgpu::util::DeviceExt;

use crate::frame::FrameUniform;
use crate::render::{Geometry, InitError, PipelineBinding, PipelineSet, FLAT_VERTEX_COUNT};

use super::assets::{FlatVertex, MeshVertex, SceneAssets, TextureData};
use super::program::{FLAT_PROGRAM, MESH_PROGRAM};

/// wgpu objects behind a `PipelineBinding`.
#[derive(Debug)]
pub struct WgpuHandles {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: Option<wgpu::Buffer>,

    /// Frame constants, rewritten every tick before the draw.
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) uniform_bind_group: wgpu::BindGroup,

    pub(crate) texture_bind_group: Option<wgpu::BindGroup>,
}

pub(crate) struct PipelineTargets {
    pub color_format: wgpu::TextureFormat,
    pub depth_format: wgpu::TextureFormat,
    pub sample_count: u32,
}

impl PipelineTargets {
    fn multisample(&self) -> wgpu::MultisampleState {
        wgpu::MultisampleState {
            count: self.sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        }
    }
}

/// Builds both bindings. Any failure aborts startup.
///
/// Shader and pipeline creation run inside a validation error scope so a WGSL
/// compile error or an invalid pipeline comes back as [`InitError::Pipeline`]
/// instead of reaching the device's uncaptured-error handler.
pub(crate) fn build_pipelines(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    targets: &PipelineTargets,
    assets: &SceneAssets,
) -> Result<PipelineSet<WgpuHandles>, InitError> {
    if let Some(problem) = assets.mesh.problem() {
        return Err(InitError::Asset(problem));
    }
    if let Some(problem) = assets.texture.problem() {
        return Err(InitError::Asset(problem));
    }

    // An early return drops the guard, which closes the scope.
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("tumble frame bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: std::num::NonZeroU64::new(FrameUniform::SIZE),
            },
            count: None,
        }],
    });

    let mesh = build_mesh_binding(device, queue, targets, &uniform_layout, assets)?;
    let flat = build_flat_binding(device, targets, &uniform_layout, &assets.triangle)?;

    scope_result(pollster::block_on(scope.pop()))?;
    PipelineSet::new(mesh, flat)
}

fn scope_result(captured: Option<wgpu::Error>) -> Result<(), InitError> {
    match captured {
        None => Ok(()),
        Some(err) => {
            log::error!("pipeline build failed: {err}");
            Err(InitError::Pipeline(err))
        }
    }
}

fn build_mesh_binding(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    targets: &PipelineTargets,
    uniform_layout: &wgpu::BindGroupLayout,
    assets: &SceneAssets,
) -> Result<PipelineBinding<WgpuHandles>, InitError> {
    let shader = MESH_PROGRAM.create_module(device)?;

    let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("tumble mesh texture bgl"),
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

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("tumble mesh pipeline layout"),
        bind_group_layouts: &[uniform_layout, &texture_layout],
        immediate_size: 0,
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("tumble mesh pipeline"),
        layout: Some(&layout),

        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some(MESH_PROGRAM.vertex_entry),
            compilation_options: Default::default(),
            buffers: &[MeshVertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some(MESH_PROGRAM.fragment_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: targets.color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        // Clip depth is 0..1 (math::CLIP_DEPTH_RANGE); nearer fragments win.
        depth_stencil: Some(wgpu::DepthStencilState {
            format: targets.depth_format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: targets.multisample(),
        multiview_mask: None,
        cache: None,
    });

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("tumble mesh vbo"),
        contents: bytemuck::cast_slice(&assets.mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("tumble mesh ibo"),
        contents: bytemuck::cast_slice(&assets.mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    let (uniform_buffer, uniform_bind_group) = create_uniform(device, uniform_layout, "mesh");
    let texture_bind_group = create_texture_bind_group(device, queue, &texture_layout, &assets.texture);

    Ok(PipelineBinding {
        label: "mesh",
        handles: WgpuHandles {
            pipeline,
            vertex_buffer,
            index_buffer: Some(index_buffer),
            uniform_buffer,
            uniform_bind_group,
            texture_bind_group: Some(texture_bind_group),
        },
        geometry: Geometry::Indexed {
            index_count: assets.mesh.indices.len() as u32,
        },
        textured: true,
    })
}

fn build_flat_binding(
    device: &wgpu::Device,
    targets: &PipelineTargets,
    uniform_layout: &wgpu::BindGroupLayout,
    triangle: &[FlatVertex; 3],
) -> Result<PipelineBinding<WgpuHandles>, InitError> {
    let shader = FLAT_PROGRAM.create_module(device)?;

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("tumble flat pipeline layout"),
        bind_group_layouts: &[uniform_layout],
        immediate_size: 0,
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("tumble flat pipeline"),
        layout: Some(&layout),

        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some(FLAT_PROGRAM.vertex_entry),
            compilation_options: Default::default(),
            buffers: &[FlatVertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some(FLAT_PROGRAM.fragment_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: targets.color_format,
                blend: Some(wgpu::BlendState::REPLACE),
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

        // The pass always carries the depth attachment; the triangle ignores it.
        depth_stencil: Some(wgpu::DepthStencilState {
            format: targets.depth_format,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Always,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: targets.multisample(),
        multiview_mask: None,
        cache: None,
    });

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("tumble flat vbo"),
        contents: bytemuck::cast_slice(triangle),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let (uniform_buffer, uniform_bind_group) = create_uniform(device, uniform_layout, "flat");

    Ok(PipelineBinding {
        label: "flat",
        handles: WgpuHandles {
            pipeline,
            vertex_buffer,
            index_buffer: None,
            uniform_buffer,
            uniform_bind_group,
            texture_bind_group: None,
        },
        geometry: Geometry::Vertices {
            vertex_count: FLAT_VERTEX_COUNT,
        },
        textured: false,
    })
}

fn create_uniform(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    name: &str,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(&format!("tumble {name} frame ubo")),
        size: FrameUniform::SIZE,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("tumble {name} frame bind group")),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });

    (buffer, bind_group)
}

fn create_texture_bind_group(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    data: &TextureData,
) -> wgpu::BindGroup {
    let extent = wgpu::Extent3d {
        width: data.width,
        height: data.height,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("tumble mesh texture"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &data.rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * data.width),
            rows_per_image: Some(data.height),
        },
        extent,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("tumble mesh sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    });

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("tumble mesh texture bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn validation_error(description: &str) -> wgpu::Error {
        wgpu::Error::Validation {
            source: Box::new(std::fmt::Error),
            description: description.to_string(),
        }
    }

    #[test]
    fn pipelines_share_the_target_sample_count() {
        let targets = PipelineTargets {
            color_format: wgpu::TextureFormat::Bgra8UnormSrgb,
            depth_format: wgpu::TextureFormat::Depth32Float,
            sample_count: 4,
        };
        let state = targets.multisample();
        assert_eq!(state.count, 4);
        assert_eq!(state.mask, !0);
        assert!(!state.alpha_to_coverage_enabled);
    }

    #[test]
    fn empty_scope_is_ok() {
        assert!(scope_result(None).is_ok());
    }

    #[test]
    fn captured_validation_error_becomes_init_error() {
        let err = scope_result(Some(validation_error("unknown type `vec5`"))).unwrap_err();
        assert!(matches!(
            &err,
            InitError::Pipeline(wgpu::Error::Validation { description, .. })
                if description == "unknown type `vec5`"
        ));
        assert_eq!(err.to_string(), "GPU rejected shader or pipeline");
        assert!(err.source().is_some());
    }
}
