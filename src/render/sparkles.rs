use super::helpers;
use rose_core::{Scene, Sparkles};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SparkleUniforms {
    view_proj: [[f32; 4]; 4],
    camera_right: [f32; 4],
    camera_up: [f32; 4],
    color: [f32; 4],
    motion: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SparkleInstance {
    pos: [f32; 3],
    phase: f32,
}

const QUAD: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

pub(crate) struct SparklePass {
    pipeline: wgpu::RenderPipeline,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    instances: wgpu::Buffer,
    instance_count: u32,
}

impl SparklePass {
    pub(crate) fn new(device: &wgpu::Device, sparkles: &Sparkles) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sparkles_shader"),
            source: wgpu::ShaderSource::Wgsl(rose_core::SPARKLES_WGSL.into()),
        });
        let bgl = helpers::uniform_layout(
            device,
            "sparkles_bgl",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sparkles_uniforms"),
            size: std::mem::size_of::<SparkleUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = helpers::uniform_bind_group(device, "sparkles_bg", &bgl, &uniforms);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sparkles_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sparkles_quad"),
            contents: bytemuck::cast_slice(&QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let points: Vec<SparkleInstance> = sparkles
            .points
            .iter()
            .map(|s| SparkleInstance {
                pos: s.position.to_array(),
                phase: s.phase,
            })
            .collect();
        // A zero-sized vertex buffer is invalid; keep one dummy slot.
        let placeholder = [SparkleInstance {
            pos: [0.0; 3],
            phase: 0.0,
        }];
        let contents: &[SparkleInstance] = if points.is_empty() {
            &placeholder
        } else {
            &points
        };
        let instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sparkles_instances"),
            contents: bytemuck::cast_slice(contents),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sparkles_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x2],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<SparkleInstance>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32],
                    },
                ],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: helpers::DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: helpers::HDR_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        Self {
            pipeline,
            uniforms,
            bind_group,
            quad_vb,
            instances,
            instance_count: points.len() as u32,
        }
    }

    pub(crate) fn prepare(&self, queue: &wgpu::Queue, scene: &Scene, css_height: f32) {
        let camera = scene.camera();
        let view = camera.view_matrix();
        // Rows of the view rotation are the camera basis in world space.
        let right = glam::Vec3::new(view.x_axis.x, view.y_axis.x, view.z_axis.x);
        let up = glam::Vec3::new(view.x_axis.y, view.y_axis.y, view.z_axis.y);
        let sparkles = &scene.sparkles;
        let size = sparkles.world_size(camera.fovy_radians, css_height);
        let u = SparkleUniforms {
            view_proj: camera.view_proj().to_cols_array_2d(),
            camera_right: right.extend(size).to_array(),
            camera_up: up.extend(scene.elapsed()).to_array(),
            color: sparkles.color.extend(sparkles.opacity).to_array(),
            motion: [sparkles.speed, 0.0, 0.0, 0.0],
        };
        queue.write_buffer(&self.uniforms, 0, bytemuck::bytes_of(&u));
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.quad_vb.slice(..));
        pass.set_vertex_buffer(1, self.instances.slice(..));
        pass.draw(0..QUAD.len() as u32, 0..self.instance_count);
    }
}
