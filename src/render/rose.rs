use super::helpers;
use rose_core::mesh::{MeshData, Vertex};
use rose_core::{Material, Scene};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    key_pos: [f32; 4],
    key_dir: [f32; 4],
    key_color: [f32; 4],
    rim_pos: [f32; 4],
    rim_dir: [f32; 4],
    rim_color: [f32; 4],
    fill_pos: [f32; 4],
    fill_color: [f32; 4],
    glow_pos: [f32; 4],
    glow_color: [f32; 4],
    ambient: [f32; 4],
    env_sky: [f32; 4],
    env_ground: [f32; 4],
}

impl Globals {
    pub(crate) fn from_scene(scene: &Scene) -> Self {
        let camera = scene.camera();
        let lights = &scene.lights;
        let glow = scene.rose.glow();
        let (key_inner, key_outer) = lights.key.cone_cosines();
        let (rim_inner, rim_outer) = lights.rim.cone_cosines();
        let env = &scene.environment;
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            camera_pos: camera.eye.extend(scene.elapsed()).to_array(),
            key_pos: lights.key.position.extend(lights.key.intensity).to_array(),
            key_dir: lights.key.direction().extend(key_outer).to_array(),
            key_color: lights.key.color.extend(key_inner).to_array(),
            rim_pos: lights.rim.position.extend(lights.rim.intensity).to_array(),
            rim_dir: lights.rim.direction().extend(rim_outer).to_array(),
            rim_color: lights.rim.color.extend(rim_inner).to_array(),
            fill_pos: lights.fill.position.extend(lights.fill.intensity).to_array(),
            fill_color: lights.fill.color.extend(lights.fill.range).to_array(),
            glow_pos: glow.position.extend(glow.intensity).to_array(),
            glow_color: glow.color.extend(glow.range).to_array(),
            ambient: (lights.ambient_color * lights.ambient_intensity)
                .extend(0.0)
                .to_array(),
            env_sky: env.sky.extend(env.intensity).to_array(),
            env_ground: env.ground.extend(0.0).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MaterialUniforms {
    base_color: [f32; 4],
    emissive: [f32; 4],
    sheen_color: [f32; 4],
}

impl From<&Material> for MaterialUniforms {
    fn from(m: &Material) -> Self {
        Self {
            base_color: m.base_color.extend(m.roughness).to_array(),
            emissive: m.emissive.extend(m.metalness).to_array(),
            sheen_color: m.sheen_color.extend(m.sheen).to_array(),
        }
    }
}

/// Static vertex/index buffers plus a per-instance transform buffer.
pub(crate) struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
    instances: wgpu::Buffer,
    instance_capacity: usize,
    instance_count: u32,
    material: wgpu::BindGroup,
}

impl GpuMesh {
    fn new(
        device: &wgpu::Device,
        label: &str,
        mesh: &MeshData,
        instance_capacity: usize,
        material: &Material,
        material_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance_capacity = instance_capacity.max(1);
        let instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (std::mem::size_of::<[[f32; 4]; 4]>() * instance_capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&MaterialUniforms::from(material)),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let material = helpers::uniform_bind_group(device, label, material_layout, &material_buffer);
        Self {
            vertices,
            indices,
            index_count: mesh.indices.len() as u32,
            instances,
            instance_capacity,
            instance_count: 0,
            material,
        }
    }

    fn write_instances(&mut self, queue: &wgpu::Queue, transforms: &[[[f32; 4]; 4]]) {
        let n = transforms.len().min(self.instance_capacity);
        queue.write_buffer(&self.instances, 0, bytemuck::cast_slice(&transforms[..n]));
        self.instance_count = n as u32;
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        pass.set_bind_group(1, &self.material, &[]);
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.set_vertex_buffer(1, self.instances.slice(..));
        pass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..self.instance_count);
    }
}

pub(crate) struct RosePass {
    pipeline: wgpu::RenderPipeline,
    globals: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    petals: GpuMesh,
    stem: GpuMesh,
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4,
];

impl RosePass {
    pub(crate) fn new(
        device: &wgpu::Device,
        petal_mesh: &MeshData,
        stem_mesh: &MeshData,
        petal_count: usize,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("rose_shader"),
            source: wgpu::ShaderSource::Wgsl(rose_core::ROSE_WGSL.into()),
        });
        let globals_layout = helpers::uniform_layout(
            device,
            "rose_globals_bgl",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let material_layout =
            helpers::uniform_layout(device, "rose_material_bgl", wgpu::ShaderStages::FRAGMENT);
        let globals = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("rose_globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bg = helpers::uniform_bind_group(device, "rose_globals_bg", &globals_layout, &globals);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("rose_pl"),
            bind_group_layouts: &[&globals_layout, &material_layout],
            push_constant_ranges: &[],
        });
        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &VERTEX_ATTRS,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[[f32; 4]; 4]>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &INSTANCE_ATTRS,
            },
        ];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("rose_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            // Petals are thin sheets seen from both sides
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: helpers::DEPTH_FORMAT,
                depth_write_enabled: true,
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
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let petals = GpuMesh::new(
            device,
            "petal_mesh",
            petal_mesh,
            petal_count,
            &Material::petal(),
            &material_layout,
        );
        let stem = GpuMesh::new(device, "stem_mesh", stem_mesh, 1, &Material::stem(), &material_layout);
        Self {
            pipeline,
            globals,
            globals_bg,
            petals,
            stem,
        }
    }

    pub(crate) fn prepare(&mut self, queue: &wgpu::Queue, scene: &Scene) {
        queue.write_buffer(&self.globals, 0, bytemuck::bytes_of(&Globals::from_scene(scene)));
        let petals: Vec<[[f32; 4]; 4]> = scene
            .rose
            .petal_transforms()
            .iter()
            .map(|m| m.to_cols_array_2d())
            .collect();
        self.petals.write_instances(queue, &petals);
        self.stem
            .write_instances(queue, &[scene.rose.stem_transform().to_cols_array_2d()]);
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.globals_bg, &[]);
        self.stem.draw(pass);
        self.petals.draw(pass);
    }
}
