use rose_core::Scene;
use web_sys as web;

mod helpers;
mod post;
mod rose;
mod sparkles;
mod targets;

use post::{PostBindGroups, PostResources, PostUniforms};
use rose::RosePass;
use sparkles::SparklePass;
use targets::RenderTargets;

/// WebGPU device, swapchain and every pass needed to draw one frame of the
/// scene: lit rose and sparkles into HDR, then bloom, grain and vignette.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,
    rose: RosePass,
    sparkles: SparklePass,
    clear_color: wgpu::Color,
    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, scene: &Scene) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        let targets = RenderTargets::new(&device, width, height);
        let post = post::create_post_resources(&device, format);
        let post_groups = PostBindGroups::new(
            &device,
            &post,
            &targets.hdr_view,
            &targets.bloom_a_view,
            &targets.bloom_b_view,
        );
        let petal_mesh = rose_core::petal_mesh()?;
        let stem_mesh = rose_core::stem_mesh()?;
        let rose = RosePass::new(&device, &petal_mesh, &stem_mesh, scene.rose.petals().len());
        let sparkles = SparklePass::new(&device, &scene.sparkles);
        let bg = scene.background;

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            post,
            post_groups,
            rose,
            sparkles,
            clear_color: wgpu::Color {
                r: bg.x as f64,
                g: bg.y as f64,
                b: bg.z as f64,
                a: 1.0,
            },
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            self.post_groups = PostBindGroups::new(
                &self.device,
                &self.post,
                &self.targets.hdr_view,
                &self.targets.bloom_a_view,
                &self.targets.bloom_b_view,
            );
        }
    }

    /// Reapply the current configuration after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, scene: &Scene, css_height: f32) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        self.rose.prepare(&self.queue, scene);
        self.sparkles.prepare(&self.queue, scene, css_height);
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.rose.draw(&mut rpass);
            // Sparkles blend over the rose and test against its depth
            self.sparkles.draw(&mut rpass);
        }

        let time = scene.elapsed();
        let bloom_res = self.targets.bloom_resolution();
        let base = PostUniforms::new(&scene.post, bloom_res, time);
        post::write_post_uniforms(&self.queue, &self.post.bright_uniforms, &base);
        post::write_post_uniforms(
            &self.queue,
            &self.post.blur_h_uniforms,
            &base.with_blur([1.0, 0.0]),
        );
        post::write_post_uniforms(
            &self.queue,
            &self.post.blur_v_uniforms,
            &base.with_blur([0.0, 1.0]),
        );
        post::write_post_uniforms(
            &self.queue,
            &self.post.composite_uniforms,
            &PostUniforms::new(&scene.post, [self.width as f32, self.height as f32], time),
        );

        // Bright pass: HDR -> bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_groups.bright,
            None,
        );
        // Blur horizontal: bloom_a -> bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.blur_h,
            None,
        );
        // Blur vertical: bloom_b -> bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.blur_v,
            None,
        );
        // Composite to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.post_groups.composite_scene,
            Some(&self.post_groups.composite_bloom),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
