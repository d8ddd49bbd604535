//! GPU state for the viewer: one context, one CRT pipeline, and a texture
//! per gallery image. The host hands in a letterbox transform and the
//! name-keyed parameter values each frame; export renders the same scene
//! offscreen and encodes it to PNG.

mod context;
mod pipeline;
mod uniforms;

use std::path::Path;

use anyhow::{Context as AnyhowContext, Result};
use crtcore::{LetterBox, ParamSet, Vec2};
use winit::dpi::PhysicalSize;

use context::GpuContext;
use pipeline::{CrtPipeline, ImageTexture};
use uniforms::CrtUniforms;

use crate::types::GalleryImage;

pub(crate) struct GpuState {
    context: GpuContext,
    pipeline: CrtPipeline,
    textures: Vec<ImageTexture>,
    current: usize,
    uniforms: CrtUniforms,
}

impl GpuState {
    pub(crate) fn new<T>(
        target: &T,
        initial_size: PhysicalSize<u32>,
        images: &[GalleryImage],
    ) -> Result<Self>
    where
        T: raw_window_handle::HasDisplayHandle + raw_window_handle::HasWindowHandle,
    {
        let context = GpuContext::new(target, initial_size)?;
        let pipeline = CrtPipeline::new(&context.device, context.surface_format)?;
        let textures = images
            .iter()
            .map(|image| {
                pipeline.upload_image(&context.device, &context.queue, &image.desc, &image.pixels)
            })
            .collect();

        Ok(Self {
            context,
            pipeline,
            textures,
            current: 0,
            uniforms: CrtUniforms::new(),
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.context.resize(new_size);
    }

    pub(crate) fn set_current_image(&mut self, index: usize) {
        debug_assert!(index < self.textures.len(), "image index out of range");
        self.current = index;
    }

    fn write_uniforms(
        &mut self,
        surface: (f32, f32),
        letterbox: LetterBox,
        content: Vec2,
        params: &ParamSet,
    ) {
        let (origin, size) = letterbox.placement(content);
        self.uniforms.set_surface(surface.0, surface.1);
        self.uniforms
            .set_rect(origin.x as f32, origin.y as f32, size.x as f32, size.y as f32);
        self.uniforms.set_texture_size(content.x as f32, content.y as f32);
        self.uniforms.apply_params(params.values());
        self.context.queue.write_buffer(
            &self.pipeline.uniform_buffer,
            0,
            bytemuck::bytes_of(&self.uniforms),
        );
    }

    /// Renders the current image through the CRT pipeline and presents it.
    pub(crate) fn render(
        &mut self,
        letterbox: LetterBox,
        content: Vec2,
        params: &ParamSet,
    ) -> Result<(), wgpu::SurfaceError> {
        let surface = (
            self.context.size.width.max(1) as f32,
            self.context.size.height.max(1) as f32,
        );
        self.write_uniforms(surface, letterbox, content, params);

        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render encoder"),
            });

        self.encode_pass(&mut encoder, &view, &self.pipeline.pipeline);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Renders the current image offscreen at `width`x`height` and writes a
    /// PNG to `path`.
    pub(crate) fn render_to_png(
        &mut self,
        path: &Path,
        width: u32,
        height: u32,
        letterbox: LetterBox,
        content: Vec2,
        params: &ParamSet,
    ) -> Result<()> {
        self.write_uniforms((width as f32, height as f32), letterbox, content, params);

        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let target = self.context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("export target"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            // The shader writes gamma-encoded values; store them untouched.
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());

        // The surface pipeline may target a different format (usually BGRA);
        // exports get their own pipeline aimed at the readback texture.
        let export_pipeline = if self.context.surface_format == wgpu::TextureFormat::Rgba8Unorm {
            None
        } else {
            Some(
                self.pipeline
                    .pipeline_for(&self.context.device, wgpu::TextureFormat::Rgba8Unorm),
            )
        };
        let pipeline = export_pipeline.as_ref().unwrap_or(&self.pipeline.pipeline);

        // COPY_BYTES_PER_ROW_ALIGNMENT is 256; pad each row up to it.
        let bytes_per_pixel = 4u32;
        let unpadded_bytes_per_row = width * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

        let readback = self.context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("export readback"),
            size: u64::from(padded_bytes_per_row) * u64::from(height),
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("export encoder"),
            });
        self.encode_pass(&mut encoder, &view, pipeline);
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            extent,
        );
        self.context.queue.submit(std::iter::once(encoder.finish()));

        let slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.context
            .device
            .poll(wgpu::PollType::Wait)
            .context("failed to poll device for export readback")?;
        rx.recv()
            .context("export readback channel closed")?
            .context("failed to map export readback buffer")?;

        let mapped = slice.get_mapped_range();
        let mut rgba = Vec::with_capacity((width * height * bytes_per_pixel) as usize);
        for row in mapped.chunks(padded_bytes_per_row as usize) {
            rgba.extend_from_slice(&row[..unpadded_bytes_per_row as usize]);
        }
        drop(mapped);
        readback.unmap();

        let image = image::RgbaImage::from_raw(width, height, rgba)
            .context("export readback produced an unexpected byte count")?;
        image
            .save(path)
            .with_context(|| format!("failed to write PNG to {}", path.display()))?;
        tracing::info!(path = %path.display(), width, height, "exported frame");
        Ok(())
    }

    fn encode_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        pipeline: &wgpu::RenderPipeline,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("crt pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, &self.textures[self.current].bind_group, &[]);
        render_pass.draw(0..3, 0..1);
    }
}
