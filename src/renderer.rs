use anyhow::Context;
use planar_disk::{config::Config, uniforms::Uniforms, FrameBatch, Rgba, Vertex};
use wgpu::util::DeviceExt;
use winit::window::Window;

/// Draws one [`FrameBatch`] per frame as a single indexed triangle list.
pub struct Renderer {
  surface: wgpu::Surface,
  device: wgpu::Device,
  queue: wgpu::Queue,
  surface_config: wgpu::SurfaceConfiguration,
  pipeline: wgpu::RenderPipeline,
  uniforms: Uniforms,
  uniform_buffer: wgpu::Buffer,
  uniform_bind_group: wgpu::BindGroup,
  vertex_buffer: wgpu::Buffer,
  index_buffer: wgpu::Buffer,
  clear_color: wgpu::Color,
}

impl Renderer {
  pub async fn new(window: &Window, config: &Config) -> anyhow::Result<Self> {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
      backends: wgpu::Backends::all(),
      dx12_shader_compiler: Default::default(),
    });
    // the window outlives the renderer: both move into the event loop together
    let surface =
      unsafe { instance.create_surface(window) }.context("failed to create surface")?;
    let adapter = instance
      .request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        force_fallback_adapter: false,
        compatible_surface: Some(&surface),
      })
      .await
      .context("no compatible adapter")?;
    log::info!("using adapter {:?}", adapter.get_info());

    let (device, queue) = adapter
      .request_device(
        &wgpu::DeviceDescriptor {
          label: Some("Device"),
          features: wgpu::Features::empty(),
          limits: wgpu::Limits::default(),
        },
        None,
      )
      .await
      .context("failed to create device")?;

    let size = window.inner_size();
    let capabilities = surface.get_capabilities(&adapter);
    let surface_format = capabilities
      .formats
      .first()
      .copied()
      .context("surface reports no formats")?;
    let surface_config = wgpu::SurfaceConfiguration {
      usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
      format: surface_format,
      width: size.width.max(1),
      height: size.height.max(1),
      present_mode: wgpu::PresentMode::Fifo,
      alpha_mode: wgpu::CompositeAlphaMode::Opaque,
      view_formats: vec![surface_format],
    };
    surface.configure(&device, &surface_config);

    let uniforms = Uniforms::new(surface_config.width, surface_config.height);
    let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Uniform Buffer"),
      contents: bytemuck::bytes_of(&uniforms),
      usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let uniform_bind_group_layout =
      device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Uniform BGL"),
        entries: &[wgpu::BindGroupLayoutEntry {
          binding: 0,
          visibility: wgpu::ShaderStages::VERTEX,
          ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
          },
          count: None,
        }],
      });
    let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
      label: Some("Uniform BG"),
      layout: &uniform_bind_group_layout,
      entries: &[wgpu::BindGroupEntry {
        binding: 0,
        resource: uniform_buffer.as_entire_binding(),
      }],
    });

    let vertex_buffer_size = config
      .vertex_buffer_size()
      .context("vertex batch size overflows")?;
    let index_buffer_size = config
      .index_buffer_size()
      .context("index batch size overflows")?;
    // sized once; each frame's batch is written over the front of these
    let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
      label: Some("Batch VB"),
      size: vertex_buffer_size,
      usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
      mapped_at_creation: false,
    });
    let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
      label: Some("Batch IB"),
      size: index_buffer_size,
      usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
      mapped_at_creation: false,
    });

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
      label: Some("Shader Module"),
      source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
      label: Some("Disk Pipeline Layout"),
      bind_group_layouts: &[&uniform_bind_group_layout],
      push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
      label: Some("Disk Pipeline"),
      layout: Some(&pipeline_layout),
      vertex: wgpu::VertexState {
        module: &module,
        entry_point: "vs_main",
        buffers: &[Vertex::desc()],
      },
      fragment: Some(wgpu::FragmentState {
        module: &module,
        entry_point: "fs_main",
        targets: &[Some(wgpu::ColorTargetState {
          format: surface_format,
          blend: Some(wgpu::BlendState::ALPHA_BLENDING),
          write_mask: wgpu::ColorWrites::ALL,
        })],
      }),
      primitive: wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        strip_index_format: None,
        // shapes are ccw on screen, which stays ccw after the y flip
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
      },
      depth_stencil: None,
      multisample: wgpu::MultisampleState::default(),
      multiview: None,
    });

    Ok(Self {
      surface,
      device,
      queue,
      surface_config,
      pipeline,
      uniforms,
      uniform_buffer,
      uniform_bind_group,
      vertex_buffer,
      index_buffer,
      clear_color: to_wgpu_color(config.window.clear_color),
    })
  }

  pub fn size(&self) -> (u32, u32) {
    (self.surface_config.width, self.surface_config.height)
  }

  pub fn resize(&mut self, width: u32, height: u32) {
    if width == 0 || height == 0 {
      return;
    }
    self.surface_config.width = width;
    self.surface_config.height = height;
    self.surface.configure(&self.device, &self.surface_config);

    self.uniforms = Uniforms::new(width, height);
    self
      .queue
      .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));
    log::debug!("surface resized to {width}x{height}");
  }

  pub fn reconfigure(&mut self) {
    self.surface.configure(&self.device, &self.surface_config);
  }

  pub fn render(&mut self, batch: &FrameBatch) -> Result<(), wgpu::SurfaceError> {
    let frame = self.surface.get_current_texture()?;
    let view = frame
      .texture
      .create_view(&wgpu::TextureViewDescriptor::default());

    if !batch.is_empty() {
      self
        .queue
        .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(batch.vertices()));
      self
        .queue
        .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(batch.indices()));
    }

    let mut encoder = self
      .device
      .create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Render Encoder"),
      });
    {
      let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Render Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
          view: &view,
          resolve_target: None,
          ops: wgpu::Operations {
            load: wgpu::LoadOp::Clear(self.clear_color),
            store: true,
          },
        })],
        depth_stencil_attachment: None,
      });

      if !batch.is_empty() {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..batch.indices().len() as u32, 0, 0..1);
      }
    }

    self.queue.submit(Some(encoder.finish()));
    frame.present();
    Ok(())
  }
}

fn to_wgpu_color([r, g, b, a]: Rgba) -> wgpu::Color {
  wgpu::Color {
    r: r as f64,
    g: g as f64,
    b: b as f64,
    a: a as f64,
  }
}
