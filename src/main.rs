use std::{path::PathBuf, time::Instant};

use anyhow::Context;
use glam::Vec2;
use planar_disk::{config::Config, scene::Scene, FrameBatch};
use winit::{
  event::*,
  event_loop::{ControlFlow, EventLoop},
  window::WindowBuilder,
};

mod renderer;

use renderer::Renderer;

// longest step the physics takes, so a stalled frame doesn't tunnel the ball
const MAX_FRAME_DT: f32 = 0.1;

fn load_config() -> anyhow::Result<Config> {
  match std::env::args_os().nth(1).map(PathBuf::from) {
    Some(path) => {
      log::info!("loading config from {}", path.display());
      Config::load(&path).with_context(|| format!("bad config {}", path.display()))
    }
    None => {
      let config = Config::default();
      config.validate()?;
      Ok(config)
    }
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  env_logger::init();

  let config = load_config()?;

  let event_loop = EventLoop::new();
  let window = WindowBuilder::new()
    .with_title(&config.window.title)
    .with_inner_size(winit::dpi::LogicalSize::new(
      config.window.width,
      config.window.height,
    ))
    .build(&event_loop)
    .context("failed to create window")?;

  let mut renderer = Renderer::new(&window, &config).await?;
  let mut scene = Scene::new(&config).context("failed to build ball mesh")?;
  let mut batch = FrameBatch::new(config.max_vertices, config.max_indices);
  let mut last_frame = Instant::now();

  log::info!(
    "ball at depth {} ({} triangles); Up/Down change depth, Space pauses, Esc quits",
    scene.ball().mesh().resolution(),
    scene.ball().mesh().triangle_count()
  );

  event_loop.run(move |event, _, control_flow| {
    *control_flow = ControlFlow::Poll;

    match event {
      Event::RedrawRequested(_) => {
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32().min(MAX_FRAME_DT);
        last_frame = now;

        let (width, height) = renderer.size();
        scene.update(dt, Vec2::new(width as f32, height as f32));

        batch.clear();
        if let Err(err) = scene.render(&mut batch) {
          log::warn!("frame dropped shapes: {err}");
        }

        match renderer.render(&batch) {
          Ok(()) => {}
          Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
          Err(wgpu::SurfaceError::OutOfMemory) => {
            log::error!("out of GPU memory, exiting");
            *control_flow = ControlFlow::Exit;
          }
          Err(err) => log::warn!("skipping frame: {err}"),
        }
      }

      Event::WindowEvent { event, .. } => match event {
        WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
        WindowEvent::Resized(size) => renderer.resize(size.width, size.height),
        WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
          renderer.resize(new_inner_size.width, new_inner_size.height)
        }
        WindowEvent::KeyboardInput {
          input:
            KeyboardInput {
              state: ElementState::Pressed,
              virtual_keycode: Some(key),
              ..
            },
          ..
        } => {
          let step = match key {
            VirtualKeyCode::Escape => {
              *control_flow = ControlFlow::Exit;
              return;
            }
            VirtualKeyCode::Space => {
              scene.toggle_pause();
              return;
            }
            VirtualKeyCode::Up => 1,
            VirtualKeyCode::Down => -1,
            _ => return,
          };
          if let Err(err) = scene.change_resolution(step) {
            log::error!("failed to rebuild ball: {err}");
          }
        }
        _ => {}
      },

      Event::MainEventsCleared => {
        window.request_redraw();
      }

      _ => {}
    }
  });
}
