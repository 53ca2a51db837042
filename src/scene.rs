use glam::Vec2;

use crate::{
  ball::Ball, config::Config, error::MeshError, raster::Rasterizer, trail::Trail,
};

/// Highest depth reachable from the keyboard.
pub const MAX_DEMO_RESOLUTION: u32 = 10;

pub struct Scene {
  ball: Ball,
  trail: Trail,
  paused: bool,
}

impl Scene {
  pub fn new(config: &Config) -> Result<Self, MeshError> {
    Ok(Self {
      ball: Ball::new(&config.ball)?,
      trail: Trail::new(&config.trail),
      paused: false,
    })
  }

  pub fn ball(&self) -> &Ball {
    &self.ball
  }

  pub fn trail(&self) -> &Trail {
    &self.trail
  }

  pub fn toggle_pause(&mut self) {
    self.paused = !self.paused;
    log::info!("{}", if self.paused { "paused" } else { "resumed" });
  }

  pub fn update(&mut self, dt: f32, bounds: Vec2) {
    if self.paused {
      return;
    }
    self.ball.update(dt, bounds);
    self.trail.sample(dt, self.ball.center());
  }

  /// Steps the ball's tessellation depth by `step`, clamped to
  /// `0..=MAX_DEMO_RESOLUTION`.
  pub fn change_resolution(&mut self, step: i32) -> Result<(), MeshError> {
    let current = self.ball.mesh().resolution();
    let next = current.saturating_add_signed(step).min(MAX_DEMO_RESOLUTION);
    if next == current {
      return Ok(());
    }
    self.ball.rebuild(next)?;
    log::info!(
      "ball resolution {current} -> {next} ({} triangles)",
      self.ball.mesh().triangle_count()
    );
    Ok(())
  }

  /// Trail first so the ball stays on top.
  pub fn render<R: Rasterizer>(&self, target: &mut R) -> Result<(), R::Error> {
    self.trail.render(target)?;
    self.ball.mesh().render(target)
  }
}
