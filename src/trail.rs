use std::collections::VecDeque;

use glam::Vec2;

use crate::{
  config::TrailConfig,
  raster::Rasterizer,
  vertex::{Rgba, Vertex},
};

// top-left, bottom-left, bottom-right, top-right; ccw on a y-down screen
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Fixed-size history of recent positions, drawn as fading squares.
#[derive(Debug, Clone)]
pub struct Trail {
  samples: VecDeque<Vec2>,
  capacity: usize,
  half_size: f32,
  color: Rgba,
  interval: f32,
  elapsed: f32,
}

impl Trail {
  pub fn new(config: &TrailConfig) -> Self {
    Self {
      samples: VecDeque::with_capacity(config.length),
      capacity: config.length,
      half_size: config.size * 0.5,
      color: config.color,
      interval: config.interval,
      elapsed: 0.0,
    }
  }

  pub fn len(&self) -> usize {
    self.samples.len()
  }

  pub fn is_empty(&self) -> bool {
    self.samples.is_empty()
  }

  /// Oldest first.
  pub fn samples(&self) -> impl Iterator<Item = Vec2> + '_ {
    self.samples.iter().copied()
  }

  /// Records `position` once at least `interval` seconds have built up.
  /// Leftover time carries into the next sample, capped at one interval.
  pub fn sample(&mut self, dt: f32, position: Vec2) {
    if self.interval <= 0.0 {
      self.push(position);
      return;
    }
    self.elapsed += dt;
    if self.elapsed < self.interval {
      return;
    }
    self.elapsed = (self.elapsed - self.interval).min(self.interval);
    self.push(position);
  }

  pub fn push(&mut self, position: Vec2) {
    if self.capacity == 0 {
      return;
    }
    if self.samples.len() == self.capacity {
      self.samples.pop_front();
    }
    self.samples.push_back(position);
  }

  pub fn render<R: Rasterizer>(&self, target: &mut R) -> Result<(), R::Error> {
    let count = self.samples.len() as f32;
    for (k, &p) in self.samples.iter().enumerate() {
      let mut color = self.color;
      color[3] *= (k + 1) as f32 / count;

      let h = self.half_size;
      let quad = [
        Vertex::new(p + Vec2::new(-h, -h), color),
        Vertex::new(p + Vec2::new(-h, h), color),
        Vertex::new(p + Vec2::new(h, h), color),
        Vertex::new(p + Vec2::new(h, -h), color),
      ];
      target.draw_triangles(&quad, &QUAD_INDICES)?;
    }
    Ok(())
  }
}
