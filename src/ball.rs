use glam::Vec2;

use crate::{config::BallConfig, error::MeshError, shape::CircleMesh};

/// A disk that drifts at constant speed and bounces off the viewport edges.
#[derive(Debug, Clone)]
pub struct Ball {
  mesh: CircleMesh,
  velocity: Vec2,
}

impl Ball {
  pub fn new(config: &BallConfig) -> Result<Self, MeshError> {
    let mesh = CircleMesh::new(config.start, config.radius, config.resolution, config.color)?;
    Ok(Self {
      mesh,
      velocity: config.velocity,
    })
  }

  pub fn mesh(&self) -> &CircleMesh {
    &self.mesh
  }

  pub fn center(&self) -> Vec2 {
    self.mesh.center()
  }

  pub fn velocity(&self) -> Vec2 {
    self.velocity
  }

  /// Advances by `dt` seconds inside `[0, bounds]`, reflecting off whichever
  /// edge the disk would cross.
  pub fn update(&mut self, dt: f32, bounds: Vec2) {
    let radius = Vec2::splat(self.mesh.radius());
    let min = radius;
    // a viewport narrower than the disk pins it to the low edge
    let max = (bounds - radius).max(min);

    let center = self.mesh.center();
    let mut next = center + self.velocity * dt;
    for axis in 0..2 {
      if next[axis] < min[axis] {
        next[axis] = min[axis];
        self.velocity[axis] = self.velocity[axis].abs();
      } else if next[axis] > max[axis] {
        next[axis] = max[axis];
        self.velocity[axis] = -self.velocity[axis].abs();
      }
    }

    let delta = next - center;
    self.mesh.translate(delta.x, delta.y);
  }

  /// Re-tessellates at a new depth, keeping position, size and colour. The
  /// old mesh is kept if the new one cannot be built.
  pub fn rebuild(&mut self, resolution: u32) -> Result<(), MeshError> {
    let mesh = CircleMesh::new(
      self.mesh.center(),
      self.mesh.radius(),
      resolution,
      self.mesh.color(),
    )?;
    self.mesh = mesh;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ball(start: Vec2, velocity: Vec2) -> Ball {
    Ball::new(&BallConfig {
      radius: 10.0,
      resolution: 3,
      start,
      velocity,
      ..BallConfig::default()
    })
    .unwrap()
  }

  #[test]
  fn moves_with_velocity() {
    let mut b = ball(Vec2::new(50.0, 50.0), Vec2::new(20.0, -10.0));
    b.update(0.5, Vec2::new(200.0, 200.0));
    assert!((b.center() - Vec2::new(60.0, 45.0)).length() < 1e-4);
  }

  #[test]
  fn bounces_off_right_edge() {
    let mut b = ball(Vec2::new(185.0, 50.0), Vec2::new(100.0, 0.0));
    b.update(0.1, Vec2::new(200.0, 200.0));
    assert_eq!(b.center().x, 190.0);
    assert!(b.velocity().x < 0.0);
  }

  #[test]
  fn bounces_off_top_edge() {
    let mut b = ball(Vec2::new(50.0, 12.0), Vec2::new(0.0, -100.0));
    b.update(0.1, Vec2::new(200.0, 200.0));
    assert_eq!(b.center().y, 10.0);
    assert!(b.velocity().y > 0.0);
  }

  #[test]
  fn vertices_follow_the_center() {
    let mut b = ball(Vec2::new(100.0, 100.0), Vec2::new(37.0, 53.0));
    let bounds = Vec2::new(160.0, 140.0);
    for _ in 0..200 {
      b.update(1.0 / 60.0, bounds);
      let c = b.center();
      assert!(c.x >= 10.0 && c.x <= 150.0 && c.y >= 10.0 && c.y <= 130.0);
      for v in b.mesh().vertices() {
        assert!(((v.position() - c).length() - 10.0).abs() < 1e-3);
      }
    }
  }

  #[test]
  fn rebuild_keeps_position() {
    let mut b = ball(Vec2::new(70.0, 80.0), Vec2::ZERO);
    b.rebuild(5).unwrap();
    assert_eq!(b.mesh().resolution(), 5);
    assert_eq!(b.mesh().vertices().len(), 96);
    assert_eq!(b.center(), Vec2::new(70.0, 80.0));
  }

  #[test]
  fn failed_rebuild_keeps_old_mesh() {
    let mut b = ball(Vec2::new(70.0, 80.0), Vec2::ZERO);
    assert!(b.rebuild(u32::MAX).is_err());
    assert_eq!(b.mesh().resolution(), 3);
  }
}
