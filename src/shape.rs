use glam::Vec2;

use crate::{
  error::MeshError,
  geometry::{self, MAX_RESOLUTION},
  raster::Rasterizer,
  vertex::{Rgba, Vertex},
};

/// A disk tessellated without a centre vertex.
///
/// Both buffers are sized once from the closed-form counts and never grow.
/// After construction only [`CircleMesh::translate`] mutates the mesh.
#[derive(Debug, Clone)]
pub struct CircleMesh {
  center: Vec2,
  radius: f32,
  resolution: u32,
  color: Rgba,
  vertices: Vec<Vertex>,
  indices: Vec<u32>,
}

impl CircleMesh {
  pub fn new(
    center: Vec2,
    radius: f32,
    resolution: impl Into<i64>,
    color: Rgba,
  ) -> Result<Self, MeshError> {
    let requested = resolution.into();
    let resolution = u32::try_from(requested)
      .ok()
      .filter(|r| *r <= MAX_RESOLUTION)
      .ok_or(MeshError::InvalidResolution(requested))?;
    if !(radius.is_finite() && radius > 0.0) {
      return Err(MeshError::InvalidRadius(radius));
    }

    let n = geometry::vertex_count(resolution);
    // the vertex buffer is dropped if the index allocation fails
    let mut vertices = alloc_exact("vertex", n)?;
    let mut indices = alloc_exact("index", geometry::index_count(resolution))?;

    vertices.extend((0..n).map(|i| Vertex::new(geometry::ring_point(center, radius, i, n), color)));
    geometry::write_indices(resolution, &mut indices);

    log::debug!(
      "tessellated disk at depth {resolution}: {} vertices, {} triangles",
      vertices.len(),
      indices.len() / 3
    );

    Ok(Self {
      center,
      radius,
      resolution,
      color,
      vertices,
      indices,
    })
  }

  pub fn center(&self) -> Vec2 {
    self.center
  }

  pub fn radius(&self) -> f32 {
    self.radius
  }

  pub fn resolution(&self) -> u32 {
    self.resolution
  }

  pub fn color(&self) -> Rgba {
    self.color
  }

  pub fn vertices(&self) -> &[Vertex] {
    &self.vertices
  }

  pub fn indices(&self) -> &[u32] {
    &self.indices
  }

  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// Rigidly moves the disk. Indices are untouched.
  pub fn translate(&mut self, dx: f32, dy: f32) {
    let delta = Vec2::new(dx, dy);
    self.center += delta;
    for vertex in &mut self.vertices {
      vertex.position = (vertex.position() + delta).to_array();
    }
  }

  pub fn render<R: Rasterizer>(&self, target: &mut R) -> Result<(), R::Error> {
    target.draw_triangles(&self.vertices, &self.indices)
  }
}

fn alloc_exact<T>(buffer: &'static str, len: usize) -> Result<Vec<T>, MeshError> {
  let mut buf = Vec::new();
  buf
    .try_reserve_exact(len)
    .map_err(|source| MeshError::AllocationFailure {
      buffer,
      len,
      source,
    })?;
  Ok(buf)
}

#[cfg(test)]
mod tests {
  use super::*;

  const RED: Rgba = [1.0, 0.0, 0.0, 1.0];

  fn close(a: Vec2, b: Vec2) -> bool {
    (a - b).length() <= 1e-3
  }

  #[derive(Default)]
  struct Recorder {
    calls: Vec<(usize, Vec<u32>)>,
  }

  impl Rasterizer for Recorder {
    type Error = &'static str;

    fn draw_triangles(&mut self, vertices: &[Vertex], indices: &[u32]) -> Result<(), Self::Error> {
      self.calls.push((vertices.len(), indices.to_vec()));
      Ok(())
    }
  }

  struct Broken;

  impl Rasterizer for Broken {
    type Error = &'static str;

    fn draw_triangles(&mut self, _: &[Vertex], _: &[u32]) -> Result<(), Self::Error> {
      Err("device lost")
    }
  }

  #[test]
  fn coarsest_disk_is_one_triangle() {
    let mesh = CircleMesh::new(Vec2::new(100.0, 100.0), 50.0, 0, RED).unwrap();
    assert_eq!(mesh.vertices().len(), 3);
    assert_eq!(mesh.indices(), &[0, 1, 2]);
    assert!(close(mesh.vertices()[0].position(), Vec2::new(150.0, 100.0)));
  }

  #[test]
  fn depth_two_counts() {
    let mesh = CircleMesh::new(Vec2::ZERO, 1.0, 2, RED).unwrap();
    assert_eq!(mesh.vertices().len(), 12);
    assert_eq!(mesh.indices().len(), 30);
    assert_eq!(mesh.triangle_count(), 10);
  }

  #[test]
  fn buffers_are_sized_exactly() {
    let mesh = CircleMesh::new(Vec2::ZERO, 1.0, 6, RED).unwrap();
    assert_eq!(mesh.vertices.capacity(), mesh.vertices.len());
    assert_eq!(mesh.indices.capacity(), mesh.indices.len());
  }

  #[test]
  fn vertices_lie_on_circle_with_uniform_color() {
    let center = Vec2::new(320.0, 240.0);
    for r in 0..=8 {
      let mesh = CircleMesh::new(center, 75.0, r, RED).unwrap();
      for v in mesh.vertices() {
        let d = (v.position() - center).length();
        assert!((d - 75.0).abs() <= 75.0 * 1e-4, "depth {r}: {d}");
        assert_eq!(v.color, RED);
      }
    }
  }

  #[test]
  fn translate_round_trip() {
    let mut mesh = CircleMesh::new(Vec2::new(10.0, 20.0), 5.0, 3, RED).unwrap();
    let before: Vec<_> = mesh.vertices().iter().map(Vertex::position).collect();
    let ptr = mesh.vertices().as_ptr();

    mesh.translate(12.5, -4.25);
    assert!(close(mesh.center(), Vec2::new(22.5, 15.75)));
    assert!(close(mesh.vertices()[0].position(), before[0] + Vec2::new(12.5, -4.25)));

    mesh.translate(-12.5, 4.25);
    assert!(close(mesh.center(), Vec2::new(10.0, 20.0)));
    for (v, p) in mesh.vertices().iter().zip(&before) {
      assert!(close(v.position(), *p));
    }
    assert_eq!(mesh.vertices().as_ptr(), ptr);
  }

  #[test]
  fn translate_keeps_points_on_circle() {
    let mut mesh = CircleMesh::new(Vec2::ZERO, 30.0, 4, RED).unwrap();
    mesh.translate(100.0, 50.0);
    for v in mesh.vertices() {
      let d = (v.position() - mesh.center()).length();
      assert!((d - 30.0).abs() <= 30.0 * 1e-4);
    }
  }

  #[test]
  fn negative_resolution_is_rejected() {
    let err = CircleMesh::new(Vec2::ZERO, 1.0, -1, RED).unwrap_err();
    assert!(matches!(err, MeshError::InvalidResolution(-1)));
  }

  #[test]
  fn oversized_resolution_is_rejected() {
    let err = CircleMesh::new(Vec2::ZERO, 1.0, MAX_RESOLUTION + 1, RED).unwrap_err();
    assert!(matches!(err, MeshError::InvalidResolution(_)));
  }

  #[test]
  fn non_positive_radius_is_rejected() {
    for radius in [0.0, -2.0, f32::NAN, f32::INFINITY] {
      let err = CircleMesh::new(Vec2::ZERO, radius, 1, RED).unwrap_err();
      assert!(matches!(err, MeshError::InvalidRadius(_)));
    }
  }

  #[test]
  fn render_hands_over_both_buffers() {
    let mesh = CircleMesh::new(Vec2::ZERO, 1.0, 1, RED).unwrap();
    let mut recorder = Recorder::default();
    mesh.render(&mut recorder).unwrap();
    assert_eq!(recorder.calls, vec![(6, vec![0, 2, 4, 0, 1, 2, 2, 3, 4, 4, 5, 0])]);
  }

  #[test]
  fn render_surfaces_rasterizer_error() {
    let mesh = CircleMesh::new(Vec2::ZERO, 1.0, 1, RED).unwrap();
    assert_eq!(mesh.render(&mut Broken), Err("device lost"));
  }
}
