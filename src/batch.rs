use crate::{raster::Rasterizer, vertex::Vertex};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
  #[error("index count {0} is not a whole number of triangles")]
  IndexCountNotTriples(usize),
  #[error("index {index} out of range for {vertices} vertices")]
  IndexOutOfRange { index: u32, vertices: usize },
  #[error("batch full: {needed_vertices} vertices / {needed_indices} indices exceed capacity {max_vertices} / {max_indices}")]
  Overflow {
    needed_vertices: usize,
    needed_indices: usize,
    max_vertices: usize,
    max_indices: usize,
  },
}

/// One frame's worth of triangles, uploaded to the GPU in a single draw.
///
/// Storage is reserved up front and never grows past the configured limits;
/// [`FrameBatch::clear`] keeps the allocation for the next frame.
#[derive(Debug)]
pub struct FrameBatch {
  vertices: Vec<Vertex>,
  indices: Vec<u32>,
  max_vertices: usize,
  max_indices: usize,
}

impl FrameBatch {
  pub fn new(max_vertices: usize, max_indices: usize) -> Self {
    Self {
      vertices: Vec::with_capacity(max_vertices),
      indices: Vec::with_capacity(max_indices),
      max_vertices,
      max_indices,
    }
  }

  pub fn clear(&mut self) {
    self.vertices.clear();
    self.indices.clear();
  }

  pub fn vertices(&self) -> &[Vertex] {
    &self.vertices
  }

  pub fn indices(&self) -> &[u32] {
    &self.indices
  }

  pub fn is_empty(&self) -> bool {
    self.indices.is_empty()
  }
}

impl Rasterizer for FrameBatch {
  type Error = BatchError;

  fn draw_triangles(&mut self, vertices: &[Vertex], indices: &[u32]) -> Result<(), BatchError> {
    if indices.len() % 3 != 0 {
      return Err(BatchError::IndexCountNotTriples(indices.len()));
    }
    if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
      return Err(BatchError::IndexOutOfRange {
        index,
        vertices: vertices.len(),
      });
    }

    let needed_vertices = self.vertices.len() + vertices.len();
    let needed_indices = self.indices.len() + indices.len();
    if needed_vertices > self.max_vertices || needed_indices > self.max_indices {
      return Err(BatchError::Overflow {
        needed_vertices,
        needed_indices,
        max_vertices: self.max_vertices,
        max_indices: self.max_indices,
      });
    }

    let base = self.vertices.len() as u32;
    self.vertices.extend_from_slice(vertices);
    self.indices.extend(indices.iter().map(|i| base + i));
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use glam::Vec2;

  use super::*;

  fn tri() -> [Vertex; 3] {
    let c = [1.0; 4];
    [
      Vertex::new(Vec2::new(0.0, 0.0), c),
      Vertex::new(Vec2::new(1.0, 0.0), c),
      Vertex::new(Vec2::new(0.0, 1.0), c),
    ]
  }

  #[test]
  fn second_shape_indices_are_rebased() {
    let mut batch = FrameBatch::new(16, 16);
    batch.draw_triangles(&tri(), &[0, 1, 2]).unwrap();
    batch.draw_triangles(&tri(), &[2, 1, 0]).unwrap();
    assert_eq!(batch.vertices().len(), 6);
    assert_eq!(batch.indices(), &[0, 1, 2, 5, 4, 3]);
  }

  #[test]
  fn rejects_partial_triangles() {
    let mut batch = FrameBatch::new(16, 16);
    assert_eq!(
      batch.draw_triangles(&tri(), &[0, 1]),
      Err(BatchError::IndexCountNotTriples(2))
    );
    assert!(batch.is_empty());
  }

  #[test]
  fn rejects_out_of_range_index() {
    let mut batch = FrameBatch::new(16, 16);
    assert_eq!(
      batch.draw_triangles(&tri(), &[0, 1, 3]),
      Err(BatchError::IndexOutOfRange { index: 3, vertices: 3 })
    );
  }

  #[test]
  fn overflow_leaves_batch_untouched() {
    let mut batch = FrameBatch::new(4, 16);
    batch.draw_triangles(&tri(), &[0, 1, 2]).unwrap();
    let err = batch.draw_triangles(&tri(), &[0, 1, 2]).unwrap_err();
    assert!(matches!(err, BatchError::Overflow { needed_vertices: 6, .. }));
    assert_eq!(batch.vertices().len(), 3);
    assert_eq!(batch.indices().len(), 3);
  }

  #[test]
  fn clear_keeps_capacity() {
    let mut batch = FrameBatch::new(8, 8);
    batch.draw_triangles(&tri(), &[0, 1, 2]).unwrap();
    batch.clear();
    assert!(batch.is_empty());
    assert!(batch.vertices().is_empty());
    batch.draw_triangles(&tri(), &[0, 1, 2]).unwrap();
    assert_eq!(batch.indices(), &[0, 1, 2]);
  }
}
