use crate::vertex::Vertex;

/// Something that can draw a flat-coloured triangle list.
///
/// `indices` are consecutive triangle triples into `vertices`, both in the
/// same y-down pixel space the shapes were generated in.
pub trait Rasterizer {
  type Error;

  fn draw_triangles(&mut self, vertices: &[Vertex], indices: &[u32]) -> Result<(), Self::Error>;
}
