use std::collections::TryReserveError;

#[derive(Debug, thiserror::Error)]
pub enum MeshError {
  #[error("resolution {0} is outside 0..={max}", max = crate::geometry::MAX_RESOLUTION)]
  InvalidResolution(i64),
  #[error("radius must be positive and finite, got {0}")]
  InvalidRadius(f32),
  #[error("failed to allocate {buffer} buffer of {len} elements")]
  AllocationFailure {
    buffer: &'static str,
    len: usize,
    #[source]
    source: TryReserveError,
  },
}
