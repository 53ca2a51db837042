use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
  pub viewport: [f32; 2], // width, height in pixels
  _padding: [f32; 2],
}

impl Uniforms {
  pub fn new(width: u32, height: u32) -> Self {
    Self {
      viewport: [width as f32, height as f32],
      _padding: [0.0; 2],
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn viewport_in_pixels() {
    assert_eq!(Uniforms::new(800, 600).viewport, [800.0, 600.0]);
  }

  #[test]
  fn sixteen_byte_uniform() {
    assert_eq!(std::mem::size_of::<Uniforms>(), 16);
  }
}
