// Circumferential subdivision of a disk.
//
// The ring holds `3 * 2^resolution` evenly spaced points. Level 0 is the
// inscribed triangle; every further level splits each arc of the previous
// level at its midpoint and emits one triangle per arc. No centre vertex is
// ever used.

use std::f32::consts::TAU;

use glam::Vec2;

/// Deepest subdivision whose counts still fit a `u32` index buffer.
pub const MAX_RESOLUTION: u32 = 28;

/// `resolution` must not exceed [`MAX_RESOLUTION`]; the same holds for the
/// other count functions.
pub fn vertex_count(resolution: u32) -> usize {
  debug_assert!(resolution <= MAX_RESOLUTION);
  3 << resolution
}

/// Indices added by a single subdivision level (not cumulative).
pub fn index_count_at_level(level: u32) -> usize {
  debug_assert!(level <= MAX_RESOLUTION);
  match level {
    0 => 3,
    level => 9 << (level - 1),
  }
}

pub fn index_count(resolution: u32) -> usize {
  debug_assert!(resolution <= MAX_RESOLUTION);
  (9 << resolution) - 6
}

pub fn triangle_count(resolution: u32) -> usize {
  index_count(resolution) / 3
}

/// Point `i` of an `n`-point ring. The angle decreases with `i`, which runs
/// counter-clockwise on a y-down screen.
pub fn ring_point(center: Vec2, radius: f32, i: usize, n: usize) -> Vec2 {
  let step = TAU / n as f32;
  let angle = -(i as f32) * step;
  center + radius * Vec2::new(angle.cos(), angle.sin())
}

/// Fills `out` with the triangle list for `resolution`, base triangle first,
/// then each level in order.
pub fn write_indices(resolution: u32, out: &mut Vec<u32>) {
  let n = vertex_count(resolution) as u64;

  out.extend_from_slice(&[0, (n / 3) as u32, (2 * n / 3) as u32]);

  for level in 1..=resolution {
    let arcs = 3u64 << (level - 1);
    for i in 0..arcs {
      let first = i * n / arcs;
      let third = ((i + 1) % arcs) * n / arcs;
      // unwrapped boundary, so the last arc's midpoint lands before n
      let next = (i + 1) * n / arcs;
      let middle = (first + next) / 2;
      out.extend_from_slice(&[first as u32, middle as u32, third as u32]);
    }
  }
}
