use std::{
  fs,
  path::{Path, PathBuf},
};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::vertex::{Rgba, Vertex};

/// Longest trail history a config may ask for.
pub const MAX_TRAIL_LENGTH: usize = 4096;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("failed to read {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error(transparent)]
  Parse(#[from] serde_json::Error),
  #[error("invalid config: {0}")]
  Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  pub window: WindowConfig,
  pub ball: BallConfig,
  pub trail: TrailConfig,
  /// Per-frame batch capacity, shared by every shape drawn in a frame.
  pub max_vertices: usize,
  pub max_indices: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
  pub title: String,
  pub width: u32,
  pub height: u32,
  pub clear_color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
  pub radius: f32,
  /// Signed so that a bad value reaches the mesh and is reported there.
  pub resolution: i32,
  pub color: Rgba,
  pub start: Vec2,
  /// Pixels per second.
  pub velocity: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
  pub length: usize,
  pub size: f32,
  pub color: Rgba,
  /// Seconds between samples.
  pub interval: f32,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      window: WindowConfig::default(),
      ball: BallConfig::default(),
      trail: TrailConfig::default(),
      max_vertices: 1 << 16,
      max_indices: 3 << 16,
    }
  }
}

impl Default for WindowConfig {
  fn default() -> Self {
    Self {
      title: "planar-disk".to_owned(),
      width: 800,
      height: 600,
      clear_color: [0.1, 0.1, 0.1, 1.0],
    }
  }
}

impl Default for BallConfig {
  fn default() -> Self {
    Self {
      radius: 40.0,
      resolution: 4,
      color: [0.95, 0.45, 0.2, 1.0],
      start: Vec2::new(400.0, 300.0),
      velocity: Vec2::new(220.0, 160.0),
    }
  }
}

impl Default for TrailConfig {
  fn default() -> Self {
    Self {
      length: 32,
      size: 8.0,
      color: [0.3, 0.6, 1.0, 0.6],
      interval: 1.0 / 60.0,
    }
  }
}

impl Config {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_owned(),
      source,
    })?;
    Self::from_json(&text)
  }

  pub fn from_json(text: &str) -> Result<Self, ConfigError> {
    let config: Self = serde_json::from_str(text)?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.window.width == 0 || self.window.height == 0 {
      return Err(ConfigError::Invalid("window size must be non-zero"));
    }
    if self.max_vertices == 0 || self.max_indices == 0 {
      return Err(ConfigError::Invalid("batch capacity must be non-zero"));
    }
    if u32::try_from(self.max_vertices).is_err() {
      return Err(ConfigError::Invalid("max_vertices must fit a u32 index"));
    }
    let max_buffer_size = wgpu::Limits::default().max_buffer_size;
    if !self.vertex_buffer_size().is_some_and(|size| size <= max_buffer_size) {
      return Err(ConfigError::Invalid("max_vertices exceeds the GPU buffer size limit"));
    }
    if !self.index_buffer_size().is_some_and(|size| size <= max_buffer_size) {
      return Err(ConfigError::Invalid("max_indices exceeds the GPU buffer size limit"));
    }
    if self.trail.length > MAX_TRAIL_LENGTH {
      return Err(ConfigError::Invalid("trail length exceeds MAX_TRAIL_LENGTH"));
    }
    if !(self.trail.size >= 0.0 && self.trail.interval >= 0.0) {
      return Err(ConfigError::Invalid("trail size and interval must be non-negative"));
    }
    Ok(())
  }

  /// Bytes needed for the batch vertex buffer, `None` on overflow.
  pub fn vertex_buffer_size(&self) -> Option<u64> {
    byte_size(self.max_vertices, std::mem::size_of::<Vertex>())
  }

  pub fn index_buffer_size(&self) -> Option<u64> {
    byte_size(self.max_indices, std::mem::size_of::<u32>())
  }
}

fn byte_size(count: usize, stride: usize) -> Option<u64> {
  u64::try_from(count).ok()?.checked_mul(stride as u64)
}
