//! Disk tessellation without a centre vertex, plus the pieces of a small
//! bouncing-ball demo built on it.
//!
//! [`CircleMesh`] places `3 * 2^resolution` points on the circumference and
//! covers the disk by recursively splitting the arcs of an inscribed
//! triangle. Shapes hand their buffers to any [`Rasterizer`]; the demo uses
//! [`FrameBatch`] and uploads it once per frame.

pub mod ball;
pub mod batch;
pub mod config;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod scene;
pub mod shape;
pub mod trail;
pub mod uniforms;
pub mod vertex;

pub use batch::{BatchError, FrameBatch};
pub use error::MeshError;
pub use raster::Rasterizer;
pub use shape::CircleMesh;
pub use vertex::{Rgba, Vertex};
