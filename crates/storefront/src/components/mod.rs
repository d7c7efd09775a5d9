//! Reusable template components.

pub mod pixel;

pub use pixel::PixelLoader;
