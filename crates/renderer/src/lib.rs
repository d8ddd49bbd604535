//! Windowed CRT renderer.
//!
//! Draws gallery images through a Lottes-style CRT fragment shader, with the
//! letterbox placement and parameter values supplied by `crtcore`. The window
//! loop forwards key input into the session and redraws every frame; an
//! export policy renders one frame offscreen to a PNG instead.

mod gpu;
mod types;
mod window;

pub use types::{GalleryImage, RenderPolicy, RendererConfig};
pub use window::Renderer;
