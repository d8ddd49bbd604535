use std::path::PathBuf;

/// How the viewer should present frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderPolicy {
    /// Run the interactive window loop continuously.
    Animate,
    /// Render one frame, write it to disk, then close the window unless
    /// `keep_open` was requested.
    Export { path: PathBuf, keep_open: bool },
}

impl Default for RenderPolicy {
    fn default() -> Self {
        Self::Animate
    }
}

/// Decoded pixel data for one gallery image, indexed in parallel with the
/// core gallery's (description, size) entries.
pub struct GalleryImage {
    pub desc: String,
    pub pixels: image::RgbaImage,
}

impl GalleryImage {
    pub fn new(desc: impl Into<String>, pixels: image::RgbaImage) -> Self {
        Self {
            desc: desc.into(),
            pixels,
        }
    }
}

/// Immutable configuration handed to the renderer at start-up.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Window title.
    pub title: String,
    /// Integer pixel scale used for the initial window size and for exports.
    pub default_scale: u32,
    /// Presentation behaviour.
    pub policy: RenderPolicy,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            title: "crtview".to_string(),
            default_scale: 4,
            policy: RenderPolicy::default(),
        }
    }
}
