use std::path::Path;

use anyhow::{Context, Result};
use crtconfig::ViewerConfig;
use crtcore::{Gallery, GalleryEntry, ParamSet, Session, Vec2};
use renderer::{GalleryImage, RenderPolicy, Renderer, RendererConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::patterns;

const DEFAULT_SCALE: u32 = 4;

pub fn run(args: Args) -> Result<()> {
    initialise_tracing();

    let config = match args.config.as_deref() {
        Some(path) => {
            let config = ViewerConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            tracing::debug!(path = %path.display(), overrides = config.params.len(), "loaded viewer config");
            config
        }
        None => ViewerConfig::default(),
    };

    let mut params = ParamSet::crt_defaults();
    if let Err(err) = params.apply_overrides(&config.params) {
        tracing::warn!(error = %err, "ignoring unknown shader parameters from config");
    }

    let images = load_gallery_images(args.image.as_deref())?;
    let entries = images
        .iter()
        .map(|image| {
            let (width, height) = image.pixels.dimensions();
            GalleryEntry::new(image.desc.clone(), Vec2::new(f64::from(width), f64::from(height)))
        })
        .collect();
    let gallery = Gallery::new(entries);

    let default_scale = args
        .scale
        .or(config.scale)
        .unwrap_or(DEFAULT_SCALE)
        .max(1);

    let policy = match args.output {
        Some(path) => {
            tracing::info!(path = %path.display(), "exporting one frame");
            RenderPolicy::Export {
                path,
                keep_open: args.no_close,
            }
        }
        None => RenderPolicy::Animate,
    };

    let renderer_config = RendererConfig {
        title: "crtview".to_string(),
        default_scale,
        policy,
    };

    let session = Session::new(params, gallery);
    Renderer::new(renderer_config, session, images).run()
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_gallery_images(path: Option<&Path>) -> Result<Vec<GalleryImage>> {
    match path {
        Some(path) => {
            let pixels = image::open(path)
                .with_context(|| format!("failed to open image {}", path.display()))?
                .to_rgba8();
            let desc = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            tracing::info!(
                image = %desc,
                width = pixels.width(),
                height = pixels.height(),
                "loaded image"
            );
            Ok(vec![GalleryImage { desc, pixels }])
        }
        None => {
            tracing::info!("no image supplied; using built-in test patterns");
            Ok(vec![
                GalleryImage {
                    desc: "colour bars".to_string(),
                    pixels: patterns::color_bars(),
                },
                GalleryImage {
                    desc: "checker grid".to_string(),
                    pixels: patterns::checker_grid(),
                },
            ])
        }
    }
}
