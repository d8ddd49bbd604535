use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "crtview",
    author,
    version,
    about = "CRT shader viewer for pixel-art images",
    arg_required_else_help = false
)]
pub struct Args {
    /// Image to display (PNG, JPEG, BMP, or GIF). Falls back to the built-in
    /// test-pattern gallery when omitted.
    #[arg(value_name = "IMAGE")]
    pub image: Option<PathBuf>,

    /// Render one frame to the given PNG file instead of opening a window loop.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Viewer configuration TOML with shader parameter overrides.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Initial integer scale for the window and for exported frames.
    #[arg(long, value_name = "FACTOR")]
    pub scale: Option<u32>,

    /// Keep the window open after exporting with --output.
    #[arg(long)]
    pub no_close: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_invocation() {
        let args = Args::try_parse_from(["crtview"]).expect("bare invocation parses");
        assert!(args.image.is_none());
        assert!(args.output.is_none());
        assert!(!args.no_close);
    }

    #[test]
    fn parses_export_invocation() {
        let args = Args::try_parse_from([
            "crtview",
            "art.png",
            "--output",
            "shot.png",
            "--scale",
            "3",
            "--no-close",
        ])
        .expect("export invocation parses");
        assert_eq!(args.image.as_deref(), Some(std::path::Path::new("art.png")));
        assert_eq!(args.output.as_deref(), Some(std::path::Path::new("shot.png")));
        assert_eq!(args.scale, Some(3));
        assert!(args.no_close);
    }

    #[test]
    fn rejects_scale_without_value() {
        assert!(Args::try_parse_from(["crtview", "--scale"]).is_err());
    }
}
