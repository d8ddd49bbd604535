/// Two-component vector used for sizes and offsets, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Scale-plus-offset transform that centers content inside a container while
/// preserving aspect ratio. Recomputed from scratch every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterBox {
    pub scale: f64,
    pub offset: Vec2,
}

impl LetterBox {
    /// Applies the composed transform: scale in the content's local frame,
    /// then translate to the centered position.
    pub fn apply(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x * self.scale + self.offset.x,
            point.y * self.scale + self.offset.y,
        )
    }

    /// Placement rectangle of the scaled content: top-left offset and size.
    pub fn placement(&self, content: Vec2) -> (Vec2, Vec2) {
        (
            self.offset,
            Vec2::new(content.x * self.scale, content.y * self.scale),
        )
    }
}

/// Computes the letterbox transform fitting `content` into `container`.
///
/// When the container is large enough the scale is floored to an integer so
/// magnified pixel art stays pixel perfect; when it is too small the scale
/// turns fractional so the content still fits. The cramped-container check
/// compares both container axes against the content *height*; this matches
/// the long-standing behaviour the rest of the program (and its renders)
/// depend on.
///
/// Content dimensions must be positive; a zero-sized content rect is a caller
/// bug, not a runtime condition.
pub fn compute_letterbox(container: Vec2, content: Vec2) -> LetterBox {
    assert!(
        content.x > 0.0 && content.y > 0.0,
        "content size must be positive, got {}x{}",
        content.x,
        content.y
    );

    let scale = if container.x < content.y || container.y < content.y {
        let scale_x = container.x / content.x;
        let scale_y = container.y / content.y;
        scale_x.min(scale_y)
    } else {
        let scale_x = (container.x / content.x).floor();
        let scale_y = (container.y / content.y).floor();
        scale_x.min(scale_y)
    };

    LetterBox {
        scale,
        offset: Vec2::new(
            (container.x / 2.0 - content.x * scale / 2.0).floor(),
            (container.y / 2.0 - content.y * scale / 2.0).floor(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_integer_scale_when_container_is_roomy() {
        let l = compute_letterbox(Vec2::new(1920.0, 1080.0), Vec2::new(256.0, 240.0));
        assert_eq!(l.scale, 4.0);
        assert_eq!(l.offset, Vec2::new(448.0, 60.0));
    }

    #[test]
    fn falls_back_to_fractional_scale_when_cramped() {
        let l = compute_letterbox(Vec2::new(300.0, 200.0), Vec2::new(256.0, 240.0));
        assert!((l.scale - 200.0 / 240.0).abs() < 1e-9);
    }

    #[test]
    fn cramped_check_uses_content_height_for_both_axes() {
        // Container width below content *height* selects the fractional
        // branch even though width alone would allow an integer scale.
        let l = compute_letterbox(Vec2::new(230.0, 1000.0), Vec2::new(100.0, 240.0));
        assert_eq!(l.scale, 2.3);
    }

    #[test]
    fn scale_is_positive_for_positive_inputs() {
        for (cw, ch) in [(1.0, 1.0), (100.0, 50.0), (4096.0, 2160.0), (17.0, 600.0)] {
            let l = compute_letterbox(Vec2::new(cw, ch), Vec2::new(16.0, 9.0));
            assert!(l.scale > 0.0, "container {cw}x{ch}");
        }
    }

    #[test]
    fn offset_centers_content_within_floor_rounding() {
        let container = Vec2::new(1365.0, 767.0);
        let content = Vec2::new(256.0, 240.0);
        let l = compute_letterbox(container, content);
        let center_x = l.offset.x + content.x * l.scale / 2.0;
        let center_y = l.offset.y + content.y * l.scale / 2.0;
        assert!((center_x - container.x / 2.0).abs() <= 1.0);
        assert!((center_y - container.y / 2.0).abs() <= 1.0);
    }

    #[test]
    fn transform_scales_then_translates() {
        let l = compute_letterbox(Vec2::new(1920.0, 1080.0), Vec2::new(256.0, 240.0));
        let corner = l.apply(Vec2::new(256.0, 240.0));
        assert_eq!(corner, Vec2::new(448.0 + 256.0 * 4.0, 60.0 + 240.0 * 4.0));

        let (origin, size) = l.placement(Vec2::new(256.0, 240.0));
        assert_eq!(origin, Vec2::new(448.0, 60.0));
        assert_eq!(size, Vec2::new(1024.0, 960.0));
    }

    #[test]
    #[should_panic(expected = "content size must be positive")]
    fn rejects_degenerate_content() {
        compute_letterbox(Vec2::new(100.0, 100.0), Vec2::new(0.0, 240.0));
    }
}
