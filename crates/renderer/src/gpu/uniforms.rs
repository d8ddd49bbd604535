use bytemuck::{Pod, Zeroable};

/// Uniform block fed to `crt.wgsl`. Layout mirrors the WGSL struct exactly:
/// four vec2s then twelve scalars, 80 bytes with no implicit padding.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub(crate) struct CrtUniforms {
    pub surface_size: [f32; 2],
    pub rect_origin: [f32; 2],
    pub rect_size: [f32; 2],
    pub texture_size: [f32; 2],
    pub hard_scan: f32,
    pub hard_pix: f32,
    pub warp_x: f32,
    pub warp_y: f32,
    pub mask_dark: f32,
    pub mask_light: f32,
    pub shadow_mask: f32,
    pub bright_boost: f32,
    pub hard_bloom_pix: f32,
    pub hard_bloom_scan: f32,
    pub bloom_amount: f32,
    pub shape: f32,
}

impl CrtUniforms {
    pub fn new() -> Self {
        Self::zeroed()
    }

    pub fn set_surface(&mut self, width: f32, height: f32) {
        self.surface_size = [width, height];
    }

    pub fn set_rect(&mut self, origin_x: f32, origin_y: f32, width: f32, height: f32) {
        self.rect_origin = [origin_x, origin_y];
        self.rect_size = [width, height];
    }

    pub fn set_texture_size(&mut self, width: f32, height: f32) {
        self.texture_size = [width, height];
    }

    /// Stores one shader parameter by its menu name. Returns false for names
    /// this pipeline does not know, which indicates a wiring bug upstream.
    pub fn set_param(&mut self, name: &str, value: f32) -> bool {
        let slot = match name {
            "HardScan" => &mut self.hard_scan,
            "HardPix" => &mut self.hard_pix,
            "WarpX" => &mut self.warp_x,
            "WarpY" => &mut self.warp_y,
            "MaskDark" => &mut self.mask_dark,
            "MaskLight" => &mut self.mask_light,
            "ShadowMask" => &mut self.shadow_mask,
            "BrightBoost" => &mut self.bright_boost,
            "HardBloomPix" => &mut self.hard_bloom_pix,
            "HardBloomScan" => &mut self.hard_bloom_scan,
            "BloomAmount" => &mut self.bloom_amount,
            "Shape" => &mut self.shape,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Applies the full name-keyed value set coming from the session.
    pub fn apply_params<'a>(&mut self, values: impl Iterator<Item = (&'a str, f32)>) {
        for (name, value) in values {
            if !self.set_param(name, value) {
                debug_assert!(false, "unknown shader parameter '{name}'");
                tracing::warn!(name, "ignoring unknown shader parameter");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<CrtUniforms>(), 80);
        assert_eq!(std::mem::size_of::<CrtUniforms>() % 16, 0);
    }

    #[test]
    fn params_map_by_name() {
        let mut u = CrtUniforms::new();
        assert!(u.set_param("HardScan", -8.0));
        assert!(u.set_param("Shape", 3.0));
        assert!(!u.set_param("NoSuchParam", 1.0));
        assert_eq!(u.hard_scan, -8.0);
        assert_eq!(u.shape, 3.0);
    }

    #[test]
    fn applies_the_full_crt_set() {
        let mut u = CrtUniforms::new();
        let set = crtcore::ParamSet::crt_defaults();
        u.apply_params(set.values());
        assert_eq!(u.hard_scan, -10.0);
        assert_eq!(u.hard_pix, -4.0);
        assert_eq!(u.warp_y, 0.02);
        assert_eq!(u.mask_light, 1.5);
        assert_eq!(u.bloom_amount, 0.05);
        assert_eq!(u.shape, 2.0);
    }
}
