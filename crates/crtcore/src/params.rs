use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    #[error("unknown parameter name(s): {}", .0.join(", "))]
    UnknownParams(Vec<String>),
}

/// Direction of a single value edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
}

/// A named, bounded shader uniform edited in `step` increments.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderParam {
    pub name: &'static str,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ShaderParam {
    pub fn new(name: &'static str, value: f32, min: f32, max: f32, step: f32) -> Self {
        assert!(step > 0.0, "parameter '{name}' step must be positive");
        assert!(
            min <= value && value <= max,
            "parameter '{name}' default {value} outside [{min}, {max}]"
        );
        Self {
            name,
            value,
            min,
            max,
            step,
        }
    }

    pub fn at_min(&self) -> bool {
        self.value <= self.min
    }

    pub fn at_max(&self) -> bool {
        self.value >= self.max
    }
}

/// Ordered set of shader parameters plus the defaults captured at creation.
///
/// Insertion order is fixed for the lifetime of the set: it drives both the
/// menu cursor and the order values are handed to the renderer.
#[derive(Debug, Clone)]
pub struct ParamSet {
    params: Vec<ShaderParam>,
    defaults: Vec<f32>,
}

impl ParamSet {
    pub fn new(params: Vec<ShaderParam>) -> Self {
        let defaults = params.iter().map(|p| p.value).collect();
        Self { params, defaults }
    }

    /// The Lottes CRT parameter set with stock defaults.
    pub fn crt_defaults() -> Self {
        Self::new(vec![
            ShaderParam::new("HardScan", -10.0, -20.0, 0.0, 1.0),
            ShaderParam::new("HardPix", -4.0, -20.0, 0.0, 1.0),
            ShaderParam::new("WarpX", 0.01, 0.0, 0.125, 0.01),
            ShaderParam::new("WarpY", 0.02, 0.0, 0.125, 0.01),
            ShaderParam::new("MaskDark", 0.5, 0.0, 2.0, 0.1),
            ShaderParam::new("MaskLight", 1.5, 0.0, 2.0, 0.1),
            ShaderParam::new("ShadowMask", 0.0, 0.0, 4.0, 1.0),
            ShaderParam::new("BrightBoost", 1.0, 0.0, 2.0, 0.05),
            ShaderParam::new("HardBloomPix", -1.5, -2.0, -0.5, 0.1),
            ShaderParam::new("HardBloomScan", -2.0, -4.0, -1.0, 0.1),
            ShaderParam::new("BloomAmount", 0.05, 0.0, 1.0, 0.05),
            ShaderParam::new("Shape", 2.0, 0.0, 10.0, 0.05),
        ])
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, index: usize) -> &ShaderParam {
        &self.params[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShaderParam> {
        self.params.iter()
    }

    /// Current values in insertion order, keyed by name.
    pub fn values(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        self.params.iter().map(|p| (p.name, p.value))
    }

    /// Steps the parameter at `index` once, clamping into its bounds. The
    /// index must come from the menu cursor; anything out of range is a bug.
    pub fn adjust(&mut self, index: usize, direction: Direction) {
        let p = &mut self.params[index];
        p.value = match direction {
            Direction::Down => (p.value - p.step).max(p.min),
            Direction::Up => (p.value + p.step).min(p.max),
        };
    }

    /// Restores every parameter to its captured default.
    pub fn reset(&mut self) {
        for (param, default) in self.params.iter_mut().zip(&self.defaults) {
            param.value = *default;
        }
    }

    /// Applies a name-to-value override map, typically from a config file.
    ///
    /// Every entry naming a known parameter is applied (clamped into the
    /// parameter's bounds); unknown names are skipped and reported together.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, f32>) -> Result<(), ParamError> {
        let mut unknown = Vec::new();
        for (name, value) in overrides {
            match self.params.iter_mut().find(|p| p.name == name) {
                Some(param) => param.value = value.clamp(param.min, param.max),
                None => unknown.push(name.clone()),
            }
        }
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(ParamError::UnknownParams(unknown))
        }
    }
}
