//! Parameter panel model: named controls bound to fields of the uniform
//! store. The web front-end renders one DOM input per [`Control`] and feeds
//! edits back through [`ParamPanel::apply`].

use crate::color::{Color, ColorError};
use crate::uniforms::ShaderUniforms;
use fnv::FnvHashMap;
use smallvec::SmallVec;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PanelError {
    #[error("unknown control {0:?}")]
    UnknownControl(String),
    #[error("control {0:?} expects a number")]
    ExpectedNumber(&'static str),
    #[error("control {0:?} expects a color")]
    ExpectedColor(&'static str),
    #[error("control {name:?} rejected non-finite value {value}")]
    NotFinite { name: &'static str, value: f32 },
    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Uniform (or uniform component) a control writes into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UniformBinding {
    FrequencyX,
    FrequencyY,
    TimeMul,
    ElevationMul,
    ColorIntensity,
    BaseColor,
    PeakColor,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlKind {
    Slider { min: f32, max: f32, step: f32 },
    Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Control {
    pub name: &'static str,
    pub binding: UniformBinding,
    pub kind: ControlKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ControlValue {
    Number(f32),
    Color(Color),
}

impl ControlValue {
    /// Render as the string an `<input>` element's `value` expects.
    pub fn to_input_string(&self) -> String {
        match self {
            ControlValue::Number(v) => v.to_string(),
            ControlValue::Color(c) => c.to_hex(),
        }
    }
}

const fn slider(
    name: &'static str,
    binding: UniformBinding,
    min: f32,
    max: f32,
    step: f32,
) -> Control {
    Control {
        name,
        binding,
        kind: ControlKind::Slider { min, max, step },
    }
}

const fn picker(name: &'static str, binding: UniformBinding) -> Control {
    Control {
        name,
        binding,
        kind: ControlKind::Color,
    }
}

pub const DEFAULT_CONTROLS: [Control; 7] = [
    slider("freqX", UniformBinding::FrequencyX, 0.0, 20.0, 0.01),
    slider("freqY", UniformBinding::FrequencyY, 0.0, 20.0, 0.01),
    slider("timeMul", UniformBinding::TimeMul, 1.0, 30.0, 0.01),
    slider("elevationMul", UniformBinding::ElevationMul, -1.0, 1.0, 0.001),
    slider("colorIntensity", UniformBinding::ColorIntensity, 1.0, 30.0, 0.01),
    picker("baseColor", UniformBinding::BaseColor),
    picker("peakColor", UniformBinding::PeakColor),
];

pub struct ParamPanel {
    controls: SmallVec<[Control; 8]>,
    by_name: FnvHashMap<&'static str, usize>,
}

impl Default for ParamPanel {
    fn default() -> Self {
        Self::new(&DEFAULT_CONTROLS)
    }
}

impl ParamPanel {
    pub fn new(controls: &[Control]) -> Self {
        let controls: SmallVec<[Control; 8]> = controls.iter().copied().collect();
        let by_name = controls
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name, i))
            .collect();
        Self { controls, by_name }
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn control(&self, name: &str) -> Option<&Control> {
        self.by_name.get(name).map(|&i| &self.controls[i])
    }

    /// Current value of the uniform a control is bound to.
    pub fn read(&self, control: &Control, uniforms: &ShaderUniforms) -> ControlValue {
        match control.binding {
            UniformBinding::FrequencyX => ControlValue::Number(uniforms.frequency.x),
            UniformBinding::FrequencyY => ControlValue::Number(uniforms.frequency.y),
            UniformBinding::TimeMul => ControlValue::Number(uniforms.time_mul),
            UniformBinding::ElevationMul => ControlValue::Number(uniforms.elevation_mul),
            UniformBinding::ColorIntensity => ControlValue::Number(uniforms.color_intensity),
            UniformBinding::BaseColor => ControlValue::Color(uniforms.base_color),
            UniformBinding::PeakColor => ControlValue::Color(uniforms.peak_color),
        }
    }

    /// Write an edit into the live store, clamping numbers to the control's
    /// range. Returns the value actually stored.
    pub fn apply(
        &self,
        name: &str,
        value: ControlValue,
        uniforms: &mut ShaderUniforms,
    ) -> Result<ControlValue, PanelError> {
        let control = *self
            .control(name)
            .ok_or_else(|| PanelError::UnknownControl(name.to_string()))?;
        match (control.kind, value) {
            (ControlKind::Slider { min, max, .. }, ControlValue::Number(v)) => {
                if !v.is_finite() {
                    return Err(PanelError::NotFinite {
                        name: control.name,
                        value: v,
                    });
                }
                let v = v.clamp(min, max);
                let slot = match control.binding {
                    UniformBinding::FrequencyX => &mut uniforms.frequency.x,
                    UniformBinding::FrequencyY => &mut uniforms.frequency.y,
                    UniformBinding::TimeMul => &mut uniforms.time_mul,
                    UniformBinding::ElevationMul => &mut uniforms.elevation_mul,
                    UniformBinding::ColorIntensity => &mut uniforms.color_intensity,
                    UniformBinding::BaseColor | UniformBinding::PeakColor => {
                        return Err(PanelError::ExpectedColor(control.name))
                    }
                };
                *slot = v;
                Ok(ControlValue::Number(v))
            }
            (ControlKind::Color, ControlValue::Color(c)) => {
                match control.binding {
                    UniformBinding::BaseColor => uniforms.base_color = c,
                    UniformBinding::PeakColor => uniforms.peak_color = c,
                    _ => return Err(PanelError::ExpectedNumber(control.name)),
                }
                Ok(ControlValue::Color(c))
            }
            (ControlKind::Slider { .. }, ControlValue::Color(_)) => {
                Err(PanelError::ExpectedNumber(control.name))
            }
            (ControlKind::Color, ControlValue::Number(_)) => {
                Err(PanelError::ExpectedColor(control.name))
            }
        }
    }

    /// Convenience for raw `<input>` strings: parses numbers for sliders and
    /// `#rrggbb` for pickers.
    pub fn apply_input(
        &self,
        name: &str,
        raw: &str,
        uniforms: &mut ShaderUniforms,
    ) -> Result<ControlValue, PanelError> {
        let control = self
            .control(name)
            .ok_or_else(|| PanelError::UnknownControl(name.to_string()))?;
        let value = match control.kind {
            ControlKind::Slider { .. } => ControlValue::Number(
                raw.trim()
                    .parse::<f32>()
                    .map_err(|_| PanelError::ExpectedNumber(control.name))?,
            ),
            ControlKind::Color => ControlValue::Color(Color::from_hex(raw)?),
        };
        self.apply(name, value, uniforms)
    }
}
