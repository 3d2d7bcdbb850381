//! Post-processing effect shown on the back face of a flipped window.
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Shader {
    #[default]
    Desaturate,
    Fizzics,
}

impl Shader {
    /// Gradient colours, matching `stops` one to one.
    pub const fn colors(self) -> [&'static str; 5] {
        match self {
            Self::Desaturate => ["#05213f", "#031c39", "#00275c", "#8d6531", "#f4f1a2"],
            Self::Fizzics => ["#05213f", "#031c39", "#114283", "#b27220", "#f4f1a2"],
        }
    }

    pub const fn stops(self) -> [f32; 5] {
        match self {
            Self::Desaturate => [0.00, 0.07, 0.32, 0.65, 1.00],
            Self::Fizzics => [0.00, 0.10, 0.20, 0.60, 1.00],
        }
    }

    /// Resolve the shader named by an app's desktop entry. `none` disables the effect and
    /// unknown names fall back to no effect too.
    pub fn resolve(name: Option<&str>, default: Option<Self>) -> Option<Self> {
        match name {
            None => default,
            Some(name) => name.parse().ok(),
        }
    }
}

impl FromStr for Shader {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desaturate" => Ok(Self::Desaturate),
            "fizzics" => Ok(Self::Fizzics),
            _ => Err(format!("unknown shader: {s}")),
        }
    }
}
