use serde::{Deserialize, Serialize};

use crate::constants::Degree;

/// Construction parameters of a [`Wigner`](crate::engine::Wigner) engine.
///
/// Missing fields take their [`Default`] value when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WignerConfig {
    /// Degree of the surface map.
    pub ydeg: usize,
    /// Limb-darkening degree.
    pub udeg: usize,
    /// Filter degree.
    pub fdeg: usize,
    pub inclination: Degree,
    pub obliquity: Degree,
}

impl Default for WignerConfig {
    fn default() -> Self {
        WignerConfig {
            ydeg: 2,
            udeg: 0,
            fdeg: 0,
            inclination: 90.0,
            obliquity: 0.0,
        }
    }
}

impl WignerConfig {
    pub fn with_ydeg(mut self, ydeg: usize) -> Self {
        self.ydeg = ydeg;
        self
    }

    pub fn with_udeg(mut self, udeg: usize) -> Self {
        self.udeg = udeg;
        self
    }

    pub fn with_fdeg(mut self, fdeg: usize) -> Self {
        self.fdeg = fdeg;
        self
    }

    /// Axis orientation, both angles in degrees.
    pub fn with_axis(mut self, inclination: Degree, obliquity: Degree) -> Self {
        self.inclination = inclination;
        self.obliquity = obliquity;
        self
    }

    /// Extra degree carried by the augmented z rotation, `udeg + fdeg`.
    pub fn ufdeg(&self) -> usize {
        self.udeg + self.fdeg
    }
}

#[cfg(test)]
mod config_test {
    use super::*;
    use quick_xml::de::from_str;

    #[test]
    fn test_builders() {
        let config = WignerConfig::default()
            .with_ydeg(5)
            .with_udeg(2)
            .with_fdeg(1)
            .with_axis(60.0, -15.0);
        assert_eq!(config.ydeg, 5);
        assert_eq!(config.ufdeg(), 3);
        assert_eq!((config.inclination, config.obliquity), (60.0, -15.0));
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let xml = "<wigner><ydeg>7</ydeg><obliquity>23.5</obliquity></wigner>";
        let config: WignerConfig = from_str(xml).unwrap();
        assert_eq!(
            config,
            WignerConfig {
                ydeg: 7,
                obliquity: 23.5,
                ..WignerConfig::default()
            }
        );
    }
}
