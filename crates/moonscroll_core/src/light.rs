//! Scene lights

use moonscroll_math::Vec3;
use serde::{Serialize, Deserialize};

/// A light source in the scene
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Light {
    /// Omnidirectional light at a position
    Point {
        position: Vec3,
        /// Linear RGB
        color: [f32; 3],
        intensity: f32,
    },
    /// Uniform light reaching every surface
    Ambient {
        /// Linear RGB
        color: [f32; 3],
        intensity: f32,
    },
}

impl Light {
    /// White point light
    pub fn point(position: Vec3, intensity: f32) -> Self {
        Light::Point { position, color: [1.0; 3], intensity }
    }

    /// White ambient light
    pub fn ambient(intensity: f32) -> Self {
        Light::Ambient { color: [1.0; 3], intensity }
    }

    /// Replace the colour
    pub fn with_color(self, rgb: [f32; 3]) -> Self {
        match self {
            Light::Point { position, intensity, .. } => Light::Point { position, color: rgb, intensity },
            Light::Ambient { intensity, .. } => Light::Ambient { color: rgb, intensity },
        }
    }

    /// Colour premultiplied by intensity
    pub fn radiance(&self) -> [f32; 3] {
        let (color, intensity) = match *self {
            Light::Point { color, intensity, .. } => (color, intensity),
            Light::Ambient { color, intensity } => (color, intensity),
        };
        color.map(|c| c * intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radiance() {
        let light = Light::point(Vec3::new(13.0, 5.0, 15.0), 1.5);
        assert_eq!(light.radiance(), [1.5, 1.5, 1.5]);

        let ambient = Light::ambient(0.15).with_color([1.0, 0.0, 0.5]);
        assert_eq!(ambient.radiance(), [0.15, 0.0, 0.075]);
    }

    #[test]
    fn test_with_color_keeps_position() {
        let light = Light::point(Vec3::new(1.0, 2.0, 3.0), 2.0).with_color([0.5; 3]);
        match light {
            Light::Point { position, color, intensity } => {
                assert_eq!(position, Vec3::new(1.0, 2.0, 3.0));
                assert_eq!(color, [0.5; 3]);
                assert_eq!(intensity, 2.0);
            }
            _ => panic!("Expected Point variant"),
        }
    }
}
