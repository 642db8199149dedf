use serde::{Deserialize, Deserializer};

use crate::vec3::Vec3;

fn deserialize_rgb<'de, D>(de: D) -> Result<Vec3<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let (r, g, b): (u8, u8, u8) = Deserialize::deserialize(de)?;
    Ok(unit_rgb([r, g, b]))
}

/// Scales an 8-bit color into unit range.
#[inline]
pub fn unit_rgb(rgb: [u8; 3]) -> Vec3<f64> {
    Vec3::new(rgb[0] as f64, rgb[1] as f64, rgb[2] as f64) / 255.0
}

/// Directional light. The direction points from the surface towards the
/// light and is normalized when used.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq)]
pub struct Light {
    direction: Vec3<f64>,
    #[serde(deserialize_with = "deserialize_rgb")]
    color: Vec3<f64>,
}

impl Light {
    pub fn new(direction: Vec3<f64>, color: Vec3<f64>) -> Self {
        Self { direction, color }
    }

    pub fn from_rgb(direction: Vec3<f64>, rgb: [u8; 3]) -> Self {
        Self::new(direction, unit_rgb(rgb))
    }

    #[inline]
    pub fn direction(&self) -> Vec3<f64> {
        self.direction.unit()
    }

    #[inline]
    pub fn color(&self) -> Vec3<f64> {
        self.color
    }
}

#[test]
fn deserialize_scales_color() {
    let light: Light = serde_json::from_str(r#"{"direction": [0, 0, -2], "color": [255, 0, 51]}"#).unwrap();

    assert_eq!(Vec3::new(0.0, 0.0, -1.0), light.direction());
    assert_eq!(Vec3::new(1.0, 0.0, 0.2), light.color());
}
