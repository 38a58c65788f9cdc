use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial transform of a tile or block instance.
///
/// Rotation is stored the way the world is authored: an angle in degrees
/// around an arbitrary axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub angle_degrees: f32,
    pub axis: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            angle_degrees: 0.0,
            axis: Vec3::Y,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Same transform rotated by `angle_degrees` around `axis`.
    pub fn rotated(self, angle_degrees: f32, axis: Vec3) -> Self {
        Self {
            angle_degrees,
            axis,
            ..self
        }
    }

    /// translate · rotate · scale. A zero-length axis means no rotation.
    pub fn model_matrix(&self) -> Mat4 {
        let rotation = match self.axis.try_normalize() {
            Some(axis) => Mat4::from_axis_angle(axis, self.angle_degrees.to_radians()),
            None => Mat4::IDENTITY,
        };
        Mat4::from_translation(self.position) * rotation * Mat4::from_scale(self.scale)
    }
}

/// Linear RGB colour, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// RGBA with full opacity.
    pub fn to_rgba(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

/// One face of a unit cube. The order matches the cube mesh layout and the
/// order face textures are listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Top,
        Face::Bottom,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn model_matrix_translates_then_rotates() {
        let t = Transform::new(Vec3::new(1.0, 2.0, 3.0)).rotated(90.0, Vec3::X);
        // +Z rotates onto -Y around X, then gets translated.
        let p = t.model_matrix().transform_point3(Vec3::Z);
        assert!(approx(p, Vec3::new(1.0, 1.0, 3.0)));
    }

    #[test]
    fn zero_axis_means_no_rotation() {
        let t = Transform::new(Vec3::ONE).rotated(45.0, Vec3::ZERO);
        assert_eq!(t.model_matrix(), Mat4::from_translation(Vec3::ONE));
    }

    #[test]
    fn face_order_matches_index() {
        for (i, face) in Face::ALL.iter().enumerate() {
            assert_eq!(face.index(), i);
        }
    }

    #[test]
    fn color_arrays() {
        let c = Color::new(0.1, 0.2, 0.3);
        assert_eq!(c.to_array(), [0.1, 0.2, 0.3]);
        assert_eq!(c.to_rgba()[3], 1.0);
    }
}
