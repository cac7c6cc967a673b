use nalgebra as na;

/// Orthonormal east/north tangent frame at the ellipse center, plus the same
/// frame rotated about the local up direction by the bearing.
///
/// The unrotated vectors parameterize the boundary sweep; the rotated pair
/// carries the ellipse orientation in world space and provides the mirror
/// axes for the symmetric expansion.
#[derive(Debug, Clone)]
pub(crate) struct LocalFrame {
    pub unit_pos: na::Unit<na::Vector3<f64>>,
    pub east: na::Unit<na::Vector3<f64>>,
    pub north: na::Vector3<f64>,
    pub rotated_east: na::Unit<na::Vector3<f64>>,
    pub rotated_north: na::Unit<na::Vector3<f64>>,
}

impl LocalFrame {
    /// Builds the frame at `center` with the polar (z) axis of the reference
    /// ellipsoid defining north.
    pub fn new(center: &na::Point3<f64>, bearing: f64) -> Self {
        let unit_pos = na::Unit::new_normalize(center.coords);
        let east = na::Unit::new_normalize(na::Vector3::z().cross(&center.coords));
        let north = unit_pos.cross(&east);

        let rotation = na::UnitQuaternion::from_axis_angle(&unit_pos, bearing);
        let rotated_east = na::Unit::new_normalize(rotation * east.into_inner());
        let rotated_north = na::Unit::new_normalize(rotation * north);

        Self {
            unit_pos,
            east,
            north,
            rotated_east,
            rotated_north,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn equatorial_frame_is_the_global_axes() {
        let center = na::Point3::new(6378137.0, 0.0, 0.0);
        let frame = LocalFrame::new(&center, 0.0);

        assert_relative_eq!(frame.unit_pos.into_inner(), na::Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(frame.east.into_inner(), na::Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(frame.north, na::Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn frame_is_orthonormal() {
        let center = na::Point3::new(3_000_000.0, 4_000_000.0, 2_000_000.0);
        let frame = LocalFrame::new(&center, 0.7);

        assert_relative_eq!(frame.east.dot(&frame.north), 0.0, epsilon = 1e-12);
        assert_relative_eq!(frame.east.dot(&frame.unit_pos), 0.0, epsilon = 1e-12);
        assert_relative_eq!(frame.north.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            frame.rotated_east.dot(&frame.rotated_north),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn quarter_turn_swaps_east_and_north() {
        let center = na::Point3::new(6378137.0, 0.0, 0.0);
        let frame = LocalFrame::new(&center, FRAC_PI_2);

        assert_relative_eq!(
            frame.rotated_east.into_inner(),
            frame.north,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            frame.rotated_north.into_inner(),
            -frame.east.into_inner(),
            epsilon = 1e-12
        );
    }
}
