use nalgebra as na;
use thiserror::Error;

/// Convergence threshold for the geodetic surface-scaling iteration.
const SURFACE_SCALING_EPSILON: f64 = 1e-12;

#[derive(Debug, Error)]
pub enum EllipsoidError {
    #[error("Cannot scale a point at the ellipsoid origin onto the surface")]
    DegeneratePoint,
}

/// An axis-aligned reference ellipsoid centered at the origin, described by
/// its three semi-axis radii.
///
/// The surface is the set of points satisfying
/// `x²/rx² + y²/ry² + z²/rz² = 1`. The rotational (polar) axis is z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    radii: na::Vector3<f64>,
    one_over_radii_squared: na::Vector3<f64>,
}

impl Ellipsoid {
    /// Creates an ellipsoid with the given semi-axis radii in meters.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        let radii = na::Vector3::new(x, y, z);
        Self {
            radii,
            one_over_radii_squared: radii.map(|r| 1.0 / (r * r)),
        }
    }

    /// The WGS84 Earth reference ellipsoid.
    pub fn wgs84() -> Self {
        Self::new(6378137.0, 6378137.0, 6356752.3142451793)
    }

    pub fn radii(&self) -> &na::Vector3<f64> {
        &self.radii
    }

    /// Outward unit normal of the surface at (or radially associated with)
    /// `point`: the normalized gradient of the quadric at that point.
    pub fn geodetic_surface_normal(&self, point: &na::Point3<f64>) -> na::Unit<na::Vector3<f64>> {
        na::Unit::new_normalize(point.coords.component_mul(&self.one_over_radii_squared))
    }

    /// Scales `point` radially toward the origin until it hits the surface.
    ///
    /// Cheap but biased; the result is not the closest surface point unless
    /// the ellipsoid is a sphere. Used as the seed for the geodetic
    /// iteration.
    pub fn scale_to_geocentric_surface(
        &self,
        point: &na::Point3<f64>,
    ) -> Result<na::Point3<f64>, EllipsoidError> {
        let squared_norm = self.quadric_norm_squared(point);
        if squared_norm == 0.0 {
            return Err(EllipsoidError::DegeneratePoint);
        }
        Ok(na::Point3::from(
            point.coords * (1.0 / squared_norm.sqrt()),
        ))
    }

    /// Moves `point` along the surface gradient onto the ellipsoid, yielding
    /// the surface point whose outward normal passes through `point`.
    ///
    /// Solves `Σ xᵢ²/(rᵢ²(1 + λ/rᵢ²)²) = 1` for the Lagrange multiplier λ by
    /// Newton iteration, seeded from the geocentric scaling. Fails only for
    /// the origin, where no direction is defined.
    pub fn scale_to_geodetic_surface(
        &self,
        point: &na::Point3<f64>,
    ) -> Result<na::Point3<f64>, EllipsoidError> {
        let w = point
            .coords
            .component_mul(&point.coords)
            .component_mul(&self.one_over_radii_squared);
        let squared_norm = w.sum();
        if squared_norm == 0.0 {
            return Err(EllipsoidError::DegeneratePoint);
        }
        let ratio = (1.0 / squared_norm).sqrt();

        let intersection = point.coords * ratio;
        let gradient = intersection.component_mul(&self.one_over_radii_squared) * 2.0;
        let mut lambda = (1.0 - ratio) * point.coords.norm() / (0.5 * gradient.norm());
        let mut correction = 0.0;

        let multipliers = loop {
            lambda -= correction;
            let multipliers = self
                .one_over_radii_squared
                .map(|inv| 1.0 / (1.0 + lambda * inv));
            let multipliers_squared = multipliers.component_mul(&multipliers);
            let multipliers_cubed = multipliers_squared.component_mul(&multipliers);

            let func = w.dot(&multipliers_squared) - 1.0;
            if func.abs() <= SURFACE_SCALING_EPSILON {
                break multipliers;
            }

            let derivative = -2.0
                * w.component_mul(&multipliers_cubed)
                    .dot(&self.one_over_radii_squared);
            correction = func / derivative;
        };

        Ok(na::Point3::from(point.coords.component_mul(&multipliers)))
    }

    fn quadric_norm_squared(&self, point: &na::Point3<f64>) -> f64 {
        point
            .coords
            .component_mul(&point.coords)
            .dot(&self.one_over_radii_squared)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::wgs84()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn on_surface(ellipsoid: &Ellipsoid, point: &na::Point3<f64>) -> f64 {
        ellipsoid.quadric_norm_squared(point)
    }

    #[test]
    fn surface_point_is_a_fixed_point() {
        let ellipsoid = Ellipsoid::wgs84();
        let equator = na::Point3::new(6378137.0, 0.0, 0.0);

        let scaled = ellipsoid.scale_to_geodetic_surface(&equator).unwrap();
        assert_relative_eq!(scaled, equator, epsilon = 1e-6);
    }

    #[test]
    fn scaled_point_lands_on_the_surface() {
        let ellipsoid = Ellipsoid::wgs84();
        let above = na::Point3::new(7_000_000.0, 1_000_000.0, 3_000_000.0);
        let below = na::Point3::new(3_000_000.0, -2_000_000.0, 1_000_000.0);

        for point in [above, below] {
            let scaled = ellipsoid.scale_to_geodetic_surface(&point).unwrap();
            assert_relative_eq!(on_surface(&ellipsoid, &scaled), 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn geodetic_scaling_moves_along_the_normal() {
        let ellipsoid = Ellipsoid::wgs84();
        let point = na::Point3::new(7_000_000.0, 2_000_000.0, 3_000_000.0);

        let scaled = ellipsoid.scale_to_geodetic_surface(&point).unwrap();
        let normal = ellipsoid.geodetic_surface_normal(&scaled);
        let offset = point - scaled;

        // Offset must be parallel to the surface normal at the scaled point
        assert_relative_eq!(
            offset.normalize().dot(&normal),
            1.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn polar_normal_is_the_z_axis() {
        let ellipsoid = Ellipsoid::wgs84();
        let pole = na::Point3::new(0.0, 0.0, 6356752.3142451793);

        let normal = ellipsoid.geodetic_surface_normal(&pole);
        assert_relative_eq!(normal.into_inner(), na::Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn geocentric_scaling_preserves_direction() {
        let ellipsoid = Ellipsoid::wgs84();
        let point = na::Point3::new(1.0, 2.0, 3.0);

        let scaled = ellipsoid.scale_to_geocentric_surface(&point).unwrap();
        assert_relative_eq!(on_surface(&ellipsoid, &scaled), 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            scaled.coords.normalize(),
            point.coords.normalize(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn origin_cannot_be_scaled() {
        let ellipsoid = Ellipsoid::wgs84();
        let origin = na::Point3::origin();

        assert!(matches!(
            ellipsoid.scale_to_geodetic_surface(&origin),
            Err(EllipsoidError::DegeneratePoint)
        ));
    }
}
