use nalgebra as na;

/// Mirrors `point` across the line through `center` along `axis`.
///
/// The offset from `center` is decomposed into a component along `axis` and a
/// perpendicular remainder; the remainder is negated while the axial
/// component is kept. Applying the reflection twice returns the original
/// point.
pub fn reflect_across_axis<F: na::RealField + Copy>(
    point: &na::Point3<F>,
    center: &na::Point3<F>,
    axis: &na::Unit<na::Vector3<F>>,
) -> na::Point3<F> {
    let offset = point - center;
    let axial = axis.into_inner() * offset.dot(axis);
    let perpendicular = offset - axial;
    center + (axial - perpendicular)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn reflection_is_an_involution() {
        let point = na::Point3::new(1.5, -2.0, 0.7);
        let center = na::Point3::new(0.5, 0.5, 0.5);
        let axis = na::Unit::new_normalize(na::Vector3::new(1.0, 2.0, -1.0));

        let once = reflect_across_axis(&point, &center, &axis);
        let twice = reflect_across_axis(&once, &center, &axis);
        assert_relative_eq!(twice, point, epsilon = 1e-12);
    }

    #[test]
    fn points_on_the_axis_are_fixed() {
        let center = na::Point3::new(1.0, 1.0, 1.0);
        let axis = na::Unit::new_normalize(na::Vector3::new(0.0, 0.0, 1.0));
        let on_axis = na::Point3::new(1.0, 1.0, 4.0);

        let reflected = reflect_across_axis(&on_axis, &center, &axis);
        assert_relative_eq!(reflected, on_axis, epsilon = 1e-12);
    }

    #[test]
    fn reflects_across_the_z_axis_through_the_origin() {
        let center = na::Point3::origin();
        let axis = na::Unit::new_normalize(na::Vector3::z());

        let reflected = reflect_across_axis(&na::Point3::new(2.0, 3.0, 5.0), &center, &axis);
        assert_relative_eq!(reflected, na::Point3::new(-2.0, -3.0, 5.0), epsilon = 1e-12);
    }
}
