use nalgebra as na;

use super::frame::LocalFrame;
use crate::ellipsoid::{Ellipsoid, EllipsoidError};
use crate::math::reflect_across_axis;

/// Cap on the total anomaly swept while walking the quadrant boundary.
///
/// Slightly beyond π/2 so the walk spans the quadrant at every granularity
/// without overshooting past the pole region. The value is empirical and is
/// kept exactly for output compatibility; the `theta > 0` loop guard is what
/// actually terminates the sweep.
pub const MAX_ANOMALY_LIMIT: f64 = 2.31;

/// Location of one concentric row inside the flat point buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub start: usize,
    pub len: usize,
}

impl RowSpan {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Row bookkeeping for the full point stream.
///
/// The positive-x half consists of `half_rows` rows where row `i` holds
/// `2i + 2` points; the mirrored negative-x half repeats the same sizes in
/// reverse order. Computing the spans once keeps the symmetric expansion and
/// the triangulation working from the same arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    rows: Vec<RowSpan>,
    half_rows: usize,
}

impl RowLayout {
    pub fn new(half_rows: usize) -> Self {
        let mut rows = Vec::with_capacity(2 * half_rows);
        let mut start = 0;
        for i in 0..half_rows {
            let len = 2 * i + 2;
            rows.push(RowSpan { start, len });
            start += len;
        }
        for i in (0..half_rows).rev() {
            let len = 2 * i + 2;
            rows.push(RowSpan { start, len });
            start += len;
        }
        Self { rows, half_rows }
    }

    pub fn rows(&self) -> &[RowSpan] {
        &self.rows
    }

    /// Number of rows in the positive-x half, i.e. the realized quadrant
    /// step count.
    pub fn half_rows(&self) -> usize {
        self.half_rows
    }

    pub fn total_points(&self) -> usize {
        2 * self.half_rows * (self.half_rows + 1)
    }
}

/// The sampled point set of the ellipse disk together with its row layout.
///
/// Owned by the pipeline and discarded once the mesh is assembled.
#[derive(Debug, Clone)]
pub(crate) struct SampleGrid {
    pub points: Vec<na::Point3<f64>>,
    pub layout: RowLayout,
}

/// Samples the ellipse disk around `center`.
///
/// Walks the anomaly from π/2 toward zero, emitting per step the boundary
/// point, `2i` interior points interpolated toward its mirror across the
/// rotated east axis, and the mirror itself. A second pass reflects every
/// row across the rotated north axis, walking rows back to front, to fill
/// the negative-x half without recomputing any trigonometry.
pub(crate) fn sample_ellipse(
    center: &na::Point3<f64>,
    semi_major_axis: f64,
    semi_minor_axis: f64,
    bearing: f64,
    granularity: f64,
    frame: &LocalFrame,
) -> SampleGrid {
    let num_pts = 1 + (std::f64::consts::FRAC_PI_2 / granularity).ceil() as usize;
    let delta_theta = MAX_ANOMALY_LIMIT / (num_pts - 1) as f64;

    let mag = center.coords.norm();
    let major_squared = semi_major_axis * semi_major_axis;
    let minor_squared = semi_minor_axis * semi_minor_axis;
    let ab = semi_major_axis * semi_minor_axis;

    let mut points: Vec<na::Point3<f64>> = Vec::new();
    let mut half_rows = 0;

    let mut theta = std::f64::consts::FRAC_PI_2;
    let mut i = 0;
    while i < num_pts && theta > 0.0 {
        let boundary = point_on_boundary(
            theta,
            bearing,
            frame,
            major_squared,
            minor_squared,
            ab,
            mag,
        );
        let mirrored = reflect_across_axis(&boundary, center, &frame.rotated_east);

        let row_len = 2 * i + 2;
        points.push(boundary);
        for j in 1..row_len - 1 {
            let t = j as f64 / (row_len - 1) as f64;
            points.push(na::Point3::from(boundary.coords.lerp(&mirrored.coords, t)));
        }
        points.push(mirrored);

        half_rows += 1;
        i += 1;
        theta -= delta_theta;
    }

    // Mirror pass: negative-x half, rows from widest back down to the apex
    let layout = RowLayout::new(half_rows);
    for row in layout.rows()[..half_rows].iter().rev() {
        for idx in row.start..row.end() {
            let reflected = reflect_across_axis(&points[idx], center, &frame.rotated_north);
            points.push(reflected);
        }
    }
    debug_assert_eq!(points.len(), layout.total_points());

    SampleGrid { points, layout }
}

/// A point on the ellipse boundary at anomaly `theta`, in the positive-x
/// half.
///
/// The polar ellipse radius at `theta` is converted to an angular
/// displacement on the great circle of radius `mag` and applied to the
/// center direction by a quaternion rotation about an axis in the tangent
/// plane.
fn point_on_boundary(
    theta: f64,
    bearing: f64,
    frame: &LocalFrame,
    major_squared: f64,
    minor_squared: f64,
    ab: f64,
    mag: f64,
) -> na::Point3<f64> {
    let azimuth = theta + bearing;
    let rot_axis = frame.east.into_inner() * azimuth.cos() + frame.north * azimuth.sin();

    let (sin_theta, cos_theta) = theta.sin_cos();
    let radius = ab
        / (major_squared * sin_theta * sin_theta + minor_squared * cos_theta * cos_theta).sqrt();
    let angle = radius / mag;

    let rotation = na::UnitQuaternion::from_axis_angle(&na::Unit::new_normalize(rot_axis), angle);
    let direction = rotation * frame.unit_pos.into_inner();
    na::Point3::from(direction.normalize() * mag)
}

/// Snaps every sample onto the geodetic surface and offsets it by `height`
/// along the local surface normal. Point count and order are unchanged.
pub(crate) fn project_to_surface(
    points: &mut [na::Point3<f64>],
    ellipsoid: &Ellipsoid,
    height: f64,
) -> Result<(), EllipsoidError> {
    for point in points.iter_mut() {
        let on_surface = ellipsoid.scale_to_geodetic_surface(point)?;
        let normal = ellipsoid.geodetic_surface_normal(&on_surface);
        *point = on_surface + normal.into_inner() * height;
    }
    Ok(())
}
