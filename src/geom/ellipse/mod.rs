mod frame;
mod grid;
mod triangulate;

pub use grid::{RowLayout, RowSpan, MAX_ANOMALY_LIMIT};

use nalgebra as na;
use thiserror::Error;

use crate::ellipsoid::Ellipsoid;
use crate::mesh::{BoundingSphere, IndexList, TriangleMesh, VertexFormat};
use frame::LocalFrame;

/// Default boundary step in radians.
pub const DEFAULT_GRANULARITY: f64 = 0.02;

/// Precondition failures raised before any geometry is computed.
#[derive(Debug, Error)]
pub enum EllipseError {
    #[error("Center is required")]
    MissingCenter,

    #[error("Semi-major axis is required")]
    MissingSemiMajorAxis,

    #[error("Semi-minor axis is required")]
    MissingSemiMinorAxis,

    #[error("Semi-major axis must be positive, got {0}")]
    NonPositiveSemiMajorAxis(f64),

    #[error("Semi-minor axis must be positive, got {0}")]
    NonPositiveSemiMinorAxis(f64),

    #[error("Granularity must be positive, got {0}")]
    NonPositiveGranularity(f64),
}

/// Construction record for an ellipse on the ellipsoid surface.
///
/// `center`, `semi_major_axis` and `semi_minor_axis` are required; everything
/// else has a usable default. The axes may be given in either order — they
/// are swapped during validation so the major axis is the longer one.
#[derive(Debug, Clone)]
pub struct EllipseOptions {
    /// Center of the ellipse, world frame, meters.
    pub center: Option<na::Point3<f64>>,
    /// Semi-major axis length in meters.
    pub semi_major_axis: Option<f64>,
    /// Semi-minor axis length in meters.
    pub semi_minor_axis: Option<f64>,
    /// Reference surface the ellipse is draped over.
    pub ellipsoid: Ellipsoid,
    /// Offset above (or below) the surface, meters.
    pub height: f64,
    /// Orientation of the major axis, radians clockwise from north.
    pub bearing: f64,
    /// Angular distance between boundary samples, radians.
    pub granularity: f64,
    /// Attributes the caller wants in the output mesh.
    pub vertex_format: VertexFormat,
    /// Transform attached to the output mesh.
    pub model_matrix: na::Matrix4<f64>,
    /// Opaque user tag, echoed into the output.
    pub pick_id: Option<u64>,
}

impl Default for EllipseOptions {
    fn default() -> Self {
        Self {
            center: None,
            semi_major_axis: None,
            semi_minor_axis: None,
            ellipsoid: Ellipsoid::wgs84(),
            height: 0.0,
            bearing: 0.0,
            granularity: DEFAULT_GRANULARITY,
            vertex_format: VertexFormat::POSITION_ONLY,
            model_matrix: na::Matrix4::identity(),
            pick_id: None,
        }
    }
}

/// A validated ellipse ready to tessellate. Axes are normalized so
/// `semi_major_axis >= semi_minor_axis`.
#[derive(Debug, Clone)]
pub struct EllipseGeometry {
    center: na::Point3<f64>,
    semi_major_axis: f64,
    semi_minor_axis: f64,
    ellipsoid: Ellipsoid,
    height: f64,
    bearing: f64,
    granularity: f64,
    vertex_format: VertexFormat,
    model_matrix: na::Matrix4<f64>,
    pick_id: Option<u64>,
}

impl TryFrom<EllipseOptions> for EllipseGeometry {
    type Error = EllipseError;

    fn try_from(options: EllipseOptions) -> Result<Self, Self::Error> {
        let center = options.center.ok_or(EllipseError::MissingCenter)?;
        let semi_major = options
            .semi_major_axis
            .ok_or(EllipseError::MissingSemiMajorAxis)?;
        let semi_minor = options
            .semi_minor_axis
            .ok_or(EllipseError::MissingSemiMinorAxis)?;

        if semi_major <= 0.0 {
            return Err(EllipseError::NonPositiveSemiMajorAxis(semi_major));
        }
        if semi_minor <= 0.0 {
            return Err(EllipseError::NonPositiveSemiMinorAxis(semi_minor));
        }
        if options.granularity <= 0.0 {
            return Err(EllipseError::NonPositiveGranularity(options.granularity));
        }

        // Silent normalization, not an error
        let (semi_major_axis, semi_minor_axis) = if semi_major < semi_minor {
            (semi_minor, semi_major)
        } else {
            (semi_major, semi_minor)
        };

        Ok(Self {
            center,
            semi_major_axis,
            semi_minor_axis,
            ellipsoid: options.ellipsoid,
            height: options.height,
            bearing: options.bearing,
            granularity: options.granularity,
            vertex_format: options.vertex_format,
            model_matrix: options.model_matrix,
            pick_id: options.pick_id,
        })
    }
}

impl EllipseGeometry {
    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_minor_axis
    }

    pub fn center(&self) -> &na::Point3<f64> {
        &self.center
    }

    /// Runs the tessellation pipeline and assembles the output mesh.
    ///
    /// One-shot and side-effect free: every invocation owns its intermediate
    /// buffers, so concurrent tessellations need no coordination.
    pub fn tessellate(&self) -> Result<TriangleMesh, crate::Error> {
        let frame = LocalFrame::new(&self.center, self.bearing);
        let mut sampled = grid::sample_ellipse(
            &self.center,
            self.semi_major_axis,
            self.semi_minor_axis,
            self.bearing,
            self.granularity,
            &frame,
        );
        grid::project_to_surface(&mut sampled.points, &self.ellipsoid, self.height)?;

        let indices = triangulate::triangulate(&sampled.layout);

        let positions = if self.vertex_format.position {
            let mut positions = Vec::with_capacity(3 * sampled.points.len());
            for point in &sampled.points {
                positions.extend_from_slice(&[point.x, point.y, point.z]);
            }
            positions
        } else {
            Vec::new()
        };

        Ok(TriangleMesh {
            positions,
            index_lists: vec![IndexList::triangles(indices)],
            bounding_sphere: BoundingSphere {
                center: self.center,
                radius: self.semi_major_axis,
            },
            model_matrix: self.model_matrix,
            pick_id: self.pick_id,
        })
    }
}
