pub mod ellipsoid;
pub mod geom;
pub mod math;
pub mod mesh;
mod error;

pub use ellipsoid::Ellipsoid;
pub use error::Error;
pub use geom::ellipse::{EllipseGeometry, EllipseOptions};
pub use mesh::{BoundingSphere, IndexList, PrimitiveType, TriangleMesh, VertexFormat};
