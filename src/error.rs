use crate::ellipsoid::EllipsoidError;
use crate::geom::ellipse::EllipseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Ellipse(#[from] EllipseError),

    #[error(transparent)]
    Ellipsoid(#[from] EllipsoidError),

    #[error("Unknown error: {0}")]
    Unknown(#[from] anyhow::Error),
}
