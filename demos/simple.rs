use ellipse_mesh::{EllipseGeometry, EllipseOptions};
use nalgebra as na;

fn main() -> Result<(), ellipse_mesh::Error> {
    // A 500 km x 300 km ellipse on the equator, rotated 30 degrees
    let geometry = EllipseGeometry::try_from(EllipseOptions {
        center: Some(na::Point3::new(6378137.0, 0.0, 0.0)),
        semi_major_axis: Some(500_000.0),
        semi_minor_axis: Some(300_000.0),
        bearing: 30_f64.to_radians(),
        ..Default::default()
    })
    .map_err(ellipse_mesh::Error::from)?;

    let mesh = geometry.tessellate()?;

    println!("vertices:  {}", mesh.vertex_count());
    println!("triangles: {}", mesh.index_lists[0].indices.len() / 3);
    println!(
        "bounding sphere: center {:?}, radius {}",
        mesh.bounding_sphere.center, mesh.bounding_sphere.radius
    );

    Ok(())
}
