use itertools::Itertools;

use super::grid::{RowLayout, RowSpan};

/// Builds the triangle index list over the row grid.
///
/// Three zones: a growing fan over the positive-x half, an equal-width strip
/// between the two widest rows, and a shrinking fan closing the negative-x
/// half. All triangles wind counter-clockwise seen from outside the
/// ellipsoid.
pub(crate) fn triangulate(layout: &RowLayout) -> Vec<u32> {
    let n = layout.half_rows();
    let rows = layout.rows();
    let mut indices = Vec::with_capacity(3 * (4 * n * n - 2));

    // Growing fan: each row against the narrower row before it
    for (narrow, wide) in rows[..n].iter().tuple_windows() {
        stitch_growing(narrow, wide, &mut indices);
    }

    // Central strip: the widest row of each half, equal widths
    let east = rows[n - 1];
    let west = rows[n];
    for j in 0..east.len - 1 {
        let a = (east.start + j) as u32;
        let b = (west.start + j) as u32;
        indices.extend_from_slice(&[b, a, a + 1, b, a + 1, b + 1]);
    }

    // Shrinking fan: mirror of the growing pattern
    for (wide, narrow) in rows[n..].iter().tuple_windows() {
        stitch_shrinking(wide, narrow, &mut indices);
    }

    indices
}

/// Connects a row of `m` points to the following row of `m + 2` points, the
/// wider row overhanging by one point at each end: a single triangle at each
/// end and a pair per interior quad.
fn stitch_growing(narrow: &RowSpan, wide: &RowSpan, indices: &mut Vec<u32>) {
    let m = narrow.len;
    let n0 = narrow.start as u32;
    let w0 = wide.start as u32;

    indices.extend_from_slice(&[w0, n0, w0 + 1]);
    for j in 0..m - 1 {
        let nj = n0 + j as u32;
        let wj = w0 + j as u32 + 1;
        indices.extend_from_slice(&[wj, nj, nj + 1, wj, nj + 1, wj + 1]);
    }
    let last_n = n0 + (m - 1) as u32;
    let last_w = w0 + (m + 1) as u32;
    indices.extend_from_slice(&[last_n, last_w, last_w - 1]);
}

/// Mirror of [stitch_growing] for the shrinking half, where the wide row
/// comes first in the point stream.
fn stitch_shrinking(wide: &RowSpan, narrow: &RowSpan, indices: &mut Vec<u32>) {
    let m = narrow.len;
    let n0 = narrow.start as u32;
    let w0 = wide.start as u32;

    indices.extend_from_slice(&[w0, w0 + 1, n0]);
    for j in 0..m - 1 {
        let nj = n0 + j as u32;
        let wj = w0 + j as u32 + 1;
        indices.extend_from_slice(&[nj, wj, wj + 1, nj, wj + 1, nj + 1]);
    }
    let last_n = n0 + (m - 1) as u32;
    let last_w = w0 + (m + 1) as u32;
    indices.extend_from_slice(&[last_n, last_w - 1, last_w]);
}
