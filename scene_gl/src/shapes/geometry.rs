/// Geometry — line-segment layouts for box and grid wireframes.

use glam::Vec3;
use crate::error::Result;

const SOURCE: &str = "scenegl::Geometry";

/// Largest number of segments `voxel_grid_segments` will lay out
pub const MAX_GRID_SEGMENTS: usize = 1 << 20;

/// Line segment as its two endpoints
pub type Segment = (Vec3, Vec3);

/// Corner `i` of the box has `maxs` in the axes whose bit is set in `i`
/// (bit 0 = x, bit 1 = y, bit 2 = z)
pub fn aabb_corners(mins: Vec3, maxs: Vec3) -> [Vec3; 8] {
    std::array::from_fn(|i| {
        Vec3::new(
            if i & 1 != 0 { maxs.x } else { mins.x },
            if i & 2 != 0 { maxs.y } else { mins.y },
            if i & 4 != 0 { maxs.z } else { mins.z },
        )
    })
}

/// The 12 edges of an axis-aligned box
pub fn aabb_edges(mins: Vec3, maxs: Vec3) -> [Segment; 12] {
    let c = aabb_corners(mins, maxs);
    [
        // along x
        (c[0], c[1]), (c[2], c[3]), (c[4], c[5]), (c[6], c[7]),
        // along y
        (c[0], c[2]), (c[1], c[3]), (c[4], c[6]), (c[5], c[7]),
        // along z
        (c[0], c[4]), (c[1], c[5]), (c[2], c[6]), (c[3], c[7]),
    ]
}

/// Number of cells needed to cover `extent` with cells of `size`
///
/// Extents that are a whole number of cells up to float noise do not get
/// an extra sliver cell.
fn cell_count(extent: f32, size: f32) -> f32 {
    ((extent / size) - 1e-4).ceil().max(0.0)
}

/// Grid lines of the voxels covering the box `mins..maxs`
///
/// Voxels of `voxel_size` are laid out from `mins`; when the extent is not
/// a whole number of voxels the last layer overhangs `maxs`. Every grid
/// line runs the full length of the grid along one axis, so a box of
/// exactly one voxel yields its 12 edges. Grids needing more than
/// `MAX_GRID_SEGMENTS` lines are an `InvalidArgument`.
pub fn voxel_grid_segments(mins: Vec3, maxs: Vec3, voxel_size: Vec3) -> Result<Vec<Segment>> {
    if !voxel_size.is_finite() || voxel_size.min_element() <= 0.0 {
        crate::scenegl_bail!(SOURCE, InvalidArgument,
            "Voxel size must be positive and finite (got {})", voxel_size);
    }
    if !(mins.is_finite() && maxs.is_finite()) || mins.cmpgt(maxs).any() {
        crate::scenegl_bail!(SOURCE, InvalidArgument,
            "Invalid voxel grid bounds {} .. {}", mins, maxs);
    }

    let extent = maxs - mins;
    let cells = [
        cell_count(extent.x, voxel_size.x),
        cell_count(extent.y, voxel_size.y),
        cell_count(extent.z, voxel_size.z),
    ];
    let lines = |a: usize, b: usize| (f64::from(cells[a]) + 1.0) * (f64::from(cells[b]) + 1.0);
    let total = lines(1, 2) + lines(0, 2) + lines(0, 1);
    if !(total <= MAX_GRID_SEGMENTS as f64) {
        crate::scenegl_bail!(SOURCE, InvalidArgument,
            "Voxel grid of {} x {} x {} cells exceeds {} segments",
            cells[0], cells[1], cells[2], MAX_GRID_SEGMENTS);
    }
    let counts = cells.map(|c| c as usize);
    let coords: Vec<Vec<f32>> = (0..3)
        .map(|axis| {
            (0..=counts[axis])
                .map(|k| mins[axis] + k as f32 * voxel_size[axis])
                .collect()
        })
        .collect();

    let mut segments = Vec::new();
    for axis in 0..3 {
        let (a, b) = ((axis + 1) % 3, (axis + 2) % 3);
        let (lo, hi) = (coords[axis][0], coords[axis][counts[axis]]);
        for &ca in &coords[a] {
            for &cb in &coords[b] {
                let mut start = Vec3::ZERO;
                start[axis] = lo;
                start[a] = ca;
                start[b] = cb;
                let mut end = start;
                end[axis] = hi;
                segments.push((start, end));
            }
        }
    }
    Ok(segments)
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
