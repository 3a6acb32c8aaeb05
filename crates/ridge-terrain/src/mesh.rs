//! Terrain window mesh generation

use crate::sampler::HeightSampler;
use bytemuck::{Pod, Zeroable};
use ridge_core::{Result, RidgeError, Vec2};

/// One terrain vertex, laid out for direct GPU upload
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// The dense grid mesh for one frame's terrain window
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    /// Window centre the grid was generated around
    pub origin: Vec2,
    /// Vertices along world X
    pub width: u32,
    /// Vertices along world Z
    pub depth: u32,
    /// Row-major vertices, `depth` per row
    pub vertices: Vec<TerrainVertex>,
    /// Triangle indices (CCW winding seen from above)
    pub indices: Vec<u32>,
    /// AABB minimum corner
    pub aabb_min: [f32; 3],
    /// AABB maximum corner
    pub aabb_max: [f32; 3],
}

impl TerrainGrid {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Row-major index of grid point (i along X, j along Z)
    pub fn vertex_index(&self, i: u32, j: u32) -> u32 {
        grid_index(self.depth, i, j)
    }
}

fn grid_index(depth: u32, i: u32, j: u32) -> u32 {
    depth * i + j
}

/// Build the terrain mesh for a `width` x `depth` vertex window centred on `origin`.
///
/// Grid point (i, j) sits at world `(origin.x + i - width/2, origin.y + j - depth/2)`
/// with integer half extents. Heights come straight from world coordinates, so two
/// windows that overlap agree exactly on the shared points.
pub fn generate(
    sampler: &HeightSampler,
    origin: Vec2,
    width: u32,
    depth: u32,
) -> Result<TerrainGrid> {
    if width < 2 || depth < 2 {
        return Err(RidgeError::InvalidGridSize { width, depth });
    }
    if width as u64 * depth as u64 > u32::MAX as u64 {
        return Err(RidgeError::GridTooLarge { width, depth });
    }

    let vert_count = (width * depth) as usize;
    let mut vertices = Vec::with_capacity(vert_count);

    let half_w = (width / 2) as f32;
    let half_d = (depth / 2) as f32;

    let mut aabb_min = [f32::MAX; 3];
    let mut aabb_max = [f32::MIN; 3];

    for i in 0..width {
        for j in 0..depth {
            let world_x = origin.x + i as f32 - half_w;
            let world_z = origin.y + j as f32 - half_d;
            let sample = sampler.sample(world_x, world_z);

            let pos = [world_x, sample.height, world_z];

            for k in 0..3 {
                aabb_min[k] = aabb_min[k].min(pos[k]);
                aabb_max[k] = aabb_max[k].max(pos[k]);
            }

            vertices.push(TerrainVertex {
                position: pos,
                normal: sample.normal.to_array(),
            });
        }
    }

    let index_count = (width - 1) as usize * (depth - 1) as usize * 6;
    let mut indices = Vec::with_capacity(index_count);

    for i in 0..width - 1 {
        for j in 0..depth - 1 {
            let here = grid_index(depth, i, j);
            let next_z = grid_index(depth, i, j + 1);
            let next_x = grid_index(depth, i + 1, j);
            let diagonal = grid_index(depth, i + 1, j + 1);

            indices.extend_from_slice(&[here, next_z, next_x]);
            indices.extend_from_slice(&[next_x, next_z, diagonal]);
        }
    }

    Ok(TerrainGrid {
        origin,
        width,
        depth,
        vertices,
        indices,
        aabb_min,
        aabb_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::NoiseField;
    use ridge_core::{FractalKind, Vec3};

    fn sampler(octaves: u32) -> HeightSampler {
        let noise = NoiseField::new(1337, 0.01, FractalKind::Plain).unwrap();
        HeightSampler::new(noise, octaves, 20.0, 0.1).unwrap()
    }

    #[test]
    fn two_by_two_grid_is_two_triangles() {
        let grid = generate(&sampler(4), Vec2::ZERO, 2, 2).unwrap();
        assert_eq!(grid.vertex_count(), 4);
        assert_eq!(grid.triangle_count(), 2);
        assert_eq!(grid.indices, vec![0, 1, 2, 2, 1, 3]);
    }

    #[test]
    fn counts_and_index_bounds() {
        for (w, d) in [(3, 3), (10, 7), (7, 10), (64, 64)] {
            let grid = generate(&sampler(4), Vec2::new(12.0, -40.0), w, d).unwrap();
            assert_eq!(grid.vertex_count(), (w * d) as usize);
            assert_eq!(grid.index_count(), ((w - 1) * (d - 1) * 6) as usize);
            assert!(grid.indices.iter().all(|&idx| idx < w * d));
        }
    }

    #[test]
    fn window_is_centred_on_origin() {
        let grid = generate(&sampler(0), Vec2::new(100.0, 50.0), 4, 6).unwrap();
        assert_eq!(grid.vertices[0].position, [98.0, 0.0, 47.0]);
        let last = grid.vertices[grid.vertex_index(3, 5) as usize];
        assert_eq!(last.position, [101.0, 0.0, 52.0]);
    }

    #[test]
    fn row_major_layout_along_z() {
        let grid = generate(&sampler(0), Vec2::ZERO, 3, 4).unwrap();
        // Consecutive vertices step along Z, rows step along X
        assert_eq!(grid.vertices[1].position[2] - grid.vertices[0].position[2], 1.0);
        let next_row = grid.vertex_index(1, 0) as usize;
        assert_eq!(next_row, 4);
        assert_eq!(grid.vertices[next_row].position[0] - grid.vertices[0].position[0], 1.0);
    }

    #[test]
    fn triangles_face_up() {
        let grid = generate(&sampler(4), Vec2::new(3.0, 3.0), 12, 9).unwrap();
        for tri in grid.indices.chunks(3) {
            let p = |k: usize| Vec3::from_array(grid.vertices[tri[k] as usize].position);
            let face = (p(1) - p(0)).cross(&(p(2) - p(0)));
            assert!(face.y > 0.0, "triangle {:?} faces down", tri);
        }
    }

    #[test]
    fn vertex_normals_match_sampler() {
        let s = sampler(4);
        let grid = generate(&s, Vec2::new(-7.0, 21.0), 5, 5).unwrap();
        for v in &grid.vertices {
            let expected = s.sample(v.position[0], v.position[2]);
            assert_eq!(v.position[1], expected.height);
            assert_eq!(v.normal, expected.normal.to_array());
        }
    }

    #[test]
    fn overlapping_windows_share_heights() {
        let s = sampler(5);
        let a = generate(&s, Vec2::new(0.0, 0.0), 10, 10).unwrap();
        let b = generate(&s, Vec2::new(9.0, 0.0), 10, 10).unwrap();

        // Last X row of `a` and first X row of `b` cover the same world points
        for j in 0..10 {
            let va = a.vertices[a.vertex_index(9, j) as usize];
            let vb = b.vertices[b.vertex_index(0, j) as usize];
            assert_eq!(va.position[0], vb.position[0]);
            assert_eq!(va.position[2], vb.position[2]);
            assert_eq!(va.position[1].to_bits(), vb.position[1].to_bits());
        }
    }

    #[test]
    fn aabb_contains_every_vertex() {
        let grid = generate(&sampler(4), Vec2::ZERO, 20, 20).unwrap();
        for v in &grid.vertices {
            for k in 0..3 {
                assert!(v.position[k] >= grid.aabb_min[k]);
                assert!(v.position[k] <= grid.aabb_max[k]);
            }
        }
        assert_eq!(grid.aabb_min[0], -10.0);
        assert_eq!(grid.aabb_max[0], 9.0);
    }

    #[test]
    fn rejects_degenerate_sizes() {
        let s = sampler(1);
        for (w, d) in [(0, 0), (1, 5), (5, 1), (0, 10)] {
            assert!(matches!(
                generate(&s, Vec2::ZERO, w, d),
                Err(RidgeError::InvalidGridSize { .. })
            ));
        }
    }

    #[test]
    fn rejects_grids_beyond_u32_indices() {
        assert!(matches!(
            generate(&sampler(1), Vec2::ZERO, 70_000, 70_000),
            Err(RidgeError::GridTooLarge { .. })
        ));
    }
}
