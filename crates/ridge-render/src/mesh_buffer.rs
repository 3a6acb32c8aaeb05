//! Persistent GPU buffers for the per-frame terrain mesh
//!
//! The buffers are allocated once and refilled in place every frame with
//! `Queue::write_buffer`. They are only reallocated when a grid no longer fits.

use log::debug;
use ridge_terrain::{TerrainGrid, TerrainVertex};

/// Vertex and index buffers sized for the largest grid seen so far
pub struct TerrainMeshBuffer {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_capacity: u64,
    index_capacity: u64,
    index_count: u32,
}

impl TerrainMeshBuffer {
    /// Allocate buffers for `vertex_count` vertices and `index_count` indices
    pub fn new(device: &wgpu::Device, vertex_count: usize, index_count: usize) -> Self {
        let vertex_capacity = vertex_bytes(vertex_count);
        let index_capacity = index_bytes(index_count);
        Self {
            vertex_buffer: create_buffer(
                device,
                "Terrain Vertex Buffer",
                vertex_capacity,
                wgpu::BufferUsages::VERTEX,
            ),
            index_buffer: create_buffer(
                device,
                "Terrain Index Buffer",
                index_capacity,
                wgpu::BufferUsages::INDEX,
            ),
            vertex_capacity,
            index_capacity,
            index_count: 0,
        }
    }

    /// Sized for a `width` x `depth` vertex grid
    pub fn for_grid_size(device: &wgpu::Device, width: u32, depth: u32) -> Self {
        let vertices = width as usize * depth as usize;
        let indices = (width.max(1) - 1) as usize * (depth.max(1) - 1) as usize * 6;
        Self::new(device, vertices, indices)
    }

    /// Copy a grid into the buffers. Returns true if a buffer had to grow.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        grid: &TerrainGrid,
    ) -> bool {
        let vertex_data: &[u8] = bytemuck::cast_slice(&grid.vertices);
        let index_data: &[u8] = bytemuck::cast_slice(&grid.indices);
        let mut grew = false;

        if let Some(capacity) = grown_capacity(self.vertex_capacity, vertex_data.len() as u64) {
            debug!("growing terrain vertex buffer to {} bytes", capacity);
            self.vertex_buffer = create_buffer(
                device,
                "Terrain Vertex Buffer",
                capacity,
                wgpu::BufferUsages::VERTEX,
            );
            self.vertex_capacity = capacity;
            grew = true;
        }
        if let Some(capacity) = grown_capacity(self.index_capacity, index_data.len() as u64) {
            debug!("growing terrain index buffer to {} bytes", capacity);
            self.index_buffer = create_buffer(
                device,
                "Terrain Index Buffer",
                capacity,
                wgpu::BufferUsages::INDEX,
            );
            self.index_capacity = capacity;
            grew = true;
        }

        if !vertex_data.is_empty() {
            queue.write_buffer(&self.vertex_buffer, 0, vertex_data);
        }
        if !index_data.is_empty() {
            queue.write_buffer(&self.index_buffer, 0, index_data);
        }
        self.index_count = grid.indices.len() as u32;
        grew
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Bind the buffers and issue one indexed draw covering every uploaded triangle
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.index_count == 0 {
            return;
        }
        let index_len = index_bytes(self.index_count as usize);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..index_len), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

fn vertex_bytes(count: usize) -> u64 {
    (count * std::mem::size_of::<TerrainVertex>()) as u64
}

fn index_bytes(count: usize) -> u64 {
    (count * std::mem::size_of::<u32>()) as u64
}

/// New capacity when `required` bytes don't fit in `capacity`, else `None`.
/// Rounded up to `COPY_BUFFER_ALIGNMENT` so `write_buffer` stays valid.
fn grown_capacity(capacity: u64, required: u64) -> Option<u64> {
    if required <= capacity {
        return None;
    }
    Some(align_copy(required))
}

fn align_copy(size: u64) -> u64 {
    let align = wgpu::COPY_BUFFER_ALIGNMENT;
    size.div_ceil(align) * align
}

fn create_buffer(
    device: &wgpu::Device,
    label: &str,
    size: u64,
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        // Zero-sized buffers can't be bound; keep at least one aligned word
        size: align_copy(size.max(wgpu::COPY_BUFFER_ALIGNMENT)),
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitting_data_reuses_buffer() {
        assert_eq!(grown_capacity(1024, 1024), None);
        assert_eq!(grown_capacity(1024, 12), None);
        assert_eq!(grown_capacity(1024, 0), None);
    }

    #[test]
    fn larger_data_grows_to_aligned_size() {
        assert_eq!(grown_capacity(1024, 1030), Some(1032));
        assert_eq!(grown_capacity(0, 24), Some(24));
    }

    #[test]
    fn byte_sizes_follow_vertex_layout() {
        assert_eq!(vertex_bytes(150 * 150), 150 * 150 * 24);
        assert_eq!(index_bytes(149 * 149 * 6), 149 * 149 * 6 * 4);
    }
}
