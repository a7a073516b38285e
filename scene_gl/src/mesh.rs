/// TriMesh — immutable triangle mesh held in GPU buffers.
///
/// Positions, colours and (optionally) normals are interleaved into one
/// vertex buffer of tightly packed `f32`s:
///
/// | layout                     | stride   | colour offset | normal offset |
/// |----------------------------|----------|---------------|---------------|
/// | position + colour          | 24 bytes | 12            | -             |
/// | position + colour + normal | 36 bytes | 12            | 24            |
///
/// Triangles go into a `u32` index buffer. Both buffers are uploaded once
/// at construction and released exactly once on drop.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::context::ClientAttribContext;
use crate::device::{BufferHandle, BufferTarget, ClientArray, GlDevice, PrimitiveMode};
use crate::error::Result;

const SOURCE: &str = "scenegl::TriMesh";

// ===== VERTEX LAYOUTS =====

/// Interleaved position + colour vertex
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ColouredVertex {
    pub position: [f32; 3],
    pub colour: [f32; 3],
}

/// Interleaved position + colour + normal vertex
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LitVertex {
    pub position: [f32; 3],
    pub colour: [f32; 3],
    pub normal: [f32; 3],
}

/// Byte offset of the colour in either layout
pub const COLOUR_OFFSET: usize = 12;
/// Byte offset of the normal in `LitVertex`
pub const NORMAL_OFFSET: usize = 24;

// ===== MESH =====

/// Immutable GPU triangle mesh
pub struct TriMesh<'d> {
    device: &'d dyn GlDevice,
    vertex_buffer: BufferHandle,
    index_buffer: BufferHandle,
    vertex_count: usize,
    triangle_count: usize,
    has_normals: bool,
}

impl<'d> TriMesh<'d> {
    /// Upload a mesh
    ///
    /// `colours` and `normals` (when given) must have one entry per vertex
    /// and every triangle index must be below the vertex count. Nothing is
    /// allocated when validation fails.
    pub fn new(
        device: &'d dyn GlDevice,
        vertices: &[Vec3],
        colours: &[Vec3],
        triangles: &[[u32; 3]],
        normals: Option<&[Vec3]>,
    ) -> Result<Self> {
        if colours.len() != vertices.len() {
            crate::scenegl_bail!(SOURCE, InvalidArgument,
                "Expected one colour per vertex ({} vertices, {} colours)", vertices.len(), colours.len());
        }
        if let Some(normals) = normals {
            if normals.len() != vertices.len() {
                crate::scenegl_bail!(SOURCE, InvalidArgument,
                    "Expected one normal per vertex ({} vertices, {} normals)", vertices.len(), normals.len());
            }
        }
        if let Some((t, index)) = triangles
            .iter()
            .enumerate()
            .find_map(|(t, tri)| tri.iter().find(|&&i| i as usize >= vertices.len()).map(|&i| (t, i)))
        {
            crate::scenegl_bail!(SOURCE, InvalidArgument,
                "Triangle {} refers to vertex {} but the mesh has {} vertices", t, index, vertices.len());
        }

        let vertex_bytes: Vec<u8> = match normals {
            Some(normals) => {
                let interleaved: Vec<LitVertex> = vertices
                    .iter()
                    .zip(colours)
                    .zip(normals)
                    .map(|((p, c), n)| LitVertex {
                        position: p.to_array(),
                        colour: c.to_array(),
                        normal: n.to_array(),
                    })
                    .collect();
                bytemuck::cast_slice(&interleaved).to_vec()
            }
            None => {
                let interleaved: Vec<ColouredVertex> = vertices
                    .iter()
                    .zip(colours)
                    .map(|(p, c)| ColouredVertex {
                        position: p.to_array(),
                        colour: c.to_array(),
                    })
                    .collect();
                bytemuck::cast_slice(&interleaved).to_vec()
            }
        };

        let vertex_buffer = device.gen_buffer();
        device.bind_buffer(BufferTarget::Array, Some(vertex_buffer));
        device.buffer_data(BufferTarget::Array, &vertex_bytes);
        device.bind_buffer(BufferTarget::Array, None);

        let index_buffer = device.gen_buffer();
        device.bind_buffer(BufferTarget::ElementArray, Some(index_buffer));
        device.buffer_data(BufferTarget::ElementArray, bytemuck::cast_slice(triangles));
        device.bind_buffer(BufferTarget::ElementArray, None);

        crate::scenegl_debug!(SOURCE, "Uploaded mesh: {} vertices, {} triangles, normals: {}",
            vertices.len(), triangles.len(), normals.is_some());

        Ok(Self {
            device,
            vertex_buffer,
            index_buffer,
            vertex_count: vertices.len(),
            triangle_count: triangles.len(),
            has_normals: normals.is_some(),
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    pub fn has_normals(&self) -> bool {
        self.has_normals
    }

    /// Byte distance between consecutive vertices
    pub fn stride(&self) -> usize {
        if self.has_normals {
            std::mem::size_of::<LitVertex>()
        } else {
            std::mem::size_of::<ColouredVertex>()
        }
    }

    /// Draw every triangle with the current state
    ///
    /// Client array enables and pointers are restored afterwards.
    pub fn render(&self) {
        let device = self.device;
        let stride = self.stride() as i32;
        let _client = ClientAttribContext::new(device);

        device.bind_buffer(BufferTarget::Array, Some(self.vertex_buffer));
        device.bind_buffer(BufferTarget::ElementArray, Some(self.index_buffer));

        device.enable_client_state(ClientArray::Vertex);
        device.enable_client_state(ClientArray::Colour);
        device.array_pointer(ClientArray::Vertex, 3, stride, 0);
        device.array_pointer(ClientArray::Colour, 3, stride, COLOUR_OFFSET);
        if self.has_normals {
            device.enable_client_state(ClientArray::Normal);
            device.array_pointer(ClientArray::Normal, 3, stride, NORMAL_OFFSET);
        }

        device.draw_elements(PrimitiveMode::Triangles, (self.triangle_count * 3) as i32, 0);

        if self.has_normals {
            device.disable_client_state(ClientArray::Normal);
        }
        device.disable_client_state(ClientArray::Colour);
        device.disable_client_state(ClientArray::Vertex);

        device.bind_buffer(BufferTarget::ElementArray, None);
        device.bind_buffer(BufferTarget::Array, None);
    }
}

impl Drop for TriMesh<'_> {
    fn drop(&mut self) {
        for buffer in [self.index_buffer, self.vertex_buffer] {
            if let Err(e) = self.device.delete_buffer(buffer) {
                crate::scenegl_warn!(SOURCE, "Failed to delete buffer {:?}: {}", buffer, e);
            }
        }
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
