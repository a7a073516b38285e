use glam::Vec3;
use crate::device::{Capability, MockGlDevice};
use crate::error::Error;
use super::*;

fn floats(bytes: &[u8]) -> Vec<f32> {
    bytes.chunks_exact(4).map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]])).collect()
}

fn quad() -> (Vec<Vec3>, Vec<Vec3>, Vec<[u32; 3]>) {
    let vertices = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let colours = vec![Vec3::X, Vec3::Y, Vec3::Z, Vec3::ONE];
    let triangles = vec![[0, 1, 2], [0, 2, 3]];
    (vertices, colours, triangles)
}

#[test]
fn test_vertex_layout_sizes() {
    assert_eq!(std::mem::size_of::<ColouredVertex>(), 24);
    assert_eq!(std::mem::size_of::<LitVertex>(), 36);
}

#[test]
fn test_uploads_interleaved_data() {
    let device = MockGlDevice::new(64, 64);
    let (vertices, colours, triangles) = quad();
    let mesh = TriMesh::new(&device, &vertices, &colours, &triangles, None).unwrap();

    let state = device.state();
    let vertex_data = &state.buffers[&mesh.vertex_buffer];
    assert_eq!(vertex_data.len(), 4 * 24);
    assert_eq!(floats(&vertex_data[..24]), vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    let index_data = &state.buffers[&mesh.index_buffer];
    let indices: Vec<u32> = index_data
        .chunks_exact(4)
        .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    assert_eq!(indices, vec![0, 1, 2, 0, 2, 3]);

    assert_eq!(state.bound_array_buffer, None);
    assert_eq!(state.bound_element_buffer, None);
}

#[test]
fn test_normals_extend_stride() {
    let device = MockGlDevice::new(64, 64);
    let (vertices, colours, triangles) = quad();
    let normals = vec![Vec3::Z; 4];
    let mesh = TriMesh::new(&device, &vertices, &colours, &triangles, Some(&normals)).unwrap();

    assert!(mesh.has_normals());
    assert_eq!(mesh.stride(), 36);
    let state = device.state();
    let data = &state.buffers[&mesh.vertex_buffer];
    assert_eq!(floats(&data[36..72]), vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_mismatched_colours_rejected() {
    let device = MockGlDevice::new(64, 64);
    let (vertices, _, triangles) = quad();
    let result = TriMesh::new(&device, &vertices, &[Vec3::ONE; 3], &triangles, None);

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    assert!(device.state().buffers.is_empty());
}

#[test]
fn test_mismatched_normals_rejected() {
    let device = MockGlDevice::new(64, 64);
    let (vertices, colours, triangles) = quad();
    let result = TriMesh::new(&device, &vertices, &colours, &triangles, Some(&[Vec3::Z; 5]));

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn test_out_of_range_index_rejected() {
    let device = MockGlDevice::new(64, 64);
    let (vertices, colours, _) = quad();
    let result = TriMesh::new(&device, &vertices, &colours, &[[0, 1, 4]], None);

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    assert!(device.commands().is_empty());
}

#[test]
fn test_render_enables_exactly_mesh_arrays() {
    let device = MockGlDevice::new(64, 64);
    let (vertices, colours, triangles) = quad();
    let mesh = TriMesh::new(&device, &vertices, &colours, &triangles, None).unwrap();

    mesh.render();

    let draws = device.draws();
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].mode, PrimitiveMode::Triangles);
    assert_eq!(draws[0].count, 6);
    assert_eq!(
        draws[0].client_arrays.iter().copied().collect::<Vec<_>>(),
        vec![ClientArray::Vertex, ClientArray::Colour]
    );
    assert_eq!(draws[0].array_pointers[&ClientArray::Colour], (3, 24, 12));

    let state = device.state();
    assert!(state.client_arrays.is_empty());
    assert_eq!(state.bound_array_buffer, None);
    assert_eq!(state.bound_element_buffer, None);
}

#[test]
fn test_render_with_normals_enables_normal_array() {
    let device = MockGlDevice::new(64, 64);
    let (vertices, colours, triangles) = quad();
    let normals = vec![Vec3::Z; 4];
    let mesh = TriMesh::new(&device, &vertices, &colours, &triangles, Some(&normals)).unwrap();

    mesh.render();

    let draw = &device.draws()[0];
    assert!(draw.client_arrays.contains(&ClientArray::Normal));
    assert_eq!(draw.array_pointers[&ClientArray::Normal], (3, 36, 24));
}

#[test]
fn test_render_restores_array_pointers() {
    let device = MockGlDevice::new(64, 64);
    let (vertices, colours, triangles) = quad();
    let normals = vec![Vec3::Z; 4];
    let mesh = TriMesh::new(&device, &vertices, &colours, &triangles, Some(&normals)).unwrap();
    let before = device.state();

    mesh.render();

    assert_eq!(device.state(), before);
    assert!(device.state().array_pointers.is_empty());
    assert_eq!(device.client_attrib_stack_depth(), 0);
}

#[test]
fn test_render_leaves_mesh_unchanged() {
    let device = MockGlDevice::new(64, 64);
    let (vertices, colours, triangles) = quad();
    let mesh = TriMesh::new(&device, &vertices, &colours, &triangles, None).unwrap();
    let buffers_before = device.state().buffers;

    mesh.render();
    mesh.render();

    assert_eq!(device.state().buffers, buffers_before);
    assert_eq!(device.draws()[0], device.draws()[1]);
    assert!(!device.is_enabled(Capability::Lighting));
}

#[test]
fn test_drop_releases_both_buffers_once() {
    let device = MockGlDevice::new(64, 64);
    let (vertices, colours, triangles) = quad();
    drop(TriMesh::new(&device, &vertices, &colours, &triangles, None).unwrap());

    assert_eq!(device.count_commands("delete_buffer"), 2);
    assert!(device.state().buffers.is_empty());
}

#[test]
fn test_failed_release_is_logged_not_propagated() {
    let device = MockGlDevice::new(64, 64);
    let (vertices, colours, triangles) = quad();
    let mesh = TriMesh::new(&device, &vertices, &colours, &triangles, None).unwrap();
    device.fail_deletes(true);

    drop(mesh);

    assert_eq!(device.count_commands("delete_buffer"), 2);
}
