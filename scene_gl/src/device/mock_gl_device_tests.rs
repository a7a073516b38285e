use glam::{Mat4, Vec3};
use super::*;

fn allocate_framebuffer(device: &MockGlDevice, width: u32, height: u32) -> FramebufferHandle {
    let texture = device.gen_texture();
    device.bind_texture(Some(texture));
    device.tex_image_2d(PixelFormat::Rgba, width, height, PixelFormat::Rgba, None);

    let depth = device.gen_renderbuffer();
    device.bind_renderbuffer(Some(depth));
    device.renderbuffer_depth_storage(width, height);

    let framebuffer = device.gen_framebuffer();
    device.bind_framebuffer(Some(framebuffer));
    device.framebuffer_colour_texture(texture);
    device.framebuffer_depth_renderbuffer(depth);
    framebuffer
}

// ============================================================================
// Matrix stacks
// ============================================================================

#[test]
fn test_initial_matrices_are_identity() {
    let device = MockGlDevice::new(320, 240);
    assert_eq!(device.current_matrix(MatrixMode::Projection), Mat4::IDENTITY);
    assert_eq!(device.current_matrix(MatrixMode::ModelView), Mat4::IDENTITY);
    assert_eq!(device.state().matrix_mode, MatrixMode::ModelView);
}

#[test]
fn test_push_pop_restores_top() {
    let device = MockGlDevice::new(320, 240);
    device.translate(Vec3::new(1.0, 2.0, 3.0));
    let before = device.current_matrix(MatrixMode::ModelView);

    device.push_matrix();
    device.scale(Vec3::splat(2.0));
    assert_ne!(device.current_matrix(MatrixMode::ModelView), before);
    device.pop_matrix();

    assert_eq!(device.current_matrix(MatrixMode::ModelView), before);
}

#[test]
fn test_pop_underflow_keeps_bottom_entry() {
    let device = MockGlDevice::new(320, 240);
    device.translate(Vec3::X);
    device.pop_matrix();
    assert_eq!(
        device.current_matrix(MatrixMode::ModelView),
        Mat4::from_translation(Vec3::X)
    );
}

#[test]
fn test_matrix_calls_post_multiply() {
    let device = MockGlDevice::new(320, 240);
    device.translate(Vec3::new(0.0, 1.0, 0.0));
    device.scale(Vec3::new(1.0, -1.0, 1.0));

    let expected = Mat4::from_translation(Vec3::Y) * Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0));
    assert_eq!(device.current_matrix(MatrixMode::ModelView), expected);
}

#[test]
fn test_stacks_are_independent() {
    let device = MockGlDevice::new(320, 240);
    device.matrix_mode(MatrixMode::Projection);
    device.ortho(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);

    assert_eq!(device.current_matrix(MatrixMode::ModelView), Mat4::IDENTITY);
    assert_ne!(device.current_matrix(MatrixMode::Projection), Mat4::IDENTITY);
}

// ============================================================================
// Attribute stack
// ============================================================================

#[test]
fn test_enable_group_restores_every_flag() {
    let device = MockGlDevice::new(320, 240);
    device.enable(Capability::CullFace);

    device.push_attrib(AttribMask::ENABLE);
    device.disable(Capability::CullFace);
    device.enable(Capability::Texture2D);
    device.enable(Capability::Light(3));
    device.pop_attrib();

    assert!(device.is_enabled(Capability::CullFace));
    assert!(!device.is_enabled(Capability::Texture2D));
    assert!(!device.is_enabled(Capability::Light(3)));
}

#[test]
fn test_depth_group_restores_func_and_test() {
    let device = MockGlDevice::new(320, 240);
    device.push_attrib(AttribMask::DEPTH_BUFFER);
    device.depth_func(CompareFunc::LessEqual);
    device.depth_mask(false);
    device.enable(Capability::DepthTest);
    device.pop_attrib();

    let state = device.state();
    assert_eq!(state.depth_func, CompareFunc::Less);
    assert!(state.depth_write);
    assert!(!state.enabled.contains(&Capability::DepthTest));
}

#[test]
fn test_unsaved_groups_survive_pop() {
    let device = MockGlDevice::new(320, 240);
    device.push_attrib(AttribMask::DEPTH_BUFFER);
    device.viewport(PixelRect::new(1, 2, 3, 4));
    device.enable(Capability::CullFace);
    device.pop_attrib();

    assert_eq!(device.state().viewport, PixelRect::new(1, 2, 3, 4));
    assert!(device.is_enabled(Capability::CullFace));
}

#[test]
fn test_lighting_group_restores_light_parameters() {
    let device = MockGlDevice::new(320, 240);
    let initial = device.state().lights;

    device.push_attrib(AttribMask::LIGHTING);
    device.light(2, LightParam::Diffuse, [1.0, 1.0, 1.0, 1.0]);
    device.light(2, LightParam::Position, [0.0, 2.0, 1.0, 0.0]);
    device.pop_attrib();

    assert_eq!(device.state().lights, initial);
    assert_eq!(device.attrib_stack_depth(), 0);
}

#[test]
fn test_client_attrib_restores_arrays_and_pointers() {
    let device = MockGlDevice::new(320, 240);
    let initial = device.state();

    device.push_client_attrib();
    device.enable_client_state(ClientArray::Vertex);
    device.array_pointer(ClientArray::Vertex, 3, 24, 0);
    assert_eq!(device.client_attrib_stack_depth(), 1);
    device.pop_client_attrib();

    assert_eq!(device.state(), initial);
    assert_eq!(device.client_attrib_stack_depth(), 0);
}

#[test]
fn test_initial_lights() {
    let device = MockGlDevice::new(320, 240);
    let lights = device.state().lights;
    assert_eq!(lights[0].diffuse, [1.0, 1.0, 1.0, 1.0]);
    assert_eq!(lights[1].diffuse, [0.0, 0.0, 0.0, 1.0]);
    assert_eq!(lights[7].position, [0.0, 0.0, 1.0, 0.0]);
}

// ============================================================================
// Objects and frame buffers
// ============================================================================

#[test]
fn test_names_are_unique() {
    let device = MockGlDevice::new(320, 240);
    let t = device.gen_texture();
    let b = device.gen_buffer();
    let f = device.gen_framebuffer();
    assert_ne!(t.0, b.0);
    assert_ne!(b.0, f.0);
}

#[test]
fn test_complete_framebuffer() {
    let device = MockGlDevice::new(320, 240);
    allocate_framebuffer(&device, 64, 32);
    assert_eq!(device.check_framebuffer_status(), FramebufferStatus::Complete);
}

#[test]
fn test_framebuffer_missing_depth_is_incomplete() {
    let device = MockGlDevice::new(320, 240);
    let texture = device.gen_texture();
    device.bind_texture(Some(texture));
    device.tex_image_2d(PixelFormat::Rgba, 8, 8, PixelFormat::Rgba, None);
    let framebuffer = device.gen_framebuffer();
    device.bind_framebuffer(Some(framebuffer));
    device.framebuffer_colour_texture(texture);

    assert_eq!(
        device.check_framebuffer_status(),
        FramebufferStatus::Incomplete(STATUS_MISSING_ATTACHMENT)
    );
}

#[test]
fn test_forced_framebuffer_status() {
    let device = MockGlDevice::new(320, 240);
    allocate_framebuffer(&device, 16, 16);
    device.force_framebuffer_status(Some(STATUS_INCOMPLETE_ATTACHMENT));
    assert_eq!(
        device.check_framebuffer_status(),
        FramebufferStatus::Incomplete(STATUS_INCOMPLETE_ATTACHMENT)
    );
    device.force_framebuffer_status(None);
    assert_eq!(device.check_framebuffer_status(), FramebufferStatus::Complete);
}

#[test]
fn test_delete_removes_object() {
    let device = MockGlDevice::new(320, 240);
    let texture = device.gen_texture();
    device.bind_texture(Some(texture));

    device.delete_texture(texture).unwrap();

    let state = device.state();
    assert!(!state.textures.contains_key(&texture));
    assert_eq!(state.bound_texture, None);
    assert_eq!(device.count_commands("delete_texture"), 1);
}

#[test]
fn test_fail_deletes_keeps_object() {
    let device = MockGlDevice::new(320, 240);
    let buffer = device.gen_buffer();
    device.fail_deletes(true);

    let result = device.delete_buffer(buffer);

    assert!(matches!(result, Err(Error::ReleaseFailed(_))));
    assert!(device.state().buffers.contains_key(&buffer));
}

#[test]
fn test_buffer_data_goes_to_bound_buffer() {
    let device = MockGlDevice::new(320, 240);
    let buffer = device.gen_buffer();
    device.bind_buffer(BufferTarget::ElementArray, Some(buffer));
    device.buffer_data(BufferTarget::ElementArray, &[1, 2, 3, 4]);

    assert_eq!(device.state().buffers[&buffer], vec![1, 2, 3, 4]);
}

// ============================================================================
// Clears and read-back
// ============================================================================

#[test]
fn test_clear_colour_is_read_back_per_target() {
    let device = MockGlDevice::new(4, 4);
    device.clear_colour([0.0, 0.0, 1.0, 1.0]);
    device.clear(ClearMask::COLOR);

    let framebuffer = allocate_framebuffer(&device, 2, 2);
    device.clear_colour([1.0, 0.0, 0.0, 1.0]);
    device.clear(ClearMask::COLOR | ClearMask::DEPTH);

    let rect = PixelRect::new(0, 0, 2, 1);
    assert_eq!(device.read_pixels(rect, PixelFormat::Bgr), vec![0, 0, 255, 0, 0, 255]);
    assert_eq!(device.read_depth(rect), vec![1.0, 1.0]);

    device.bind_framebuffer(None);
    assert_eq!(device.read_pixels(rect, PixelFormat::Rgb), vec![0, 0, 255, 0, 0, 255]);
    assert_eq!(device.state().target_colour[&Some(framebuffer)], [255, 0, 0, 255]);
}

#[test]
fn test_pixel_source_rows_start_at_bottom() {
    let device = MockGlDevice::new(3, 2);
    device.set_pixel_source(|x, y| [x as u8, y as u8, 9, 255]);

    let pixels = device.read_pixels(PixelRect::new(0, 0, 3, 2), PixelFormat::Rgba);
    assert_eq!(&pixels[0..4], &[0, 0, 9, 255]);
    assert_eq!(&pixels[12..16], &[0, 1, 9, 255]);
    assert_eq!(pixels.len(), 3 * 2 * 4);
}

#[test]
fn test_depth_source() {
    let device = MockGlDevice::new(2, 2);
    device.set_depth_source(|x, _| if x == 0 { 0.25 } else { 0.75 });
    assert_eq!(device.read_depth(PixelRect::new(0, 0, 2, 1)), vec![0.25, 0.75]);
}

// ============================================================================
// Recorded traffic
// ============================================================================

#[test]
fn test_draw_captures_state() {
    let device = MockGlDevice::new(320, 240);
    device.enable(Capability::CullFace);
    device.enable_client_state(ClientArray::Vertex);
    device.array_pointer(ClientArray::Vertex, 3, 24, 0);
    device.draw_elements(PrimitiveMode::Triangles, 6, 0);

    let draws = device.draws();
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].count, 6);
    assert!(draws[0].enabled.contains(&Capability::CullFace));
    assert_eq!(draws[0].array_pointers[&ClientArray::Vertex], (3, 24, 0));
    assert!(device.commands().contains(&"draw_elements(Triangles, 6, 0)".to_string()));
}

#[test]
fn test_immediate_block_records_vertex_attributes() {
    let device = MockGlDevice::new(320, 240);
    device.translate(Vec3::new(0.0, 0.0, -5.0));
    device.begin(PrimitiveMode::Lines);
    device.colour3(Vec3::new(1.0, 0.0, 0.0));
    device.vertex3(Vec3::ZERO);
    device.colour3(Vec3::new(0.0, 1.0, 0.0));
    device.vertex3(Vec3::X);
    device.end();

    let primitives = device.primitives();
    assert_eq!(primitives.len(), 1);
    assert_eq!(primitives[0].mode, PrimitiveMode::Lines);
    assert_eq!(primitives[0].colours, vec![Vec3::X, Vec3::Y]);
    assert_eq!(
        primitives[0].world_vertices(),
        vec![Vec3::new(0.0, 0.0, -5.0), Vec3::new(1.0, 0.0, -5.0)]
    );
}

#[test]
fn test_vertices_outside_block_are_ignored() {
    let device = MockGlDevice::new(320, 240);
    device.vertex3(Vec3::ONE);
    assert!(device.primitives().is_empty());
}

#[test]
fn test_clear_records_keeps_state() {
    let device = MockGlDevice::new(320, 240);
    device.enable(Capability::Blend);
    device.clear_records();
    assert!(device.commands().is_empty());
    assert!(device.is_enabled(Capability::Blend));
}
