use glam::{Mat4, Vec3};
use crate::device::MockGlDevice;
use super::*;

#[test]
fn test_restores_matrix_bit_for_bit() {
    let device = MockGlDevice::new(320, 240);
    device.translate(Vec3::new(0.1, 0.2, 0.3));
    let before = device.state();

    {
        let _ctx = MatrixContext::new(&device, MatrixMode::ModelView, |d| {
            d.scale(Vec3::splat(7.0));
            d.translate(Vec3::new(-4.0, 0.0, 1.0));
        });
        assert_ne!(device.current_matrix(MatrixMode::ModelView), before.modelview_stack[0]);
    }

    assert_eq!(device.state(), before);
}

#[test]
fn test_projection_context_leaves_modelview_alone() {
    let device = MockGlDevice::new(320, 240);
    let modelview = Mat4::from_translation(Vec3::Z);
    device.load_matrix(&modelview);

    {
        let _ctx = MatrixContext::new(&device, MatrixMode::Projection, |d| {
            d.load_identity();
            d.ortho(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
        });
        assert_eq!(device.current_matrix(MatrixMode::ModelView), modelview);
    }

    assert_eq!(device.current_matrix(MatrixMode::Projection), Mat4::IDENTITY);
    assert_eq!(device.state().projection_stack.len(), 1);
}

#[test]
fn test_nested_contexts_restore_in_order() {
    let device = MockGlDevice::new(320, 240);
    let projection = Mat4::from_scale(Vec3::splat(2.0));
    let modelview = Mat4::from_translation(Vec3::X);

    {
        let _p = MatrixContext::load(&device, MatrixMode::Projection, &projection);
        {
            let _m = MatrixContext::load(&device, MatrixMode::ModelView, &modelview);
            assert_eq!(device.current_matrix(MatrixMode::Projection), projection);
            assert_eq!(device.current_matrix(MatrixMode::ModelView), modelview);
        }
        assert_eq!(device.current_matrix(MatrixMode::ModelView), Mat4::IDENTITY);
        assert_eq!(device.current_matrix(MatrixMode::Projection), projection);
    }

    assert_eq!(device.current_matrix(MatrixMode::Projection), Mat4::IDENTITY);
}

#[test]
fn test_drop_reselects_mode_before_pop() {
    let device = MockGlDevice::new(320, 240);
    {
        let ctx = MatrixContext::new(&device, MatrixMode::Projection, |_| {});
        assert_eq!(ctx.mode(), MatrixMode::Projection);
        device.matrix_mode(MatrixMode::ModelView);
    }
    let commands = device.commands();
    let tail = &commands[commands.len() - 2..];
    assert_eq!(tail, ["matrix_mode(Projection)", "pop_matrix"]);
}
