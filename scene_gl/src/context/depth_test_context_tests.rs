use crate::device::MockGlDevice;
use super::*;

#[test]
fn test_enables_depth_test_with_func() {
    let device = MockGlDevice::new(64, 64);
    let _ctx = DepthTestContext::new(&device, CompareFunc::LessEqual);

    assert!(device.is_enabled(Capability::DepthTest));
    assert_eq!(device.state().depth_func, CompareFunc::LessEqual);
}

#[test]
fn test_restores_previous_depth_state() {
    let device = MockGlDevice::new(64, 64);
    device.depth_func(CompareFunc::Greater);
    let before = device.state();

    drop(DepthTestContext::new(&device, CompareFunc::Always));

    assert_eq!(device.state(), before);
    assert!(!device.is_enabled(Capability::DepthTest));
}
