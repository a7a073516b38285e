use crate::device::MockGlDevice;
use super::*;

#[test]
fn test_enables_source_over_blending() {
    let device = MockGlDevice::new(64, 64);
    let before = device.state();

    {
        let _ctx = AlphaBlendContext::new(&device);
        let state = device.state();
        assert!(state.enabled.contains(&Capability::Blend));
        assert_eq!(state.blend_func, (BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha));
    }

    assert_eq!(device.state(), before);
}
