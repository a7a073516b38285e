use crate::device::{Capability, ClientArray, MockGlDevice, PixelRect};
use super::*;

#[test]
fn test_restores_saved_groups() {
    let device = MockGlDevice::new(640, 480);
    let before = device.state();

    {
        let _ctx = AttribContext::new(
            &device,
            AttribMask::VIEWPORT | AttribMask::SCISSOR | AttribMask::ENABLE | AttribMask::COLOR_BUFFER,
        );
        device.viewport(PixelRect::new(0, 0, 10, 10));
        device.scissor(PixelRect::new(1, 1, 5, 5));
        device.enable(Capability::ScissorTest);
        device.clear_colour([0.2, 0.4, 0.6, 1.0]);
    }

    assert_eq!(device.state(), before);
}

#[test]
fn test_nested_contexts_pop_in_order() {
    let device = MockGlDevice::new(640, 480);
    {
        let _outer = AttribContext::new(&device, AttribMask::VIEWPORT);
        device.viewport(PixelRect::new(0, 0, 1, 1));
        {
            let _inner = AttribContext::new(&device, AttribMask::VIEWPORT);
            device.viewport(PixelRect::new(0, 0, 2, 2));
            assert_eq!(device.attrib_stack_depth(), 2);
        }
        assert_eq!(device.state().viewport, PixelRect::new(0, 0, 1, 1));
    }
    assert_eq!(device.state().viewport, PixelRect::new(0, 0, 640, 480));
}

#[test]
fn test_client_context_restores_array_pointers() {
    let device = MockGlDevice::new(640, 480);
    let before = device.state();

    {
        let _ctx = ClientAttribContext::new(&device);
        device.enable_client_state(ClientArray::Normal);
        device.array_pointer(ClientArray::Normal, 3, 36, 24);
        assert_eq!(device.client_attrib_stack_depth(), 1);
    }

    assert_eq!(device.state(), before);
    assert_eq!(device.client_attrib_stack_depth(), 0);
}
