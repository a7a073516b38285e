/*!
# SceneGL - OpenGL Backend

`GlDevice` implementation over compatibility-profile OpenGL.

Bindings are generated at build time with `gl_generator`. Function
pointers are resolved from a caller-supplied loader (usually the
windowing library's `get_proc_address`) once a context is current on the
calling thread.

```no_run
use scene_gl_backend_opengl::{OpenGlConfig, OpenGlDevice};
# fn get_proc_address(_: &str) -> *const std::ffi::c_void { std::ptr::null() }

let device = OpenGlDevice::load_with(|name| get_proc_address(name), OpenGlConfig::default())?;
# Ok::<(), scene_gl::scenegl::Error>(())
```
*/

#[allow(clippy::all, non_upper_case_globals, non_snake_case, non_camel_case_types, dead_code, unused_imports)]
mod gl {
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

mod opengl_device;
mod opengl_format;

pub use opengl_device::{OpenGlConfig, OpenGlDevice};

// Backend namespace, mirroring the core crate's facade
pub mod scenegl {
    pub use crate::opengl_device::{OpenGlConfig, OpenGlDevice};
}
