//! Generates compatibility-profile OpenGL bindings into OUT_DIR.
//!
//! Fixed-function entry points (matrix and attribute stacks, lights,
//! immediate mode, client arrays) only exist in the compatibility profile.

use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};
use std::env;
use std::fs::File;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let mut file = File::create(Path::new(&out_dir).join("gl_bindings.rs"))
        .expect("failed to create gl_bindings.rs");

    Registry::new(Api::Gl, (3, 0), Profile::Compatibility, Fallbacks::All, [])
        .write_bindings(StructGenerator, &mut file)
        .expect("failed to write OpenGL bindings");

    println!("cargo:rerun-if-changed=build.rs");
}
