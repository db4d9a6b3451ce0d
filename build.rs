//! Build script for gRPC service code generation.
//!
//! Generates the Whereami client and server code from proto/whereami.proto
//! using tonic-build, along with an encoded file descriptor set for the
//! gRPC reflection service.

use std::env;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR set by cargo"));

    // Provide a protoc binary if one isn't already present in the environment.
    if env::var_os("PROTOC").is_none() {
        if let Ok(protoc) = protoc_bin_vendored::protoc_bin_path() {
            env::set_var("PROTOC", protoc);
        }
    }

    tonic_build::configure()
        .file_descriptor_set_path(out_dir.join("whereami_descriptor.bin"))
        .build_client(true)
        .build_server(true)
        .compile_protos(&["proto/whereami.proto"], &["proto"])
        .expect("Failed to compile protos");

    println!("cargo:rerun-if-changed=proto/whereami.proto");
}
