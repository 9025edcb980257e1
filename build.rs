fn main() {
    println!("cargo:rerun-if-changed=proto/aiservice.proto");
    build_proto();
}

fn build_proto() {
    // protox compiles the proto in-process, so no system protoc is needed.
    let file_descriptors =
        protox::compile(["proto/aiservice.proto"], ["proto"]).expect("failed to compile protos");
    tonic_build::configure()
        .build_server(true)
        .compile_fds(file_descriptors)
        .expect("failed to generate grpc bindings");
}
