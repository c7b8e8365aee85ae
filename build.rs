fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_file = "proto/record_store.proto";

    // Regenerate the bindings whenever the wire contract changes
    println!("cargo:rerun-if-changed={}", proto_file);

    tonic_build::configure()
        .build_server(false)
        .compile_protos(&[proto_file], &["proto"])?;

    Ok(())
}
