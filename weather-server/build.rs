fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/weather.proto");

    // Use the vendored protoc so builds don't depend on a system install.
    let mut config = prost_build::Config::new();
    config.protoc_executable(protoc_bin_vendored::protoc_bin_path()?);

    tonic_build::configure().compile_protos_with_config(
        config,
        &["proto/weather.proto"],
        &["proto"],
    )?;

    Ok(())
}
