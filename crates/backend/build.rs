use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Каталог target/{profile}, в котором окажется бинарник backend
fn profile_dir() -> Option<PathBuf> {
    let out_dir = env::var("OUT_DIR").ok()?;
    let profile = env::var("PROFILE").ok()?;
    Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    let Some(target_dir) = profile_dir() else {
        println!("cargo:warning=target profile directory not found, config.toml not copied");
        return;
    };

    if !source.exists() {
        println!("cargo:warning=config.toml not found, backend will use the embedded defaults");
        return;
    }

    let dest = target_dir.join("config.toml");
    match fs::copy(&source, &dest) {
        Ok(_) => println!("cargo:warning=Copied config.toml to {:?}", dest),
        Err(e) => println!("cargo:warning=Failed to copy config.toml: {}", e),
    }
}
