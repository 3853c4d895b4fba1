/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! build.rs utilities for the C entry-point crates.

use std::{
    env,
    fs::read_dir,
    path::{Path, PathBuf},
};

fn rerun_if_changes(dir: &Path, extensions: &[&str]) -> std::io::Result<()> {
    for entry in read_dir(dir)? {
        let Ok(entry) = entry else {
            continue;
        };
        let path = entry.path();
        if path.is_dir() {
            rerun_if_changes(&path, extensions)?;
        } else if let Some(extension) = path.extension().and_then(|ext| ext.to_str())
            && extensions.contains(&extension)
        {
            println!("cargo::rerun-if-changed={}", path.display());
        }
    }
    Ok(())
}

/// Walk the specified directory and emit granular `rerun-if-changed`
/// statements, scoped to `*.rs` files.
/// It'd be nice if `cargo` supported globbing syntax natively, but that's
/// not the case today.
fn rerun_if_rust_changes(dir: &Path) -> std::io::Result<()> {
    rerun_if_changes(dir, &["rs"])
}

/// Generate a C header file via `cbindgen` for the calling crate.
/// It reads the `cbindgen` configuration from the `cbindgen.toml` file at
/// the crate root and writes the header to `header_path`, resolved
/// relative to the crate root. Parent directories are created as needed.
pub fn run_cbindgen(header_path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config =
        cbindgen::Config::from_file("cbindgen.toml").expect("Failed to find cbindgen config");
    println!("cargo::rerun-if-changed=cbindgen.toml");

    // Regenerate the header if the source of the calling crate changes.
    let _ = rerun_if_rust_changes(&PathBuf::from("src"));

    let crate_dir = env::var("CARGO_MANIFEST_DIR")?;

    let header_path = header_path.as_ref();
    if let Some(parent) = header_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    cbindgen::Builder::new()
        .with_crate(crate_dir)
        .with_config(config)
        .generate()?
        .write_to_file(header_path);

    Ok(())
}
