//! I/O operations for stlform meshes
//!
//! This crate reads and writes STL files in both ASCII and binary framing and
//! converts them to and from the [`TriangleSoup`] buffer used by the
//! transform engine.

pub mod error;
pub mod stl;

pub use error::*;
pub use stl::{
    decode_ascii, decode_binary, decode_stl, encode_stl, write_stl, StlFormat, StlReader,
    StlWriteOptions, StlWriter,
};

use std::path::Path;
use stlform_core::TriangleSoup;

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> IoResult<TriangleSoup>;
}

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleSoup, path: P) -> IoResult<()>;
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<Path>>(path: P) -> IoResult<TriangleSoup> {
    let path = path.as_ref();
    match extension(path).as_str() {
        "stl" => StlReader::read_mesh(path),
        other => Err(IoError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}

/// Write mesh in the format implied by the file extension
pub fn write_mesh<P: AsRef<Path>>(mesh: &TriangleSoup, path: P, options: &StlWriteOptions) -> IoResult<()> {
    let path = path.as_ref();
    match extension(path).as_str() {
        "stl" => StlWriter::write_mesh_with_options(mesh, path, options),
        other => Err(IoError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests;
