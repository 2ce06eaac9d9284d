//! STL (stereolithography) reading and writing
//!
//! Both framings are supported and detected from the data itself:
//!
//! ```text
//! binary:  UINT8[80] header | UINT32 count | count × (REAL32[3] normal,
//!          REAL32[3] v1, REAL32[3] v2, REAL32[3] v3, UINT16 attribute)
//! ASCII:   solid name
//!            facet normal ni nj nk
//!              outer loop
//!                vertex x y z   (× 3)
//!              endloop
//!            endfacet
//!          endsolid name
//! ```
//!
//! Stored normals are ignored on read and recomputed from winding on write.

use crate::error::{IoError, IoResult};
use crate::{MeshReader, MeshWriter};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;
use stlform_core::{Point3d, TriangleSoup, Vector3d};

/// Binary STL header size in bytes
const HEADER_SIZE: usize = 80;

/// Size of one triangle record in binary STL
const TRIANGLE_SIZE: usize = 50;

/// UTF-8 byte-order mark some Windows exporters put before `solid`
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Framing used when writing STL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

/// Configuration for STL output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StlWriteOptions {
    /// Binary or ASCII framing
    pub format: StlFormat,
    /// Name after `solid` / `endsolid` in ASCII output
    pub solid_name: String,
    /// Text placed in the 80-byte binary header (truncated, NUL padded)
    pub header: String,
}

impl Default for StlWriteOptions {
    fn default() -> Self {
        Self {
            format: StlFormat::Binary,
            solid_name: "stlform".to_string(),
            header: "binary STL written by stlform".to_string(),
        }
    }
}

impl StlWriteOptions {
    /// Default options with the given framing
    pub fn with_format(format: StlFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Options for binary output
    pub fn binary() -> Self {
        Self::with_format(StlFormat::Binary)
    }

    /// Options for ASCII output
    pub fn ascii() -> Self {
        Self::with_format(StlFormat::Ascii)
    }
}

/// Check whether the data is worth trying as ASCII STL
///
/// ASCII files open with `solid`; binary exporters sometimes put that word in
/// their header too, but their header is usually NUL padded.
fn looks_ascii(data: &[u8]) -> bool {
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    data[start..].starts_with(b"solid") && !data[..data.len().min(HEADER_SIZE)].contains(&0)
}

/// Decode STL bytes, detecting ASCII or binary framing
pub fn decode_stl(data: &[u8]) -> IoResult<TriangleSoup> {
    let text = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    if !looks_ascii(text) {
        return decode_binary(data);
    }

    let ascii_error = match std::str::from_utf8(text) {
        Ok(text) => match decode_ascii(text) {
            Ok(mesh) => return Ok(mesh),
            Err(e) => e,
        },
        Err(e) => IoError::invalid_content(format!("ASCII STL is not valid UTF-8: {e}")),
    };

    match decode_binary(data) {
        Ok(mesh) => {
            warn!("data starts with `solid` but is not ASCII STL ({ascii_error}); read as binary");
            Ok(mesh)
        }
        Err(_) => Err(ascii_error),
    }
}

/// Decode binary STL
pub fn decode_binary(data: &[u8]) -> IoResult<TriangleSoup> {
    if data.len() < HEADER_SIZE + 4 {
        return Err(IoError::invalid_content(format!(
            "{} bytes is too small for a binary STL header",
            data.len()
        )));
    }

    let mut reader = Cursor::new(&data[HEADER_SIZE..]);
    let count = reader.read_u32::<LittleEndian>()?;

    let available = (data.len() - HEADER_SIZE - 4) / TRIANGLE_SIZE;
    if available < count as usize {
        return Err(IoError::InvalidFaceCount {
            expected: count,
            got: u32::try_from(available).unwrap_or(u32::MAX),
        });
    }
    if available > count as usize {
        let extra = data.len() - HEADER_SIZE - 4 - count as usize * TRIANGLE_SIZE;
        debug!("ignoring {extra} bytes after the last STL triangle");
    }

    let mut triangles = Vec::with_capacity(count as usize);
    for _ in 0..count {
        // Normal is recomputed from winding when needed
        for _ in 0..3 {
            reader.read_f32::<LittleEndian>()?;
        }
        let v0 = read_vertex(&mut reader)?;
        let v1 = read_vertex(&mut reader)?;
        let v2 = read_vertex(&mut reader)?;
        reader.read_u16::<LittleEndian>()?;
        triangles.push([v0, v1, v2]);
    }

    debug!("decoded binary STL with {count} triangles");
    Ok(TriangleSoup::from_triangles(triangles))
}

fn read_vertex(reader: &mut Cursor<&[u8]>) -> IoResult<Point3d> {
    let x = reader.read_f32::<LittleEndian>()?;
    let y = reader.read_f32::<LittleEndian>()?;
    let z = reader.read_f32::<LittleEndian>()?;
    Ok(Point3d::new(f64::from(x), f64::from(y), f64::from(z)))
}

/// Token cursor over ASCII STL text, remembering each token's line
struct Tokens<'a> {
    tokens: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let tokens = text
            .lines()
            .enumerate()
            .flat_map(|(line, s)| s.split_ascii_whitespace().map(move |t| (line + 1, t)))
            .collect();
        Self { tokens, pos: 0 }
    }

    fn next(&mut self) -> Option<(usize, &'a str)> {
        let token = self.tokens.get(self.pos).copied();
        self.pos += 1;
        token
    }

    /// Skip whatever is left on `line` (solid names)
    fn skip_line(&mut self, line: usize) {
        while self.tokens.get(self.pos).is_some_and(|&(l, _)| l == line) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, keyword: &str) -> IoResult<()> {
        match self.next() {
            Some((_, token)) if token.eq_ignore_ascii_case(keyword) => Ok(()),
            Some((line, token)) => Err(IoError::invalid_content(format!(
                "line {line}: expected `{keyword}`, found `{token}`"
            ))),
            None => Err(IoError::invalid_content(format!(
                "expected `{keyword}`, found end of file"
            ))),
        }
    }

    fn number(&mut self) -> IoResult<f64> {
        let (line, token) = self
            .next()
            .ok_or_else(|| IoError::invalid_content("expected a number, found end of file"))?;
        token
            .parse()
            .map_err(|_| IoError::invalid_content(format!("line {line}: `{token}` is not a number")))
    }

    fn point(&mut self) -> IoResult<Point3d> {
        Ok(Point3d::new(self.number()?, self.number()?, self.number()?))
    }
}

/// Decode ASCII STL
///
/// Several `solid ... endsolid` blocks in one file are concatenated. Names are
/// only accepted on the `solid` / `endsolid` lines.
pub fn decode_ascii(text: &str) -> IoResult<TriangleSoup> {
    let mut tokens = Tokens::new(text);
    let mut triangles = Vec::new();
    let mut solids = 0;

    while let Some((line, token)) = tokens.next() {
        if !token.eq_ignore_ascii_case("solid") {
            return Err(IoError::invalid_content(format!(
                "line {line}: expected `solid`, found `{token}`"
            )));
        }
        tokens.skip_line(line);

        loop {
            match tokens.next() {
                Some((_, t)) if t.eq_ignore_ascii_case("facet") => {
                    tokens.expect("normal")?;
                    tokens.point()?;
                    tokens.expect("outer")?;
                    tokens.expect("loop")?;
                    let mut vertices = [Point3d::origin(); 3];
                    for vertex in &mut vertices {
                        tokens.expect("vertex")?;
                        *vertex = tokens.point()?;
                    }
                    tokens.expect("endloop")?;
                    tokens.expect("endfacet")?;
                    triangles.push(vertices);
                }
                Some((end_line, t)) if t.eq_ignore_ascii_case("endsolid") => {
                    tokens.skip_line(end_line);
                    break;
                }
                Some((l, t)) => {
                    return Err(IoError::invalid_content(format!(
                        "line {l}: expected `facet` or `endsolid`, found `{t}`"
                    )));
                }
                None => return Err(IoError::invalid_content("missing `endsolid`")),
            }
        }
        solids += 1;
    }

    if solids == 0 {
        return Err(IoError::invalid_content("no `solid` block found"));
    }
    debug!("decoded ASCII STL with {} triangles in {solids} solid(s)", triangles.len());
    Ok(TriangleSoup::from_triangles(triangles))
}

fn narrow(v: &Vector3d) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

/// Write binary STL
pub fn write_binary<W: Write>(mesh: &TriangleSoup, header: &str, writer: &mut W) -> IoResult<()> {
    let count = u32::try_from(mesh.triangle_count()).map_err(|_| {
        IoError::invalid_content(format!(
            "{} triangles do not fit in a binary STL count",
            mesh.triangle_count()
        ))
    })?;

    let mut header_bytes = [0u8; HEADER_SIZE];
    let text = header.as_bytes();
    let len = text.len().min(HEADER_SIZE);
    header_bytes[..len].copy_from_slice(&text[..len]);
    writer.write_all(&header_bytes)?;
    writer.write_u32::<LittleEndian>(count)?;

    for (triangle, normal) in mesh.triangles().iter().zip(mesh.face_normals()) {
        for c in narrow(&normal) {
            writer.write_f32::<LittleEndian>(c)?;
        }
        for vertex in triangle {
            for c in narrow(&vertex.coords) {
                writer.write_f32::<LittleEndian>(c)?;
            }
        }
        writer.write_u16::<LittleEndian>(0)?;
    }
    Ok(())
}

/// Write ASCII STL
pub fn write_ascii<W: Write>(mesh: &TriangleSoup, solid_name: &str, writer: &mut W) -> IoResult<()> {
    writeln!(writer, "solid {solid_name}")?;
    for (triangle, normal) in mesh.triangles().iter().zip(mesh.face_normals()) {
        let [nx, ny, nz] = narrow(&normal);
        writeln!(writer, "  facet normal {nx} {ny} {nz}")?;
        writeln!(writer, "    outer loop")?;
        for vertex in triangle {
            let [x, y, z] = narrow(&vertex.coords);
            writeln!(writer, "      vertex {x} {y} {z}")?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {solid_name}")?;
    Ok(())
}

/// Write STL in the framing chosen by `options`
pub fn write_stl<W: Write>(mesh: &TriangleSoup, options: &StlWriteOptions, writer: &mut W) -> IoResult<()> {
    match options.format {
        StlFormat::Binary => write_binary(mesh, &options.header, writer),
        StlFormat::Ascii => write_ascii(mesh, &options.solid_name, writer),
    }
}

/// Encode STL into a byte buffer
pub fn encode_stl(mesh: &TriangleSoup, options: &StlWriteOptions) -> IoResult<Vec<u8>> {
    let mut bytes = match options.format {
        StlFormat::Binary => Vec::with_capacity(HEADER_SIZE + 4 + mesh.triangle_count() * TRIANGLE_SIZE),
        StlFormat::Ascii => Vec::new(),
    };
    write_stl(mesh, options, &mut bytes)?;
    Ok(bytes)
}

/// STL file reader
pub struct StlReader;

/// STL file writer
pub struct StlWriter;

impl MeshReader for StlReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> IoResult<TriangleSoup> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IoError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IoError::Io(e)
            }
        })?;
        decode_stl(&data)
    }
}

impl StlWriter {
    /// Write a mesh to a file with explicit options
    pub fn write_mesh_with_options<P: AsRef<Path>>(
        mesh: &TriangleSoup,
        path: P,
        options: &StlWriteOptions,
    ) -> IoResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        write_stl(mesh, options, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl MeshWriter for StlWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleSoup, path: P) -> IoResult<()> {
        Self::write_mesh_with_options(mesh, path, &StlWriteOptions::default())
    }
}
