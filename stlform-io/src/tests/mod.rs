//! Test modules for stlform-io
//!
//! Decoding, encoding and format detection for STL data, plus the path-based
//! read/write helpers.
