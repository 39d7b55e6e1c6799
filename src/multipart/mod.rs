//! Multipart/form-data support.
//!
//! # Data Flow
//! ```text
//! decode: content-type → boundary.rs (extract) → reader.rs → FormData
//! encode: FormData + instance boundary → writer.rs → body bytes
//! ```

pub mod boundary;
pub mod reader;
pub mod writer;

pub use boundary::{extract_boundary, generate_boundary, is_multipart_form};
pub use reader::read_form;
pub use writer::write_form;
