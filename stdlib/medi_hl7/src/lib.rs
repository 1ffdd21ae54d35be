//! HL7v2 message decoding for the Medi standard library.
//!
//! A message declares its own delimiters in the `MSH` header. [`parse_hl7`]
//! reads them and decodes the record into a [`Message`] tree
//! (segment → field → repeat → composite → subcomposite); every node renders
//! back to its source text with `Display`, and [`resolve`] looks values up by
//! address.
//!
//! ```
//! use medi_hl7::{parse_hl7, resolve};
//! let msg = parse_hl7("MSH|^~\\&|SRC\rPID|1||123456^^^DH&MR").unwrap();
//! assert_eq!(resolve(&msg, "PID.3").unwrap(), "123456^^^DH&MR");
//! assert_eq!(resolve(&msg, "PID.3.4.2").unwrap(), "MR");
//! ```
//!
//! Escape sequences are never decoded, and nothing here validates segment
//! content against the HL7 standard.

pub mod delimiters;
pub mod error;
pub mod json;
pub mod model;
pub mod parser;
pub mod path;
pub mod split;
pub mod visit;

pub use delimiters::{Delimiters, HEADER_MARKER, SEGMENT_SEPARATOR};
pub use error::{HL7Error, Result};
pub use model::{Composite, Field, Message, Repeat, Segment, SubComposite};
pub use parser::{normalize, parse_hl7};
pub use path::{resolve, Location, Target};
pub use split::split_escaped;
pub use visit::{Visitable, Visitor};
