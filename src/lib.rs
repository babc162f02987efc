//! Record tag histograms for SIE accounting exports.
//!
//! Uploaded files are reduced to the record type marker of each line, eg.
//! `#KONTO ` or `#TRANS `, and the markers are counted. Counted files are
//! kept as named datasets in a [`DatasetRegistry`].

mod error;
pub use error::{ParseError, RegistryError};

pub mod format;
pub use format::{detect_format, Format};

pub mod parse;

mod registry;
pub use registry::DatasetRegistry;

mod table;
pub use table::{FrequencyTable, TagCount};

mod upload;
pub use upload::{parse_upload, FileParser, ParseOptions, RawUpload};

pub mod workflow;
pub use workflow::{Chart, DeleteOutcome, UploadOutcome};
