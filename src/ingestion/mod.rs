//! Loading datasets for the pipeline.
//!
//! The cleaning stages only need an in-memory [`crate::types::DataSet`]; this module provides a
//! CSV loader to produce one. See [`csv`].

pub mod csv;

pub use self::csv::{
    ingest_csv_as_text_from_path, ingest_csv_as_text_from_reader, ingest_csv_from_path,
    ingest_csv_from_reader,
};
