//! Export of the current table view.
//!
//! The serializer produces bytes; delivering them (browser download, file on
//! disk, test buffer) is the job of an [`ExportSink`].

mod csv_writer;

pub use csv_writer::serialize;

use serde::Serialize;

use crate::error::Result;
use crate::table::TableController;

pub const CSV_MIME_TYPE: &str = "text/csv";

/// A finished export, ready to hand to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Receives export bytes.
pub trait ExportSink {
    fn accept(&mut self, file: ExportFile) -> Result<()>;
}

/// Keeps every accepted file in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<ExportFile>,
}

impl ExportSink for MemorySink {
    fn accept(&mut self, file: ExportFile) -> Result<()> {
        self.files.push(file);
        Ok(())
    }
}

/// Writes accepted files into a directory.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct DirectorySink {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirectorySink {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ExportSink for DirectorySink {
    fn accept(&mut self, file: ExportFile) -> Result<()> {
        let path = self.dir.join(&file.file_name);
        std::fs::write(&path, &file.bytes)?;
        log::info!("export: wrote {} bytes to {}", file.bytes.len(), path.display());
        Ok(())
    }
}

/// Serialize every row of the controller's materialized view (all pages).
pub fn export_csv(table: &TableController, file_name: &str) -> ExportFile {
    ExportFile {
        file_name: file_name.to_string(),
        mime_type: CSV_MIME_TYPE,
        bytes: serialize(&table.derived_rows()),
    }
}

/// [`export_csv`] delivered straight to `sink`.
pub fn export_to(table: &TableController, file_name: &str, sink: &mut dyn ExportSink) -> Result<()> {
    sink.accept(export_csv(table, file_name))
}
