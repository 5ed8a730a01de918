//! Package storage for DOCX/DOTX files
//!
//! A WordprocessingML package is a ZIP archive of XML parts and media. The
//! archive is held fully in memory and only serialized at the end.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::content_types::CONTENT_TYPES_PATH;
use crate::error::Result;

/// An unpacked OOXML package
#[derive(Debug, Default, Clone)]
pub struct OoxmlArchive {
    /// Part contents keyed by path, without a leading slash
    parts: BTreeMap<String, Vec<u8>>,
}

impl OoxmlArchive {
    /// An empty package
    pub fn new() -> Self {
        Self::default()
    }

    /// Open and unpack a DOCX/DOTX file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Unpack from in-memory bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Unpack from any seekable reader; directory entries are dropped
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut zip = ZipArchive::new(reader)?;
        let mut archive = Self::new();

        for index in 0..zip.len() {
            let mut entry = zip.by_index(index)?;
            if entry.is_dir() {
                continue;
            }
            let mut contents = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut contents)?;
            archive.set(entry.name(), contents);
        }

        tracing::trace!(parts = archive.len(), "unpacked package");
        Ok(archive)
    }

    /// Raw contents of a part
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.parts.get(path).map(Vec::as_slice)
    }

    /// Contents of a text part, lossily decoded as UTF-8
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.parts.contains_key(path)
    }

    /// Part paths in sorted order
    pub fn file_list(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    /// Number of parts
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Insert or replace a part
    pub fn set(&mut self, path: impl Into<String>, contents: Vec<u8>) {
        self.parts.insert(path.into(), contents);
    }

    /// Insert or replace a text part
    pub fn set_string(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.set(path, contents.into().into_bytes());
    }

    /// Remove a part, returning its old contents
    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.parts.remove(path)
    }

    /// Write the package to `path`
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.write_to(File::create(path)?)
    }

    /// Serialize the package into memory
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = Cursor::new(Vec::new());
        self.write_to(&mut output)?;
        Ok(output.into_inner())
    }

    /// Zip the package into `writer`; `[Content_Types].xml` is always the first entry
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let content_types = self.parts.get_key_value(CONTENT_TYPES_PATH);
        let rest = self
            .parts
            .iter()
            .filter(|(path, _)| path.as_str() != CONTENT_TYPES_PATH);

        for (path, contents) in content_types.into_iter().chain(rest) {
            zip.start_file(path.as_str(), options)?;
            zip.write_all(contents)?;
        }

        zip.finish()?;
        Ok(())
    }
}
