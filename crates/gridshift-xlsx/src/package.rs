//! In-memory package part store
//!
//! A [`Package`] holds every part of an opened document as raw bytes, keyed
//! by its path inside the zip archive (`xl/tables/table1.xml`). Parts this
//! crate does not understand pass through untouched.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use crate::error::XlsxResult;

/// Read/write access to package parts by path
pub trait PartStore {
    /// Bytes of the part at `path`, if present
    fn load(&self, path: &str) -> Option<&[u8]>;

    /// Insert or replace the part at `path`
    fn store(&mut self, path: &str, bytes: Vec<u8>);
}

/// All parts of a document package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    parts: BTreeMap<String, Vec<u8>>,
}

impl Package {
    /// Create an empty package
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a package from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Self> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read a package from a zip archive
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Self> {
        let mut archive = zip::ZipArchive::new(reader)?;
        let mut parts = BTreeMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            parts.insert(name, bytes);
        }

        log::debug!("read package with {} parts", parts.len());
        Ok(Self { parts })
    }

    /// Write the package to a file path
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        self.write(file)
    }

    /// Write the package as a zip archive
    ///
    /// Parts are written in path order, which puts `[Content_Types].xml`
    /// ahead of everything else.
    pub fn write<W: Write + Seek>(&self, writer: W) -> XlsxResult<()> {
        let mut zip = zip::ZipWriter::new(writer);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        for (path, bytes) in &self.parts {
            zip.start_file(path.as_str(), options)?;
            zip.write_all(bytes)?;
        }

        zip.finish()?;
        Ok(())
    }

    /// Remove a part, returning its bytes
    pub fn delete(&mut self, path: &str) -> Option<Vec<u8>> {
        self.parts.remove(path)
    }

    /// Check if a part exists
    pub fn contains(&self, path: &str) -> bool {
        self.parts.contains_key(path)
    }

    /// Iterate over part paths in order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    /// Number of parts
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check if the package has no parts
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl PartStore for Package {
    fn load(&self, path: &str) -> Option<&[u8]> {
        self.parts.get(path).map(Vec::as_slice)
    }

    fn store(&mut self, path: &str, bytes: Vec<u8>) {
        self.parts.insert(path.to_string(), bytes);
    }
}
