//! Common utilities for E2E tests.

use std::path::PathBuf;

use gridshift_xlsx::Package;
use tempfile::TempDir;

/// Write `package` to `book.xlsx` in a fresh temp directory.
///
/// The directory is removed when the returned guard is dropped.
pub fn write_temp(package: &Package) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsx");
    package.write_file(&path).unwrap();
    (dir, path)
}

/// Write `package` to disk and read it straight back.
pub fn roundtrip(package: &Package) -> Package {
    let (_dir, path) = write_temp(package);
    Package::read_file(&path).unwrap()
}
