//! End-to-end tests for package round trips (edit -> save -> read -> verify)

use gridshift::prelude::*;
use gridshift::{TablePart, TablePartRef, MAX_FILE_PATH_LEN};
use pretty_assertions::assert_eq;
use std::io::Cursor;

const CALC_CHAIN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<calcChain xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><c r="B2" i="1"/><c r="B3"/><c r="A1" i="2"/></calcChain>"#;

fn document_with_chain() -> Document {
    let mut workbook = Workbook::new();
    workbook.add_worksheet_with_name("Summary").unwrap();

    let mut package = Package::new();
    package.store("[Content_Types].xml", b"<Types/>".to_vec());
    package.store("xl/calcChain.xml", CALC_CHAIN.as_bytes().to_vec());
    package.store("xl/media/image1.png", vec![0x89, b'P', b'N', b'G']);

    Document::from_package(workbook, package).unwrap()
}

/// Table and calc chain edits survive a save to a zip archive
#[test]
fn test_roundtrip_through_zip() {
    let mut doc = document_with_chain();
    let table = doc
        .add_table(
            "Sheet1",
            &RangeRect::parse("A1:C4").unwrap(),
            &TableOptions::default(),
        )
        .unwrap();

    doc.insert_rows("Sheet1", 2, 2).unwrap();

    let mut buf = Vec::new();
    doc.write(Cursor::new(&mut buf)).unwrap();

    let package = Package::read(Cursor::new(buf)).unwrap();
    let table = TablePart::parse(package.load(&table).unwrap()).unwrap();
    assert_eq!(table.reference(), "A1:C6");

    let chain = std::str::from_utf8(package.load("xl/calcChain.xml").unwrap()).unwrap();
    assert!(chain.contains(r#"<c r="B4" i="1"/><c r="B5"/><c r="A1" i="2"/>"#));

    // Parts nobody edits come back byte for byte
    assert_eq!(
        package.load("xl/media/image1.png"),
        Some(&[0x89, b'P', b'N', b'G'][..])
    );
}

/// Deleting every formula cell removes the calc chain part on save
#[test]
fn test_empty_chain_removes_part() {
    let mut doc = document_with_chain();
    doc.remove_row("Summary", 1).unwrap();
    doc.remove_row("Sheet1", 2).unwrap();
    doc.remove_row("Sheet1", 2).unwrap();
    assert!(doc.workbook().calc_chain().unwrap().is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    doc.save_as(&path).unwrap();

    let package = Package::read_file(&path).unwrap();
    assert!(!package.contains("xl/calcChain.xml"));
    assert!(package.contains("[Content_Types].xml"));
}

/// A table written in a legacy charset keeps that charset after an edit
#[test]
fn test_legacy_charset_table_survives_save() {
    let mut doc = Document::new();
    let mut bytes = br#"<?xml version="1.0" encoding="windows-1251"?><table name=""#.to_vec();
    bytes.extend_from_slice(&[0xD2, 0xE0, 0xE1, 0xEB, 0xE8, 0xF6, 0xE0]);
    bytes.extend_from_slice(br#"" ref="B2:C5"><autoFilter ref="B2:C5"/></table>"#);
    doc.package_mut().store("xl/tables/table1.xml", bytes);
    doc.workbook_mut()
        .worksheet_mut(0)
        .unwrap()
        .add_table_part(TablePartRef::new("rId1", "../tables/table1.xml"));

    doc.remove_col("Sheet1", "A").unwrap();

    let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    doc.save_as(file.path()).unwrap();
    let package = Package::read_file(file.path()).unwrap();

    let stored = package.load("xl/tables/table1.xml").unwrap();
    let table = TablePart::parse(stored).unwrap();
    assert_eq!(table.reference(), "A2:B5");
    assert_eq!(table.name(), Some("Таблица"));
    assert!(stored.windows(7).any(|w| w == [0xD2, 0xE0, 0xE1, 0xEB, 0xE8, 0xF6, 0xE0]));
}

/// A new document saves as a workbook package with its template parts
#[test]
fn test_new_document_saves_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsx");

    let mut doc = Document::new();
    doc.save_as(&path).unwrap();
    assert_eq!(doc.path(), Some(path.as_path()));

    let package = Package::read_file(&path).unwrap();
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "xl/workbook.xml",
        "xl/_rels/workbook.xml.rels",
        "xl/worksheets/sheet1.xml",
    ] {
        assert!(package.contains(part), "missing {}", part);
    }
}

/// Saving checks the target path before anything is written
#[test]
fn test_save_as_rejects_bad_paths() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = Document::new();

    let txt = dir.path().join("book.txt");
    assert!(matches!(
        doc.save_as(&txt),
        Err(Error::UnsupportedFileFormat(_))
    ));
    assert!(!txt.exists());
    assert!(matches!(
        doc.save_as(dir.path().join("book")),
        Err(Error::UnsupportedFileFormat(_))
    ));

    let long = dir.path().join(format!("{}.xlsx", "a".repeat(MAX_FILE_PATH_LEN)));
    assert!(matches!(
        doc.save_as(&long),
        Err(Error::PathTooLong(MAX_FILE_PATH_LEN))
    ));

    // Nothing was saved, so there is no path to save to
    assert!(doc.path().is_none());
    assert!(matches!(doc.save(), Err(Error::NoSavePath)));
    assert_eq!(
        doc.save().unwrap_err().to_string(),
        "no path defined for file, consider save as"
    );

    let upper = dir.path().join("BOOK.XLSX");
    doc.save_as(&upper).unwrap();
    assert!(upper.exists());
}

/// `save` writes back to the file the document was opened from
#[test]
fn test_open_edit_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsx");
    let mut doc = Document::new();
    let table = doc
        .add_table("Sheet1", &RangeRect::parse("B2:C5").unwrap(), &TableOptions::default())
        .unwrap();
    doc.save_as(&path).unwrap();

    let mut workbook = Workbook::new();
    workbook.worksheet_mut(0).unwrap().add_table_part(TablePartRef::new(
        "rId1",
        "../tables/table1.xml",
    ));
    let mut doc = Document::open(workbook, &path).unwrap();
    assert_eq!(doc.path(), Some(path.as_path()));
    doc.insert_cols("Sheet1", "A", 1).unwrap();
    doc.save().unwrap();

    let package = Package::read_file(&path).unwrap();
    let part = TablePart::parse(package.load(&table).unwrap()).unwrap();
    assert_eq!(part.reference(), "C2:D5");
}

/// The workbook content type follows the extension it is saved under
#[test]
fn test_macro_enabled_extension_sets_content_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsm");

    let mut doc = Document::new();
    doc.save_as(&path).unwrap();

    let package = Package::read_file(&path).unwrap();
    let types = std::str::from_utf8(package.load("[Content_Types].xml").unwrap()).unwrap();
    assert!(types.contains(
        r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.ms-excel.sheet.macroEnabled.main+xml"/>"#
    ));
}

/// Writing to memory gives the same package as writing to a file
#[test]
fn test_write_to_buffer() {
    let mut doc = document_with_chain();
    doc.insert_rows("Sheet1", 1, 1).unwrap();

    let bytes = doc.write_to_buffer().unwrap();
    let package = Package::read(Cursor::new(bytes)).unwrap();
    assert_eq!(&package, doc.package());
    let chain = std::str::from_utf8(package.load("xl/calcChain.xml").unwrap()).unwrap();
    assert!(chain.contains(r#"<c r="B3" i="1"/><c r="B4"/>"#));
}

/// Sheet ids with gaps, as left behind by deleted sheets, match the calc chain
#[test]
fn test_calc_chain_uses_package_sheet_ids() {
    let mut workbook = Workbook::empty();
    workbook.add_worksheet_with_id("Sheet1", 1).unwrap();
    workbook.add_worksheet_with_id("Sheet3", 3).unwrap();

    let mut package = Package::new();
    package.store(
        "xl/calcChain.xml",
        br#"<calcChain><c r="A1" i="3"/><c r="A1" i="1"/></calcChain>"#.to_vec(),
    );

    let mut doc = Document::from_package(workbook, package).unwrap();
    doc.insert_rows("Sheet3", 1, 1).unwrap();
    assert_eq!(
        doc.workbook().calc_chain().unwrap().entries(),
        &[CalcChainEntry::new("A2", 3), CalcChainEntry::new("A1", 1)]
    );
}
