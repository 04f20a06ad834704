//! Table parts written to and read back from an archive.

use crate::roundtrip;
use gridshift_core::RangeRect;
use gridshift_xlsx::{table_part_xml, Package, PartStore, TableOptions, TablePart};
use pretty_assertions::assert_eq;

#[test]
fn test_generated_table_survives_archive() {
    let mut package = Package::new();
    let range = RangeRect::parse("B2:D9").unwrap();
    let xml = table_part_xml(3, &range, &TableOptions::default());
    package.store("xl/tables/table3.xml", xml.into_bytes());

    let package = roundtrip(&package);
    let table = TablePart::parse(package.load("xl/tables/table3.xml").unwrap()).unwrap();
    assert_eq!(table.reference(), "B2:D9");
    assert_eq!(table.name(), Some("Table3"));
    assert_eq!(table.rect().unwrap(), range);
}

#[test]
fn test_rewritten_table_survives_archive() {
    let source = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<table xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" id="1" name="Sales" displayName="Sales" ref="A1:C8"><autoFilter ref="A1:C8"/><tableColumns count="3"><tableColumn id="1" name="Region"/><tableColumn id="2" name="Q1"/><tableColumn id="3" name="Q2"/></tableColumns></table>"#;
    let table = TablePart::parse(source).unwrap();

    let mut package = Package::new();
    package.store("xl/tables/table1.xml", table.with_reference("A1:C12").unwrap());

    let package = roundtrip(&package);
    let stored = std::str::from_utf8(package.load("xl/tables/table1.xml").unwrap()).unwrap();
    assert!(stored.contains(r#"ref="A1:C12"><autoFilter ref="A1:C12"/>"#));
    assert!(stored.contains(r#"<tableColumn id="2" name="Q1"/>"#));
    assert_eq!(TablePart::parse(stored.as_bytes()).unwrap().display_name(), Some("Sales"));
}
