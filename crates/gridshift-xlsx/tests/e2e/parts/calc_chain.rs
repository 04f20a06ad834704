//! Calc chain parts written to and read back from an archive.

use crate::write_temp;
use gridshift_core::{CalcChain, CalcChainEntry};
use gridshift_xlsx::{calc_chain_xml, read_calc_chain, Package, PartStore, CALC_CHAIN_PATH};
use pretty_assertions::assert_eq;

#[test]
fn test_calc_chain_survives_archive() {
    let chain = CalcChain::from_entries(vec![
        CalcChainEntry::new("A1", 1),
        CalcChainEntry::inherited("A2"),
        CalcChainEntry::new("C7", 2),
    ]);

    let mut package = Package::new();
    package.store(CALC_CHAIN_PATH, calc_chain_xml(&chain).into_bytes());
    package.store("xl/workbook.xml", b"<workbook/>".to_vec());

    let (_dir, path) = write_temp(&package);
    let file = std::fs::File::open(&path).unwrap();
    let read = Package::read(file).unwrap();

    assert_eq!(read.len(), 2);
    assert_eq!(read, package);
    let reloaded = read_calc_chain(read.load(CALC_CHAIN_PATH).unwrap()).unwrap();
    assert_eq!(reloaded, chain);
}
