mod common;

use rust_decimal_macros::dec;

use lotbook::{
    lots::{
        io::{load_lots, save_lots},
        report::report_lot_vec,
        Lot, LotError, Sale,
    },
    testlib::{assert_re, assert_vecr_eq},
    util::{date::pub_testlib::mdy, rw::{StringBuffer, WriteHandle}},
};
use common::TestDir;

fn sample_lots() -> Vec<Lot> {
    vec![
        Lot::new(100, "VTI", "Vanguard Total Stock Market", mdy(2018, 2, 5), dec!(13250.75))
            .with_buy_lot("1"),
        Lot::new(20, "VTI", "Vanguard Total Stock Market", mdy(2018, 2, 5), dec!(2650.15))
            .with_sale(Sale::new(mdy(2018, 12, 24), dec!(2400.15))
                       .with_adjustment("W", dec!(250)))
            .with_form_position("8949-A")
            .with_buy_lot("1"),
        Lot::new(20, "VTI", "Vanguard Total Stock Market", mdy(2019, 1, 2), dec!(2500))
            .with_buy_lot("2")
            .with_replacement(true),
        Lot::new(7, "BRK.B", "Berkshire, \"B\" shares", mdy(2017, 7, 7), dec!(1200))
            .with_sale(Sale::new(mdy(2020, 7, 7), dec!(1500)))
            .with_form_position("8949-D")
            .with_buy_lot("legacy-3"),
    ]
}

#[test]
fn test_save_load_roundtrip() {
    let dir = TestDir::new();
    let path = dir.file("lots.csv");

    let lots = sample_lots();
    save_lots(&lots, &path).unwrap();
    let loaded = load_lots(&path, &mut WriteHandle::sink()).unwrap();
    assert_vecr_eq(&loaded, &lots);

    // Saving again over the same file gives the same contents.
    let first = std::fs::read_to_string(&path).unwrap();
    save_lots(&loaded, &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
}

#[test]
fn test_load_missing_file() {
    let dir = TestDir::new();
    let err = load_lots(&dir.file("nope.csv"), &mut WriteHandle::sink())
        .unwrap_err();
    assert!(matches!(err, LotError::Io(_)));
    assert_re("^Unable to open .*nope.csv: ", err.msg());
}

#[test]
fn test_save_to_missing_dir() {
    let dir = TestDir::new();
    let err = save_lots(&sample_lots(), &dir.file("no/such/dir/lots.csv")).unwrap_err();
    assert!(matches!(err, LotError::Io(_)));
    assert_re("^Failed to create ", err.msg());
}

#[test]
fn test_load_aborts_on_bad_row() {
    let dir = TestDir::new();
    let path = dir.file("bad.csv");
    std::fs::write(&path, "\
1,A,,01/01/2020,10,,,,,
2,B,,01/01/2020,ten,,,,,
3,C,,01/01/2020,10,,,,,
").unwrap();
    let err = load_lots(&path, &mut WriteHandle::sink()).unwrap_err();
    assert!(matches!(err, LotError::Parse(_)));
    assert_re("^Error on row 2 of .*bad.csv: Basis: Invalid amount 'ten'", err.msg());
}

#[test]
fn test_load_then_report() {
    let dir = TestDir::new();
    let path = dir.file("report.csv");
    std::fs::write(&path, "\
Cnt,Sym,Desc,BuyDate,Basis,SellDate,Proceeds,AdjCode,Adj,FormPosition,BuyLot,IsReplacement
1,A,Aa,01/01/2020,100,,,,,,,
1,B,Bb,01/01/2020,200,02/01/2020,150,W,50,,,
").unwrap();
    let lots = load_lots(&path, &mut WriteHandle::sink()).unwrap();

    let mut buff = StringBuffer::new();
    let totals = report_lot_vec(&lots, &mut buff).unwrap();
    assert_eq!(totals.basis_minus_adjustment(), dec!(250));
    assert_re(
        r"\nTotals: Basis 300.00 Proceeds 150.00 Adj: 50.00 \(basis-adj: 250.00\)\n$",
        buff.as_str(),
    );
}
