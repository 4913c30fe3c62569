mod common;

use std::path::Path;

use lotbook::{
    app::{run_lotbook_app, Options},
    lots::io::load_lots,
    testlib::{assert_vec_eq, assert_vecr_eq},
    util::rw::{DescribedReader, WriteHandle},
};
use common::TestDir;

const SAMPLE_CSV: &str = "./tests/data/sample_lots.csv";
const SAMPLE_REPORT: &str = "./tests/data/sample_lots_report.txt";

#[test]
fn test_sample_csv_report() {
    let reader = DescribedReader::from_file_path(SAMPLE_CSV.into());
    let (mut out, out_buff) = WriteHandle::string_buff();
    let (mut err, err_buff) = WriteHandle::string_buff();

    let res = run_lotbook_app(&reader, &Options::default(), &mut out, &mut err);

    assert_eq!(err_buff.borrow().as_str(), "");
    let res = res.unwrap();
    assert_eq!(res.lots.len(), 5);

    let expected_text = std::fs::read_to_string(Path::new(SAMPLE_REPORT))
        .unwrap_or_else(|_| panic!("Failed to read {SAMPLE_REPORT}"));
    let out_ref = out_buff.borrow();
    assert_vec_eq(
        out_ref.as_str().split("\n").collect(),
        expected_text.split("\n").collect(),
    );
}

#[test]
fn test_sample_csv_resave() {
    let dir = TestDir::new();
    let out_path = dir.file("resaved.csv");

    let reader = DescribedReader::from_file_path(SAMPLE_CSV.into());
    let options = Options { output_path: Some(out_path.clone()), skip_report: true };
    let res = run_lotbook_app(
        &reader, &options,
        &mut WriteHandle::sink(),
        &mut WriteHandle::sink()).unwrap();

    // Buy lots were filled in on save, so reloading yields the same lots,
    // and the stray mid-file header is gone.
    let reloaded = load_lots(&out_path, &mut WriteHandle::sink()).unwrap();
    assert_vecr_eq(&reloaded, &res.lots);

    let text = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(text.matches("Cnt,Sym").count(), 1);
    assert!(text.contains("\"ACME, Corp\""));
}
