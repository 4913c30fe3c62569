use std::path::PathBuf;

use crate::{
    lots::{
        io::{parse_lots_csv, save_lots},
        report::{report_lot_vec, LotTotals},
        Lot,
    },
    util::rw::{DescribedReader, WriteHandle},
    verboseln, write_errln,
};

pub type Error = String;

pub struct Options {
    /// Where to re-save the loaded lots, if anywhere.
    pub output_path: Option<PathBuf>,
    pub skip_report: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output_path: None,
            skip_report: false,
        }
    }
}

pub struct AppResult {
    pub lots: Vec<Lot>,
    /// None if the report was skipped.
    pub totals: Option<LotTotals>,
}

/// Loads the lots, reports them, and optionally saves them back out.
/// Saving writes every buy lot explicitly, so the numbering assigned
/// during the load is preserved for later edits.
pub fn run_lotbook_app(
    csv_reader: &DescribedReader,
    options: &Options,
    out: &mut WriteHandle,
    err_printer: &mut WriteHandle,
) -> Result<AppResult, Error> {
    let lots = parse_lots_csv(csv_reader, err_printer).map_err(|e| e.to_string())?;
    verboseln!("Loaded {} lots from {}", lots.len(), csv_reader.desc());

    let totals = if options.skip_report {
        None
    } else {
        Some(report_lot_vec(&lots, out)
            .map_err(|e| format!("Failed to write report: {e}"))?)
    };

    if let Some(out_path) = &options.output_path {
        save_lots(&lots, out_path).map_err(|e| e.to_string())?;
        verboseln!("Saved {} lots to {}", lots.len(), out_path.display());
    }

    Ok(AppResult { lots, totals })
}

/// Returned Err is for exit code determination only.
/// All errors are written to err_printer.
pub fn run_lotbook_app_to_console(
    csv_reader: DescribedReader,
    options: Options,
    mut err_printer: WriteHandle,
) -> Result<(), ()> {
    let mut out = WriteHandle::stdout();
    match run_lotbook_app(&csv_reader, &options, &mut out, &mut err_printer) {
        Ok(_) => Ok(()),
        Err(e) => {
            write_errln!(err_printer, "{}", e);
            Err(())
        }
    }
}

// MARK: Tests
#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{
        lots::io::lot_csv::testlib::{csv_reader, TestLotCsvRow as Row},
        testlib::assert_re,
        util::rw::WriteHandle,
    };

    use super::{run_lotbook_app, Options};

    #[test]
    fn test_run_app_report() {
        let reader = csv_reader(&vec![
            Row::buy("GOOG"),
            Row { bas: "$1200", sd: "6/7/2020", pro: "1000", code: "W", adj: "200",
                  ..Row::buy("FOO") },
        ]);
        let (mut out, out_buff) = WriteHandle::string_buff();
        let (mut err, err_buff) = WriteHandle::string_buff();

        let res = run_lotbook_app(&reader, &Options::default(), &mut out, &mut err).unwrap();

        assert_eq!(res.lots.len(), 2);
        let totals = res.totals.unwrap();
        assert_eq!(totals.basis, dec!(1300));
        assert_eq!(totals.proceeds, dec!(1000));
        assert_eq!(totals.adjustment, dec!(200));
        assert_eq!(err_buff.borrow().as_str(), "");
        assert_re(
            r"Totals: Basis 1300.00 Proceeds 1000.00 Adj: 200.00 \(basis-adj: 1100.00\)\n$",
            out_buff.borrow().as_str(),
        );
    }

    #[test]
    fn test_run_app_skip_report() {
        let reader = csv_reader(&vec![Row::buy("GOOG")]);
        let (mut out, out_buff) = WriteHandle::string_buff();
        let options = Options { skip_report: true, ..Options::default() };

        let res = run_lotbook_app(
            &reader, &options, &mut out, &mut WriteHandle::sink()).unwrap();
        assert!(res.totals.is_none());
        assert_eq!(out_buff.borrow().as_str(), "");
    }

    #[test]
    fn test_run_app_parse_error() {
        let reader = csv_reader(&vec![Row { n: "ten", ..Row::buy("GOOG") }]);
        let (mut out, out_buff) = WriteHandle::string_buff();

        let err = run_lotbook_app(
            &reader, &Options::default(), &mut out,
            &mut WriteHandle::sink()).err().unwrap();
        assert_re("^Error on row 2 of lots.csv: Invalid Cnt 'ten'", &err);
        // Nothing is reported on a failed load
        assert_eq!(out_buff.borrow().as_str(), "");
    }
}
