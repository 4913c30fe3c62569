use std::borrow::BorrowMut;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;

use crate::lots::csv_common::LotCol;
use crate::lots::{LotError, Lot, Sale};
use crate::util::date::{parse_lot_date, to_lot_date_string};
use crate::util::decimal::parse_decimal_lenient;
use crate::util::rw::{DescribedReader, WriteHandle};
use crate::write_errln;

type Error = LotError;

/// Parses a dollar amount, as it may appear in a hand-edited or exported
/// file. A leading '$' and any grouping commas are dropped, and an empty
/// value is zero.
pub fn parse_money(value: &str) -> Result<Decimal, Error> {
    let trimmed = value.trim();
    let no_dollar = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let cleaned = no_dollar.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    parse_decimal_lenient(cleaned).map_err(|e| {
        LotError::parse(format!("Invalid amount '{value}': {e}"))
    })
}

fn parse_count(value: &str) -> Result<i64, Error> {
    value.trim().parse::<i64>().map_err(|e| {
        LotError::parse(format!("Invalid {} '{value}': {e}", LotCol::COUNT))
    })
}

fn parse_date_col(value: &str, col_name: &str) -> Result<time::Date, Error> {
    parse_lot_date(value).map_err(|e| {
        LotError::parse(format!("Failed to parse {col_name} \"{value}\": {e}"))
    })
}

fn parse_money_col(value: &str, col_name: &str) -> Result<Decimal, Error> {
    parse_money(value).map_err(|e| LotError::parse(format!("{col_name}: {e}")))
}

fn row_explicit_buy_lot<'a>(row: &[&'a str]) -> Option<&'a str> {
    row.get(LotCol::BUY_LOT_IDX).copied().filter(|s| !s.is_empty())
}

/// Decodes one data row. `default_buy_lot` is used unless the row
/// specifies its own buy lot.
pub fn lot_from_csv_row(row: &[&str], default_buy_lot: &str) -> Result<Lot, Error> {
    if row.len() < LotCol::MIN_ROW_LEN {
        return Err(LotError::parse(format!(
            "Expected at least {} columns, but found {}",
            LotCol::MIN_ROW_LEN,
            row.len()
        )));
    }

    let buy_lot = row_explicit_buy_lot(row).unwrap_or(default_buy_lot);

    let mut lot = Lot::new(
        parse_count(row[LotCol::COUNT_IDX])?,
        row[LotCol::SYMBOL_IDX],
        row[LotCol::DESCRIPTION_IDX],
        parse_date_col(row[LotCol::BUY_DATE_IDX], LotCol::BUY_DATE)?,
        parse_money_col(row[LotCol::BASIS_IDX], LotCol::BASIS)?,
    )
    .with_buy_lot(buy_lot)
    .with_form_position(row[LotCol::FORM_POSITION_IDX]);

    // Sale columns are ignored entirely for lots which are still held.
    if !row[LotCol::SELL_DATE_IDX].is_empty() {
        let mut sale = Sale::new(
            parse_date_col(row[LotCol::SELL_DATE_IDX], LotCol::SELL_DATE)?,
            parse_money_col(row[LotCol::PROCEEDS_IDX], LotCol::PROCEEDS)?,
        );
        let code = row[LotCol::ADJ_CODE_IDX];
        let adj = row[LotCol::ADJ_IDX];
        if !code.is_empty() || !adj.is_empty() {
            sale = sale.with_adjustment(code, parse_money_col(adj, LotCol::ADJ)?);
        }
        lot.set_sale(sale);
    }

    lot.is_replacement = row
        .get(LotCol::IS_REPLACEMENT_IDX)
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);

    Ok(lot)
}

/// Encodes a lot positionally, aligned with LotCol::header_order.
pub fn lot_to_csv_row(lot: &Lot) -> Vec<String> {
    let empty = || String::new();

    let adj = lot.adjustment();
    vec![
        lot.count.to_string(),
        lot.symbol.clone(),
        lot.description.clone(),
        to_lot_date_string(&lot.buydate),
        lot.basis.to_string(),
        lot.selldate().map(|d| to_lot_date_string(&d)).unwrap_or_else(empty),
        lot.proceeds().map(|p| p.to_string()).unwrap_or_else(empty),
        adj.map(|a| a.code.clone()).unwrap_or_else(empty),
        adj.map(|a| a.amount.to_string()).unwrap_or_else(empty),
        lot.form_position.clone(),
        lot.buy_lot.clone(),
        if lot.is_replacement { "True".to_string() } else { empty() },
    ]
}

pub struct PlainCsvTable {
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

pub fn lots_to_csv_table(lots: &[Lot]) -> PlainCsvTable {
    PlainCsvTable {
        header: LotCol::header_order().to_vec(),
        rows: lots.iter().map(lot_to_csv_row).collect(),
    }
}

/// Reads all lots from a lot csv.
///
/// Any row starting with the Cnt header value is skipped, wherever it
/// appears. Rows without an explicit BuyLot are numbered sequentially from 1.
/// Rows with an explicit BuyLot do not use up a number. A warning goes to
/// err_stream when a number is assigned that an earlier row gave explicitly.
///
/// The first bad row fails the whole load.
pub fn parse_lots_csv(
    desc_reader: &DescribedReader,
    err_stream: &mut WriteHandle,
) -> Result<Vec<Lot>, Error> {
    let csv_desc = desc_reader.desc();

    let mut reader_box = desc_reader.open()?;
    let reader: &mut dyn Read = reader_box.borrow_mut();

    let mut csv_r = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut lots = Vec::<Lot>::new();

    let mut buy_num: u64 = 1;
    // The counter does not skip values given explicitly by earlier rows,
    // so an assigned buy lot can collide with one of them. The reverse, an
    // explicit buy lot naming an earlier assigned one, is how rows of the
    // same purchase are grouped, and is not a collision.
    let mut explicit_buy_lots = HashSet::<String>::new();

    for (i, record_res) in csv_r.records().enumerate() {
        // Start at 1 for the user.
        let row_num = i + 1;

        let record = record_res.map_err(|e| {
            LotError::from(e).context(&format!("Error reading row {row_num} of {csv_desc}"))
        })?;
        let row: Vec<&str> = record.iter().collect();

        if row.first() == Some(&LotCol::COUNT) {
            tracing::debug!("parse_lots_csv: skipping header at row {row_num} of {csv_desc}");
            continue;
        }

        let default_buy_lot = buy_num.to_string();
        let lot = lot_from_csv_row(&row, &default_buy_lot)
            .map_err(|e| e.context(&format!("Error on row {row_num} of {csv_desc}")))?;

        match row_explicit_buy_lot(&row) {
            Some(explicit) => {
                explicit_buy_lots.insert(explicit.to_string());
            }
            None => {
                if explicit_buy_lots.contains(&default_buy_lot) {
                    tracing::warn!(
                        "parse_lots_csv: buy lot {default_buy_lot} assigned on row \
                        {row_num} collides with an explicit buy lot");
                    write_errln!(
                        err_stream,
                        "Warning: Buy lot {default_buy_lot} assigned to row {row_num} \
                        of {csv_desc} was already given explicitly to an earlier row"
                    );
                }
            }
        }

        if lot.buy_lot == default_buy_lot {
            buy_num += 1;
        }
        lots.push(lot);
    }

    tracing::debug!("parse_lots_csv: read {} lots from {csv_desc}", lots.len());
    Ok(lots)
}

pub fn load_lots(path: &Path, err_stream: &mut WriteHandle) -> Result<Vec<Lot>, Error> {
    parse_lots_csv(&DescribedReader::from_file_path(path.to_path_buf()), err_stream)
}

/// Writes the header row, then one row per lot, in order.
pub fn write_lots_csv(
    lots: &[Lot],
    writer: &mut dyn std::io::Write,
) -> Result<(), Error> {
    let table = lots_to_csv_table(lots);

    let mut csv_w = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_writer(writer);
    csv_w.write_record(&table.header)?;
    for row in &table.rows {
        csv_w.write_record(row)?;
    }
    csv_w.flush()?;
    Ok(())
}

/// Overwrites path with the lots. The file is closed on return,
/// whether or not writing succeeded.
pub fn save_lots(lots: &[Lot], path: &Path) -> Result<(), Error> {
    let mut fp = std::fs::File::create(path).map_err(|e| {
        LotError::Io(format!("Failed to create {}: {}", path.display(), e))
    })?;
    write_lots_csv(lots, &mut fp)
        .map_err(|e| e.context(&format!("Failed to write {}", path.display())))?;
    tracing::debug!("save_lots: wrote {} lots to {}", lots.len(), path.display());
    Ok(())
}

#[cfg(any(test, feature = "testlib"))]
pub mod testlib {
    use crate::{lots::csv_common::LotCol, util::rw::DescribedReader};

    // The names here are abbreviated to make test writing as concise and
    // convenient as possible.
    #[derive(Default, Clone)]
    pub struct TestLotCsvRow {
        pub n: &'static str,     // COUNT
        pub sym: &'static str,   // SYMBOL
        pub desc: &'static str,  // DESCRIPTION
        pub bd: &'static str,    // BUY_DATE
        pub bas: &'static str,   // BASIS
        pub sd: &'static str,    // SELL_DATE
        pub pro: &'static str,   // PROCEEDS
        pub code: &'static str,  // ADJ_CODE
        pub adj: &'static str,   // ADJ
        pub fp: &'static str,    // FORM_POSITION
        pub bl: &'static str,    // BUY_LOT
        pub repl: &'static str,  // IS_REPLACEMENT
    }

    impl TestLotCsvRow {
        /// A valid buy-only row, for tests which only care about a few fields.
        pub fn buy(sym: &'static str) -> TestLotCsvRow {
            TestLotCsvRow {
                n: "10",
                sym,
                desc: "desc",
                bd: "01/02/2020",
                bas: "100",
                ..Default::default()
            }
        }

        pub fn cols(&self) -> [&'static str; 12] {
            [
                self.n, self.sym, self.desc, self.bd, self.bas, self.sd,
                self.pro, self.code, self.adj, self.fp, self.bl, self.repl,
            ]
        }

        /// Renders the row with n_cols columns. Lot files may be missing
        /// the trailing columns.
        pub fn make_row_line(&self, n_cols: usize) -> String {
            let cols = self.cols();
            for part in &cols[..n_cols] {
                if part.contains(",") {
                    panic!("test lot col value '{}' contained a comma, \
                           which is not supported", part);
                }
            }
            cols[..n_cols].join(",")
        }
    }

    pub fn header_line() -> String {
        LotCol::header_order().join(",")
    }

    /// Builds a csv from a header and raw row lines.
    pub fn csv_reader_raw<T: ToString>(with_header: bool, rows: &Vec<T>) -> DescribedReader {
        let mut lines: Vec<String> = Vec::new();
        if with_header {
            lines.push(header_line());
        }
        lines.extend(rows.iter().map(|r| r.to_string()));
        DescribedReader::from_string("lots.csv".to_string(), lines.join("\n") + "\n")
    }

    pub fn csv_reader(rows: &Vec<TestLotCsvRow>) -> DescribedReader {
        let lines: Vec<String> = rows.iter().map(|r| r.make_row_line(12)).collect();
        csv_reader_raw(true, &lines)
    }
}
