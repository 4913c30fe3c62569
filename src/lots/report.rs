use std::collections::HashSet;
use std::io::Write;

use rust_decimal::Decimal;

use crate::lots::Lot;
use crate::util::decimal::dollar_precision_str;

#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct LotTotals {
    pub basis: Decimal,
    /// Only lots which have been sold contribute.
    pub proceeds: Decimal,
    /// Only lots with an adjustment contribute.
    pub adjustment: Decimal,
}

impl LotTotals {
    pub fn basis_minus_adjustment(&self) -> Decimal {
        self.basis - self.adjustment
    }
}

impl std::fmt::Display for LotTotals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Totals: Basis {} Proceeds {} Adj: {} (basis-adj: {})",
            dollar_precision_str(&self.basis),
            dollar_precision_str(&self.proceeds),
            dollar_precision_str(&self.adjustment),
            dollar_precision_str(&self.basis_minus_adjustment())
        )
    }
}

/// Panics if the same lot (by reference, not value) appears more than once.
/// Two equal lots are fine, since they can legitimately be identical
/// records, but the same record twice would double count it.
fn assert_distinct_lots(lots: &[&Lot]) {
    let mut seen = HashSet::<*const Lot>::with_capacity(lots.len());
    for (i, lot) in lots.iter().enumerate() {
        assert!(
            seen.insert(*lot as *const Lot),
            "Lot at index {} appears more than once in the batch: {}",
            i,
            lot
        );
    }
}

/// Panics if an adjustment does not match basis - proceeds.
/// This means the lot was built or edited incorrectly upstream, and any
/// totals would be wrong.
fn assert_adjustment_consistent(lot: &Lot) {
    assert!(
        lot.adjustment_is_consistent(),
        "Adjustment does not equal basis - proceeds for lot: {}",
        lot
    );
}

pub fn calc_lot_totals(lots: &[&Lot]) -> LotTotals {
    let mut totals = LotTotals::default();
    for lot in lots {
        totals.basis += lot.basis;
        if let Some(proceeds) = lot.proceeds() {
            totals.proceeds += proceeds;
        }
        if let Some(adj) = lot.adjustment() {
            totals.adjustment += adj.amount;
        }
    }
    totals
}

/// Writes each lot on its own line, followed by the totals.
///
/// Panics (before writing anything) if a lot reference appears more than
/// once, and while writing if a lot's adjustment is inconsistent.
pub fn report_lots(
    lots: &[&Lot],
    w: &mut dyn Write,
) -> Result<LotTotals, std::io::Error> {
    assert_distinct_lots(lots);

    writeln!(w, "Printing {} lots:", lots.len())?;
    for lot in lots {
        writeln!(w, "{}", lot)?;
        assert_adjustment_consistent(lot);
    }

    let totals = calc_lot_totals(lots);
    writeln!(w, "{}", totals)?;
    Ok(totals)
}

/// Convenience for reporting an owned batch, as returned by a load.
pub fn report_lot_vec(
    lots: &Vec<Lot>,
    w: &mut dyn Write,
) -> Result<LotTotals, std::io::Error> {
    let refs: Vec<&Lot> = lots.iter().collect();
    report_lots(&refs, w)
}
