use std::fmt::Display;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::Date;

use crate::util::decimal::{dollar_precision_str, is_within_tolerance};

/// How far an adjustment may drift from basis - proceeds and still be
/// considered consistent.
pub const ADJUSTMENT_TOLERANCE: Decimal = dec!(0.0000001);

/// A tax-reporting correction to a sale (eg. a wash-sale disallowed loss),
/// along with its reason code.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Adjustment {
    pub code: String,
    pub amount: Decimal,
}

impl Adjustment {
    pub fn new(code: &str, amount: Decimal) -> Adjustment {
        Adjustment { code: code.to_string(), amount }
    }

    /// An adjustment with neither a code nor an amount carries no information
    /// for the human readable line.
    pub fn is_blank(&self) -> bool {
        self.code.is_empty() && self.amount.is_zero()
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Sale {
    pub selldate: Date,
    pub proceeds: Decimal,
    pub adjustment: Option<Adjustment>,
}

impl Sale {
    pub fn new(selldate: Date, proceeds: Decimal) -> Sale {
        Sale { selldate, proceeds, adjustment: None }
    }

    pub fn with_adjustment(mut self, code: &str, amount: Decimal) -> Sale {
        self.adjustment = Some(Adjustment::new(code, amount));
        self
    }
}

/// A buy of some security, with an optional matching sell.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Lot {
    pub count: i64,
    pub symbol: String,
    pub description: String,
    pub buydate: Date,
    pub basis: Decimal,
    /// None while the lot is still held.
    pub sale: Option<Sale>,
    /// Free-form label for which line of the tax form this belongs on.
    pub form_position: String,
    /// Groups lots which came out of the same original purchase.
    pub buy_lot: String,
    pub is_replacement: bool,
}

impl Lot {
    pub fn new(
        count: i64,
        symbol: &str,
        description: &str,
        buydate: Date,
        basis: Decimal,
    ) -> Lot {
        Lot {
            count,
            symbol: symbol.to_string(),
            description: description.to_string(),
            buydate,
            basis,
            sale: None,
            form_position: String::new(),
            buy_lot: String::new(),
            is_replacement: false,
        }
    }

    pub fn with_form_position(mut self, form_position: &str) -> Lot {
        self.form_position = form_position.to_string();
        self
    }

    pub fn with_buy_lot(mut self, buy_lot: &str) -> Lot {
        self.buy_lot = buy_lot.to_string();
        self
    }

    pub fn with_replacement(mut self, is_replacement: bool) -> Lot {
        self.is_replacement = is_replacement;
        self
    }

    pub fn with_sale(mut self, sale: Sale) -> Lot {
        self.set_sale(sale);
        self
    }

    /// Records the sell side of a lot which was previously only a buy.
    pub fn set_sale(&mut self, sale: Sale) {
        self.sale = Some(sale);
    }

    pub fn has_sale(&self) -> bool {
        self.sale.is_some()
    }

    pub fn selldate(&self) -> Option<Date> {
        self.sale.as_ref().map(|s| s.selldate)
    }

    pub fn proceeds(&self) -> Option<Decimal> {
        self.sale.as_ref().map(|s| s.proceeds)
    }

    pub fn adjustment(&self) -> Option<&Adjustment> {
        self.sale.as_ref().and_then(|s| s.adjustment.as_ref())
    }

    /// True if both lots describe the same original purchase, regardless of
    /// what has happened to them since.
    pub fn acquisition_match(&self, other: &Lot) -> bool {
        self.count == other.count
            && self.symbol == other.symbol
            && self.description == other.description
            && self.buydate == other.buydate
            && self.basis == other.basis
    }

    /// A non-zero adjustment must account for exactly the loss
    /// (basis - proceeds). Zero or absent adjustments are always consistent.
    pub fn adjustment_is_consistent(&self) -> bool {
        let sale = match &self.sale {
            Some(s) => s,
            None => return true,
        };
        match &sale.adjustment {
            Some(adj) if !adj.amount.is_zero() => is_within_tolerance(
                &adj.amount,
                &(self.basis - sale.proceeds),
                &ADJUSTMENT_TOLERANCE,
            ),
            _ => true,
        }
    }
}

impl Display for Lot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:2} {} ({}) acq: {} {:>8}",
            self.count,
            self.symbol,
            self.description,
            self.buydate,
            dollar_precision_str(&self.basis)
        )?;
        if let Some(sale) = &self.sale {
            write!(
                f,
                " sell: {} {:>8}",
                sale.selldate,
                dollar_precision_str(&sale.proceeds)
            )?;
            if let Some(adj) = &sale.adjustment {
                if adj.amount.is_zero() {
                    if !adj.is_blank() {
                        write!(f, " [{:>1}]", adj.code)?;
                    }
                } else {
                    write!(
                        f,
                        " [{:>1} {:>6}]",
                        adj.code,
                        dollar_precision_str(&adj.amount)
                    )?;
                }
            }
        }
        if !self.form_position.is_empty() {
            write!(f, " {}", self.form_position)?;
        }
        write!(f, " {}", self.buy_lot)?;
        if self.is_replacement {
            write!(f, " [IsRepl]")?;
        }
        Ok(())
    }
}
