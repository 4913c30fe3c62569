pub struct LotCol();
impl LotCol {
    pub const COUNT: &'static str = "Cnt";
    pub const SYMBOL: &'static str = "Sym";
    pub const DESCRIPTION: &'static str = "Desc";
    pub const BUY_DATE: &'static str = "BuyDate";
    pub const BASIS: &'static str = "Basis";
    pub const SELL_DATE: &'static str = "SellDate";
    pub const PROCEEDS: &'static str = "Proceeds";
    pub const ADJ_CODE: &'static str = "AdjCode";
    pub const ADJ: &'static str = "Adj";
    pub const FORM_POSITION: &'static str = "FormPosition";
    pub const BUY_LOT: &'static str = "BuyLot";
    pub const IS_REPLACEMENT: &'static str = "IsReplacement";

    /// Rows must have at least this many columns. BuyLot and IsReplacement
    /// were added later, so older files may not have them.
    pub const MIN_ROW_LEN: usize = 10;

    // Positional indexes, matching header_order.
    pub const COUNT_IDX: usize = 0;
    pub const SYMBOL_IDX: usize = 1;
    pub const DESCRIPTION_IDX: usize = 2;
    pub const BUY_DATE_IDX: usize = 3;
    pub const BASIS_IDX: usize = 4;
    pub const SELL_DATE_IDX: usize = 5;
    pub const PROCEEDS_IDX: usize = 6;
    pub const ADJ_CODE_IDX: usize = 7;
    pub const ADJ_IDX: usize = 8;
    pub const FORM_POSITION_IDX: usize = 9;
    pub const BUY_LOT_IDX: usize = 10;
    pub const IS_REPLACEMENT_IDX: usize = 11;

    pub fn header_order() -> [&'static str; 12] {
        [
            LotCol::COUNT,
            LotCol::SYMBOL,
            LotCol::DESCRIPTION,
            LotCol::BUY_DATE,
            LotCol::BASIS,
            LotCol::SELL_DATE,
            LotCol::PROCEEDS,
            LotCol::ADJ_CODE,
            LotCol::ADJ,
            LotCol::FORM_POSITION,
            LotCol::BUY_LOT,
            LotCol::IS_REPLACEMENT,
        ]
    }
}
