pub mod dataset;
pub mod direction;
pub mod trade_record;
