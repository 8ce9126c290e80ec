use crate::value_objects::direction::Direction;
use serde::{Deserialize, Serialize};

/// One journal row. `date` and `time` stay as the strings the user entered
/// (`YYYY-MM-DD`, `HH:MM`) so that a load/save cycle reproduces the document
/// byte-for-byte instead of normalizing through a datetime type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date: String,
    pub time: String,
    pub session: String,
    pub symbol: String,
    pub direction: Direction,
    pub bias: String,
    pub level: String,
    pub entry: f64,
    pub stop: f64,
    pub take_profit: f64,
    pub exit: Option<f64>,
    pub result: Option<f64>,
    pub rr: Option<f64>,
    pub comment: String,
    pub screenshot_path: String,
}
