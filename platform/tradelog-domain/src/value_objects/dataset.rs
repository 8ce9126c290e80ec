use crate::value_objects::trade_record::TradeRecord;

/// Fixed journal schema, in column order.
pub const COLUMNS: [&str; 15] = [
    "date",
    "time",
    "session",
    "symbol",
    "direction",
    "bias",
    "level",
    "entry",
    "stop",
    "take_profit",
    "exit",
    "result",
    "rr",
    "comment",
    "screenshot_path",
];

/// The full journal, the unit of whole-document read/write. Records carry no
/// unique id; identity is positional, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<TradeRecord>,
}

impl Dataset {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<TradeRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// New trades go to the front so the most recent entry renders first.
    pub fn prepend(&mut self, record: TradeRecord) {
        self.records.insert(0, record);
    }

    /// Positional edit. Only valid against a dataset loaded in the same
    /// logical operation; an index taken from an earlier load may point at a
    /// different row after an intervening save.
    pub fn record_mut(&mut self, index: usize) -> Option<&mut TradeRecord> {
        self.records.get_mut(index)
    }
}
