use tradelog_domain::errors::PersistenceError;
use tradelog_domain::value_objects::dataset::{Dataset, COLUMNS};
use tradelog_domain::value_objects::trade_record::TradeRecord;

/// Serializes the full dataset as comma-delimited text: the fixed header row
/// first (always, even for an empty journal), one record per row, blanks for
/// absent values.
pub fn encode_dataset(dataset: &Dataset) -> Result<String, PersistenceError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(COLUMNS)
        .map_err(|err| PersistenceError::Malformed(format!("failed to encode journal header: {err}")))?;

    for record in &dataset.records {
        writer
            .write_record([
                record.date.clone(),
                record.time.clone(),
                record.session.clone(),
                record.symbol.clone(),
                record.direction.to_string(),
                record.bias.clone(),
                record.level.clone(),
                record.entry.to_string(),
                record.stop.to_string(),
                record.take_profit.to_string(),
                optional_cell(record.exit),
                optional_cell(record.result),
                optional_cell(record.rr),
                record.comment.clone(),
                record.screenshot_path.clone(),
            ])
            .map_err(|err| PersistenceError::Malformed(format!("failed to encode journal row: {err}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| PersistenceError::Malformed(format!("failed to flush journal csv: {err}")))?;
    String::from_utf8(bytes)
        .map_err(|err| PersistenceError::Malformed(format!("journal csv is not utf-8: {err}")))
}

/// Parses tabular journal text back into records. Malformed content is fatal;
/// there is no row-level recovery from a corrupted journal.
pub fn decode_dataset(contents: &str) -> Result<Dataset, PersistenceError> {
    let mut reader = csv::Reader::from_reader(contents.as_bytes());
    let mut records = Vec::new();
    for row in reader.deserialize::<TradeRecord>() {
        let record = row
            .map_err(|err| PersistenceError::Malformed(format!("failed to parse journal row: {err}")))?;
        records.push(record);
    }
    Ok(Dataset::from_records(records))
}

fn optional_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{decode_dataset, encode_dataset};
    use tradelog_domain::errors::PersistenceError;
    use tradelog_domain::value_objects::dataset::Dataset;
    use tradelog_domain::value_objects::direction::Direction;
    use tradelog_domain::value_objects::trade_record::TradeRecord;

    fn sample_record() -> TradeRecord {
        TradeRecord {
            date: "2024-01-01".to_string(),
            time: "09:30".to_string(),
            session: "London".to_string(),
            symbol: "BTCUSDT.P".to_string(),
            direction: Direction::Long,
            bias: "Bullish".to_string(),
            level: "FVG".to_string(),
            entry: 100.0,
            stop: 95.0,
            take_profit: 115.0,
            exit: None,
            result: None,
            rr: Some(3.0),
            comment: "wait for sweep, then entry".to_string(),
            screenshot_path: String::new(),
        }
    }

    #[test]
    fn empty_dataset_encodes_to_header_only() {
        let encoded = encode_dataset(&Dataset::empty()).expect("encode");
        assert_eq!(
            encoded,
            "date,time,session,symbol,direction,bias,level,entry,stop,take_profit,exit,result,rr,comment,screenshot_path\n"
        );
    }

    #[test]
    fn round_trip_preserves_records_including_nulls() {
        let mut dataset = Dataset::empty();
        let mut closed = sample_record();
        closed.exit = Some(110.5);
        closed.result = Some(10.5);
        dataset.prepend(sample_record());
        dataset.prepend(closed);

        let encoded = encode_dataset(&dataset).expect("encode");
        let decoded = decode_dataset(&encoded).expect("decode");
        assert_eq!(decoded, dataset);
    }

    #[test]
    fn blanks_decode_to_none() {
        let contents = "date,time,session,symbol,direction,bias,level,entry,stop,take_profit,exit,result,rr,comment,screenshot_path\n\
2024-01-01,09:30,London,BTCUSDT.P,Long,,,100,95,115,,,3,,\n";
        let dataset = decode_dataset(contents).expect("decode");
        assert_eq!(dataset.len(), 1);
        let record = &dataset.records[0];
        assert_eq!(record.exit, None);
        assert_eq!(record.result, None);
        assert_eq!(record.rr, Some(3.0));
        assert_eq!(record.bias, "");
    }

    #[test]
    fn comment_with_delimiters_survives_quoting() {
        let mut dataset = Dataset::empty();
        let mut record = sample_record();
        record.comment = "choppy, \"no conviction\"".to_string();
        dataset.prepend(record);

        let encoded = encode_dataset(&dataset).expect("encode");
        let decoded = decode_dataset(&encoded).expect("decode");
        assert_eq!(decoded.records[0].comment, "choppy, \"no conviction\"");
    }

    #[test]
    fn malformed_document_is_fatal() {
        let contents = "date,time\n2024-01-01,09:30\n";
        let err = decode_dataset(contents).expect_err("missing columns");
        assert!(matches!(err, PersistenceError::Malformed(_)));
    }

    #[test]
    fn empty_document_decodes_to_empty_dataset() {
        let dataset = decode_dataset("").expect("decode");
        assert!(dataset.is_empty());
    }
}
