use tradelog_application::meta;
use tradelog_application::persistence::JournalPersistence;
use tradelog_domain::services::journal::compute_result;

/// Reload-then-edit as one logical operation: the index refers to the dataset
/// loaded here, not to any earlier listing.
pub(super) fn run_close(journal: &JournalPersistence, index: usize, exit: f64) -> Result<(), String> {
    let mut dataset = journal
        .load_dataset()
        .map_err(|err| format!("failed to load journal: {err}"))?;

    let total = dataset.len();
    let record = dataset
        .record_mut(index)
        .ok_or_else(|| format!("no trade at index {index} (journal has {total} rows)"))?;

    record.exit = Some(exit);
    let result = compute_result(record.direction, record.entry, exit);
    record.result = Some(result);
    let symbol = record.symbol.clone();
    let direction = record.direction;

    journal
        .save_dataset(&dataset)
        .map_err(|err| format!("failed to save journal: {err}"))?;

    println!(
        "{}: closed {} {} at {} (result={})",
        meta::engine_name(),
        direction,
        symbol,
        exit,
        result
    );
    Ok(())
}
