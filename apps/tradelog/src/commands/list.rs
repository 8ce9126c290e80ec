use tradelog_application::persistence::JournalPersistence;
use tradelog_domain::value_objects::direction::Direction;

pub(super) fn run_list(
    journal: &JournalPersistence,
    session: Option<String>,
    direction: Option<Direction>,
) -> Result<(), String> {
    let dataset = journal
        .load_dataset()
        .map_err(|err| format!("failed to load journal: {err}"))?;

    if dataset.is_empty() {
        println!("journal is empty");
        return Ok(());
    }

    for (index, record) in dataset.records.iter().enumerate() {
        if let Some(session) = &session {
            if &record.session != session {
                continue;
            }
        }
        if let Some(direction) = direction {
            if record.direction != direction {
                continue;
            }
        }
        println!(
            "[{index}] {} {} {} {} {} entry={} stop={} tp={} exit={} result={} rr={} {}",
            record.date,
            record.time,
            record.session,
            record.symbol,
            record.direction,
            record.entry,
            record.stop,
            record.take_profit,
            cell(record.exit),
            cell(record.result),
            cell(record.rr),
            record.comment
        );
    }
    Ok(())
}

fn cell(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}
