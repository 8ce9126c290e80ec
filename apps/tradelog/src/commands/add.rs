use chrono::Local;
use std::fs;
use std::path::PathBuf;
use tradelog_application::meta;
use tradelog_application::persistence::{self, JournalPersistence};
use tradelog_domain::services::journal::{compute_rr, detect_session};
use tradelog_domain::value_objects::direction::Direction;
use tradelog_domain::value_objects::trade_record::TradeRecord;

pub struct AddArgs {
    pub date: Option<String>,
    pub time: Option<String>,
    pub symbol: String,
    pub direction: Direction,
    pub bias: String,
    pub level: String,
    pub entry: f64,
    pub stop: f64,
    pub take_profit: f64,
    pub comment: String,
    pub screenshot: Option<PathBuf>,
}

pub(super) fn run_add(journal: &JournalPersistence, args: AddArgs) -> Result<(), String> {
    let date = args
        .date
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());
    let time = args
        .time
        .unwrap_or_else(|| Local::now().format("%H:%M").to_string());
    let session = detect_session(&time);
    let rr = compute_rr(args.entry, args.stop, args.take_profit);

    let mut dataset = journal
        .load_dataset()
        .map_err(|err| format!("failed to load journal: {err}"))?;

    // The attachment goes in before the dataset row that references it; a
    // crash in between leaves a dangling reference, not a corrupt journal.
    let screenshot_path = match &args.screenshot {
        Some(file) => {
            let bytes = fs::read(file)
                .map_err(|err| format!("failed to read screenshot {}: {}", file.display(), err))?;
            let name = file
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| format!("screenshot has no usable file name: {}", file.display()))?;
            let target = persistence::attachment_path(&date, &time, name);
            journal
                .store_attachment(&target, &bytes)
                .map_err(|err| format!("failed to store screenshot: {err}"))?
        }
        None => String::new(),
    };

    dataset.prepend(TradeRecord {
        date,
        time,
        session: session.clone(),
        symbol: args.symbol.clone(),
        direction: args.direction,
        bias: args.bias,
        level: args.level,
        entry: args.entry,
        stop: args.stop,
        take_profit: args.take_profit,
        exit: None,
        result: None,
        rr,
        comment: args.comment,
        screenshot_path,
    });

    journal
        .save_dataset(&dataset)
        .map_err(|err| format!("failed to save journal: {err}"))?;

    println!(
        "{}: recorded {} {} entry={} stop={} tp={} (session={}, rr={}, backend={})",
        meta::engine_name(),
        args.direction,
        args.symbol,
        args.entry,
        args.stop,
        args.take_profit,
        session,
        rr.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string()),
        journal.backend_name(),
    );
    Ok(())
}
