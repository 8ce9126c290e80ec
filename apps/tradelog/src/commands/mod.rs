mod add;
mod close;
mod export;
mod list;

pub use add::AddArgs;

use std::path::PathBuf;
use tradelog_application::config;
use tradelog_application::persistence::JournalPersistence;
use tradelog_domain::value_objects::direction::Direction;

pub enum Command {
    Add(AddArgs),
    Close {
        index: usize,
        exit: f64,
    },
    List {
        session: Option<String>,
        direction: Option<Direction>,
    },
    Export {
        out: PathBuf,
    },
}

pub fn run(command: Command, config_path: Option<PathBuf>) -> Result<(), String> {
    let config = config::resolve_config(config_path)?;
    let store = crate::infra::build_store(&config)?;
    let journal = JournalPersistence::new(store);
    match command {
        Command::Add(args) => add::run_add(&journal, args),
        Command::Close { index, exit } => close::run_close(&journal, index, exit),
        Command::List { session, direction } => list::run_list(&journal, session, direction),
        Command::Export { out } => export::run_export(&journal, out),
    }
}

#[cfg(test)]
mod tests {
    use super::add::{run_add, AddArgs};
    use super::close::run_close;
    use super::export::run_export;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};
    use tradelog_application::persistence::{JournalPersistence, DATASET_PATH};
    use tradelog_domain::value_objects::direction::Direction;
    use tradelog_infrastructure::local::LocalJournalStore;

    fn unique_tmp_dir(name: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!("tradelog_{name}_{}_{}", std::process::id(), now))
    }

    fn local_journal(root: &PathBuf) -> JournalPersistence {
        JournalPersistence::new(Box::new(LocalJournalStore::new(
            root.clone(),
            DATASET_PATH.to_string(),
        )))
    }

    fn add_args() -> AddArgs {
        AddArgs {
            date: Some("2024-01-01".to_string()),
            time: Some("09:30".to_string()),
            symbol: "BTCUSDT.P".to_string(),
            direction: Direction::Long,
            bias: "Bullish".to_string(),
            level: "FVG".to_string(),
            entry: 100.0,
            stop: 95.0,
            take_profit: 115.0,
            comment: String::new(),
            screenshot: None,
        }
    }

    #[test]
    fn add_then_close_updates_the_newest_row() {
        let root = unique_tmp_dir("cli_flow");
        let journal = local_journal(&root);

        run_add(&journal, add_args()).expect("add");
        run_close(&journal, 0, 110.0).expect("close");

        let dataset = journal.load_dataset().expect("load");
        assert_eq!(dataset.len(), 1);
        let record = &dataset.records[0];
        assert_eq!(record.session, "London");
        assert_eq!(record.rr, Some(3.0));
        assert_eq!(record.exit, Some(110.0));
        assert_eq!(record.result, Some(10.0));
    }

    #[test]
    fn close_rejects_out_of_range_index() {
        let root = unique_tmp_dir("cli_close_oob");
        let journal = local_journal(&root);
        run_add(&journal, add_args()).expect("add");

        let err = run_close(&journal, 5, 110.0).expect_err("out of range");
        assert!(err.contains("no trade at index 5"));
    }

    #[test]
    fn add_stores_screenshot_and_references_it() {
        let root = unique_tmp_dir("cli_screenshot");
        fs::create_dir_all(&root).expect("tmp root");
        let shot = root.join("entry.png");
        fs::write(&shot, b"\x89PNG").expect("screenshot file");

        let journal = local_journal(&root);
        let mut args = add_args();
        args.screenshot = Some(shot);
        run_add(&journal, args).expect("add");

        let dataset = journal.load_dataset().expect("load");
        let reference = &dataset.records[0].screenshot_path;
        assert_eq!(reference, "data/screenshots/2024-01-01_0930_entry.png");
        assert!(root.join(reference).exists());
    }

    #[test]
    fn export_writes_the_serialized_journal() {
        let root = unique_tmp_dir("cli_export");
        let journal = local_journal(&root);
        run_add(&journal, add_args()).expect("add");

        let out = root.join("journal_export.csv");
        run_export(&journal, out.clone()).expect("export");
        let exported = fs::read_to_string(out).expect("export file");
        assert!(exported.starts_with("date,time,session,"));
        assert!(exported.contains("BTCUSDT.P"));
    }
}
