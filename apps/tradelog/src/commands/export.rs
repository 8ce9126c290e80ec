use std::fs;
use std::path::PathBuf;
use tradelog_application::codec;
use tradelog_application::meta;
use tradelog_application::persistence::JournalPersistence;

pub(super) fn run_export(journal: &JournalPersistence, out: PathBuf) -> Result<(), String> {
    let dataset = journal
        .load_dataset()
        .map_err(|err| format!("failed to load journal: {err}"))?;
    let contents = codec::encode_dataset(&dataset)
        .map_err(|err| format!("failed to encode journal: {err}"))?;

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create dir {}: {}", parent.display(), err))?;
        }
    }
    fs::write(&out, contents)
        .map_err(|err| format!("failed to write export {}: {}", out.display(), err))?;

    println!(
        "{}: exported {} rows to {}",
        meta::engine_name(),
        dataset.len(),
        out.display()
    );
    Ok(())
}
