use notethis_core::storage::note_store::backup_path_for;
use notethis_core::{extract_title, NoteStore};

fn store(dir: &std::path::Path) -> NoteStore {
    NoteStore::new(dir, "note_A", ".md")
}

#[test]
fn numbering_continues_after_highest_existing_note() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    std::fs::write(dir.path().join("note_A001.md"), "one\n").unwrap();
    std::fs::write(dir.path().join("note_A002.md"), "two\n").unwrap();

    let next = store.next_note_file().unwrap();
    assert_eq!(next.file_name().unwrap(), "note_A003.md");
}

#[test]
fn numbering_starts_at_one_in_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());

    let next = store.next_note_file().unwrap();
    assert_eq!(next.file_name().unwrap(), "note_A001.md");
}

#[test]
fn numbering_ignores_non_numeric_suffixes_and_gaps() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    std::fs::write(dir.path().join("note_A002.md"), "kept\n").unwrap();
    std::fs::write(dir.path().join("note_Adraft.md"), "odd name\n").unwrap();
    std::fs::write(dir.path().join("note_A010.md"), "highest\n").unwrap();

    let next = store.next_note_file().unwrap();
    assert_eq!(next.file_name().unwrap(), "note_A011.md");
}

#[test]
fn listing_is_sorted_and_filtered_by_convention() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    std::fs::write(dir.path().join("note_A002.md"), "b\n").unwrap();
    std::fs::write(dir.path().join("note_A001.md"), "a\n").unwrap();
    std::fs::write(dir.path().join("unrelated.txt"), "x\n").unwrap();
    std::fs::write(dir.path().join("note_A001.md.bak"), "old\n").unwrap();

    let notes = store.list_notes().unwrap();
    let names: Vec<_> = notes
        .iter()
        .map(|path| path.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(names, vec!["note_A001.md", "note_A002.md"]);
}

#[test]
fn write_then_read_round_trips_with_single_trailing_newline() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    let path = dir.path().join("note_A001.md");

    store.write_note(&path, "# Title\n\nbody text\n\n\n", false).unwrap();
    assert_eq!(store.read_note(&path).unwrap(), "# Title\n\nbody text\n");

    store.write_note(&path, "no newline at all", false).unwrap();
    assert_eq!(store.read_note(&path).unwrap(), "no newline at all\n");
}

#[test]
fn backup_keeps_exactly_one_prior_version() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    let path = dir.path().join("note_A001.md");
    let backup = backup_path_for(&path);

    store.write_note(&path, "first", true).unwrap();
    assert!(!backup.exists());

    store.write_note(&path, "second", true).unwrap();
    assert_eq!(std::fs::read_to_string(&backup).unwrap(), "first\n");
    assert_eq!(store.read_note(&path).unwrap(), "second\n");

    store.write_note(&path, "third", true).unwrap();
    assert_eq!(std::fs::read_to_string(&backup).unwrap(), "second\n");
    assert_eq!(store.read_note(&path).unwrap(), "third\n");
}

#[test]
fn manual_overwrite_leaves_no_backup() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    let path = dir.path().join("note_A001.md");

    store.write_note(&path, "first", false).unwrap();
    store.write_note(&path, "second", false).unwrap();
    assert!(!backup_path_for(&path).exists());
    assert_eq!(store.read_note(&path).unwrap(), "second\n");
}

#[test]
fn delete_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    let path = dir.path().join("note_A001.md");

    store.write_note(&path, "text", false).unwrap();
    store.delete_note(&path).unwrap();
    assert!(!path.exists());
    store.delete_note(&path).unwrap();
}

#[test]
fn label_combines_title_name_and_preview() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    let path = dir.path().join("note_A001.md");

    store
        .write_note(&path, "# Shopping\n\nmilk  eggs\nbread", false)
        .unwrap();
    let label = store.note_label(&path, 60).unwrap();
    assert_eq!(label, "Shopping (note_A001.md) - # Shopping milk eggs bread");
}

#[test]
fn label_truncates_long_previews() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    let path = dir.path().join("note_A001.md");

    store.write_note(&path, &"word ".repeat(40), false).unwrap();
    let label = store.note_label(&path, 20).unwrap();
    assert!(label.ends_with("..."));
}

#[test]
fn extract_title_prefers_heading_text() {
    assert_eq!(extract_title("# Weekly plan\nbody"), "Weekly plan");
    assert_eq!(extract_title("plain first line\n# later heading"), "plain first line");
    assert_eq!(extract_title(""), "");
}
