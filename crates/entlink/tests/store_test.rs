//! Integration tests for the persisted annotation store file.

use std::fs;

use tempfile::TempDir;

use entlink::{EntityType, LinkAnnotations, Mention};

fn entity(document: &str, text: &str, class: &str) -> EntityType {
    EntityType::new(document, text, class, Mention::new(10, 20))
}

#[test]
fn test_file_format_is_tab_separated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("annotations.tab");
    let mut store = LinkAnnotations::load(&path).unwrap();

    store
        .add_link(&entity("d1", "Jim Lehrer", "PERSON"), "Jim Lehrer")
        .unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "1\td1\t10\t20\tJim Lehrer\tPERSON\thttps://en.wikipedia.org/wiki/Jim_Lehrer\n"
    );
}

#[test]
fn test_corrections_survive_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("annotations.tab");

    {
        let mut store = LinkAnnotations::load(&path).unwrap();
        store
            .add_link(&entity("d1", "Jim Lehrer", "PERSON"), "John Doe")
            .unwrap();
        let old = store.get_annotation(1).unwrap().clone();
        let fixed = store.create_link("Jim Lehrer", &old);
        store.save_annotation(fixed).unwrap();
    }

    let store = LinkAnnotations::load(&path).unwrap();
    assert_eq!(store.len(), 2);

    let current = store.get_annotation(1).unwrap();
    assert_eq!(current.identifier, 2);
    assert_eq!(current.link, "https://en.wikipedia.org/wiki/Jim_Lehrer");
    assert_eq!(current.supersedes, Some(1));
    assert_eq!(store.current_records().len(), 1);
}

#[test]
fn test_new_decisions_after_reload_never_reuse_identifiers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("annotations.tab");

    {
        let mut store = LinkAnnotations::load(&path).unwrap();
        store.add_link(&entity("d1", "A", "ORG"), "-").unwrap();
        store.add_link(&entity("d1", "B", "ORG"), "-").unwrap();
    }

    let mut store = LinkAnnotations::load(&path).unwrap();
    let record = store.add_link(&entity("d2", "C", "ORG"), "-").unwrap();
    assert_eq!(record.identifier, 3);
}

#[test]
fn test_backup_leaves_live_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("annotations.tab");
    let mut store = LinkAnnotations::load(&path).unwrap();
    store
        .add_link(&entity("d1", "Jim Lehrer", "PERSON"), "Jim Lehrer")
        .unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let backup_path = store.backup().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), before);
    assert_eq!(fs::read_to_string(&backup_path).unwrap(), before);

    // Appending after a backup does not touch the backup copy.
    store.add_link(&entity("d1", "Acme Corp", "ORG"), "-").unwrap();
    assert_eq!(fs::read_to_string(&backup_path).unwrap(), before);
}
