use optirx::saving::{from_json, to_json};
use optirx::{
    AdditionCategory, ContactsPowerForm, Edit, Eye, PrescriptionStore, load_or_default,
    load_store, save_store,
};

fn sample_store() -> PrescriptionStore {
    let form = ContactsPowerForm::new()
        .apply(Eye::Right, Edit::DistanceSph("-2.25".into()))
        .apply(Eye::Right, Edit::DistanceAdd(Some(AdditionCategory::High)))
        .apply(Eye::Left, Edit::DistanceSph("-1.75".into()))
        .apply(Eye::Left, Edit::DistanceCyl("-0.50".into()))
        .apply(Eye::Left, Edit::DistanceAxis("170".into()));

    let mut store = PrescriptionStore::new();
    store.submit("Maria Lopez", &form, None).unwrap();
    store.submit("John Doe", &ContactsPowerForm::new(), None).unwrap();
    store
}

#[test]
fn test_save_and_load_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("prescriptions.bin.gz");

    let store = sample_store();
    save_store(&store, &path).unwrap();
    assert!(path.exists(), "snapshot was not created");

    let loaded = load_store(&path).unwrap();
    assert_eq!(loaded, store);

    let maria = loaded
        .list()
        .into_iter()
        .find(|r| r.customer == "Maria Lopez")
        .unwrap();
    assert_eq!(maria.right.near.sph, "+0.25");
    assert_eq!(maria.left.distance.axis, "170");
}

#[test]
fn test_load_does_not_recompute_near() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rx.bin.gz");

    let mut form = ContactsPowerForm::new()
        .apply(Eye::Right, Edit::DistanceSph("+1.00".into()))
        .apply(Eye::Right, Edit::DistanceAdd(Some(AdditionCategory::Low)));
    form.right.near.sph = "+6.00".to_string();

    let mut store = PrescriptionStore::new();
    let id = store.submit("Stale", &form, None).unwrap().id;
    save_store(&store, &path).unwrap();

    let loaded = load_store(&path).unwrap();
    let reopened = loaded.get(id).unwrap().to_form();
    assert_eq!(reopened.right.near.sph, "+6.00");
}

#[test]
fn test_save_replaces_existing_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rx.bin.gz");

    let mut store = sample_store();
    save_store(&store, &path).unwrap();

    let first = store.list()[0].id;
    store.delete(first).unwrap();
    save_store(&store, &path).unwrap();

    let loaded = load_store(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.get(first).is_none());

    // only the snapshot itself is left behind, no temp files
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_failed_save_keeps_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rx.bin.gz");
    let store = sample_store();
    save_store(&store, &path).unwrap();

    // a directory in the way makes the final rename fail
    let blocked = dir.path().join("blocked");
    std::fs::create_dir(&blocked).unwrap();
    std::fs::write(blocked.join("keep"), b"x").unwrap();
    assert!(save_store(&store, &blocked).is_err());

    assert_eq!(load_store(&path).unwrap(), store);
}

#[test]
fn test_missing_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = load_or_default(dir.path().join("absent.bin.gz")).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_corrupt_snapshot_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.bin.gz");
    std::fs::write(&path, b"not gzip at all").unwrap();
    assert!(load_store(&path).is_err());
}

#[test]
fn test_json_dump() {
    let store = sample_store();
    let json = to_json(&store).unwrap();
    assert!(json.contains("\"HIGH\""));
    assert!(json.contains("Maria Lopez"));
    assert_eq!(from_json(&json).unwrap(), store);
}
