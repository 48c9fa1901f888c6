use fairmint_allocation::{
    allocate, verify_directory, AllocationError, MetadataWriter, RarityPolicy, TokenMetadata,
    Verdict, WriteOptions,
};
use fairmint_shuffle::ShuffleOptions;
use std::fs;
use tempfile::TempDir;

const BASE: &str = "ipfs://QmaBaBoro352YJH1qZW6c7N1d3q6RFVFXjsGQtmRKMhF5N";

fn publish(count: u64, seed: &str) -> (TempDir, Vec<fairmint_allocation::Allocation>) {
    let temp_dir = TempDir::new().unwrap();
    let allocations = allocate(
        count,
        seed,
        &RarityPolicy::default(),
        &ShuffleOptions::default(),
    )
    .unwrap();

    let mut writer =
        MetadataWriter::open(temp_dir.path(), BASE, WriteOptions::default()).unwrap();
    writer.write_all(&allocations).unwrap();
    assert_eq!(writer.finish(), count);

    (temp_dir, allocations)
}

#[test]
fn test_writes_one_file_per_serial() {
    let (temp_dir, _) = publish(5, "test");

    let mut names: Vec<String> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["1", "2", "3", "4", "5"]);

    // Serial 3 has rank 0 for this seed.
    let legendary = fs::read_to_string(temp_dir.path().join("3")).unwrap();
    assert_eq!(
        legendary,
        format!(
            r#"{{"image": "{}/1.jpg", "attributes": [{{"trait_type": "Rarity", "value": "Legendary"}}]}}"#,
            BASE
        )
    );

    let last = fs::read(temp_dir.path().join("1")).unwrap();
    let last = TokenMetadata::from_slice(&last).unwrap();
    assert_eq!(last.image, format!("{}/5.jpg", BASE));
    assert_eq!(last.rarity(), Some("Epic"));
}

#[test]
fn test_creates_nested_output_directory() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("a").join("b");
    let allocations =
        allocate(2, "nested", &RarityPolicy::default(), &ShuffleOptions::default()).unwrap();

    let mut writer = MetadataWriter::open(&nested, BASE, WriteOptions::default()).unwrap();
    writer.write_all(&allocations).unwrap();

    assert!(nested.join("1").is_file());
    assert!(nested.join("2").is_file());
}

#[test]
fn test_refuses_to_overwrite_without_option() {
    let (temp_dir, allocations) = publish(3, "again");

    let mut writer =
        MetadataWriter::open(temp_dir.path(), BASE, WriteOptions::default()).unwrap();
    let err = writer.write(&allocations[0]).unwrap_err();
    assert!(matches!(err, AllocationError::FileExists { .. }));

    let options = WriteOptions {
        overwrite: true,
        ..WriteOptions::default()
    };
    let mut writer = MetadataWriter::open(temp_dir.path(), BASE, options).unwrap();
    writer.write_all(&allocations).unwrap();
    assert_eq!(writer.written(), 3);
}

#[test]
fn test_refusal_leaves_directory_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let allocations =
        allocate(5, "test", &RarityPolicy::default(), &ShuffleOptions::default()).unwrap();
    // Serial 5 has rank 2, after serials 3 and 4.
    fs::write(temp_dir.path().join("5"), "old record").unwrap();

    let mut writer =
        MetadataWriter::open(temp_dir.path(), BASE, WriteOptions::default()).unwrap();
    let err = writer.write_all(&allocations).unwrap_err();
    assert!(
        matches!(&err, AllocationError::FileExists { path } if path.ends_with("5")),
        "{err}"
    );
    assert_eq!(writer.written(), 0);

    let names: Vec<String> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["5"]);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("5")).unwrap(),
        "old record"
    );
}

#[test]
fn test_verify_accepts_published_directory() {
    let (temp_dir, allocations) = publish(40, "audit");

    let report = verify_directory(temp_dir.path(), &allocations, BASE).unwrap();
    assert!(report.is_ok());
    assert_eq!(report.verdicts.len(), 40);
    assert_eq!(report.verdicts[0].serial, 1);
}

#[test]
fn test_verify_reports_tampering() {
    let (temp_dir, allocations) = publish(10, "audit");

    let legendary = allocations[0].serial;
    let common = allocations[9].serial;
    fs::write(
        temp_dir.path().join(common.to_string()),
        format!(
            r#"{{"image":"{}/1.jpg","attributes":[{{"trait_type":"Rarity","value":"Legendary"}}]}}"#,
            BASE
        ),
    )
    .unwrap();
    fs::remove_file(temp_dir.path().join(legendary.to_string())).unwrap();
    fs::write(temp_dir.path().join("11"), "{}").unwrap();

    let report = verify_directory(temp_dir.path(), &allocations, BASE).unwrap();
    assert!(!report.is_ok());
    assert_eq!(report.unexpected, vec!["11".to_string()]);

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 2);

    let missing = failures.iter().find(|v| v.serial == legendary).unwrap();
    assert_eq!(missing.verdict, Verdict::Missing);
    assert_eq!(missing.rank, 0);

    let tampered = failures.iter().find(|v| v.serial == common).unwrap();
    match &tampered.verdict {
        Verdict::Mismatch { expected, found } => {
            assert_eq!(expected.image, format!("{}/10.jpg", BASE));
            assert_eq!(found.rarity(), Some("Legendary"));
        }
        other => panic!("expected mismatch, got {:?}", other),
    }
}

#[test]
fn test_verify_reports_unreadable_files() {
    let (temp_dir, allocations) = publish(3, "garbage");
    fs::write(temp_dir.path().join("2"), "not json").unwrap();

    let report = verify_directory(temp_dir.path(), &allocations, BASE).unwrap();
    let verdict = &report.verdicts[1];
    assert_eq!(verdict.serial, 2);
    assert!(matches!(verdict.verdict, Verdict::Unreadable { .. }));
}

#[test]
fn test_verify_with_other_base_path_fails() {
    let (temp_dir, allocations) = publish(3, "base");
    let report = verify_directory(temp_dir.path(), &allocations, "ipfs://other").unwrap();
    assert_eq!(report.failures().count(), 3);
}

#[test]
fn test_report_serialization() {
    let (temp_dir, allocations) = publish(2, "json");
    fs::remove_file(temp_dir.path().join("1")).unwrap();

    let report = verify_directory(temp_dir.path(), &allocations, BASE).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["verdicts"][0]["serial"], 1);
    assert_eq!(value["verdicts"][0]["status"], "missing");
    assert_eq!(value["verdicts"][1]["status"], "ok");
    assert_eq!(value["unexpected"], serde_json::json!([]));
}

#[test]
fn test_policy_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("policy.json");
    fs::write(
        &path,
        r#"{"rank_base":"one","tiers":[{"name":"Gold","last_artwork_id":2}],"fallback":"Bronze"}"#,
    )
    .unwrap();

    let policy = RarityPolicy::from_json_file(&path).unwrap();
    let allocations = allocate(4, "policy", &policy, &ShuffleOptions::default()).unwrap();
    let rarities: Vec<_> = allocations.iter().map(|a| a.rarity.as_str()).collect();
    assert_eq!(rarities, vec!["Gold", "Gold", "Bronze", "Bronze"]);
}

#[test]
fn test_policy_file_errors() {
    let temp_dir = TempDir::new().unwrap();

    let missing = RarityPolicy::from_json_file(temp_dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, AllocationError::Io { .. }));

    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{").unwrap();
    assert!(matches!(
        RarityPolicy::from_json_file(&path),
        Err(AllocationError::PolicyFile { .. })
    ));

    fs::write(
        &path,
        r#"{"tiers":[{"name":"A","last_artwork_id":9},{"name":"B","last_artwork_id":3}],"fallback":"C"}"#,
    )
    .unwrap();
    assert!(matches!(
        RarityPolicy::from_json_file(&path),
        Err(AllocationError::InvalidPolicy(_))
    ));
}
