use super::*;

fn dataset_with_keys(keys: impl IntoIterator<Item = u64>) -> Dataset {
    let data: serde_json::Map<String, serde_json::Value> = keys
        .into_iter()
        .map(|k| (k.to_string(), serde_json::json!({ "step": k })))
        .collect();
    Dataset::from_json_str(&serde_json::json!({ "data": data }).to_string()).unwrap()
}

#[test]
fn load_reports_size_and_index_range() {
    let ds = dataset_with_keys(0..250);
    assert_eq!(ds.len(), 250);
    assert_eq!(ds.index_range(), Some(RenderRange { start: 0, end: 250 }));

    let ds = Dataset::from_json_str(r#"{"data": {"7": 1, "3": 2, "10": 3}}"#).unwrap();
    assert_eq!(ds.indices().collect::<Vec<_>>(), vec![3, 7, 10]);
    assert_eq!(ds.index_range(), Some(RenderRange { start: 3, end: 11 }));
}

#[test]
fn extra_top_level_fields_are_ignored() {
    let ds = Dataset::from_json_str(r#"{"meta": {"v": 2}, "data": {"0": null}}"#).unwrap();
    assert_eq!(ds.len(), 1);
}

#[test]
fn empty_data_is_valid_but_has_no_range() {
    let ds = Dataset::from_json_str(r#"{"data": {}}"#).unwrap();
    assert!(ds.is_empty());
    assert_eq!(ds.index_range(), None);
}

#[test]
fn wrong_shapes_are_data_format_errors() {
    for bad in [
        r#"[1, 2, 3]"#,
        r#"{"steps": {"0": 1}}"#,
        r#"{"data": [1, 2]}"#,
        r#"{"data": {"one": 1}}"#,
        r#"{"data": {"-1": 1}}"#,
        r#"{"data": {"": 1}}"#,
        r#"{"data": {"1": 1, "01": 2}}"#,
        r#"{"data": {"1": 1, "1": 2}}"#,
        r#"not json"#,
    ] {
        let err = Dataset::from_json_str(bad).unwrap_err();
        assert!(
            matches!(err, SimreelError::DataFormat(_)),
            "expected DataFormat for {bad}, got {err:?}"
        );
    }
}

#[test]
fn largest_step_key_keeps_a_representable_range_end() {
    let ds = Dataset::from_json_str(r#"{"data": {"18446744073709551614": {}}}"#).unwrap();
    assert_eq!(
        ds.index_range(),
        Some(RenderRange {
            start: u64::MAX - 1,
            end: u64::MAX,
        })
    );

    for bad in [
        r#"{"data": {"18446744073709551615": {}}}"#,
        r#"{"data": {"18446744073709551616": {}}}"#,
    ] {
        let err = Dataset::from_json_str(bad).unwrap_err();
        assert!(matches!(err, SimreelError::DataFormat(_)), "{bad}: {err:?}");
        assert!(err.to_string().contains("out of range"));
    }
}

#[test]
fn projection_contains_exactly_keys_in_range() {
    let ds = dataset_with_keys(0..250);
    for (start, end) in [(0, 100), (100, 200), (200, 250), (240, 400), (17, 18)] {
        let range = RenderRange::new(start, end).unwrap();
        let projected = ds.project(range);
        let expected: Vec<u64> = (0..250).filter(|k| range.contains(*k)).collect();
        assert_eq!(projected.indices().collect::<Vec<_>>(), expected);
    }
}

#[test]
fn projection_keeps_original_key_text_and_records() {
    let ds = Dataset::from_json_str(r#"{"data": {"007": {"a": 1}, "8": {"b": 2}}}"#).unwrap();
    let projected = ds.project(RenderRange::new(7, 8).unwrap());
    assert_eq!(
        projected.to_json(),
        serde_json::json!({ "data": { "007": { "a": 1 } } })
    );
}

#[test]
fn write_to_replaces_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("world.json");

    let ds = dataset_with_keys(0..10);
    ds.project(RenderRange::new(0, 5).unwrap())
        .write_to(&path)
        .unwrap();
    ds.project(RenderRange::new(5, 7).unwrap())
        .write_to(&path)
        .unwrap();

    let reread = Dataset::load(&path).unwrap();
    assert_eq!(reread.indices().collect::<Vec<_>>(), vec![5, 6]);
}

#[test]
fn load_missing_file_is_not_a_format_error() {
    let err = Dataset::load(Path::new("definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, SimreelError::Other(_)));
}
