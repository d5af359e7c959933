use flummi::engine::{JsonScoreStore, Score, ScoreSink};

#[test]
fn scores_persist_across_store_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");

    let mut first = JsonScoreStore::new(&path);
    first.save_score(61.25).unwrap();
    first.save_score(48.5).unwrap();

    let second = JsonScoreStore::new(&path);
    assert_eq!(
        second.load().unwrap(),
        vec![
            Score {
                id: 1,
                elapsed_time: 61.25
            },
            Score {
                id: 2,
                elapsed_time: 48.5
            },
        ]
    );
    assert_eq!(second.add(52.0).unwrap().id, 3);
    assert_eq!(
        second
            .best(10)
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect::<Vec<_>>(),
        vec![2, 3, 1]
    );
}

#[test]
fn file_format_is_a_plain_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    JsonScoreStore::new(&path).add(12.5).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw, serde_json::json!([{ "id": 1, "elapsed_time": 12.5 }]));
}
