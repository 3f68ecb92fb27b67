use anyhow::Result;
use std::fs;
use tempfile::tempdir;

use record_pipeline::loader::{load_contact_records, load_data_records, process_csv_file};
use record_pipeline::pipeline::presets;
use record_pipeline::{DataRecord, Error, LoadError, RecordId};

#[test]
fn test_csv_file_round_through_pipeline() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("records.csv");
    fs::write(
        &path,
        "id,name,value\n1,Widget,9.99\n2,,3.5\n3,Gizmo,-1\n4,Doohickey,0.5\n",
    )?;

    let outcome = process_csv_file(&path, &presets::data_record_pipeline())?;

    assert_eq!(
        outcome.successes,
        vec![
            DataRecord::new(1, "Widget", 9.99),
            DataRecord::new(4, "Doohickey", 0.5)
        ]
    );
    let failed: Vec<RecordId> = outcome.failures.iter().map(|f| f.record_id.clone()).collect();
    assert_eq!(failed, vec![RecordId::Int(2), RecordId::Int(3)]);
    Ok(())
}

#[test]
fn test_malformed_row_fails_whole_load() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("broken.csv");
    fs::write(&path, "id,name,value\n1,Widget,9.99\nx,Gadget,1.0\n")?;

    assert!(matches!(
        load_data_records(&path),
        Err(LoadError::InvalidId { .. })
    ));
    assert!(matches!(
        process_csv_file(&path, &presets::data_record_pipeline()),
        Err(Error::Load(LoadError::InvalidId { .. }))
    ));
    Ok(())
}

#[test]
fn test_load_contact_records_from_json() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("contacts.json");
    fs::write(
        &path,
        r#"[
            {"id": "1", "name": "John", "email": "JOHN@EXAMPLE.COM", "age": 25,
             "timestamp": "2024-01-15T10:30:00Z"},
            {"id": "2", "name": "Jane", "email": "jane@test.org", "age": 30}
        ]"#,
    )?;

    let records = load_contact_records(&path)?;
    assert_eq!(records.len(), 2);
    assert!(records[0].timestamp.is_some());
    assert!(records[1].timestamp.is_none());
    Ok(())
}

#[test]
fn test_contact_json_with_wrong_shape_is_rejected() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("contacts.json");
    fs::write(&path, r#"{"id": "1"}"#)?;

    assert!(matches!(load_contact_records(&path), Err(LoadError::Json(_))));
    Ok(())
}
