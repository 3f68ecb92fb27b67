use record_pipeline::pipeline::transformers::{LowercaseEmail, TitleCaseName};
use record_pipeline::pipeline::validators::{AgeRange, EmailContainsAt};
use record_pipeline::pipeline::{presets, FnValidator, Pipeline};
use record_pipeline::{ContactRecord, PipelineConfig, RecordId};

fn sample_batch() -> Vec<ContactRecord> {
    vec![
        ContactRecord::new("1", "John", "JOHN@EXAMPLE.COM", 25),
        ContactRecord::new("2", "Jane", "jane@test.org", 30),
        ContactRecord::new("3", "Bob", "invalid-email", 17),
        ContactRecord::new("4", "Alice", "ALICE@DOMAIN.COM", 150),
    ]
}

#[test]
fn test_reference_scenario_through_default_preset() {
    let pipeline = presets::contact_pipeline(&PipelineConfig::default());
    let outcome = pipeline.process_batch(sample_batch());

    let accepted: Vec<(&str, &str)> = outcome
        .successes
        .iter()
        .map(|r| (r.id.as_str(), r.email.as_str()))
        .collect();
    assert_eq!(
        accepted,
        vec![("1", "john@example.com"), ("2", "jane@test.org")]
    );

    assert_eq!(outcome.failures.len(), 2);

    let bob = &outcome.failures[0];
    assert_eq!(bob.index, 2);
    assert_eq!(bob.record_id, RecordId::from("3"));
    assert_eq!(bob.source.reason, "invalid email format");

    let alice = &outcome.failures[1];
    assert_eq!(alice.index, 3);
    assert_eq!(alice.record_id, RecordId::from("4"));
    assert_eq!(alice.source.reason, "age 150 out of valid range [18-120]");
}

#[test]
fn test_k_failures_out_of_n() {
    let pipeline = Pipeline::new()
        .with_validator(EmailContainsAt)
        .with_validator(AgeRange::new(18, 120));

    let records: Vec<ContactRecord> = (0..10)
        .map(|i| {
            let email = if i % 3 == 0 { "nope".to_string() } else { format!("u{}@x.io", i) };
            ContactRecord::new(i.to_string(), "User", email, 30)
        })
        .collect();

    let outcome = pipeline.process_batch(records);

    // indexes 0, 3, 6, 9 fail
    assert_eq!(outcome.failures.len(), 4);
    assert_eq!(outcome.successes.len(), 6);
    let failed: Vec<usize> = outcome.failures.iter().map(|f| f.index).collect();
    assert_eq!(failed, vec![0, 3, 6, 9]);
    let kept: Vec<&str> = outcome.successes.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(kept, vec!["1", "2", "4", "5", "7", "8"]);
}

#[test]
fn test_failure_message_carries_index_and_identifier() {
    let pipeline = Pipeline::new().with_validator(FnValidator::new(
        "no_bobs",
        |r: &ContactRecord| {
            if r.name == "Bob" {
                Err("bobs are not allowed".to_string())
            } else {
                Ok(())
            }
        },
    ));

    let outcome = pipeline.process_batch(sample_batch());
    assert_eq!(
        outcome.failures[0].to_string(),
        "record 2 (ID: 3): validation failed (no_bobs) for record 3: bobs are not allowed"
    );
}

#[test]
fn test_transform_only_pipeline_composes_in_order() {
    let pipeline = Pipeline::new()
        .with_transformer(LowercaseEmail)
        .with_transformer(TitleCaseName);

    let outcome = pipeline.process_batch(vec![ContactRecord::new(
        "9",
        "JOHN DOE",
        "John.Doe@Example.COM",
        -5,
    )]);

    assert!(outcome.is_clean());
    assert_eq!(outcome.successes[0].name, "John Doe");
    assert_eq!(outcome.successes[0].email, "john.doe@example.com");
}
