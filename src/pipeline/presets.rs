//! Ready-made pipelines for the bundled record types

use tracing::debug;

use super::transformers::{LowercaseEmail, TitleCaseName, TrimName};
use super::validators::{
    AgeRange, EmailContainsAt, EmailFormat, NonEmptyName, NonNegativeValue, PositiveId,
    TimestampPresent,
};
use super::Pipeline;
use crate::config::PipelineConfig;
use crate::record::{ContactRecord, DataRecord};

/// Positive id, non-empty name, non-negative value; names are trimmed.
pub fn data_record_pipeline() -> Pipeline<DataRecord> {
    Pipeline::new()
        .with_validator(PositiveId)
        .with_validator(NonEmptyName)
        .with_validator(NonNegativeValue)
        .with_transformer(TrimName)
}

/// Contact pipeline assembled from configuration.
///
/// Rule order: email check, age range, then the optional timestamp check.
pub fn contact_pipeline(config: &PipelineConfig) -> Pipeline<ContactRecord> {
    let mut pipeline: Pipeline<ContactRecord> = Pipeline::new();

    if config.strict_email {
        pipeline.add_validator(EmailFormat);
    } else {
        pipeline.add_validator(EmailContainsAt);
    }
    pipeline.add_validator(AgeRange::new(config.min_age, config.max_age));
    if config.require_timestamp {
        pipeline.add_validator(TimestampPresent);
    }

    if config.lowercase_email {
        pipeline.add_transformer(LowercaseEmail);
    }
    if config.title_case_name {
        pipeline.add_transformer(TitleCaseName);
    }

    debug!(
        validators = ?pipeline.validator_names(),
        transformers = ?pipeline.transformer_names(),
        "Built contact pipeline"
    );
    pipeline
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_contact_pipeline_rules() {
        let pipeline = contact_pipeline(&PipelineConfig::default());
        assert_eq!(
            pipeline.validator_names(),
            vec!["email_contains_at", "age_range"]
        );
        assert_eq!(pipeline.transformer_names(), vec!["lowercase_email"]);
    }

    #[test]
    fn test_configured_contact_pipeline_rules() {
        let config = PipelineConfig {
            strict_email: true,
            require_timestamp: true,
            lowercase_email: false,
            title_case_name: true,
            ..PipelineConfig::default()
        };
        let pipeline = contact_pipeline(&config);
        assert_eq!(
            pipeline.validator_names(),
            vec!["email_format", "age_range", "timestamp_present"]
        );
        assert_eq!(pipeline.transformer_names(), vec!["title_case_name"]);
    }

    #[test]
    fn test_data_record_pipeline() {
        let outcome = data_record_pipeline().process_batch(vec![
            DataRecord::new(1, " Widget ", 9.5),
            DataRecord::new(-1, "Gadget", 3.0),
            DataRecord::new(3, "", 1.0),
            DataRecord::new(4, "Gizmo", -2.0),
        ]);

        assert_eq!(outcome.successes, vec![DataRecord::new(1, "Widget", 9.5)]);
        let rules: Vec<&str> = outcome
            .failures
            .iter()
            .map(|f| f.source.rule.as_str())
            .collect();
        assert_eq!(rules, vec!["positive_id", "non_empty_name", "non_negative_value"]);
    }
}
