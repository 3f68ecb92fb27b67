//! Built-in validation rules

use super::rules::Validator;
use crate::record::{Aged, Contact, Named, Record, RecordId, Timestamped, Valued};
use crate::text;

/// Rejects emails without an `@`
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailContainsAt;

impl<R: Contact> Validator<R> for EmailContainsAt {
    fn name(&self) -> &str {
        "email_contains_at"
    }

    fn validate(&self, record: &R) -> Result<(), String> {
        if !record.email().contains('@') {
            return Err("invalid email format".to_string());
        }
        Ok(())
    }
}

/// Full structural email check, stricter than [`EmailContainsAt`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailFormat;

impl<R: Contact> Validator<R> for EmailFormat {
    fn name(&self) -> &str {
        "email_format"
    }

    fn validate(&self, record: &R) -> Result<(), String> {
        if !text::is_valid_email(record.email()) {
            return Err(format!("invalid email address: {:?}", record.email()));
        }
        Ok(())
    }
}

/// Inclusive age bounds
#[derive(Debug, Clone, Copy)]
pub struct AgeRange {
    pub min: i64,
    pub max: i64,
}

impl AgeRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

impl<R: Aged> Validator<R> for AgeRange {
    fn name(&self) -> &str {
        "age_range"
    }

    fn validate(&self, record: &R) -> Result<(), String> {
        let age = record.age();
        if age < self.min || age > self.max {
            return Err(format!(
                "age {} out of valid range [{}-{}]",
                age, self.min, self.max
            ));
        }
        Ok(())
    }
}

/// Integer ids must be positive, text ids non-blank
#[derive(Debug, Clone, Copy, Default)]
pub struct PositiveId;

impl<R: Record> Validator<R> for PositiveId {
    fn name(&self) -> &str {
        "positive_id"
    }

    fn validate(&self, record: &R) -> Result<(), String> {
        match record.id() {
            RecordId::Int(id) if id <= 0 => Err(format!("invalid ID: {}", id)),
            RecordId::Text(id) if id.trim().is_empty() => Err("empty ID".to_string()),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmptyName;

impl<R: Named> Validator<R> for NonEmptyName {
    fn name(&self) -> &str {
        "non_empty_name"
    }

    fn validate(&self, record: &R) -> Result<(), String> {
        if record.name().is_empty() {
            return Err(format!("empty name for record ID: {}", record.id()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NonNegativeValue;

impl<R: Valued> Validator<R> for NonNegativeValue {
    fn name(&self) -> &str {
        "non_negative_value"
    }

    fn validate(&self, record: &R) -> Result<(), String> {
        // NaN is rejected alongside negatives
        if record.value().is_nan() || record.value() < 0.0 {
            return Err(format!("negative value for record ID: {}", record.id()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampPresent;

impl<R: Timestamped> Validator<R> for TimestampPresent {
    fn name(&self) -> &str {
        "timestamp_present"
    }

    fn validate(&self, record: &R) -> Result<(), String> {
        if record.timestamp().is_none() {
            return Err(format!("missing timestamp for record ID: {}", record.id()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ContactRecord, DataRecord};
    use chrono::Utc;

    fn contact(email: &str, age: i64) -> ContactRecord {
        ContactRecord::new("1", "John", email, age)
    }

    #[test]
    fn test_email_contains_at() {
        assert!(EmailContainsAt.validate(&contact("a@b", 30)).is_ok());
        assert_eq!(
            EmailContainsAt.validate(&contact("invalid-email", 30)),
            Err("invalid email format".to_string())
        );
    }

    #[test]
    fn test_email_format_is_stricter() {
        let record = contact("a@b", 30);
        assert!(EmailContainsAt.validate(&record).is_ok());
        assert!(EmailFormat.validate(&record).is_err());
        assert!(EmailFormat.validate(&contact("a@b.io", 30)).is_ok());
    }

    #[test]
    fn test_age_range_bounds_are_inclusive() {
        let rule = AgeRange::new(18, 120);
        assert!(rule.validate(&contact("a@b", 18)).is_ok());
        assert!(rule.validate(&contact("a@b", 120)).is_ok());
        assert_eq!(
            rule.validate(&contact("a@b", 17)),
            Err("age 17 out of valid range [18-120]".to_string())
        );
        assert!(rule.validate(&contact("a@b", 150)).is_err());
    }

    #[test]
    fn test_data_record_rules() {
        assert_eq!(
            PositiveId.validate(&DataRecord::new(0, "x", 1.0)),
            Err("invalid ID: 0".to_string())
        );
        assert_eq!(
            NonEmptyName.validate(&DataRecord::new(5, "", 1.0)),
            Err("empty name for record ID: 5".to_string())
        );
        assert_eq!(
            NonNegativeValue.validate(&DataRecord::new(5, "x", -0.5)),
            Err("negative value for record ID: 5".to_string())
        );
        assert!(NonNegativeValue.validate(&DataRecord::new(5, "x", 0.0)).is_ok());
    }

    #[test]
    fn test_positive_id_rejects_blank_text_ids() {
        assert!(PositiveId.validate(&ContactRecord::new(" ", "a", "a@b", 20)).is_err());
        assert!(PositiveId.validate(&ContactRecord::new("c-9", "a", "a@b", 20)).is_ok());
    }

    #[test]
    fn test_timestamp_present() {
        let record = contact("a@b", 30);
        assert!(TimestampPresent.validate(&record).is_err());
        assert!(TimestampPresent
            .validate(&record.with_timestamp(Utc::now()))
            .is_ok());
    }
}
