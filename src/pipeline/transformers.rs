//! Built-in transformation rules

use super::rules::Transformer;
use crate::record::{Contact, Named};
use crate::text;

#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseEmail;

impl<R: Contact> Transformer<R> for LowercaseEmail {
    fn name(&self) -> &str {
        "lowercase_email"
    }

    fn transform(&self, mut record: R) -> R {
        let email = record.email().to_lowercase();
        record.set_email(email);
        record
    }
}

/// Lower-cases a non-empty name, then capitalizes each word
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleCaseName;

impl<R: Named> Transformer<R> for TitleCaseName {
    fn name(&self) -> &str {
        "title_case_name"
    }

    fn transform(&self, mut record: R) -> R {
        if !record.name().is_empty() {
            let name = text::capitalize_words(&record.name().to_lowercase());
            record.set_name(name);
        }
        record
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrimName;

impl<R: Named> Transformer<R> for TrimName {
    fn name(&self) -> &str {
        "trim_name"
    }

    fn transform(&self, mut record: R) -> R {
        let trimmed = record.name().trim();
        if trimmed.len() != record.name().len() {
            let name = trimmed.to_string();
            record.set_name(name);
        }
        record
    }
}
