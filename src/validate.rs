// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Field validators
//!
//! All checks here are pure and offline; forge-side checks (does the GitHub
//! user exist, is the dataset already catalogued) live in [`crate::forge`].

use crate::types::Record;
use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use url::Url;

/// Minimum accepted description length
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Earliest publication year the catalogue accepts
pub const MIN_YEAR: u32 = 2000;

/// Punctuation allowed in dataset names besides ASCII alphanumerics
const NAME_PUNCT: &[char] = &[' ', '_', '-', '\'', '&', '(', ')', ':', '.', ',', '+', '/'];

static VOLUME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}(,\d{3})*$").expect("volume pattern"));

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty
    #[error("{field}: a value is required")]
    Required {
        /// Offending field
        field: String,
    },
    /// The dataset name contains a character outside the allowed set
    #[error("Name: invalid character {ch:?} in the dataset name")]
    InvalidNameChar {
        /// First offending character
        ch: char,
    },
    /// A link field does not hold a well-formed http(s) URL
    #[error("{field}: not a valid http(s) URL: {value:?}")]
    InvalidUrl {
        /// Offending field
        field: String,
        /// Rejected value
        value: String,
    },
    /// A volume is not a comma-grouped number
    #[error("{field}: expected a comma-grouped number such as 1,000, got {value:?}")]
    InvalidVolume {
        /// Offending field
        field: String,
        /// Rejected value
        value: String,
    },
    /// The description is present but too short to be useful
    #[error("Description: must be at least {MIN_DESCRIPTION_LEN} characters")]
    DescriptionTooShort,
    /// The year is outside the accepted range
    #[error("Year: {value} is outside {MIN_YEAR}..={max}")]
    YearOutOfRange {
        /// Rejected year
        value: u32,
        /// Current year at validation time
        max: u32,
    },
}

impl ValidationError {
    /// Name of the field this error is attached to
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Required { field }
            | Self::InvalidUrl { field, .. }
            | Self::InvalidVolume { field, .. } => field,
            Self::InvalidNameChar { .. } => "Name",
            Self::DescriptionTooShort => "Description",
            Self::YearOutOfRange { .. } => "Year",
        }
    }
}

/// Whether `value` is a well-formed absolute http(s) URL
#[must_use]
pub fn is_valid_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

/// Whether `value` is a comma-grouped number (`1,000`, not `1000` or `1,00`)
#[must_use]
pub fn is_comma_grouped_number(value: &str) -> bool {
    VOLUME_RE.is_match(value)
}

/// Check a dataset name against the allowed character set
///
/// The check runs on the lowercased name, so case never matters.
pub fn validate_dataset_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "Name".into(),
        });
    }
    for ch in name.to_lowercase().chars() {
        if !ch.is_ascii_alphanumeric() && !NAME_PUNCT.contains(&ch) {
            return Err(ValidationError::InvalidNameChar { ch });
        }
    }
    Ok(())
}

/// Sanitize a dataset name into its file/branch form
///
/// Lowercases, trims, and maps every character outside `[a-z0-9_-]` to `_`.
/// Idempotent: sanitizing an already-sanitized name returns it unchanged.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// The latest year the `Year` field accepts
#[must_use]
pub fn current_year() -> u32 {
    u32::try_from(Utc::now().year()).unwrap_or(MIN_YEAR)
}

fn require(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Required {
            field: field.into(),
        });
    }
}

fn check_url(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    if !value.trim().is_empty() && !is_valid_url(value.trim()) {
        errors.push(ValidationError::InvalidUrl {
            field: field.into(),
            value: value.into(),
        });
    }
}

/// Validate an assembled record, collecting every field-level failure
///
/// Submission is refused while this returns a non-empty list; the caller
/// reports the failures inline, field by field.
#[must_use]
pub fn validate_record(record: &Record) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Err(e) = validate_dataset_name(&record.name) {
        errors.push(e);
    }

    require("Link", &record.link, &mut errors);
    check_url("Link", &record.link, &mut errors);
    check_url("HF Link", &record.hf_link, &mut errors);
    check_url("Paper Link", &record.paper_link, &mut errors);

    require("License", &record.license, &mut errors);
    require("Language", &record.language, &mut errors);
    require("Dialect", &record.dialect, &mut errors);
    require("Domain", &record.domain, &mut errors);
    require("Form", &record.form, &mut errors);
    require("Collection Style", &record.collection_style, &mut errors);

    if record.description.trim().is_empty() {
        errors.push(ValidationError::Required {
            field: "Description".into(),
        });
    } else if record.description.trim().len() < MIN_DESCRIPTION_LEN {
        errors.push(ValidationError::DescriptionTooShort);
    }

    if record.volume.trim().is_empty() {
        errors.push(ValidationError::Required {
            field: "Volume".into(),
        });
    } else if !is_comma_grouped_number(record.volume.trim()) {
        errors.push(ValidationError::InvalidVolume {
            field: "Volume".into(),
            value: record.volume.clone(),
        });
    }

    for (i, subset) in record.subsets.iter().enumerate() {
        let trimmed = subset.volume.trim();
        if !trimmed.is_empty() && !is_comma_grouped_number(trimmed) {
            errors.push(ValidationError::InvalidVolume {
                field: format!("Subsets[{i}].Volume"),
                value: subset.volume.clone(),
            });
        }
    }

    require("Unit", &record.unit, &mut errors);
    require("Script", &record.script, &mut errors);
    require("Tokenized", &record.tokenized, &mut errors);
    require("Host", &record.host, &mut errors);
    require("Access", &record.access, &mut errors);
    require("Test Split", &record.test_split, &mut errors);
    require("Tasks", &record.tasks, &mut errors);
    require("Added By", &record.added_by, &mut errors);

    let max = current_year();
    if record.year < MIN_YEAR || record.year > max {
        errors.push(ValidationError::YearOutOfRange {
            value: record.year,
            max,
        });
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_accepts_wellformed() {
        assert!(is_valid_url("http://example.com"));
        assert!(is_valid_url("https://example.com/path?x=1"));
        assert!(is_valid_url("https://huggingface.co/datasets/labr"));
    }

    #[test]
    fn test_url_rejects_malformed() {
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_comma_grouped_number() {
        assert!(is_comma_grouped_number("1,000"));
        assert!(is_comma_grouped_number("999"));
        assert!(is_comma_grouped_number("12,345,678"));
        assert!(!is_comma_grouped_number("1000"));
        assert!(!is_comma_grouped_number("1,00"));
        assert!(!is_comma_grouped_number("1,0000"));
        assert!(!is_comma_grouped_number(",100"));
        assert!(!is_comma_grouped_number(""));
    }

    #[test]
    fn test_dataset_name_charset() {
        assert!(validate_dataset_name("Shami Corpus").is_ok());
        assert!(
            validate_dataset_name("CALLHOME: Egyptian Arabic Speech Translation Corpus").is_ok()
        );
        assert!(validate_dataset_name("ArSAS (v2.1)").is_ok());
        assert_eq!(
            validate_dataset_name("bad*name"),
            Err(ValidationError::InvalidNameChar { ch: '*' })
        );
        assert!(matches!(
            validate_dataset_name("   "),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_sanitize_lowercases_and_replaces() {
        assert_eq!(
            sanitize_name("CALLHOME: Egyptian Arabic"),
            "callhome__egyptian_arabic"
        );
        assert_eq!(sanitize_name("  Shami  "), "shami");
        assert_eq!(sanitize_name("x/y\\z"), "x_y_z");
    }

    #[test]
    fn test_sanitize_idempotent() {
        for name in ["Shami Corpus", "ArSAS (v2.1)", "x/y:z", "already_clean-1"] {
            let once = sanitize_name(name);
            assert_eq!(sanitize_name(&once), once);
        }
    }

    fn minimal_record() -> Record {
        Record {
            name: "Shami".into(),
            link: "https://github.com/example/shami".into(),
            license: "CC BY 4.0".into(),
            year: 2018,
            language: "ar".into(),
            dialect: "Levant".into(),
            domain: "social media".into(),
            form: "text".into(),
            collection_style: "crawling".into(),
            description: "A Levantine dialect corpus".into(),
            volume: "117,805".into(),
            unit: "sentences".into(),
            script: "Arab".into(),
            tokenized: "No".into(),
            host: "GitHub".into(),
            access: "Free".into(),
            test_split: "No".into(),
            tasks: "dialect identification".into(),
            added_by: "Jane Doe".into(),
            ..Record::default()
        }
    }

    #[test]
    fn test_validate_record_accepts_complete() {
        assert!(validate_record(&minimal_record()).is_empty());
    }

    #[test]
    fn test_validate_record_reports_each_field() {
        let mut record = minimal_record();
        record.link = "not-a-url".into();
        record.volume = "1000".into();
        record.description = "short".into();

        let errors = validate_record(&record);
        let fields: Vec<&str> = errors.iter().map(ValidationError::field).collect();
        assert!(fields.contains(&"Link"));
        assert!(fields.contains(&"Volume"));
        assert!(fields.contains(&"Description"));
    }

    #[test]
    fn test_validate_record_year_bounds() {
        let mut record = minimal_record();
        record.year = 1999;
        assert!(validate_record(&record)
            .iter()
            .any(|e| matches!(e, ValidationError::YearOutOfRange { .. })));

        record.year = current_year() + 1;
        assert!(validate_record(&record)
            .iter()
            .any(|e| matches!(e, ValidationError::YearOutOfRange { .. })));
    }

    #[test]
    fn test_subset_volume_checked() {
        let mut record = minimal_record();
        record.subsets.push(crate::types::Subset {
            name: "Yemeni".into(),
            dialect: "Yemen".into(),
            volume: "1000".into(),
            unit: "sentences".into(),
        });
        assert!(validate_record(&record)
            .iter()
            .any(|e| e.field() == "Subsets[0].Volume"));
    }
}
