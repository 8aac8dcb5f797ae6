// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Form session state
//!
//! A [`Session`] is the mutable, field-name-keyed store behind one annotation
//! run. It starts from the schema defaults, can be re-populated from any JSON
//! record (file upload, URL, or annotation service), and flattens back into a
//! canonical [`Record`] on assembly.

use crate::schema::{self, FieldKind, FIELDS};
use crate::types::{Record, Subset};
use crate::validate;
use serde_json::Value;
use std::collections::BTreeMap;

/// Value of one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Free text (also holds the chosen option of a single-select)
    Text(String),
    /// Chosen options of a multi-select, in entry order
    List(Vec<String>),
    /// The year field
    Year(u32),
}

/// One user's in-progress annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    values: BTreeMap<String, FieldValue>,
    /// Dialect subsets, in entry order
    pub subsets: Vec<Subset>,
    /// Tasks outside the recognised option set
    pub other_tasks: Vec<String>,
    /// GitHub login of the contributor; session-only, never serialized
    pub github_user: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session holding the default template document
    #[must_use]
    pub fn new() -> Self {
        let mut values = BTreeMap::new();
        for spec in FIELDS {
            let value = match spec.kind {
                FieldKind::Select => {
                    FieldValue::Text(spec.options.first().copied().unwrap_or("").to_string())
                }
                FieldKind::MultiSelect => FieldValue::List(Vec::new()),
                FieldKind::Number => FieldValue::Year(validate::current_year()),
                FieldKind::Text | FieldKind::LongText => FieldValue::Text(String::new()),
            };
            values.insert(spec.name.to_string(), value);
        }

        Self {
            values,
            subsets: Vec::new(),
            other_tasks: Vec::new(),
            github_user: String::new(),
        }
    }

    /// Discard all edits and return to the default template
    pub fn reset(&mut self) {
        let github_user = std::mem::take(&mut self.github_user);
        *self = Self::new();
        self.github_user = github_user;
    }

    /// Text value of a field ("" when unset or not a text field)
    #[must_use]
    pub fn text(&self, name: &str) -> &str {
        match self.values.get(name) {
            Some(FieldValue::Text(s)) => s,
            _ => "",
        }
    }

    /// Selected options of a multi-select field
    #[must_use]
    pub fn list(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(FieldValue::List(v)) => v,
            _ => &[],
        }
    }

    /// The year field
    #[must_use]
    pub fn year(&self) -> u32 {
        match self.values.get("Year") {
            Some(FieldValue::Year(y)) => *y,
            _ => validate::current_year(),
        }
    }

    /// Set a text (or single-select) field
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        let value: String = value.into();
        self.values
            .insert(name.to_string(), FieldValue::Text(value.trim().to_string()));
    }

    /// Set a multi-select field
    pub fn set_list(&mut self, name: &str, values: Vec<String>) {
        self.values.insert(name.to_string(), FieldValue::List(values));
    }

    /// Set the year field
    pub fn set_year(&mut self, year: u32) {
        self.values.insert("Year".to_string(), FieldValue::Year(year));
    }

    /// Populate the session from a JSON document
    ///
    /// Accepts either a bare record or the annotation service's
    /// `{"metadata": {...}}` wrapper. Unknown keys are ignored; see the module
    /// docs for the per-field coercions.
    pub fn apply_json(&mut self, document: &Value) {
        let object = match document.get("metadata") {
            Some(Value::Object(inner)) => inner,
            _ => match document.as_object() {
                Some(map) => map,
                None => return,
            },
        };

        for (key, value) in object {
            match key.as_str() {
                "Year" => self.set_year(coerce_year(value)),
                "Domain" | "Collection Style" => {
                    self.set_list(key, filter_known(key, &split_csv(&stringify(value))));
                }
                "Tasks" => {
                    let (known, other) = split_tasks(&split_csv(&stringify(value)));
                    self.set_list("Tasks", known);
                    self.other_tasks = other;
                }
                "Subsets" => {
                    self.subsets = value
                        .as_array()
                        .map(|items| {
                            items
                                .iter()
                                .filter_map(|v| serde_json::from_value(v.clone()).ok())
                                .collect()
                        })
                        .unwrap_or_default();
                }
                _ => {
                    if schema::field(key).is_some() {
                        self.set_text(key, stringify(value));
                    }
                }
            }
        }
    }

    /// Flatten the session back into a canonical record
    #[must_use]
    pub fn assemble(&self) -> Record {
        let mut tasks: Vec<String> = self.list("Tasks").to_vec();
        tasks.extend(self.other_tasks.iter().cloned());

        Record {
            name: self.text("Name").to_string(),
            subsets: self.subsets.clone(),
            hf_link: self.text("HF Link").to_string(),
            link: self.text("Link").to_string(),
            license: self.text("License").to_string(),
            year: self.year(),
            language: self.text("Language").to_string(),
            dialect: self.text("Dialect").to_string(),
            domain: self.list("Domain").join(","),
            form: self.text("Form").to_string(),
            collection_style: self.list("Collection Style").join(","),
            description: self.text("Description").to_string(),
            volume: self.text("Volume").to_string(),
            unit: self.text("Unit").to_string(),
            ethical_risks: self.text("Ethical Risks").to_string(),
            provider: self.text("Provider").to_string(),
            derived_from: self.text("Derived From").to_string(),
            paper_title: self.text("Paper Title").to_string(),
            paper_link: self.text("Paper Link").to_string(),
            script: self.text("Script").to_string(),
            tokenized: self.text("Tokenized").to_string(),
            host: self.text("Host").to_string(),
            access: self.text("Access").to_string(),
            cost: self.text("Cost").to_string(),
            test_split: self.text("Test Split").to_string(),
            tasks: tasks.join(","),
            venue_title: self.text("Venue Title").to_string(),
            citations: self.text("Citations").to_string(),
            venue_type: self.text("Venue Type").to_string(),
            venue_name: self.text("Venue Name").to_string(),
            authors: self.text("Authors").to_string(),
            affiliations: self.text("Affiliations").to_string(),
            abstract_text: self.text("Abstract").to_string(),
            added_by: self.text("Added By").to_string(),
        }
    }
}

/// Split a comma-joined value into trimmed, non-empty parts
fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn coerce_year(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|y| u32::try_from(y).ok())
            .unwrap_or_else(validate::current_year),
        Value::String(s) => s
            .trim()
            .parse()
            .unwrap_or_else(|_| validate::current_year()),
        _ => validate::current_year(),
    }
}

/// Keep only values that belong to the field's option set; when any value was
/// dropped, one `other` entry stands in for the lot
fn filter_known(field: &str, values: &[String]) -> Vec<String> {
    let mut known: Vec<String> = values
        .iter()
        .filter(|v| schema::is_known_option(field, v))
        .cloned()
        .collect();
    if known.len() < values.len() && !known.iter().any(|v| v == "other") {
        known.push("other".to_string());
    }
    known
}

/// Split task values into recognised tasks and free-form extras
fn split_tasks(values: &[String]) -> (Vec<String>, Vec<String>) {
    let mut known = Vec::new();
    let mut other = Vec::new();
    for value in values {
        if schema::is_known_option("Tasks", value) {
            known.push(value.clone());
        } else {
            other.push(value.clone());
        }
    }
    (known, other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_follow_schema() {
        let session = Session::new();
        assert_eq!(session.text("License"), "Apache-2.0");
        assert_eq!(session.text("Name"), "");
        assert!(session.list("Tasks").is_empty());
        assert_eq!(session.year(), validate::current_year());
    }

    #[test]
    fn test_reset_discards_edits() {
        let mut session = Session::new();
        session.set_text("Name", "Shami");
        session.set_list("Tasks", vec!["sentiment analysis".into()]);
        session.reset();
        assert_eq!(session.text("Name"), "");
        assert!(session.list("Tasks").is_empty());
    }

    #[test]
    fn test_apply_json_coerces_year_string() {
        let mut session = Session::new();
        session.apply_json(&json!({"Year": "2019"}));
        assert_eq!(session.year(), 2019);

        session.apply_json(&json!({"Year": "not a year"}));
        assert_eq!(session.year(), validate::current_year());
    }

    #[test]
    fn test_apply_json_drops_unknown_domains_for_other() {
        let mut session = Session::new();
        session.apply_json(&json!({"Domain": "social media,martian broadcasts"}));
        assert_eq!(
            session.list("Domain"),
            &["social media".to_string(), "other".to_string()]
        );
    }

    #[test]
    fn test_apply_json_routes_unknown_tasks() {
        let mut session = Session::new();
        session.apply_json(&json!({"Tasks": "sentiment analysis, poetry scoring"}));
        assert_eq!(session.list("Tasks"), &["sentiment analysis".to_string()]);
        assert_eq!(session.other_tasks, vec!["poetry scoring".to_string()]);
        assert_eq!(
            session.assemble().tasks,
            "sentiment analysis,poetry scoring"
        );
    }

    #[test]
    fn test_apply_json_unwraps_metadata_envelope() {
        let mut session = Session::new();
        session.apply_json(&json!({"metadata": {"Name": "Shami"}}));
        assert_eq!(session.text("Name"), "Shami");
    }

    #[test]
    fn test_apply_json_reads_subsets() {
        let mut session = Session::new();
        session.apply_json(&json!({
            "Subsets": [
                {"Name": "Yemeni", "Dialect": "Yemen", "Volume": "1,000", "Unit": "sentences"}
            ]
        }));
        assert_eq!(session.subsets.len(), 1);
        assert_eq!(session.subsets[0].dialect, "Yemen");
    }

    #[test]
    fn test_roundtrip_canonical_record() {
        let record = Record {
            name: "Shami".into(),
            subsets: vec![Subset {
                name: "Yemeni".into(),
                dialect: "Yemen".into(),
                volume: "1,000".into(),
                unit: "sentences".into(),
            }],
            link: "https://github.com/example/shami".into(),
            license: "CC BY 4.0".into(),
            year: 2018,
            language: "ar".into(),
            dialect: "Levant".into(),
            domain: "social media,web pages".into(),
            form: "text".into(),
            collection_style: "crawling,human annotation".into(),
            description: "A Levantine dialect corpus".into(),
            volume: "117,805".into(),
            unit: "sentences".into(),
            ethical_risks: "Low".into(),
            script: "Arab".into(),
            tokenized: "No".into(),
            host: "GitHub".into(),
            access: "Free".into(),
            test_split: "No".into(),
            tasks: "dialect identification,sentiment analysis".into(),
            added_by: "Jane Doe".into(),
            ..Record::default()
        };

        let mut session = Session::new();
        session.apply_json(&serde_json::to_value(&record).unwrap());
        assert_eq!(session.assemble(), record);
    }
}
