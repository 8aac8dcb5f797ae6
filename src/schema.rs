// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Field catalogue for the annotation form
//!
//! One `FieldSpec` per scalar record column, in catalogue column order. The
//! option sets here are the single source of truth: the form renders them,
//! the session loader filters against them, and the assembler joins them.

/// Licenses accepted by the catalogue
pub const LICENSES: &[&str] = &[
    "Apache-2.0",
    "BSD",
    "CC BY 2.0",
    "CC BY 3.0",
    "CC BY 4.0",
    "CC BY-NC 2.0",
    "CC BY-NC 4.0",
    "CC BY-NC-ND 4.0",
    "CC BY-NC-SA 4.0",
    "CC BY-SA 3.0",
    "CC BY-SA 4.0",
    "CC0",
    "CDLA-Permissive-1.0",
    "GPL-2.0",
    "GPL-3.0",
    "LDC User Agreement",
    "LGPL-3.0",
    "MIT License",
    "MPL-2.0",
    "ODC-By",
    "ODbl-1.0",
    "Non Commercial Use - ELRA END USER",
    "custom",
    "unknown",
];

/// Dialects, by country or region, plus the standard registers
pub const DIALECTS: &[&str] = &[
    "Classical Arabic",
    "Modern Standard Arabic",
    "Algeria",
    "Bahrain",
    "Comoros",
    "Djibouti",
    "Egypt",
    "Iraq",
    "Jordan",
    "Kuwait",
    "Lebanon",
    "Libya",
    "Mauritania",
    "Morocco",
    "Oman",
    "Palestine",
    "Qatar",
    "Saudi Arabia",
    "Somalia",
    "South Sudan",
    "Sudan",
    "Syria",
    "Tunisia",
    "United Arab Emirates",
    "Yemen",
    "Gulf",
    "Levant",
    "North Africa",
    "mixed",
];

/// Source domains the data was drawn from
pub const DOMAINS: &[&str] = &[
    "social media",
    "news articles",
    "reviews",
    "commentary",
    "books",
    "wikipedia",
    "web pages",
    "public datasets",
    "TV Channels",
    "captions",
    "LLM",
    "other",
];

/// Data modality
pub const FORMS: &[&str] = &["text", "spoken", "images"];

/// How the data was collected or labeled
pub const COLLECTION_STYLES: &[&str] = &[
    "crawling",
    "human annotation",
    "machine annotation",
    "manual curation",
    "LLM generated",
    "other",
];

/// Units a volume can be counted in
pub const UNITS: &[&str] = &["tokens", "sentences", "documents", "hours", "images"];

/// Coarse ethical-risk ratings
pub const ETHICAL_RISKS: &[&str] = &["Low", "Medium", "High"];

/// Writing scripts
pub const SCRIPTS: &[&str] = &["Arab", "Latin", "Arab-Latin"];

/// Yes/no choice
pub const YES_NO: &[&str] = &["Yes", "No"];

/// Hosts the catalogue links out to
pub const HOSTS: &[&str] = &[
    "CAMeL Resources",
    "CodaLab",
    "data.world",
    "Dropbox",
    "ELRA",
    "Gdrive",
    "GitHub",
    "GitLab",
    "HuggingFace",
    "LDC",
    "Mendeley Data",
    "Mozilla",
    "OneDrive",
    "QCRI Resources",
    "ResearchGate",
    "kaggle",
    "sourceforge",
    "zenodo",
    "other",
];

/// Access models
pub const ACCESS: &[&str] = &["Free", "Upon-Request", "With-Fee"];

/// Tasks the catalogue recognises; anything else goes through `Other Tasks`
pub const TASKS: &[&str] = &[
    "machine translation",
    "speech recognition",
    "sentiment analysis",
    "language modeling",
    "text generation",
    "topic classification",
    "dialect identification",
    "named entity recognition",
    "question answering",
    "multiple choice question answering",
    "information retrieval",
    "cross-lingual information retrieval",
    "part of speech tagging",
    "morphological analysis",
    "language identification",
    "summarization",
    "transliteration",
    "offensive language detection",
    "review classification",
    "gender identification",
    "fake news detection",
    "dependency parsing",
    "irony detection",
    "meter classification",
    "natural language inference",
    "instruction tuning",
    "speaker identification",
    "other",
];

/// Venue types
pub const VENUE_TYPES: &[&str] = &["conference", "workshop", "journal", "preprint"];

/// Language scope of the dataset
pub const LANGUAGES: &[&str] = &["ar", "multilingual"];

/// Widget a field is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text input
    Text,
    /// Multi-line free text
    LongText,
    /// Single choice from a fixed option set
    Select,
    /// Any number of choices from a fixed option set
    MultiSelect,
    /// Year input, bounded below by 2000 and above by the current year
    Number,
}

/// Declarative description of one form field
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Catalogue column name, also the session key
    pub name: &'static str,
    /// Widget kind
    pub kind: FieldKind,
    /// Whether submission requires a value
    pub required: bool,
    /// Help text shown next to the widget ("" for none)
    pub help: &'static str,
    /// Option set for `Select`/`MultiSelect` fields (empty otherwise)
    pub options: &'static [&'static str],
}

/// The form fields, in catalogue column order (`Subsets` has its own sub-form)
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "Name",
        kind: FieldKind::Text,
        required: true,
        help: "For example CALLHOME: Egyptian Arabic Speech Translation Corpus",
        options: &[],
    },
    FieldSpec {
        name: "HF Link",
        kind: FieldKind::Text,
        required: false,
        help: "For example https://huggingface.co/datasets/labr",
        options: &[],
    },
    FieldSpec {
        name: "Link",
        kind: FieldKind::Text,
        required: true,
        help: "Direct link to the dataset repository; must be accessible",
        options: &[],
    },
    FieldSpec {
        name: "License",
        kind: FieldKind::Select,
        required: true,
        help: "",
        options: LICENSES,
    },
    FieldSpec {
        name: "Year",
        kind: FieldKind::Number,
        required: true,
        help: "Year of publishing the dataset/paper",
        options: &[],
    },
    FieldSpec {
        name: "Language",
        kind: FieldKind::Select,
        required: true,
        help: "",
        options: LANGUAGES,
    },
    FieldSpec {
        name: "Dialect",
        kind: FieldKind::Select,
        required: true,
        help: "Use mixed if the dataset contains multiple dialects",
        options: DIALECTS,
    },
    FieldSpec {
        name: "Domain",
        kind: FieldKind::MultiSelect,
        required: true,
        help: "",
        options: DOMAINS,
    },
    FieldSpec {
        name: "Form",
        kind: FieldKind::Select,
        required: true,
        help: "",
        options: FORMS,
    },
    FieldSpec {
        name: "Collection Style",
        kind: FieldKind::MultiSelect,
        required: true,
        help: "crawling: collected by scripts; human/machine annotation: labeled \
               by people or software; LLM generated: collected or labeled by LLMs; \
               manual curation: created by hand",
        options: COLLECTION_STYLES,
    },
    FieldSpec {
        name: "Description",
        kind: FieldKind::LongText,
        required: true,
        help: "Brief description of the dataset and its contents",
        options: &[],
    },
    FieldSpec {
        name: "Volume",
        kind: FieldKind::Text,
        required: true,
        help: "How many samples are in the dataset, e.g. 1,000. No abbreviations like 10K",
        options: &[],
    },
    FieldSpec {
        name: "Unit",
        kind: FieldKind::Select,
        required: true,
        help: "tokens for ner/pos tagging, sentences for sentiment analysis, \
               documents for text modelling",
        options: UNITS,
    },
    FieldSpec {
        name: "Ethical Risks",
        kind: FieldKind::Select,
        required: false,
        help: "Social media datasets are medium risk as they may expose personal \
               information; datasets with hate speech are high risk",
        options: ETHICAL_RISKS,
    },
    FieldSpec {
        name: "Provider",
        kind: FieldKind::Text,
        required: false,
        help: "Name of institution, e.g. NYU Abu Dhabi",
        options: &[],
    },
    FieldSpec {
        name: "Derived From",
        kind: FieldKind::Text,
        required: false,
        help: "The source dataset, e.g. Common Crawl",
        options: &[],
    },
    FieldSpec {
        name: "Paper Title",
        kind: FieldKind::Text,
        required: false,
        help: "",
        options: &[],
    },
    FieldSpec {
        name: "Paper Link",
        kind: FieldKind::Text,
        required: false,
        help: "Direct link to the PDF, e.g. https://arxiv.org/pdf/2110.06744.pdf",
        options: &[],
    },
    FieldSpec {
        name: "Script",
        kind: FieldKind::Select,
        required: true,
        help: "",
        options: SCRIPTS,
    },
    FieldSpec {
        name: "Tokenized",
        kind: FieldKind::Select,
        required: true,
        help: "Whether the dataset is pre-tokenized",
        options: YES_NO,
    },
    FieldSpec {
        name: "Host",
        kind: FieldKind::Select,
        required: true,
        help: "The repository that hosts the data; use other if not listed",
        options: HOSTS,
    },
    FieldSpec {
        name: "Access",
        kind: FieldKind::Select,
        required: true,
        help: "",
        options: ACCESS,
    },
    FieldSpec {
        name: "Cost",
        kind: FieldKind::Text,
        required: false,
        help: "If access is With-Fee, the cost, e.g. 1750 $",
        options: &[],
    },
    FieldSpec {
        name: "Test Split",
        kind: FieldKind::Select,
        required: true,
        help: "Whether the dataset has a validation/test split",
        options: YES_NO,
    },
    FieldSpec {
        name: "Tasks",
        kind: FieldKind::MultiSelect,
        required: true,
        help: "",
        options: TASKS,
    },
    FieldSpec {
        name: "Venue Title",
        kind: FieldKind::Text,
        required: false,
        help: "Venue shortcut, e.g. ACL",
        options: &[],
    },
    FieldSpec {
        name: "Citations",
        kind: FieldKind::Text,
        required: false,
        help: "Number of citations",
        options: &[],
    },
    FieldSpec {
        name: "Venue Type",
        kind: FieldKind::Select,
        required: false,
        help: "",
        options: VENUE_TYPES,
    },
    FieldSpec {
        name: "Venue Name",
        kind: FieldKind::Text,
        required: false,
        help: "Full name, e.g. Association for Computational Linguistics",
        options: &[],
    },
    FieldSpec {
        name: "Authors",
        kind: FieldKind::LongText,
        required: false,
        help: "All authors, split by comma",
        options: &[],
    },
    FieldSpec {
        name: "Affiliations",
        kind: FieldKind::LongText,
        required: false,
        help: "",
        options: &[],
    },
    FieldSpec {
        name: "Abstract",
        kind: FieldKind::LongText,
        required: false,
        help: "Abstract of the published paper",
        options: &[],
    },
    FieldSpec {
        name: "Added By",
        kind: FieldKind::Text,
        required: true,
        help: "Your full name",
        options: &[],
    },
];

/// Side-channel field for tasks outside the `Tasks` option set
pub const OTHER_TASKS: &str = "Other Tasks";

/// Look up a field spec by column name
#[must_use]
pub fn field(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

/// Whether `value` is a member of the field's option set
#[must_use]
pub fn is_known_option(field_name: &str, value: &str) -> bool {
    field(field_name).is_some_and(|f| f.options.contains(&value))
}
