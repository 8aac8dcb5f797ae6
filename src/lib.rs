// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Fihrist library - catalogue clerk for Arabic language-dataset metadata
//!
//! This crate provides the core functionality for annotating language
//! datasets, validating the metadata, and publishing each record as a pull
//! request against the shared catalogue repository.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod extract;
pub mod forge;
pub mod form;
pub mod git;
pub mod publish;
pub mod schema;
pub mod session;
pub mod validate;

/// Core data types for catalogue records and tracked pull requests
pub mod types {
    use serde::{Deserialize, Serialize};

    /// One dialect sub-partition of a dataset
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Subset {
        /// Subset name (e.g. the dialect or split it covers)
        #[serde(rename = "Name")]
        pub name: String,
        /// Dialect of this subset
        #[serde(rename = "Dialect")]
        pub dialect: String,
        /// Sample count for this subset, comma-grouped
        #[serde(rename = "Volume")]
        pub volume: String,
        /// Unit the volume is counted in
        #[serde(rename = "Unit")]
        pub unit: String,
    }

    /// A canonical catalogue record - one JSON file per dataset
    ///
    /// Field order matches the column order of the catalogue; multi-valued
    /// fields (`Domain`, `Collection Style`, `Tasks`) are comma-joined.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Record {
        /// Dataset name
        #[serde(rename = "Name")]
        pub name: String,
        /// Dialect subsets, in entry order
        #[serde(rename = "Subsets", default)]
        pub subsets: Vec<Subset>,
        /// Hugging Face dataset link, if hosted there
        #[serde(rename = "HF Link", default)]
        pub hf_link: String,
        /// Direct link to the dataset repository
        #[serde(rename = "Link")]
        pub link: String,
        /// License identifier
        #[serde(rename = "License")]
        pub license: String,
        /// Year the dataset/paper was published
        #[serde(rename = "Year")]
        pub year: u32,
        /// `ar` or `multilingual`
        #[serde(rename = "Language")]
        pub language: String,
        /// Dialect covered by the whole dataset (`mixed` when several)
        #[serde(rename = "Dialect")]
        pub dialect: String,
        /// Source domains, comma-joined
        #[serde(rename = "Domain")]
        pub domain: String,
        /// Modality: text, spoken, or images
        #[serde(rename = "Form")]
        pub form: String,
        /// How the data was collected, comma-joined
        #[serde(rename = "Collection Style")]
        pub collection_style: String,
        /// Free-text description
        #[serde(rename = "Description")]
        pub description: String,
        /// Sample count, comma-grouped (e.g. `1,000`)
        #[serde(rename = "Volume")]
        pub volume: String,
        /// Unit the volume is counted in
        #[serde(rename = "Unit")]
        pub unit: String,
        /// Coarse ethical-risk rating
        #[serde(rename = "Ethical Risks", default)]
        pub ethical_risks: String,
        /// Institution that produced the dataset
        #[serde(rename = "Provider", default)]
        pub provider: String,
        /// Source dataset this one was derived from, if any
        #[serde(rename = "Derived From", default)]
        pub derived_from: String,
        /// Title of the accompanying paper
        #[serde(rename = "Paper Title", default)]
        pub paper_title: String,
        /// Direct link to the paper PDF
        #[serde(rename = "Paper Link", default)]
        pub paper_link: String,
        /// Writing script
        #[serde(rename = "Script")]
        pub script: String,
        /// Whether the text is pre-tokenized
        #[serde(rename = "Tokenized")]
        pub tokenized: String,
        /// Repository that hosts the data
        #[serde(rename = "Host")]
        pub host: String,
        /// Access model
        #[serde(rename = "Access")]
        pub access: String,
        /// Cost when access is `With-Fee`
        #[serde(rename = "Cost", default)]
        pub cost: String,
        /// Whether the dataset ships a validation/test split
        #[serde(rename = "Test Split")]
        pub test_split: String,
        /// Supported tasks, comma-joined
        #[serde(rename = "Tasks")]
        pub tasks: String,
        /// Venue shortcut (e.g. ACL)
        #[serde(rename = "Venue Title", default)]
        pub venue_title: String,
        /// Citation count
        #[serde(rename = "Citations", default)]
        pub citations: String,
        /// Venue type
        #[serde(rename = "Venue Type", default)]
        pub venue_type: String,
        /// Full venue name
        #[serde(rename = "Venue Name", default)]
        pub venue_name: String,
        /// Paper authors, comma-separated
        #[serde(rename = "Authors", default)]
        pub authors: String,
        /// Author affiliations
        #[serde(rename = "Affiliations", default)]
        pub affiliations: String,
        /// Paper abstract
        #[serde(rename = "Abstract", default)]
        pub abstract_text: String,
        /// Full name of the contributor
        #[serde(rename = "Added By", default)]
        pub added_by: String,
    }

    impl Record {
        /// Sanitized form of the record name; determines file and branch names
        #[must_use]
        pub fn sanitized_name(&self) -> String {
            crate::validate::sanitize_name(&self.name)
        }

        /// File name of this record inside the catalogue's `datasets/` directory
        #[must_use]
        pub fn file_name(&self) -> String {
            format!("{}.json", self.sanitized_name())
        }

        /// Publish branch for this record
        #[must_use]
        pub fn branch_name(&self) -> String {
            format!("add-{}", self.sanitized_name())
        }
    }

    /// State of a tracked pull request
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum PrState {
        /// PR is open on the forge
        Open,
        /// PR was merged or closed
        Closed,
    }

    /// A pull request this tool opened, persisted across runs
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TrackedPr {
        /// Dataset name the PR adds or updates
        pub name: String,
        /// HTML URL of the pull request
        pub url: String,
        /// Head branch (`add-<sanitized name>`)
        pub branch: String,
        /// Last known state
        pub state: PrState,
        /// PR number on the forge
        pub number: u64,
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}
