//! Core types for the compliance agent
//!
//! This crate provides the foundational, I/O-free pieces used by every other crate:
//! - State vocabulary (canonical keys, colloquial variants, per-category source URLs)
//! - Document categories and the tabular result types produced by scraping
//! - The state resolver used to read a state out of free text
//! - The static knowledge base (keyword table, canned answers, services, labour codes)

pub mod category;
pub mod error;
pub mod knowledge;
pub mod labour_codes;
pub mod resolver;
pub mod state;
pub mod table;
pub mod vocabulary;

pub use category::DocumentCategory;
pub use error::{Error, Result};
pub use knowledge::{KeywordEntry, ServiceInfo, KEYWORD_TABLE, SERVICES};
pub use labour_codes::{LabourCode, COMPARISON_FEATURES, LABOUR_CODES};
pub use resolver::{Resolution, StateResolver};
pub use state::StateKey;
pub use table::{FetchResult, TableMatrix};
pub use vocabulary::{StateEntry, Vocabulary, SHOP_ESTABLISHMENT_URL};
