//! Document fetching for the compliance agent
//!
//! Pulls the per-state pages from slci.in, turns every HTML table into a
//! [`TableMatrix`](compliance_agent_core::TableMatrix), finds the effective date and
//! builds the fragment shown in the chat window. Shop & establishment data lives on a
//! single shared page and is filtered down to the rows for one state.
//!
//! Network access sits behind [`PageFetcher`] so everything above it runs
//! against [`InMemoryPages`] in tests.

pub mod error;
pub mod extract;
pub mod fetcher;
pub mod filter;
pub mod render;
pub mod service;

pub use error::ScrapeError;
pub use extract::{clean_date, TableExtractor};
pub use fetcher::{HttpPageFetcher, InMemoryPages, PageFetcher};
pub use filter::filter_tables_for_state;
pub use service::{DocumentService, ShopSelection};
