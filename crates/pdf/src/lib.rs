//! PDF reports for compliance tables
//!
//! Renders fetched [`TableMatrix`](compliance_agent_core::TableMatrix) data into a
//! branded A4 document: company header, logo watermark and footer on every page, a
//! centred title, an optional effective date and one grid table per matrix.
//! Tables paginate with their header row repeated.
//!
//! Only the standard Helvetica fonts are used, so text is encoded as WinAnsi and
//! anything outside that set is replaced.

mod encoding;
pub mod error;
pub mod logo;
pub mod renderer;

pub use error::PdfError;
pub use logo::Logo;
pub use renderer::{filename, report_title, Branding, PdfRenderer, ReportRequest};
