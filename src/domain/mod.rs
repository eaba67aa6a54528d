//! Domain layer for consolekit.
//!
//! Core types shared by the grid controller, the API client and the host bridge,
//! independent of any UI runtime or transport.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`column`]: Column descriptors and the unique-key column set
//! - [`envelope`]: Response envelope wire model and severity mapping
//! - [`page`]: Pagination state, filters, sort keys, page queries and pages
//!
//! # Examples
//!
//! ```
//! use consolekit::domain::{ColumnDescriptor, ColumnSet, Result};
//!
//! fn columns() -> Result<ColumnSet> {
//!     ColumnSet::new(vec![ColumnDescriptor::text("name", "Name")])
//! }
//! ```

pub mod column;
pub mod envelope;
pub mod error;
pub mod page;

pub use column::{Alignment, ColumnDescriptor, ColumnSet, RenderKind, SelectOption};
pub use envelope::{EnvelopeCode, ResponseEnvelope, Severity};
pub use error::{ConsoleError, Result};
pub use page::{
    clamp_page_size, FilterState, Page, PageQuery, PaginationState, SortKey, SortOrder,
    ALLOWED_PAGE_SIZES, DEFAULT_PAGE_SIZE,
};
