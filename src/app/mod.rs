//! Grid interaction layer: state, events and notifications.
//!
//! # Architecture
//!
//! ```text
//! User Input / Prop Updates → GridEvent → handle_event → GridState mutation → GridNotification
//!                                                                                   ↓
//!                                                  owning view reloads rows via net::ApiClient
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Notifications emitted after each mutation
//! - [`controller`]: [`DataGridController`], the view-facing wrapper
//! - [`handler`]: Event processing and state transitions
//! - [`state`]: Grid state container
//!
//! # Example
//!
//! ```rust
//! use consolekit::app::DataGridController;
//! use consolekit::domain::{ColumnDescriptor, ColumnSet, FilterState};
//!
//! let columns = ColumnSet::new(vec![ColumnDescriptor::text("name", "Name")])?;
//! let mut grid = DataGridController::new(columns, None, FilterState::new());
//! let notifications = grid.set_page_size(30)?;
//! assert!(notifications[0].requires_reload());
//! # Ok::<(), consolekit::ConsoleError>(())
//! ```

pub mod actions;
pub mod controller;
pub mod handler;
pub mod state;

pub use actions::GridNotification;
pub use controller::{DataGridController, RowPredicate, DEFAULT_ROW_KEY};
pub use handler::{handle_event, GridEvent, PaginationProps};
pub use state::{GridState, RowId};
