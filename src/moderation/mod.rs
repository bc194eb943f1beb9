// src/moderation/mod.rs
//! Job moderation workflow: filter/sort, pagination, selection and the
//! approve/reject dispatcher, composed by `ModerationBoard`.

pub mod board;
pub mod companies;
pub mod dispatcher;
pub mod export;
pub mod filter;
pub mod pagination;
pub mod queue;
pub mod selection;
pub mod stats;

pub use board::{BoardOptions, ModerationBoard};
pub use companies::CompanyQueue;
pub use dispatcher::{ActionDispatcher, JobStore, ModerationAction};
pub use filter::{FilterState, SortDirection, SortKey, StatusFilter};
pub use pagination::{PageInfo, PaginationState};
pub use queue::{ActionQueue, BulkReport};
pub use selection::SelectionState;
pub use stats::Statistics;
