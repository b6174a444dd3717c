//! Query-side logic over a built catalog.
//!
//! - [`rank`] - tiered relevance ranking of catalog entries
//! - [`session`] - incremental disclosure of browse and search results

pub mod rank;
pub mod session;

pub use rank::{MatchTier, Query, RankedResult, id_priority, rank, rank_annotated};
pub use session::{Mode, Session};
