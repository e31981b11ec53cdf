//! resumegraph Review Layer
//!
//! The human-in-the-loop state machine that gates what gets committed to
//! the graph. A session owns one extraction result and walks it through:
//!
//! ```text
//! Presented ──approve──▶ Approved            (terminal, queue empty)
//!     │  ▲
//!     │  └──────────── AwaitingRequery ◀──approve── (queue non-empty)
//!     │      requery merges deduplicated triplets, clears the queue
//!     │
//!     └────cancel (confirmed)──▶ Cancelled   (terminal)
//! ```
//!
//! The loop is finite: every requery cycle clears the requests that
//! triggered it before returning to `Presented`, so only new add-request
//! actions can re-enter `AwaitingRequery`.

#![warn(missing_docs)]

mod session;

pub use session::{RequeryOutcome, ReviewAction, ReviewError, ReviewSession, ReviewState};
