//! fieldhook-router — lifecycle event dispatch
//!
//! One router, one dispatch table, one handler per event. The reliability
//! contract lives here: `route` swallows every internal failure and hands
//! the original payload back, so the host assistant is never blocked by a
//! hook. Pattern detection is driven by the declarative rule tables in
//! [`patterns`].

pub mod handlers;
pub mod patterns;
pub mod router;

pub use patterns::{best_match, classify, Match, Matcher, Rule};
pub use router::Router;
