//! # uiscope-std
//!
//! Standard implementations for the uiscope path-scoped state container.
//!
//! This crate provides:
//! - **Tree store reducer**: [`ScopedReducer`] and the [`enhance`] combinator
//! - **Router**: [`ScopeContext`] and [`compute_context`]
//! - **Store**: [`Store`], a single-writer synchronous store
//! - **Middleware**: logging and custom observers around dispatch
//! - **Frame queue**: [`FrameQueue`], a stock [`FrameScheduler`]
//!
//! [`FrameScheduler`]: uiscope_core::FrameScheduler

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use uiscope_core;

// Modules
pub mod frame;
pub mod middleware;
pub mod reducer;
pub mod router;
pub mod store;
pub mod testing;

pub use frame::FrameQueue;
pub use reducer::{Enhanced, ScopedReducer, enhance};
pub use router::{ScopeContext, compute_context};
pub use store::{Store, StoreBuilder, Subscription};
