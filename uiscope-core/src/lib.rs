//! # uiscope-core
//!
//! Core types and traits for the uiscope path-scoped state container.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! hosts and extensions that only need to speak the action vocabulary or
//! read the state tree, without pulling in the standard store.
//!
//! # Layers
//!
//! ## Layer 1: State Tree ([`StateNode`], [`UiState`])
//!
//! A persistent tree of named nodes addressed by a [`Path`]. Every node holds
//! its own variables plus named child subtrees. Clones are O(1); writes copy
//! only the nodes along the written path, so readers never observe a
//! partially-updated tree.
//!
//! ## Layer 2: Action Vocabulary ([`Action`])
//!
//! Pure data describing a state transition: update one variable, mass-update
//! many, replace a subtree, mount, unmount, or an opaque custom action. Every
//! action has a stable `{ type, payload }` wire form ([`WireAction`]).
//!
//! ## Layer 3: Reducers ([`Reducer`], [`CustomReducer`])
//!
//! A [`Reducer`] turns `(state, action)` into the next [`UiState`]. A
//! [`CustomReducer`] is plugged in per node and only ever sees the subtree
//! rooted at its node's path. Registered custom reducers live in the
//! [`ReducerRegistry`], outside the user-addressable tree.
//!
//! ## Layer 4: Host Boundary ([`UiStore`], [`FrameScheduler`])
//!
//! The interface a view layer provides: a single synchronous store and an
//! optional way to defer work to the next paint.
//!
//! # Error Types
//!
//! - [`UiError`] - Top-level error type
//! - [`WireError`] - Malformed wire actions

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod action;
mod custom;
mod error;
mod host;
mod path;
mod reducer;
mod registry;
mod state;
mod tree;

// Re-exports
pub use action::{
    Action, MASS_UPDATE_UI_STATE, MOUNT_UI_STATE, SET_DEFAULT_UI_STATE, UNMOUNT_UI_STATE,
    UPDATE_UI_STATE, WireAction,
};
pub use custom::CustomAction;
pub use error::{BoxError, UiError, WireError};
pub use host::{DeferredTask, FrameScheduler, UiStore};
pub use path::{Path, RoutingTable};
pub use reducer::{CustomReducer, Reducer, SharedReducer};
pub use registry::{REDUCERS_KEY, ReducerRegistry, RegistryEntry};
pub use state::{UiSlice, UiState};
pub use tree::{StateNode, Vars};

pub use serde_json::{Value, json};
