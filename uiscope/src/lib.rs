//! # uiscope - Path-Scoped UI State
//!
//! `uiscope` keeps per-component UI state (open panels, selections, form
//! drafts) in one global tree instead of inside each component. Every
//! component gets a node in that tree, addressed by the path of keys from
//! the root. Variables are block-scoped: a component may read and update
//! any variable it or an ancestor declared, and a declaration shadows the
//! same name further up.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use uiscope::{Store, UiNode, UiOptions, json};
//!
//! let store = Arc::new(Store::new());
//!
//! let mut parent = UiNode::new(
//!     store.clone(),
//!     UiOptions::new("Parent").key("parent").state("open", false),
//!     (),
//!     None,
//! );
//! parent.on_will_initialize().unwrap();
//!
//! let mut child = UiNode::new(
//!     store.clone(),
//!     UiOptions::new("Child").key("child").state("draft", ""),
//!     (),
//!     Some(parent.context()),
//! );
//! child.on_will_initialize().unwrap();
//!
//! // `open` is declared by the parent; the child writes it there.
//! child.update("open", true).unwrap();
//! assert_eq!(parent.state().get("open"), Some(&json!(true)));
//! ```
//!
//! ## Crates
//!
//! - `uiscope-core`: the state tree, actions and traits
//! - `uiscope-std`: the reducer, router, store and frame queue
//! - `uiscope-macros`: `#[derive(CustomAction)]` (feature `macros`)

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod node;

pub use node::{DefaultValue, NodeProps, Phase, UiNode, UiOptions};

pub use uiscope_core::{
    // Actions
    Action,
    // Errors
    BoxError,
    CustomAction,
    // Reducers
    CustomReducer,
    // Host boundary
    DeferredTask,
    FrameScheduler,
    MASS_UPDATE_UI_STATE,
    MOUNT_UI_STATE,
    // Tree
    Path,
    REDUCERS_KEY,
    Reducer,
    ReducerRegistry,
    RegistryEntry,
    RoutingTable,
    SET_DEFAULT_UI_STATE,
    SharedReducer,
    StateNode,
    UNMOUNT_UI_STATE,
    UPDATE_UI_STATE,
    UiError,
    UiSlice,
    UiState,
    UiStore,
    Value,
    Vars,
    WireAction,
    WireError,
    json,
};

pub use uiscope_std::{
    Enhanced, FrameQueue, ScopeContext, ScopedReducer, Store, StoreBuilder, Subscription,
    compute_context, enhance,
};

/// Dispatch middleware.
pub mod middleware {
    pub use uiscope_std::middleware::{LoggingMiddleware, Middleware};
}

/// Testing utilities.
pub mod testing {
    pub use uiscope_std::testing::{RecordingMiddleware, RecordingReducer};
}

/// Prelude module - common imports for uiscope.
///
/// # Usage
///
/// ```rust,ignore
/// use uiscope::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Action, CustomAction, CustomReducer, Path, ScopeContext, SharedReducer, StateNode, Store,
        UiError, UiNode, UiOptions, UiState, UiStore, Value, Vars, json,
    };
}

#[cfg(feature = "macros")]
pub use uiscope_macros::CustomAction;
