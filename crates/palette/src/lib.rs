//! Command palette engine.
//!
//! Free-text input is turned into a ranked, bounded list of executable
//! commands drawn from static declarations and asynchronous providers:
//!
//! * [`CommandStore`] holds static descriptors and assembles the candidate set.
//! * [`ProviderCache`] runs [`DynamicProvider`]s concurrently and memoizes
//!   their output for one interactive session.
//! * [`Ranker`] scores, filters, sorts and truncates candidates.
//! * [`RecencyTracker`] boosts recently executed commands.
//! * [`QuerySession`] is the per-keystroke state machine; superseded queries
//!   are dropped by generation rather than cancelled.
//! * [`Dispatcher`] executes selections and catches action failures.
//!
//! [`Engine`] wires these together behind the host-facing API.

mod descriptor;
mod dispatch;
mod engine;
pub mod error;
mod notifications;
mod provider;
mod rank;
mod recency;
mod session;
mod store;
mod view;

pub use descriptor::{Action, ActionFuture, CommandDescriptor, CommandSource, Visibility};
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use engine::{Engine, EngineBuilder, QueryOutcome};
pub use error::{ActionError, EngineError, ProviderError, RegistryError, VisibilityError};
pub use notifications::{Notification, NotificationCenter, NotificationLevel, Notifier};
pub use provider::{CacheStats, DynamicProvider, DynamicSet, FnProvider, ProviderCache, ProviderMetadata, ProviderRegistry};
pub use rank::{RankMode, Ranked, Ranker};
pub use recency::{RecencyTracker, SharedRecency};
pub use session::{QueryPlan, QuerySession, SessionState, Transition};
pub use store::CommandStore;
pub use view::{EntryKind, NO_RESULTS_KEY, NO_RESULTS_LABEL, PaletteResults, ResultEntry};

pub use async_trait::async_trait;
pub use cmdbar_config::{ConfigSource, FileConfig, PaletteConfig, StaticConfig};
