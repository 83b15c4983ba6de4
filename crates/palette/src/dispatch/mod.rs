//! Execution dispatcher: resolves a key and runs its action.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use cmdbar_worker::TaskClass;
use parking_lot::RwLock;

use crate::descriptor::{Action, CommandDescriptor};
use crate::error::ActionError;
use crate::notifications::{Notification, Notifier};
use crate::recency::SharedRecency;

/// What happened to a selection. Failures are reported here and through the
/// notifier, never as an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
	/// The action ran and succeeded; the key was recorded as recent.
	Executed,
	/// The action failed or panicked.
	Failed(ActionError),
	/// No dispatchable command has this key.
	NotFound,
	/// The selection closed the session without executing anything.
	Closed,
}

/// Runs command actions.
///
/// Lookups go through the candidate set the caller assembles at dispatch
/// time, then through host-native commands.
pub struct Dispatcher {
	native: RwLock<Vec<Arc<CommandDescriptor>>>,
	recency: SharedRecency,
	notifier: Option<Arc<dyn Notifier>>,
}

impl Dispatcher {
	pub fn new(recency: SharedRecency, notifier: Option<Arc<dyn Notifier>>) -> Self {
		Self {
			native: RwLock::new(Vec::new()),
			recency,
			notifier,
		}
	}

	/// Replaces the host-native descriptors, which are dispatchable but never ranked.
	pub fn set_native(&self, commands: Vec<Arc<CommandDescriptor>>) {
		*self.native.write() = commands;
	}

	/// Looks `key` up in `candidates` first, then among native commands.
	pub fn resolve(&self, key: &str, candidates: &[Arc<CommandDescriptor>]) -> Option<Arc<CommandDescriptor>> {
		let found = candidates.iter().find(|command| command.key == key).cloned();
		found.or_else(|| self.native.read().iter().find(|command| command.key == key).cloned())
	}

	/// Resolves and runs `key`, recording it as recent on success.
	pub async fn execute(&self, key: &str, candidates: &[Arc<CommandDescriptor>]) -> DispatchOutcome {
		let Some(command) = self.resolve(key, candidates) else {
			tracing::debug!(key, "palette.dispatch.not_found");
			return DispatchOutcome::NotFound;
		};

		match run_action(&command.action).await {
			Ok(()) => {
				self.recency.write().record(&command.key);
				tracing::debug!(key, "palette.dispatch.executed");
				DispatchOutcome::Executed
			}
			Err(error) => {
				tracing::warn!(key, %error, "command action failed");
				if let Some(notifier) = &self.notifier {
					notifier.notify(Notification::error(format!("Command failed: {}", command.label)));
				}
				DispatchOutcome::Failed(error)
			}
		}
	}
}

async fn run_action(action: &Action) -> Result<(), ActionError> {
	match action {
		Action::Sync(run) => std::panic::catch_unwind(AssertUnwindSafe(|| run())).unwrap_or(Err(ActionError::Panicked)),
		Action::Async(run) => {
			let fut = run();
			cmdbar_worker::spawn(TaskClass::Interactive, fut).await.unwrap_or(Err(ActionError::Panicked))
		}
	}
}
