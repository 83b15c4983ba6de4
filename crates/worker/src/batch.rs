use std::future::Future;

use tokio::task::{JoinError, JoinHandle};

use crate::TaskClass;

/// A batch of independently running tasks joined in submission order.
///
/// Tasks start running as soon as they are spawned and do not wait on each
/// other. Dropping the batch detaches the remaining tasks rather than
/// aborting them, so superseded work finishes quietly in the background.
#[derive(Debug)]
pub struct TaskBatch<T> {
	class: TaskClass,
	handles: Vec<JoinHandle<T>>,
}

impl<T> TaskBatch<T>
where
	T: Send + 'static,
{
	/// Creates an empty batch for the given task class.
	pub fn new(class: TaskClass) -> Self {
		Self { class, handles: Vec::new() }
	}

	/// Returns the number of tasks spawned into the batch.
	pub fn len(&self) -> usize {
		self.handles.len()
	}

	/// Returns `true` if nothing has been spawned.
	pub fn is_empty(&self) -> bool {
		self.handles.is_empty()
	}

	/// Spawns a future on the worker runtime handle and returns its index.
	pub fn spawn<F>(&mut self, fut: F) -> usize
	where
		F: Future<Output = T> + Send + 'static,
	{
		let index = self.handles.len();
		tracing::trace!(worker_class = self.class.as_str(), index, "worker.batch.spawn");
		self.handles.push(crate::spawn::spawn_in_span(self.class, fut));
		index
	}

	/// Waits for every task and returns outputs in submission order.
	///
	/// A task that panicked yields its [`JoinError`] in its own slot.
	pub async fn join_all(self) -> Vec<Result<T, JoinError>> {
		let mut results = Vec::with_capacity(self.handles.len());
		for handle in self.handles {
			results.push(handle.await);
		}
		results
	}
}
