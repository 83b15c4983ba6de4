use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::TaskClass;

/// Handle of the caller's runtime, or of a lazily built single-worker runtime
/// when called from outside Tokio (e.g. a host UI thread).
pub(crate) fn runtime_handle() -> Handle {
	if let Ok(handle) = Handle::try_current() {
		return handle;
	}

	static FALLBACK: OnceLock<Runtime> = OnceLock::new();
	FALLBACK
		.get_or_init(|| {
			Builder::new_multi_thread()
				.enable_all()
				.worker_threads(1)
				.thread_name("cmdbar-worker")
				.build()
				.expect("failed to build cmdbar-worker fallback runtime")
		})
		.handle()
		.clone()
}

/// Spawns `fut` inside the caller's tracing span so task logs stay attributed
/// to the query or selection that started them.
pub(crate) fn spawn_in_span<F>(class: TaskClass, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	runtime_handle().spawn(fut.instrument(tracing::trace_span!("worker.task", worker_class = class.as_str())))
}

/// Spawns an async task tagged with its [`TaskClass`].
pub fn spawn<F>(class: TaskClass, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(worker_class = class.as_str(), "worker.spawn");
	spawn_in_span(class, fut)
}
