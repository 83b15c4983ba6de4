//! User-facing notification channel.
//!
//! The palette only produces notifications; presenting them (toasts, status
//! lines) is the host's job.

use std::collections::VecDeque;

use parking_lot::Mutex;

/// Severity level of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationLevel {
	#[default]
	Info,
	Warn,
	Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
	pub level: NotificationLevel,
	pub message: String,
}

impl Notification {
	pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
		Self {
			level,
			message: message.into(),
		}
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self::new(NotificationLevel::Error, message)
	}
}

/// Sink for notifications raised by the palette.
pub trait Notifier: Send + Sync {
	fn notify(&self, notification: Notification);
}

/// Queue-backed [`Notifier`] drained by the host.
#[derive(Debug, Default)]
pub struct NotificationCenter {
	inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
	pending: VecDeque<Notification>,
	clear_epoch: u64,
}

impl NotificationCenter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.lock().pending.is_empty()
	}

	pub fn len(&self) -> usize {
		self.inner.lock().pending.len()
	}

	pub fn clear(&self) {
		let mut inner = self.inner.lock();
		inner.pending.clear();
		inner.clear_epoch = inner.clear_epoch.wrapping_add(1);
	}

	pub fn push(&self, notification: Notification) {
		self.inner.lock().pending.push_back(notification);
	}

	pub fn take_pending(&self) -> Vec<Notification> {
		self.inner.lock().pending.drain(..).collect()
	}

	/// Incremented on every [`Self::clear`].
	pub fn clear_epoch(&self) -> u64 {
		self.inner.lock().clear_epoch
	}
}

impl Notifier for NotificationCenter {
	fn notify(&self, notification: Notification) {
		self.push(notification);
	}
}
