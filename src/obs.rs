//! Optional observability helpers for façade calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to run every call inside a span named `cmq_client.action` with the
//!   `action` and `resource` fields, and to log failures at `warn`.
//! - Enable `metrics` to increment the `cmq_client_action_total` counter for every
//!   attempt/success/failure, labeled by `action` + `outcome`, and the
//!   `cmq_client_vendor_error_total` counter for service rejections, labeled by `action` + `code`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionOutcome {
	/// Entry to a façade method.
	Attempt,
	/// The service accepted the call.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl ActionOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ActionOutcome::Attempt => "attempt",
			ActionOutcome::Success => "success",
			ActionOutcome::Failure => "failure",
		}
	}
}
impl Display for ActionOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
