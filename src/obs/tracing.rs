// self
use crate::{_prelude::*, api::Action};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedAction<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedAction<F> = F;

/// A span wrapping one façade call.
#[derive(Clone, Debug)]
pub struct ActionSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl ActionSpan {
	/// Creates a new span tagged with the action and the resource it targets.
	pub fn new(action: Action, resource: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("cmq_client.action", action = action.as_str(), resource);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (action, resource);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedAction<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs a failed call at `warn`, keeping the vendor code and request id when present.
pub fn log_action_failure(action: Action, err: &Error) {
	#[cfg(feature = "tracing")]
	{
		match err {
			Error::Vendor { code, message, request_id, .. } => tracing::warn!(
				action = action.as_str(),
				code,
				request_id = request_id.as_str(),
				"{message}"
			),
			other => tracing::warn!(action = action.as_str(), error = %other, "call failed"),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (action, err);
	}
}
