// self
use crate::{api::Action, obs::ActionOutcome};

/// Records an action outcome via the global metrics recorder (when enabled).
pub fn record_action_outcome(action: Action, outcome: ActionOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"cmq_client_action_total",
			"action" => action.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (action, outcome);
	}
}

/// Counts a call the service rejected, labeled by the vendor error code.
///
/// Local and transport failures carry no vendor code and are only visible through
/// [`record_action_outcome`].
pub fn record_vendor_error(action: Action, code: i64) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"cmq_client_vendor_error_total",
			"action" => action.as_str(),
			"code" => code.to_string()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (action, code);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_action_outcome_noop_without_metrics() {
		record_action_outcome(Action::SendMessage, ActionOutcome::Failure);
	}

	#[test]
	fn record_vendor_error_accepts_negative_codes() {
		record_vendor_error(Action::ReceiveMessage, 7_000);
		record_vendor_error(Action::CreateQueue, -1);
	}
}
