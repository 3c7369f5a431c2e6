use crate::lifecycle::RequestOutcome;
use crate::view::ViewState;

/// Hook called after every state change
pub trait TransitionObserver: Send {
    fn on_transition(&mut self, old: &ViewState, new: &ViewState);
}

impl<F> TransitionObserver for F
where
    F: FnMut(&ViewState, &ViewState) + Send,
{
    fn on_transition(&mut self, old: &ViewState, new: &ViewState) {
        self(old, new)
    }
}

/// Default observer: reports transitions as tracing events
#[derive(Debug, Default)]
pub struct TracingObserver;

impl TransitionObserver for TracingObserver {
    fn on_transition(&mut self, old: &ViewState, new: &ViewState) {
        if old.input != new.input {
            tracing::debug!(active = ?new.input.active(), "mood input changed");
        }
        if old.outcome != new.outcome {
            tracing::info!(
                from = phase(&old.outcome),
                to = phase(&new.outcome),
                mood = new.outcome.mood().unwrap_or(""),
                "request outcome changed"
            );
        }
    }
}

fn phase(outcome: &RequestOutcome) -> &'static str {
    match outcome {
        RequestOutcome::Idle => "idle",
        RequestOutcome::Loading { .. } => "loading",
        RequestOutcome::Success(_) => "success",
        RequestOutcome::Failed(_) => "failed",
    }
}
