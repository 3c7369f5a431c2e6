//! The snapshot the presentation layer renders, and the transition function
//! that produces it.

use crate::client::RawResponse;
use crate::error::TransportError;
use crate::input::InputState;
use crate::lifecycle::{PendingRequest, RequestLifecycle, RequestOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub input: InputState,
    pub outcome: RequestOutcome,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.outcome.is_loading()
    }

    /// Whether the free-text submit control should be enabled
    pub fn can_submit_free_text(&self) -> bool {
        !self.is_loading() && self.input.submit_free_text().is_some()
    }

    pub fn suggestion_text(&self) -> Option<&str> {
        match &self.outcome {
            RequestOutcome::Success(suggestion) => Some(&suggestion.text),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            RequestOutcome::Failed(failure) => Some(failure.message),
            _ => None,
        }
    }
}

/// Everything that can change the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SelectPreset(String),
    EditFreeText(String),
    SubmitFreeText,
    /// Submit a mood directly, bypassing input resolution
    Submit(String),
    Settled {
        request: PendingRequest,
        response: Result<RawResponse, TransportError>,
    },
}

/// Work the caller must perform after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(PendingRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ViewState,
    pub effect: Option<Effect>,
}

impl Transition {
    fn unchanged(state: &ViewState) -> Self {
        Self {
            state: state.clone(),
            effect: None,
        }
    }
}

/// Compute the next view for `event`.
///
/// The lifecycle only does request bookkeeping; the returned state is a new
/// value and `state` is left untouched.
pub fn dispatch(state: &ViewState, event: Event, lifecycle: &mut RequestLifecycle) -> Transition {
    match event {
        Event::SelectPreset(label) => {
            let mut input = state.input.clone();
            let mood = input.select_preset(&label);
            start(input, &mood, lifecycle)
        }
        Event::EditFreeText(text) => {
            let mut input = state.input.clone();
            input.edit_free_text(&text);
            Transition {
                state: ViewState {
                    input,
                    outcome: state.outcome.clone(),
                },
                effect: None,
            }
        }
        Event::SubmitFreeText => match state.input.submit_free_text() {
            Some(mood) => start(state.input.clone(), &mood, lifecycle),
            None => Transition::unchanged(state),
        },
        Event::Submit(mood) => start(state.input.clone(), &mood, lifecycle),
        Event::Settled { request, response } => match lifecycle.settle(&request, response) {
            Some(outcome) => Transition {
                state: ViewState {
                    input: state.input.clone(),
                    outcome,
                },
                effect: None,
            },
            None => Transition::unchanged(state),
        },
    }
}

fn start(input: InputState, mood: &str, lifecycle: &mut RequestLifecycle) -> Transition {
    match lifecycle.begin(mood) {
        Ok(request) => Transition {
            state: ViewState {
                input,
                outcome: RequestOutcome::Loading {
                    mood: request.mood.clone(),
                },
            },
            effect: Some(Effect::Fetch(request)),
        },
        Err(failure) => Transition {
            state: ViewState {
                input,
                outcome: RequestOutcome::Failed(failure),
            },
            effect: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{FailureKind, SuggestionProvenance};
    use pretty_assertions::assert_eq;

    fn fetched(transition: &Transition) -> PendingRequest {
        match &transition.effect {
            Some(Effect::Fetch(request)) => request.clone(),
            None => panic!("expected a fetch effect"),
        }
    }

    #[test]
    fn test_initial_state() {
        let state = ViewState::new();
        assert_eq!(state.outcome, RequestOutcome::Idle);
        assert_eq!(state.input, InputState::new());
        assert!(!state.can_submit_free_text());
    }

    #[test]
    fn test_select_preset_loads_and_fetches() {
        let mut lifecycle = RequestLifecycle::new();
        let t = dispatch(&ViewState::new(), Event::SelectPreset("Happy".into()), &mut lifecycle);

        assert!(t.state.is_loading());
        assert_eq!(t.state.input.selected_preset(), Some("Happy"));
        assert_eq!(fetched(&t).mood, "Happy");
    }

    #[test]
    fn test_edit_does_not_fetch_or_touch_outcome() {
        let mut lifecycle = RequestLifecycle::new();
        let loading = dispatch(&ViewState::new(), Event::SelectPreset("Sad".into()), &mut lifecycle);
        let t = dispatch(&loading.state, Event::EditFreeText("tired".into()), &mut lifecycle);

        assert!(t.effect.is_none());
        assert_eq!(t.state.input.selected_preset(), None);
        assert_eq!(t.state.input.free_text(), "tired");
        // The in-flight request stays bound to "Sad"
        assert_eq!(t.state.outcome, RequestOutcome::Loading { mood: "Sad".into() });
    }

    #[test]
    fn test_submit_blank_free_text_is_noop() {
        let mut lifecycle = RequestLifecycle::new();
        let edited = dispatch(&ViewState::new(), Event::EditFreeText("   ".into()), &mut lifecycle);
        let t = dispatch(&edited.state, Event::SubmitFreeText, &mut lifecycle);

        assert!(t.effect.is_none());
        assert_eq!(t.state, edited.state);
        assert_eq!(lifecycle.in_flight(), None);
    }

    #[test]
    fn test_direct_blank_submit_fails_validation() {
        let mut lifecycle = RequestLifecycle::new();
        let t = dispatch(&ViewState::new(), Event::Submit(" ".into()), &mut lifecycle);

        assert!(t.effect.is_none());
        assert_eq!(t.state.error_message(), Some(crate::lifecycle::EMPTY_MOOD_MESSAGE));
    }

    #[test]
    fn test_settle_to_success() {
        let mut lifecycle = RequestLifecycle::new();
        let edited = dispatch(&ViewState::new(), Event::EditFreeText(" tired ".into()), &mut lifecycle);
        let loading = dispatch(&edited.state, Event::SubmitFreeText, &mut lifecycle);
        let request = fetched(&loading);
        assert_eq!(request.mood, "tired");

        let done = dispatch(
            &loading.state,
            Event::Settled {
                request,
                response: Ok(RawResponse::new(200, r#"{"suggestion":"Rest"}"#)),
            },
            &mut lifecycle,
        );
        assert!(!done.state.is_loading());
        assert_eq!(done.state.suggestion_text(), Some("Rest"));
        assert_eq!(done.state.input.free_text(), " tired ");
        match &done.state.outcome {
            RequestOutcome::Success(s) => assert_eq!(s.provenance, SuggestionProvenance::Service),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_new_submit_clears_previous_suggestion() {
        let mut lifecycle = RequestLifecycle::new();
        let loading = dispatch(&ViewState::new(), Event::SelectPreset("Happy".into()), &mut lifecycle);
        let done = dispatch(
            &loading.state,
            Event::Settled {
                request: fetched(&loading),
                response: Ok(RawResponse::new(200, r#"{"suggestion":"Dance"}"#)),
            },
            &mut lifecycle,
        );
        assert_eq!(done.state.suggestion_text(), Some("Dance"));

        let next = dispatch(&done.state, Event::SelectPreset("Sad".into()), &mut lifecycle);
        let request = fetched(&next);
        assert_eq!(request.mood, "Sad");
        assert!(next.state.is_loading());
        assert_eq!(next.state.outcome, RequestOutcome::Loading { mood: "Sad".into() });
        assert_eq!(next.state.suggestion_text(), None);
        assert_eq!(next.state.error_message(), None);
    }

    #[test]
    fn test_new_submit_clears_previous_failure() {
        let mut lifecycle = RequestLifecycle::new();
        let loading = dispatch(&ViewState::new(), Event::SelectPreset("Sad".into()), &mut lifecycle);
        let failed = dispatch(
            &loading.state,
            Event::Settled {
                request: fetched(&loading),
                response: Ok(RawResponse::new(503, "")),
            },
            &mut lifecycle,
        );
        assert!(matches!(
            &failed.state.outcome,
            RequestOutcome::Failed(f) if f.kind == FailureKind::Http(503)
        ));

        let retry = dispatch(&failed.state, Event::SelectPreset("Sad".into()), &mut lifecycle);
        assert!(retry.state.is_loading());
        assert_eq!(retry.state.error_message(), None);
    }

    #[test]
    fn test_stale_settlement_leaves_state() {
        let mut lifecycle = RequestLifecycle::new();
        let first = dispatch(&ViewState::new(), Event::SelectPreset("Sad".into()), &mut lifecycle);
        let second = dispatch(&first.state, Event::SelectPreset("Calm".into()), &mut lifecycle);

        let t = dispatch(
            &second.state,
            Event::Settled {
                request: fetched(&first),
                response: Ok(RawResponse::new(200, r#"{"suggestion":"old"}"#)),
            },
            &mut lifecycle,
        );
        assert_eq!(t.state, second.state);
        assert!(t.state.is_loading());
    }
}
