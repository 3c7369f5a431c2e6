//! Owner of the live view state
//!
//! `MoodSession` is the single place events are applied. Front ends either
//! call the async helpers (`select_preset`, `submit`, ...) which run the
//! request inline, or call [`MoodSession::dispatch`] and run the returned
//! request themselves with [`fetch`], feeding the result back as an event.

use std::sync::Arc;

use crate::client::SuggestionTransport;
use crate::lifecycle::{PendingRequest, RequestLifecycle, RequestOutcome};
use crate::observer::{TracingObserver, TransitionObserver};
use crate::view::{dispatch, Effect, Event, ViewState};

pub struct MoodSession {
    state: ViewState,
    lifecycle: RequestLifecycle,
    transport: Arc<dyn SuggestionTransport>,
    observer: Box<dyn TransitionObserver>,
}

impl MoodSession {
    pub fn new(transport: Arc<dyn SuggestionTransport>) -> Self {
        Self {
            state: ViewState::new(),
            lifecycle: RequestLifecycle::new(),
            transport,
            observer: Box::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: impl TransitionObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn transport(&self) -> Arc<dyn SuggestionTransport> {
        Arc::clone(&self.transport)
    }

    /// Apply an event. Returns the request the caller must now run, if any.
    pub fn dispatch(&mut self, event: Event) -> Option<PendingRequest> {
        let transition = dispatch(&self.state, event, &mut self.lifecycle);
        let old = std::mem::replace(&mut self.state, transition.state);
        if old != self.state {
            self.observer.on_transition(&old, &self.state);
        }

        transition.effect.map(|Effect::Fetch(request)| request)
    }

    /// Run a pending request to completion and apply its result
    pub async fn run(&mut self, request: PendingRequest) -> &RequestOutcome {
        let settled = fetch(self.transport.as_ref(), request).await;
        self.dispatch(settled);
        &self.state.outcome
    }

    /// Submit `mood` and wait for the outcome
    pub async fn submit(&mut self, mood: &str) -> RequestOutcome {
        self.apply(Event::Submit(mood.to_string())).await
    }

    pub async fn select_preset(&mut self, label: &str) -> RequestOutcome {
        self.apply(Event::SelectPreset(label.to_string())).await
    }

    pub fn edit_free_text(&mut self, text: &str) {
        self.dispatch(Event::EditFreeText(text.to_string()));
    }

    pub async fn submit_free_text(&mut self) -> RequestOutcome {
        self.apply(Event::SubmitFreeText).await
    }

    async fn apply(&mut self, event: Event) -> RequestOutcome {
        match self.dispatch(event) {
            Some(request) => self.run(request).await.clone(),
            None => self.state.outcome.clone(),
        }
    }
}

/// Perform one request and wrap the result as a `Settled` event
pub async fn fetch(transport: &dyn SuggestionTransport, request: PendingRequest) -> Event {
    let response = transport.post_mood(&request.mood).await;
    Event::Settled { request, response }
}
