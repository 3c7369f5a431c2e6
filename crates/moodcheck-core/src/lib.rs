pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod observer;
pub mod session;
pub mod view;

// Re-export main types for convenience
pub use catalog::{MoodCatalog, MoodOption};
pub use client::{HttpSuggestionClient, RawResponse, SuggestionTransport};
pub use config::Config;
pub use error::{ClientError, ConfigError, TransportError};
pub use input::{ActiveSource, InputState};
pub use lifecycle::{
    Failure, FailureKind, PendingRequest, RequestId, RequestLifecycle, RequestOutcome, Suggestion,
    SuggestionProvenance,
};
pub use observer::{TracingObserver, TransitionObserver};
pub use session::{fetch, MoodSession};
pub use view::{dispatch, Effect, Event, Transition, ViewState};
