//! Reasoning stream state machine.
//!
//! While the planner works it streams partial reasoning text and phase
//! labels, then a final response (or an error). [`transition`] is the pure
//! step function; [`ReasoningStream`] wraps it with request tokens so events
//! from a superseded request are dropped instead of applied.

use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::model::{AssignmentPlan, OptimizeResponse};

/// Identifies one optimize request. Later requests get larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// One increment of the feed. Fields are independent; a terminal field
/// (`error`, then `response`) takes precedence over text and status.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StreamEvent {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub response: Option<Box<OptimizeResponse>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StreamEvent {
    pub fn text(chunk: impl Into<String>) -> Self {
        Self {
            text: Some(chunk.into()),
            ..Self::default()
        }
    }

    pub fn status(label: impl Into<String>) -> Self {
        Self {
            status: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn finished(response: OptimizeResponse) -> Self {
        Self {
            response: Some(Box::new(response)),
            ..Self::default()
        }
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            error: Some(reason.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum StreamState {
    #[default]
    Idle,
    Connecting,
    StreamingWithStatus { text: String, status: String },
    StreamingTextOnly { text: String },
    Complete(Box<OptimizeResponse>),
    /// Partial text is kept for diagnostics.
    Failed { reason: String, partial_text: String },
}

impl StreamState {
    pub fn is_streaming(&self) -> bool {
        matches!(
            self,
            StreamState::StreamingWithStatus { .. } | StreamState::StreamingTextOnly { .. }
        )
    }

    /// Connecting or streaming: a request is outstanding.
    pub fn is_active(&self) -> bool {
        matches!(self, StreamState::Connecting) || self.is_streaming()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamState::Complete(_) | StreamState::Failed { .. })
    }

    /// Accumulated reasoning text. Empty once complete.
    pub fn text(&self) -> &str {
        match self {
            StreamState::StreamingWithStatus { text, .. }
            | StreamState::StreamingTextOnly { text } => text,
            StreamState::Failed { partial_text, .. } => partial_text,
            _ => "",
        }
    }

    pub fn status(&self) -> Option<&str> {
        match self {
            StreamState::StreamingWithStatus { status, .. } => Some(status),
            _ => None,
        }
    }

    pub fn plan(&self) -> Option<&AssignmentPlan> {
        match self {
            StreamState::Complete(response) => Some(response.plan()),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            StreamState::Failed { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Last `max_lines` lines of the accumulated text, so the reasoning
    /// panel always shows the newest output.
    pub fn visible_tail(&self, max_lines: usize) -> &str {
        tail_lines(self.text(), max_lines)
    }
}

fn tail_lines(text: &str, max_lines: usize) -> &str {
    if max_lines == 0 {
        return "";
    }
    let trimmed = text.strip_suffix('\n').unwrap_or(text);
    match trimmed.rmatch_indices('\n').nth(max_lines - 1) {
        Some((index, _)) => &text[index + 1..],
        None => text,
    }
}

/// Applies one event to a state.
///
/// Text is appended exactly as received. A status label, once seen, stays
/// attached to the text until replaced; an empty label clears it. Idle and
/// terminal states ignore events.
pub fn transition(state: StreamState, event: StreamEvent) -> StreamState {
    if state.is_terminal() || state == StreamState::Idle {
        trace!(?state, "event ignored outside an active stream");
        return state;
    }

    if let Some(reason) = event.error {
        return StreamState::Failed {
            reason,
            partial_text: state.text().to_string(),
        };
    }

    if let Some(response) = event.response {
        return StreamState::Complete(response);
    }

    let was_connecting = state == StreamState::Connecting;
    let (mut text, mut status) = match state {
        StreamState::StreamingWithStatus { text, status } => (text, Some(status)),
        StreamState::StreamingTextOnly { text } => (text, None),
        _ => (String::new(), None),
    };

    if let Some(label) = event.status {
        status = (!label.is_empty()).then_some(label);
    }
    if let Some(chunk) = event.text {
        text.push_str(&chunk);
    }

    match status {
        Some(status) => StreamState::StreamingWithStatus { text, status },
        None if was_connecting && text.is_empty() => StreamState::Connecting,
        None => StreamState::StreamingTextOnly { text },
    }
}

/// Owns the stream state for the current optimize request.
#[derive(Debug, Default)]
pub struct ReasoningStream {
    state: StreamState,
    current: Option<RequestToken>,
    last_issued: u64,
}

impl ReasoningStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &StreamState {
        &self.state
    }

    pub fn current_token(&self) -> Option<RequestToken> {
        self.current
    }

    /// Starts a new request, discarding whatever the previous one produced.
    pub fn begin(&mut self) -> RequestToken {
        if let Some(previous) = self.current {
            if self.state.is_active() {
                debug!(superseded = previous.value(), "superseding active optimize request");
            }
        }

        self.last_issued += 1;
        let token = RequestToken(self.last_issued);
        self.current = Some(token);
        self.state = StreamState::Connecting;
        token
    }

    /// Applies an event if it belongs to the current request.
    ///
    /// Returns `false` when the event was stale and dropped.
    pub fn apply(&mut self, token: RequestToken, event: StreamEvent) -> bool {
        if self.current != Some(token) {
            debug!(
                token = token.value(),
                current = ?self.current.map(RequestToken::value),
                "dropping event from superseded request"
            );
            return false;
        }

        let was_terminal = self.state.is_terminal();
        let state = std::mem::take(&mut self.state);
        self.state = transition(state, event);

        if let (false, StreamState::Failed { reason, .. }) = (was_terminal, &self.state) {
            warn!(token = token.value(), %reason, "optimize stream failed");
        }
        true
    }

    /// Records a transport failure for `token`.
    pub fn fail(&mut self, token: RequestToken, reason: impl Into<String>) -> bool {
        self.apply(token, StreamEvent::error(reason))
    }
}
