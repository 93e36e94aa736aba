//! Server-sent-event framing for the optimize stream.
//!
//! Each event's `data:` lines carry one JSON [`StreamEvent`]. Events end at a
//! blank line; `[DONE]` sentinels, comments and other SSE fields are skipped.
//! Read failures and malformed payloads surface as error events so the
//! stream controller can fail the request instead of stalling.

use std::io::BufRead;

use tracing::trace;

use crate::stream::{ReasoningStream, RequestToken, StreamEvent, StreamState};

const DONE_SENTINEL: &str = "[DONE]";

/// Iterator of stream events decoded from an SSE body.
pub struct FeedReader<R> {
    reader: R,
    line: String,
    finished: bool,
}

impl<R: BufRead> FeedReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            finished: false,
        }
    }
}

impl<R: BufRead> Iterator for FeedReader<R> {
    type Item = StreamEvent;

    fn next(&mut self) -> Option<StreamEvent> {
        let mut data = String::new();

        while !self.finished {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => {
                    self.finished = true;
                    if let Some(event) = decode_data(&data) {
                        return Some(event);
                    }
                }
                Ok(_) => {
                    let line = self.line.trim_end_matches(['\r', '\n']);
                    if line.is_empty() {
                        if let Some(event) = decode_data(&data) {
                            return Some(event);
                        }
                        data.clear();
                    } else if let Some(value) = line.strip_prefix("data:") {
                        if !data.is_empty() {
                            data.push('\n');
                        }
                        data.push_str(value.strip_prefix(' ').unwrap_or(value));
                    }
                }
                Err(err) => {
                    self.finished = true;
                    return Some(StreamEvent::error(format!("feed read failed: {}", err)));
                }
            }
        }

        None
    }
}

/// Decodes one event's data payload. `None` for empty payloads and sentinels.
fn decode_data(data: &str) -> Option<StreamEvent> {
    let payload = data.trim();
    if payload.is_empty() || payload == DONE_SENTINEL {
        return None;
    }

    match serde_json::from_str::<StreamEvent>(payload) {
        Ok(event) => Some(event),
        Err(err) => Some(StreamEvent::error(format!("malformed stream event: {}", err))),
    }
}

/// Drives `stream` with `events` for the request identified by `token`,
/// calling `on_update` after every applied event.
///
/// Stops at the first terminal state. A feed that ends without a final plan
/// fails the request. Returns `false` if the request was superseded while
/// pumping.
pub fn pump<I, F>(
    stream: &mut ReasoningStream,
    token: RequestToken,
    events: I,
    mut on_update: F,
) -> bool
where
    I: IntoIterator<Item = StreamEvent>,
    F: FnMut(&StreamState),
{
    for event in events {
        if !stream.apply(token, event) {
            return false;
        }
        on_update(stream.state());
        if stream.state().is_terminal() {
            return true;
        }
    }

    trace!(token = token.value(), "feed closed before a terminal event");
    let applied = stream.fail(token, "stream ended before a final plan");
    if applied {
        on_update(stream.state());
    }
    applied
}
