//! View state for the generator page and the transitions that move it.
//!
//! Everything here is plain data: the component dispatches [`Action`]s and
//! renders whatever [`GeneratorState`] says. No DOM or network access.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use yew::Reducible;

use crate::api::{Generated, MediaKind};
use crate::error::GenerationError;

pub const BUSY_LABEL: &str = "Generating...";
pub const EMPTY_PROMPT_ALERT: &str = "Enter a prompt first.";

/// The one piece of media on screen. A single value, so an image and a
/// video can never be shown at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Artifact {
    Image(String),
    Video(String),
}

impl Artifact {
    pub fn new(kind: MediaKind, path: String) -> Self {
        match kind {
            MediaKind::Image => Artifact::Image(path),
            MediaKind::Video => Artifact::Video(path),
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            Artifact::Image(_) => MediaKind::Image,
            Artifact::Video(_) => MediaKind::Video,
        }
    }

    pub fn src(&self) -> &str {
        match self {
            Artifact::Image(s) | Artifact::Video(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Pending { kind: MediaKind, ticket: u64 },
    Resolved,
    Failed { kind: MediaKind, message: String },
}

/// A modal alert waiting to be shown. `seq` changes every time a new one is raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub seq: u64,
    pub message: String,
}

/// What the component needs to fire one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub kind: MediaKind,
    pub ticket: u64,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    EditPrompt(String),
    Begin(PendingRequest),
    /// Raised instead of `Begin` when the prompt is blank.
    Reject(String),
    Resolve {
        ticket: u64,
        outcome: Result<Generated, GenerationError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorState {
    pub prompt: String,
    pub phase: Phase,
    pub result: Option<Artifact>,
    pub status: Option<String>,
    pub alert: Option<Alert>,
    next_ticket: u64,
}

impl Default for GeneratorState {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            phase: Phase::Idle,
            result: None,
            status: None,
            alert: None,
            next_ticket: 1,
        }
    }
}

impl GeneratorState {
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. })
    }

    /// Label for a trigger button given its idle text.
    pub fn button_label<'a>(&self, idle: &'a str) -> &'a str {
        if self.is_busy() {
            BUSY_LABEL
        } else {
            idle
        }
    }

    /// Builds the next request for `kind`, or the alert text if the prompt is blank.
    pub fn prepare(&self, kind: MediaKind) -> Result<PendingRequest, String> {
        if self.prompt.trim().is_empty() {
            return Err(EMPTY_PROMPT_ALERT.to_string());
        }
        Ok(PendingRequest {
            kind,
            ticket: self.next_ticket,
            prompt: self.prompt.clone(),
        })
    }

    pub fn apply(mut self, action: Action) -> Self {
        match action {
            Action::EditPrompt(text) => {
                self.prompt = text;
            }
            Action::Begin(req) => {
                // A newer request supersedes whatever was in flight.
                self.phase = Phase::Pending {
                    kind: req.kind,
                    ticket: req.ticket,
                };
                self.next_ticket = self.next_ticket.max(req.ticket + 1);
                self.status = None;
            }
            Action::Reject(message) => {
                self.raise(message);
            }
            Action::Resolve { ticket, outcome } => {
                let kind = match self.phase {
                    Phase::Pending { kind, ticket: current } if current == ticket => kind,
                    // stale or unexpected response
                    _ => return self,
                };
                match outcome {
                    Ok(Generated { artifact, message }) => {
                        self.result = Some(artifact);
                        self.status = message;
                        self.phase = Phase::Resolved;
                    }
                    Err(e) => {
                        let message = e.to_string();
                        self.raise(format!("Error generating {}: {}", kind.noun(), message));
                        self.phase = Phase::Failed { kind, message };
                    }
                }
            }
        }
        self
    }

    fn raise(&mut self, message: String) {
        let seq = self.alert.as_ref().map_or(1, |a| a.seq + 1);
        self.alert = Some(Alert { seq, message });
    }
}

impl Reducible for GeneratorState {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new((*self).clone().apply(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl GeneratorState {
        fn image_src(&self) -> Option<&str> {
            match &self.result {
                Some(Artifact::Image(s)) => Some(s),
                _ => None,
            }
        }

        fn video_src(&self) -> Option<&str> {
            match &self.result {
                Some(Artifact::Video(s)) => Some(s),
                _ => None,
            }
        }
    }

    fn with_prompt(p: &str) -> GeneratorState {
        GeneratorState::default().apply(Action::EditPrompt(p.into()))
    }

    fn begin(state: GeneratorState, kind: MediaKind) -> (GeneratorState, u64) {
        let req = state.prepare(kind).expect("prompt is set");
        let ticket = req.ticket;
        (state.apply(Action::Begin(req)), ticket)
    }

    fn ok(kind: MediaKind, path: &str) -> Result<Generated, GenerationError> {
        Ok(Generated {
            artifact: Artifact::new(kind, path.into()),
            message: None,
        })
    }

    #[test]
    fn image_response_shows_image_and_no_video() {
        let (s, t) = begin(with_prompt("a cat"), MediaKind::Image);
        let s = s.apply(Action::Resolve {
            ticket: t,
            outcome: ok(MediaKind::Image, "/img/1.png"),
        });

        assert_eq!(s.image_src(), Some("/img/1.png"));
        assert_eq!(s.video_src(), None);
        assert_eq!(s.phase, Phase::Resolved);
        assert!(s.alert.is_none());
    }

    #[test]
    fn server_error_raises_alert_and_keeps_media() {
        let (s, t) = begin(with_prompt("a cat"), MediaKind::Image);
        let s = s.apply(Action::Resolve {
            ticket: t,
            outcome: ok(MediaKind::Image, "/img/1.png"),
        });

        let (s, t) = begin(s, MediaKind::Image);
        let s = s.apply(Action::Resolve {
            ticket: t,
            outcome: Err(GenerationError::Server("boom".into())),
        });

        let alert = s.alert.as_ref().expect("alert raised");
        assert!(alert.message.contains("boom"));
        assert_eq!(alert.message, "Error generating image: boom");
        assert_eq!(s.image_src(), Some("/img/1.png"));
        assert!(matches!(s.phase, Phase::Failed { .. }));
    }

    #[test]
    fn error_before_any_media_renders_nothing() {
        let (s, t) = begin(with_prompt("x"), MediaKind::Video);
        let s = s.apply(Action::Resolve {
            ticket: t,
            outcome: Err(GenerationError::Server("boom".into())),
        });
        assert!(s.result.is_none());
        assert_eq!(s.alert.unwrap().message, "Error generating video: boom");
    }

    #[test]
    fn busy_while_pending_then_idle_labels() {
        let s = with_prompt("a cat");
        assert!(!s.is_busy());
        assert_eq!(s.button_label("Generate Image"), "Generate Image");

        let (s, t) = begin(s, MediaKind::Image);
        assert!(s.is_busy());
        assert_eq!(s.button_label("Generate Image"), BUSY_LABEL);
        assert_eq!(s.button_label("Generate Video"), BUSY_LABEL);

        let done = s.clone().apply(Action::Resolve {
            ticket: t,
            outcome: ok(MediaKind::Image, "a.png"),
        });
        assert!(!done.is_busy());
        assert_eq!(done.button_label("Generate Image"), "Generate Image");

        let failed = s.apply(Action::Resolve {
            ticket: t,
            outcome: Err(GenerationError::Network("connection refused".into())),
        });
        assert!(!failed.is_busy());
        assert_eq!(failed.button_label("Generate Video"), "Generate Video");
    }

    #[test]
    fn video_after_image_clears_image() {
        let (s, t) = begin(with_prompt("waves"), MediaKind::Image);
        let s = s.apply(Action::Resolve {
            ticket: t,
            outcome: ok(MediaKind::Image, "/img/1.png"),
        });
        let (s, t) = begin(s, MediaKind::Video);
        let s = s.apply(Action::Resolve {
            ticket: t,
            outcome: ok(MediaKind::Video, "/vid/1.mp4"),
        });

        assert_eq!(s.image_src(), None);
        assert_eq!(s.video_src(), Some("/vid/1.mp4"));
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let s = with_prompt("   ");
        let msg = s.prepare(MediaKind::Image).unwrap_err();
        assert_eq!(msg, EMPTY_PROMPT_ALERT);

        let s = s.apply(Action::Reject(msg));
        assert!(!s.is_busy());
        assert_eq!(s.alert.unwrap().seq, 1);
    }

    #[test]
    fn prepare_carries_prompt_verbatim() {
        let req = with_prompt("  a cat ").prepare(MediaKind::Video).unwrap();
        assert_eq!(req.prompt, "  a cat ");
        assert_eq!(req.kind, MediaKind::Video);
    }

    #[test]
    fn stale_response_is_dropped() {
        let (s, first) = begin(with_prompt("one"), MediaKind::Image);
        let (s, second) = begin(s, MediaKind::Video);
        assert_ne!(first, second);

        let s = s.apply(Action::Resolve {
            ticket: first,
            outcome: ok(MediaKind::Image, "old.png"),
        });
        assert!(s.is_busy());
        assert!(s.result.is_none());

        let s = s.apply(Action::Resolve {
            ticket: second,
            outcome: ok(MediaKind::Video, "new.mp4"),
        });
        assert_eq!(s.video_src(), Some("new.mp4"));
    }

    #[test]
    fn stale_failure_is_not_recorded() {
        let (s, first) = begin(with_prompt("one"), MediaKind::Image);
        let (s, _second) = begin(s, MediaKind::Image);

        let s = s.apply(Action::Resolve {
            ticket: first,
            outcome: Err(GenerationError::Network("connection reset".into())),
        });
        assert!(s.is_busy());
        assert!(s.alert.is_none());
        assert!(!matches!(s.phase, Phase::Failed { .. }));
    }

    #[test]
    fn applied_failure_remembers_its_kind() {
        let (s, t) = begin(with_prompt("one"), MediaKind::Video);
        let s = s.apply(Action::Resolve {
            ticket: t,
            outcome: Err(GenerationError::Status(500)),
        });
        assert_eq!(
            s.phase,
            Phase::Failed {
                kind: MediaKind::Video,
                message: "generator responded with HTTP 500".into(),
            }
        );
    }

    #[test]
    fn each_alert_gets_a_new_seq() {
        let s = GeneratorState::default()
            .apply(Action::Reject("a".into()))
            .apply(Action::Reject("a".into()));
        assert_eq!(s.alert.unwrap().seq, 2);
    }

    #[test]
    fn server_message_becomes_status() {
        let (s, t) = begin(with_prompt("a cat"), MediaKind::Image);
        let s = s.apply(Action::Resolve {
            ticket: t,
            outcome: Ok(Generated {
                artifact: Artifact::Image("p.png".into()),
                message: Some("Image generated!".into()),
            }),
        });
        assert_eq!(s.status.as_deref(), Some("Image generated!"));
    }

    #[test]
    fn state_serializes() {
        let (s, _) = begin(with_prompt("a cat"), MediaKind::Video);
        let json = serde_json::to_string(&s).unwrap();
        let back: GeneratorState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
