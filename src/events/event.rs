use chrono::{DateTime, Utc};

/// Events emitted by the submission path.
///
/// Events are always fired. If no listeners are registered they are
/// silently ignored. Register listeners via
/// [`register_event_listeners`](super::register_event_listeners).
#[derive(Debug, Clone)]
pub enum GuardEvent {
    ArticleSaved {
        title: String,
        at: DateTime<Utc>,
    },
    SubmissionRejected {
        reason: String,
        at: DateTime<Utc>,
    },
    ChallengeIssued {
        at: DateTime<Utc>,
    },
    SessionDestroyed {
        at: DateTime<Utc>,
    },
}

impl GuardEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ArticleSaved { .. } => "article.saved",
            Self::SubmissionRejected { .. } => "submission.rejected",
            Self::ChallengeIssued { .. } => "captcha.issued",
            Self::SessionDestroyed { .. } => "session.destroyed",
        }
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::ArticleSaved { at, .. }
            | Self::SubmissionRejected { at, .. }
            | Self::ChallengeIssued { at }
            | Self::SessionDestroyed { at } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let event = GuardEvent::ArticleSaved {
            title: "MyTitle".to_owned(),
            at: Utc::now(),
        };
        assert_eq!(event.name(), "article.saved");

        let event = GuardEvent::SubmissionRejected {
            reason: "csrf_invalid".to_owned(),
            at: Utc::now(),
        };
        assert_eq!(event.name(), "submission.rejected");
    }

    #[test]
    fn test_event_timestamp() {
        let at = Utc::now();
        let event = GuardEvent::ChallengeIssued { at };
        assert_eq!(event.timestamp(), at);
    }
}
