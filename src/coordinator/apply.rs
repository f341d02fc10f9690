use crate::models::career::CareerPost;

/// Apply dialog lifecycle:
/// `Idle -> DialogOpen -> Submitting -> Idle | DialogOpen { error }`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ApplyPhase {
    #[default]
    Idle,
    DialogOpen {
        career: CareerPost,
        error: Option<String>,
    },
    Submitting {
        career: CareerPost,
    },
}

impl ApplyPhase {
    pub fn is_dialog_open(&self) -> bool {
        !matches!(self, ApplyPhase::Idle)
    }

    pub fn career(&self) -> Option<&CareerPost> {
        match self {
            ApplyPhase::Idle => None,
            ApplyPhase::DialogOpen { career, .. } | ApplyPhase::Submitting { career } => Some(career),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ApplyPhase::DialogOpen { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}

/// What happened when the user clicked "Apply".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyGate {
    SignInRequested,
    AlreadyApplied,
    DialogOpened,
}
