use std::fmt;
use std::sync::Arc;

use super::credentials::CredentialSource;

/// The signed-in user, as issued by the identity provider.
#[derive(Clone)]
pub struct Identity {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    credentials: Arc<dyn CredentialSource>,
}

impl Identity {
    pub fn new(uid: impl Into<String>, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
            email: None,
            credentials,
        }
    }

    pub fn with_profile(mut self, display_name: Option<String>, email: Option<String>) -> Self {
        self.display_name = display_name;
        self.email = email;
        self
    }

    pub fn credentials(&self) -> &dyn CredentialSource {
        self.credentials.as_ref()
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("uid", &self.uid)
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid
    }
}
