use std::sync::Arc;

use tokio::sync::watch;

use super::identity::Identity;

/// Interactive sign-in supplied by the host UI.
pub trait SignInPrompt: Send + Sync {
    fn request_sign_in(&self);
}

/// Session-wide identity, shared read-only with any number of subscribers.
#[derive(Clone)]
pub struct Session {
    sender: Arc<watch::Sender<Option<Identity>>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl Session {
    pub fn anonymous() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn sign_in(&self, identity: Identity) {
        tracing::info!(uid = %identity.uid, "User signed in");
        self.sender.send_replace(Some(identity));
    }

    pub fn sign_out(&self) {
        if self.sender.send_replace(None).is_some() {
            tracing::info!("User signed out");
        }
    }

    pub fn current(&self) -> Option<Identity> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.sender.subscribe()
    }
}
