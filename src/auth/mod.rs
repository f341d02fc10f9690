pub mod credentials;
pub mod identity;
pub mod session;

pub use credentials::{CredentialSource, SigningTokenSource, StaticToken};
pub use identity::Identity;
pub use session::{Session, SignInPrompt};
