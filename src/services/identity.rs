use crate::domain::user::{User, UserRole};

/// Source of the signed-in user.
pub trait IdentityProvider {
    fn current_user(&self) -> Option<&User>;

    /// Authenticate and make the resulting user current.
    fn sign_in(&mut self, email: &str, password: &str, role: Option<UserRole>) -> User;

    /// Forget the current user.
    fn sign_out(&mut self);

    fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }
}

/// Development stand-in that accepts any email and ignores the password.
///
/// This performs no credential check whatsoever and must not guard anything.
#[derive(Debug, Default)]
pub struct MockIdentity {
    user: Option<User>,
}

impl MockIdentity {
    /// Start anonymous.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityProvider for MockIdentity {
    fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn sign_in(&mut self, email: &str, _password: &str, role: Option<UserRole>) -> User {
        let user = User::from_email(email, role.unwrap_or_default());
        log::info!("Signed in {} as {:?}", user.email, user.role);
        self.user = Some(user.clone());
        user
    }

    fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            log::info!("Signed out {}", user.email);
        }
    }
}
