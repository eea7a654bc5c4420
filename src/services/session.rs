use crate::config::StorefrontConfig;
use crate::domain::user::{User, UserRole};
use crate::forms::auth::SignInForm;
use crate::repository::{CartStorage, open_cart_storage};
use crate::services::cart::CartStore;
use crate::services::identity::{IdentityProvider, MockIdentity};
use crate::services::{ServiceError, ServiceResult};

/// Identity and cart state for one storefront client.
///
/// The active cart partition always follows the signed-in user.
pub struct Session<I, S> {
    identity: I,
    cart: CartStore<S>,
}

impl<I, S> Session<I, S>
where
    I: IdentityProvider,
    S: CartStorage,
{
    pub fn new(identity: I, storage: S) -> Self {
        let mut cart = CartStore::new(storage);
        cart.switch_user(identity.current_user().map(|user| user.id.as_str()));
        Self { identity, cart }
    }

    pub fn sign_in(&mut self, email: &str, password: &str, role: Option<UserRole>) -> User {
        let user = self.identity.sign_in(email, password, role);
        self.cart.switch_user(Some(&user.id));
        user
    }

    pub fn sign_out(&mut self) {
        self.identity.sign_out();
        self.cart.switch_user(None);
    }

    pub fn user(&self) -> Option<&User> {
        self.identity.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_authenticated()
    }

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }
}

/// Anonymous session with the mock identity and the configured cart backend.
pub fn open_session(config: &StorefrontConfig) -> Session<MockIdentity, Box<dyn CartStorage>> {
    Session::new(MockIdentity::new(), open_cart_storage(config))
}

/// Validates the sign-in dialog payload and signs the user in.
pub fn submit_sign_in<I, S>(session: &mut Session<I, S>, form: SignInForm) -> ServiceResult<User>
where
    I: IdentityProvider,
    S: CartStorage,
{
    let request = form
        .into_request()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    Ok(session.sign_in(&request.email, &request.password, request.role))
}
