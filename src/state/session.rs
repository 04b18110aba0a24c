//! Session store: token, user profile, and the auth operations.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::rc::Rc;

use futures::lock::Mutex;
use leptos::prelude::{GetUntracked, RwSignal, Set, Update, With};
use serde::{Deserialize, Serialize};

use super::FlagGuard;
use crate::net::api::{ApiClient, Transport};
use crate::net::error::{ApiError, FormErrors};
use crate::net::types::{AuthResponse, LoginForm, RegisterForm, UpdatePasswordForm, UpdateProfileForm, User};
use crate::util::browser::redirect_to_root;
use crate::util::storage::StateStorage;

/// localStorage key for the persisted session.
pub const AUTH_STORE_KEY: &str = "auth-store";

/// Session state. `token` is `Some` exactly between a successful
/// login/register and the next logout (or 401 invalidation).
/// `form_errors` and `form_loading` are transient and never persisted.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<User>,
    #[serde(skip)]
    pub form_errors: FormErrors,
    #[serde(skip)]
    pub form_loading: bool,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Store for the authenticated session.
///
/// Every mutating action clears `form_errors`, raises `form_loading`
/// for its duration, performs one HTTP call, and on failure writes the
/// normalized errors back into state before returning the error.
pub struct SessionStore<T: Transport> {
    api: Rc<ApiClient<T>>,
    storage: Rc<dyn StateStorage>,
    state: RwSignal<SessionState>,
    gate: Rc<Mutex<()>>,
}

impl<T: Transport> Clone for SessionStore<T> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            storage: Rc::clone(&self.storage),
            state: self.state,
            gate: Rc::clone(&self.gate),
        }
    }
}

impl<T: Transport> SessionStore<T> {
    /// The session signal is created by the caller so the client's 401
    /// hook can reference it before the store exists. A persisted
    /// session is rehydrated immediately.
    pub fn new(api: Rc<ApiClient<T>>, storage: Rc<dyn StateStorage>, state: RwSignal<SessionState>) -> Self {
        let store = Self { api, storage, state, gate: Rc::new(Mutex::new(())) };
        store.rehydrate();
        store
    }

    pub fn state(&self) -> RwSignal<SessionState> {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(SessionState::is_authenticated)
    }

    /// POST `/auth/register`; on success the session holds the
    /// returned token and user.
    ///
    /// # Errors
    ///
    /// The underlying `ApiError`, after its normalized form was written
    /// to `form_errors`.
    pub async fn register(&self, form: &RegisterForm) -> Result<bool, ApiError> {
        self.authenticate("/auth/register", form).await
    }

    /// POST `/auth/login`; identical contract to [`register`](Self::register).
    pub async fn login(&self, form: &LoginForm) -> Result<bool, ApiError> {
        self.authenticate("/auth/login", form).await
    }

    async fn authenticate(&self, path: &str, form: &impl Serialize) -> Result<bool, ApiError> {
        let _gate = self.gate.lock().await;
        let _busy = self.begin_form();

        match self.api.post::<AuthResponse>(path, form).await {
            Ok(resp) => {
                self.state.update(|s| {
                    s.token = Some(resp.access_token);
                    s.user = Some(resp.user);
                });
                self.persist();
                Ok(true)
            }
            Err(err) => {
                self.capture(&err);
                Err(err)
            }
        }
    }

    /// POST `/auth/logout`, then drop the session no matter what the
    /// server said. Clears ALL persisted client storage, not just the
    /// session entry, and sends the user back to `/`.
    pub async fn logout(&self) {
        let _gate = self.gate.lock().await;

        if let Err(err) = self.api.post_empty("/auth/logout").await {
            log::warn!("logout request failed: {err}");
        }

        self.state.set(SessionState::default());
        self.storage.clear_all();
        redirect_to_root();
    }

    /// GET `/user` and replace the profile. Failures are logged and
    /// swallowed; the current user stays in place.
    pub async fn refresh_user(&self) {
        match self.api.get::<User>("/user").await {
            Ok(user) => {
                self.state.update(|s| s.user = Some(user));
                self.persist();
            }
            Err(err) => log::warn!("failed to refresh user: {err}"),
        }
    }

    /// POST `/user`. `Ok(false)` when the server answers with an empty
    /// body, `Ok(true)` after the profile was replaced.
    pub async fn update_profile(&self, form: &UpdateProfileForm) -> Result<bool, ApiError> {
        self.update_user("/user", form).await
    }

    /// POST `/user/password`; same contract as
    /// [`update_profile`](Self::update_profile).
    pub async fn update_password(&self, form: &UpdatePasswordForm) -> Result<bool, ApiError> {
        self.update_user("/user/password", form).await
    }

    async fn update_user(&self, path: &str, form: &impl Serialize) -> Result<bool, ApiError> {
        let _gate = self.gate.lock().await;
        let _busy = self.begin_form();

        match self.api.post::<Option<User>>(path, form).await {
            Ok(Some(user)) => {
                self.state.update(|s| s.user = Some(user));
                self.persist();
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(err) => {
                self.capture(&err);
                Err(err)
            }
        }
    }

    fn begin_form(&self) -> FlagGuard<SessionState> {
        self.state.update(|s| s.form_errors = FormErrors::default());
        FlagGuard::raise(self.state, |s| s.form_loading = true, |s| s.form_loading = false)
    }

    fn capture(&self, err: &ApiError) {
        let errors = FormErrors::from_api_error(err);
        self.state.update(|s| s.form_errors = errors);
    }

    fn persist(&self) {
        match serde_json::to_value(self.state.get_untracked()) {
            Ok(value) => self.storage.save(AUTH_STORE_KEY, &value),
            Err(err) => log::warn!("failed to serialize session state: {err}"),
        }
    }

    fn rehydrate(&self) {
        if let Some(value) = self.storage.load(AUTH_STORE_KEY) {
            match serde_json::from_value::<SessionState>(value) {
                Ok(persisted) => self.state.set(persisted),
                Err(err) => log::warn!("discarding persisted session state: {err}"),
            }
        }
    }
}
