//! Client-side stores, one per backend resource.
//!
//! DESIGN
//! ======
//! Stores are explicit containers built by `provide_stores`, not
//! ambient singletons: each receives the shared `ApiClient` and a
//! `StateStorage` handle, owns one `RwSignal` holding its state, and
//! serializes its async actions through `futures::lock::Mutex` gates.
//! The loading flags mirrored into state are advisory indicators for
//! UI disabling; the gates are what keep overlapping calls from
//! stomping each other's flag resets.

pub mod articles;
pub mod session;

use leptos::prelude::{RwSignal, Update};

/// Raises a boolean flag on creation and lowers it on drop, so async
/// actions reset their loading indicator on every exit path.
pub(crate) struct FlagGuard<S: Send + Sync + 'static> {
    state: RwSignal<S>,
    clear: fn(&mut S),
}

impl<S: Send + Sync + 'static> FlagGuard<S> {
    pub(crate) fn raise(state: RwSignal<S>, set: fn(&mut S), clear: fn(&mut S)) -> Self {
        state.update(|s| set(s));
        Self { state, clear }
    }
}

impl<S: Send + Sync + 'static> Drop for FlagGuard<S> {
    fn drop(&mut self) {
        let clear = self.clear;
        self.state.update(|s| clear(s));
    }
}

#[cfg(feature = "hydrate")]
pub type AppSessionStore = session::SessionStore<crate::net::api::GlooTransport>;
#[cfg(feature = "hydrate")]
pub type AppArticlesStore = articles::ArticlesStore<crate::net::api::GlooTransport>;

/// Wire the HTTP client and both stores, then provide them through
/// Leptos context for the host application's components.
///
/// The session signal is created here, before the client, so the 401
/// hook can invalidate the session without a reference cycle: on a 401
/// the token is dropped from memory and storage and the user is sent
/// back to `/`.
#[cfg(feature = "hydrate")]
pub fn provide_stores(config: &crate::config::AppConfig) {
    use std::rc::Rc;

    use leptos::prelude::{WithUntracked, provide_context};

    use crate::net::api::{ApiClient, GlooTransport};
    use crate::state::session::{AUTH_STORE_KEY, SessionState, SessionStore};
    use crate::util::browser::redirect_to_root;
    use crate::util::storage::{LocalStorage, StateStorage};

    let storage: Rc<dyn StateStorage> = Rc::new(LocalStorage);
    let session = RwSignal::new(SessionState::default());

    let token_source = move || session.with_untracked(|s| s.token.clone());
    let on_unauthorized = {
        let storage = Rc::clone(&storage);
        move || {
            session.update(|s| {
                s.token = None;
                s.user = None;
            });
            storage.remove(AUTH_STORE_KEY);
            redirect_to_root();
        }
    };

    let api = Rc::new(ApiClient::new(
        config.api_base_url.clone(),
        GlooTransport,
        Rc::new(token_source),
        Rc::new(on_unauthorized),
    ));

    let session_store = SessionStore::new(Rc::clone(&api), Rc::clone(&storage), session);
    let articles_store = articles::ArticlesStore::new(api, storage);

    provide_context(session_store);
    provide_context(articles_store);
}
