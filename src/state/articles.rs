//! Articles store: the server-ordered list plus create/update/delete
//! with mutate-then-reconcile consistency.
//!
//! DESIGN
//! ======
//! Every mutation applies the server-returned change locally first
//! (append, replace-by-id, or filter-by-id), then reconciles against a
//! full refetch. The store never fabricates an id or content; local
//! applies only ever use records the server sent back.

#[cfg(test)]
#[path = "articles_test.rs"]
mod articles_test;

use std::rc::Rc;

use futures::lock::Mutex;
use leptos::prelude::{GetUntracked, RwSignal, Set, Update};
use serde::{Deserialize, Serialize};

use super::FlagGuard;
use crate::net::api::{ApiClient, Transport};
use crate::net::error::{ApiError, FormErrors};
use crate::net::types::{Article, ArticleDraft, ArticleUpdate, ArticlesEnvelope};
use crate::util::storage::StateStorage;

/// localStorage key for the persisted article list.
pub const ARTICLES_STORE_KEY: &str = "articles-store";

/// Article list in server-defined order plus the read/write loading
/// flags. Flags and form errors are transient.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ArticlesState {
    pub articles: Vec<Article>,
    #[serde(skip)]
    pub loading: bool,
    #[serde(skip)]
    pub form_loading: bool,
    #[serde(skip)]
    pub form_errors: FormErrors,
}

/// Store for the article collection.
pub struct ArticlesStore<T: Transport> {
    api: Rc<ApiClient<T>>,
    storage: Rc<dyn StateStorage>,
    state: RwSignal<ArticlesState>,
    read_gate: Rc<Mutex<()>>,
    write_gate: Rc<Mutex<()>>,
}

impl<T: Transport> Clone for ArticlesStore<T> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            storage: Rc::clone(&self.storage),
            state: self.state,
            read_gate: Rc::clone(&self.read_gate),
            write_gate: Rc::clone(&self.write_gate),
        }
    }
}

impl<T: Transport> ArticlesStore<T> {
    pub fn new(api: Rc<ApiClient<T>>, storage: Rc<dyn StateStorage>) -> Self {
        let store = Self {
            api,
            storage,
            state: RwSignal::new(ArticlesState::default()),
            read_gate: Rc::new(Mutex::new(())),
            write_gate: Rc::new(Mutex::new(())),
        };
        store.rehydrate();
        store
    }

    pub fn state(&self) -> RwSignal<ArticlesState> {
        self.state
    }

    /// GET `/articles` and replace the local list.
    ///
    /// # Errors
    ///
    /// A failed fetch is returned untouched; the read path captures no
    /// form errors.
    pub async fn fetch_articles(&self) -> Result<(), ApiError> {
        let _gate = self.read_gate.lock().await;
        let _busy = FlagGuard::raise(self.state, |s| s.loading = true, |s| s.loading = false);

        let envelope = self.api.get::<ArticlesEnvelope>("/articles").await?;
        self.state.update(|s| s.articles = envelope.data.articles);
        self.persist();
        Ok(())
    }

    /// POST `/articles`; appends the server-returned article, then
    /// reconciles. Returns the created article.
    pub async fn create_article(&self, draft: &ArticleDraft) -> Result<Article, ApiError> {
        let _gate = self.write_gate.lock().await;
        let _busy = self.begin_form();

        match self.api.post::<Article>("/articles", draft).await {
            Ok(created) => {
                self.state.update(|s| s.articles.push(created.clone()));
                self.persist();
                self.reconcile().await;
                Ok(created)
            }
            Err(err) => {
                self.capture(&err);
                Err(err)
            }
        }
    }

    /// PUT `/articles/{id}` with partial fields; replaces the matching
    /// local entry, then reconciles.
    pub async fn update_article(&self, id: i64, patch: &ArticleUpdate) -> Result<Article, ApiError> {
        let _gate = self.write_gate.lock().await;
        let _busy = self.begin_form();

        match self.api.put::<Article>(&format!("/articles/{id}"), patch).await {
            Ok(updated) => {
                self.state.update(|s| {
                    if let Some(existing) = s.articles.iter_mut().find(|a| a.id == id) {
                        *existing = updated.clone();
                    }
                });
                self.persist();
                self.reconcile().await;
                Ok(updated)
            }
            Err(err) => {
                self.capture(&err);
                Err(err)
            }
        }
    }

    /// DELETE `/articles/{id}`; drops the matching entry locally, then
    /// reconciles.
    pub async fn delete_article(&self, id: i64) -> Result<(), ApiError> {
        let _gate = self.write_gate.lock().await;
        let _busy = self.begin_form();

        match self.api.delete(&format!("/articles/{id}")).await {
            Ok(_) => {
                self.state.update(|s| s.articles.retain(|a| a.id != id));
                self.persist();
                self.reconcile().await;
                Ok(())
            }
            Err(err) => {
                self.capture(&err);
                Err(err)
            }
        }
    }

    /// Refetch the authoritative list after a mutation. The mutation
    /// already applied server data locally, so a reconcile failure only
    /// warrants a log line.
    async fn reconcile(&self) {
        match self.api.get::<ArticlesEnvelope>("/articles").await {
            Ok(envelope) => {
                self.state.update(|s| s.articles = envelope.data.articles);
                self.persist();
            }
            Err(err) => log::warn!("article reconcile failed: {err}"),
        }
    }

    fn begin_form(&self) -> FlagGuard<ArticlesState> {
        self.state.update(|s| s.form_errors = FormErrors::default());
        FlagGuard::raise(self.state, |s| s.form_loading = true, |s| s.form_loading = false)
    }

    fn capture(&self, err: &ApiError) {
        let errors = FormErrors::from_api_error(err);
        self.state.update(|s| s.form_errors = errors);
    }

    fn persist(&self) {
        match serde_json::to_value(self.state.get_untracked()) {
            Ok(value) => self.storage.save(ARTICLES_STORE_KEY, &value),
            Err(err) => log::warn!("failed to serialize article state: {err}"),
        }
    }

    fn rehydrate(&self) {
        if let Some(value) = self.storage.load(ARTICLES_STORE_KEY) {
            match serde_json::from_value::<ArticlesState>(value) {
                Ok(persisted) => self.state.set(persisted),
                Err(err) => log::warn!("discarding persisted article state: {err}"),
            }
        }
    }
}
