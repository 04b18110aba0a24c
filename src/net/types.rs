//! Wire types shared with the REST backend.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Authenticated user profile. Auth responses replace it wholesale;
/// it is never merged field-by-field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// An article as served by the backend. `created_at` stays the
/// server's string; the client only displays it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

/// Body for `POST /auth/register`.
#[derive(Clone, Debug, Serialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Body for `POST /auth/login`.
#[derive(Clone, Debug, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Body for `POST /user`.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateProfileForm {
    pub name: String,
    pub email: String,
}

/// Body for `POST /user/password`.
#[derive(Clone, Debug, Serialize)]
pub struct UpdatePasswordForm {
    pub current_password: String,
    pub password: String,
    pub password_confirmation: String,
}

/// `{access_token, user}` returned by register and login.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

/// Body for `POST /articles`.
#[derive(Clone, Debug, Serialize)]
pub struct ArticleDraft {
    pub title: String,
    pub excerpt: String,
    pub content: String,
}

/// Partial body for `PUT /articles/{id}`; absent fields are left
/// unchanged by the server.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ArticleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// `GET /articles` envelope: `{data: {articles: [...]}}`. Missing
/// levels deserialize to an empty list.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ArticlesEnvelope {
    #[serde(default)]
    pub data: ArticlesPage,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ArticlesPage {
    #[serde(default)]
    pub articles: Vec<Article>,
}
