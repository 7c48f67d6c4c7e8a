//! Per-user datastore on the hosted backend.
//!
//! CRUD over JSON endpoints keyed by user id / game id. PUT is an upsert:
//! the backend creates the document when it doesn't exist yet.

use serde_json::{json, Value};
use url::Url;

use crate::error::{ApiError, CoreError, Result};
use crate::games::client::unwrap_envelope;
use crate::games::Game;

use super::BackendSession;

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Datastore client, bound to an authenticated session.
pub struct UserStore {
    base: Url,
    session: BackendSession,
    http: reqwest::Client,
    rt: tokio::runtime::Runtime,
}

impl UserStore {
    pub fn new(base_url: &str, session: BackendSession) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| CoreError::Api(ApiError::InvalidUrl(e.to_string())))?;
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CoreError::Api(e.into()))?;
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CoreError::Api(ApiError::Runtime(e.to_string())))?;
        Ok(Self {
            base,
            session,
            http,
            rt,
        })
    }

    /// The user's tracked-game list.
    pub fn fetch_game_list(&self) -> Result<Vec<Game>> {
        let body = self.get(&format!("users/{}/games", self.session.user_id))?;
        let games = body
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .filter_map(|s| s.parse::<Game>().ok())
                    .collect()
            })
            .unwrap_or_default();
        Ok(games)
    }

    /// Replace the user's tracked-game list.
    pub fn put_game_list(&self, games: &[Game]) -> Result<()> {
        let names: Vec<&str> = games.iter().map(Game::as_str).collect();
        self.put(
            &format!("users/{}/games", self.session.user_id),
            json!(names),
        )?;
        Ok(())
    }

    /// The stored stats blob for one game, if any.
    pub fn fetch_stats(&self, game: Game) -> Result<Option<Value>> {
        match self.get(&format!(
            "users/{}/games/{}/stats",
            self.session.user_id, game
        )) {
            Ok(v) if v.is_null() => Ok(None),
            Ok(v) => Ok(Some(v)),
            Err(CoreError::Api(ApiError::Http { status: 404 })) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Upsert the stats blob for one game.
    pub fn put_stats(&self, game: Game, stats: Value) -> Result<()> {
        self.put(
            &format!("users/{}/games/{}/stats", self.session.user_id, game),
            stats,
        )?;
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn get(&self, path: &str) -> Result<Value> {
        let url = self.url(path)?;
        tracing::debug!(%url, "backend GET");
        let body: Value = self
            .rt
            .block_on(async {
                let resp = self
                    .http
                    .get(url)
                    .bearer_auth(&self.session.token)
                    .send()
                    .await?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(ApiError::Http {
                        status: status.as_u16(),
                    });
                }
                Ok::<_, ApiError>(resp.json().await?)
            })
            .map_err(CoreError::Api)?;
        unwrap_envelope(body).map_err(CoreError::Api)
    }

    fn put(&self, path: &str, body: Value) -> Result<Value> {
        let url = self.url(path)?;
        tracing::debug!(%url, "backend PUT");
        let body: Value = self
            .rt
            .block_on(async {
                let resp = self
                    .http
                    .put(url)
                    .bearer_auth(&self.session.token)
                    .json(&body)
                    .send()
                    .await?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(ApiError::Http {
                        status: status.as_u16(),
                    });
                }
                Ok::<_, ApiError>(resp.json().await.unwrap_or(Value::Null))
            })
            .map_err(CoreError::Api)?;
        Ok(body)
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| CoreError::Api(ApiError::InvalidUrl(e.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> BackendSession {
        BackendSession {
            token: "tok".into(),
            user_id: "u1".into(),
            email: "a@b.c".into(),
        }
    }

    #[test]
    fn fetches_game_list() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/users/u1/games")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": ["dota2", "osrs", "unknown"]}"#)
            .create();

        let store = UserStore::new(&server.url(), session()).unwrap();
        let games = store.fetch_game_list().unwrap();
        assert_eq!(games, vec![Game::Dota2, Game::Osrs]);
        mock.assert();
    }

    #[test]
    fn puts_game_list() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("PUT", "/users/u1/games")
            .match_body(mockito::Matcher::Json(serde_json::json!(["dota2", "league"])))
            .with_status(200)
            .with_body("{}")
            .create();

        let store = UserStore::new(&server.url(), session()).unwrap();
        store
            .put_game_list(&[Game::Dota2, Game::League])
            .unwrap();
        mock.assert();
    }

    #[test]
    fn missing_stats_blob_is_none() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/users/u1/games/valorant/stats")
            .with_status(404)
            .create();

        let store = UserStore::new(&server.url(), session()).unwrap();
        assert!(store.fetch_stats(Game::Valorant).unwrap().is_none());
    }
}
