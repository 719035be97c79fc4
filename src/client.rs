/// High-level Purrr.love client.
///
/// Typed wrappers for every endpoint of the Purrr.love API. Each method
/// builds its request, hands it to the [`Executor`] and decodes the `data`
/// payload of the response.
use log::debug;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::errors::PurrrError;
use crate::executor::{Executor, QueryParams};
use crate::models::*;

/// The Purrr.love API client.
#[derive(Debug, Clone)]
pub struct PurrrClient {
    executor: Executor,
}

impl PurrrClient {
    /// Create a client from an explicit configuration.
    pub fn new(config: ClientConfig) -> Result<Self, PurrrError> {
        Ok(Self {
            executor: Executor::new(config)?,
        })
    }

    /// Create a client for the production API with the given key.
    pub fn with_api_key(api_key: &str) -> Result<Self, PurrrError> {
        Self::new(ClientConfig::default().with_api_key(api_key))
    }

    /// Create a client configured from `PURRR_LOVE_BASE_URL` / `PURRR_LOVE_API_KEY`.
    pub fn from_env() -> Result<Self, PurrrError> {
        Self::new(ClientConfig::from_env())
    }

    /// Replace the API key used for all subsequent requests.
    pub fn authenticate(&mut self, api_key: &str) -> Result<(), PurrrError> {
        debug!("client.authenticate");
        self.executor.authenticate(api_key)
    }

    /// The underlying executor, for endpoints this client does not wrap.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    // -----------------------------------------------------------------------
    // Cat Management
    // -----------------------------------------------------------------------

    /// GET /api/v1/cats - List the caller's cats.
    pub async fn get_cats(&self, limit: u32, offset: u32) -> Result<Vec<Cat>, PurrrError> {
        debug!("client.get_cats limit={} offset={}", limit, offset);
        let query = QueryParams::new()
            .push("limit", limit)
            .push("offset", offset);
        self.executor
            .get("/api/v1/cats", Some(&query))
            .await?
            .decode_list()
    }

    /// GET /api/v1/cats/{id} - Fetch one cat.
    pub async fn get_cat(&self, cat_id: i64) -> Result<Cat, PurrrError> {
        debug!("client.get_cat cat_id={}", cat_id);
        self.executor
            .get(&format!("/api/v1/cats/{cat_id}"), None)
            .await?
            .decode()
    }

    /// POST /api/v1/cats - Create a cat.
    pub async fn create_cat(&self, cat: &NewCat) -> Result<Cat, PurrrError> {
        debug!(
            "client.create_cat name={} personality_type={} breed={}",
            cat.name, cat.personality_type, cat.breed
        );
        let body = encode_body(cat)?;
        self.executor
            .post("/api/v1/cats", Some(&body))
            .await?
            .decode()
    }

    /// PUT /api/v1/cats/{id} - Update a cat.
    pub async fn update_cat(&self, cat_id: i64, update: &CatUpdate) -> Result<Cat, PurrrError> {
        debug!("client.update_cat cat_id={}", cat_id);
        if update.is_empty() {
            return Err(PurrrError::validation("no fields to update", None));
        }
        let body = encode_body(update)?;
        self.executor
            .put(&format!("/api/v1/cats/{cat_id}"), &body)
            .await?
            .decode()
    }

    /// DELETE /api/v1/cats/{id} - Delete a cat.
    pub async fn delete_cat(&self, cat_id: i64) -> Result<(), PurrrError> {
        debug!("client.delete_cat cat_id={}", cat_id);
        self.executor
            .delete(&format!("/api/v1/cats/{cat_id}"))
            .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Cat Activities
    // -----------------------------------------------------------------------

    /// POST /api/v1/cats/{id}/play - Play a game with a cat.
    pub async fn play_with_cat(
        &self,
        cat_id: i64,
        game_type: GameType,
        duration_minutes: u32,
    ) -> Result<Value, PurrrError> {
        debug!(
            "client.play_with_cat cat_id={} game_type={} duration={}",
            cat_id, game_type, duration_minutes
        );
        let body = json!({
            "game_type": game_type,
            "duration": duration_minutes,
        });
        self.post_payload(&format!("/api/v1/cats/{cat_id}/play"), Some(&body))
            .await
    }

    /// POST /api/v1/cats/{id}/train - Train a cat.
    pub async fn train_cat(
        &self,
        cat_id: i64,
        command: &str,
        difficulty: &str,
    ) -> Result<Value, PurrrError> {
        debug!(
            "client.train_cat cat_id={} command={} difficulty={}",
            cat_id, command, difficulty
        );
        let body = json!({
            "command": command,
            "difficulty": difficulty,
        });
        self.post_payload(&format!("/api/v1/cats/{cat_id}/train"), Some(&body))
            .await
    }

    /// POST /api/v1/cats/{id}/care - Care for a cat. `params` carries
    /// care-specific fields such as `food_type`.
    pub async fn care_for_cat(
        &self,
        cat_id: i64,
        care_type: CareType,
        params: &Params,
    ) -> Result<Value, PurrrError> {
        debug!(
            "client.care_for_cat cat_id={} care_type={} params={}",
            cat_id,
            care_type,
            params.len()
        );
        let body = merge_params("care_type", json!(care_type), params);
        self.post_payload(&format!("/api/v1/cats/{cat_id}/care"), Some(&body))
            .await
    }

    // -----------------------------------------------------------------------
    // VR Interactions
    // -----------------------------------------------------------------------

    /// POST /api/v1/cats/{id}/vr_interaction - Start a VR session.
    pub async fn start_vr_session(
        &self,
        cat_id: i64,
        vr_device: &str,
    ) -> Result<Value, PurrrError> {
        debug!(
            "client.start_vr_session cat_id={} vr_device={}",
            cat_id, vr_device
        );
        let body = json!({ "vr_device": vr_device });
        self.post_payload(
            &format!("/api/v1/cats/{cat_id}/vr_interaction"),
            Some(&body),
        )
        .await
    }

    /// POST /api/v1/vr/{session_id}/interact - Interact inside a VR session.
    pub async fn vr_interact(
        &self,
        session_id: &str,
        interaction_type: &str,
        params: &Params,
    ) -> Result<Value, PurrrError> {
        debug!(
            "client.vr_interact session_id={} interaction_type={}",
            session_id, interaction_type
        );
        let body = merge_params("interaction_type", json!(interaction_type), params);
        self.post_payload(&format!("/api/v1/vr/{session_id}/interact"), Some(&body))
            .await
    }

    // -----------------------------------------------------------------------
    // AI Learning
    // -----------------------------------------------------------------------

    /// GET /api/v1/cats/{id}/ai_learning - AI learning insights.
    pub async fn get_ai_insights(&self, cat_id: i64) -> Result<Value, PurrrError> {
        debug!("client.get_ai_insights cat_id={}", cat_id);
        self.get_payload(&format!("/api/v1/cats/{cat_id}/ai_learning"), None)
            .await
    }

    // -----------------------------------------------------------------------
    // Trading
    // -----------------------------------------------------------------------

    /// GET /api/v1/trading/offers - Available trading offers.
    pub async fn get_trading_offers(
        &self,
        filters: Option<&QueryParams>,
    ) -> Result<Vec<TradingOffer>, PurrrError> {
        debug!(
            "client.get_trading_offers filters={}",
            filters.map_or(0, QueryParams::len)
        );
        self.executor
            .get("/api/v1/trading/offers", filters)
            .await?
            .decode_list()
    }

    /// POST /api/v1/trading/offers - Put a cat up for trade.
    pub async fn create_trading_offer(
        &self,
        offer: &NewTradingOffer,
    ) -> Result<TradingOffer, PurrrError> {
        debug!(
            "client.create_trading_offer cat_id={} price={} currency={}",
            offer.cat_id, offer.price, offer.currency
        );
        let body = encode_body(offer)?;
        self.executor
            .post("/api/v1/trading/offers", Some(&body))
            .await?
            .decode()
    }

    /// POST /api/v1/trading/offers/{id}/accept - Accept an offer.
    pub async fn accept_trading_offer(&self, offer_id: i64) -> Result<Value, PurrrError> {
        debug!("client.accept_trading_offer offer_id={}", offer_id);
        self.post_payload(&format!("/api/v1/trading/offers/{offer_id}/accept"), None)
            .await
    }

    // -----------------------------------------------------------------------
    // Cat Shows
    // -----------------------------------------------------------------------

    /// GET /api/v1/shows - Available cat shows.
    pub async fn get_cat_shows(
        &self,
        filters: Option<&QueryParams>,
    ) -> Result<Vec<CatShow>, PurrrError> {
        debug!(
            "client.get_cat_shows filters={}",
            filters.map_or(0, QueryParams::len)
        );
        self.executor
            .get("/api/v1/shows", filters)
            .await?
            .decode_list()
    }

    /// POST /api/v1/shows/{id}/register - Enter a cat into a show.
    pub async fn register_cat_for_show(
        &self,
        cat_id: i64,
        show_id: i64,
        categories: &[&str],
    ) -> Result<Value, PurrrError> {
        debug!(
            "client.register_cat_for_show cat_id={} show_id={} categories={:?}",
            cat_id, show_id, categories
        );
        let body = json!({
            "cat_id": cat_id,
            "show_id": show_id,
            "categories": categories,
        });
        self.post_payload(&format!("/api/v1/shows/{show_id}/register"), Some(&body))
            .await
    }

    // -----------------------------------------------------------------------
    // Multiplayer
    // -----------------------------------------------------------------------

    /// POST /api/v1/multiplayer/join - Join a multiplayer room.
    pub async fn join_multiplayer_room(
        &self,
        cat_id: i64,
        room_type: &str,
    ) -> Result<Value, PurrrError> {
        debug!(
            "client.join_multiplayer_room cat_id={} room_type={}",
            cat_id, room_type
        );
        let body = json!({
            "cat_id": cat_id,
            "room_type": room_type,
        });
        self.post_payload("/api/v1/multiplayer/join", Some(&body))
            .await
    }

    /// POST /api/v1/multiplayer/{session_id}/action - Act in a room.
    pub async fn multiplayer_action(
        &self,
        session_id: &str,
        action_type: &str,
        params: &Params,
    ) -> Result<Value, PurrrError> {
        debug!(
            "client.multiplayer_action session_id={} action_type={}",
            session_id, action_type
        );
        let body = merge_params("action_type", json!(action_type), params);
        self.post_payload(
            &format!("/api/v1/multiplayer/{session_id}/action"),
            Some(&body),
        )
        .await
    }

    // -----------------------------------------------------------------------
    // Health Monitoring
    // -----------------------------------------------------------------------

    /// POST /api/v1/cats/{id}/health_monitoring - Register a health device.
    pub async fn register_health_device(
        &self,
        cat_id: i64,
        device_data: &Params,
    ) -> Result<Value, PurrrError> {
        debug!(
            "client.register_health_device cat_id={} fields={}",
            cat_id,
            device_data.len()
        );
        let body = Value::Object(device_data.clone());
        self.post_payload(
            &format!("/api/v1/cats/{cat_id}/health_monitoring"),
            Some(&body),
        )
        .await
    }

    /// GET /api/v1/cats/{id}/health - Health summary over a timeframe (e.g. `7d`).
    pub async fn get_health_summary(
        &self,
        cat_id: i64,
        timeframe: &str,
    ) -> Result<Value, PurrrError> {
        debug!(
            "client.get_health_summary cat_id={} timeframe={}",
            cat_id, timeframe
        );
        let query = QueryParams::new().push("timeframe", timeframe);
        self.get_payload(&format!("/api/v1/cats/{cat_id}/health"), Some(&query))
            .await
    }

    // -----------------------------------------------------------------------
    // API Key Management
    // -----------------------------------------------------------------------

    /// GET /api/v1/keys - The caller's API keys.
    pub async fn get_api_keys(&self) -> Result<Vec<ApiKey>, PurrrError> {
        debug!("client.get_api_keys");
        self.executor
            .get("/api/v1/keys", None)
            .await?
            .decode_list()
    }

    /// POST /api/v1/keys - Create an API key.
    pub async fn create_api_key(&self, key: &NewApiKey) -> Result<ApiKey, PurrrError> {
        debug!(
            "client.create_api_key name={} scopes={:?}",
            key.name, key.scopes
        );
        let body = encode_body(key)?;
        self.executor
            .post("/api/v1/keys", Some(&body))
            .await?
            .decode()
    }

    /// DELETE /api/v1/keys/{id} - Revoke an API key.
    pub async fn revoke_api_key(&self, key_id: i64) -> Result<(), PurrrError> {
        debug!("client.revoke_api_key key_id={}", key_id);
        self.executor
            .delete(&format!("/api/v1/keys/{key_id}"))
            .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Analytics
    // -----------------------------------------------------------------------

    /// GET /api/v1/cats/{id}/analytics - Cat analytics. Each metric is sent as
    /// a repeated `metrics` query parameter.
    pub async fn get_cat_analytics(
        &self,
        cat_id: i64,
        timeframe: &str,
        metrics: &[&str],
    ) -> Result<Value, PurrrError> {
        debug!(
            "client.get_cat_analytics cat_id={} timeframe={} metrics={:?}",
            cat_id, timeframe, metrics
        );
        let query = QueryParams::new()
            .push("timeframe", timeframe)
            .push_all("metrics", metrics);
        self.get_payload(&format!("/api/v1/cats/{cat_id}/analytics"), Some(&query))
            .await
    }

    /// GET /api/v1/user/stats - Statistics for the calling user.
    pub async fn get_user_stats(&self) -> Result<Value, PurrrError> {
        debug!("client.get_user_stats");
        self.get_payload("/api/v1/user/stats", None).await
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn get_payload(
        &self,
        path: &str,
        query: Option<&QueryParams>,
    ) -> Result<Value, PurrrError> {
        let envelope = self.executor.get(path, query).await?;
        Ok(envelope.into_payload())
    }

    async fn post_payload(&self, path: &str, body: Option<&Value>) -> Result<Value, PurrrError> {
        let envelope = self.executor.post(path, body).await?;
        Ok(envelope.into_payload())
    }
}

fn encode_body<T: Serialize>(value: &T) -> Result<Value, PurrrError> {
    serde_json::to_value(value)
        .map_err(|e| PurrrError::validation(format!("failed to encode request body: {e}"), None))
}

/// Build a body from one required field plus caller-supplied extras.
/// The required field wins over an extra of the same name.
fn merge_params(key: &str, value: Value, params: &Params) -> Value {
    let mut body = params.clone();
    body.insert(key.to_string(), value);
    Value::Object(body)
}
