use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ApiError, FetchError};
use crate::plays::{GameRef, LiveFeed, PlayRecord};
use crate::season::Season;
use crate::tally::GameSource;

const USER_AGENT: &str = "NHL Goalie Report 0.1";
const SUGGESTION_LIMIT: u32 = 25;

#[derive(Deserialize)]
struct SuggestResponse {
    #[serde(default)]
    suggestions: Vec<String>,
}

#[derive(Deserialize)]
struct GameLogResponse {
    #[serde(default)]
    stats: Vec<StatGroup>,
}

#[derive(Deserialize)]
struct StatGroup {
    #[serde(default)]
    splits: Vec<GameSplit>,
}

#[derive(Deserialize)]
struct GameSplit {
    date: Option<NaiveDate>,
    game: GameLink,
}

#[derive(Deserialize)]
struct GameLink {
    #[serde(rename = "gamePk")]
    game_pk: u64,
    link: String,
}

/// Thin client over the NHL suggest and stats APIs.
pub struct NhlClient {
    client: reqwest::Client,
    stats_api: String,
    suggest_api: String,
}

impl NhlClient {
    pub fn new(stats_api: &str, suggest_api: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(2)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            stats_api: stats_api.trim_end_matches('/').to_string(),
            suggest_api: suggest_api.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;

        if response.status().is_success() {
            response.json().await.map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })
        } else {
            Err(ApiError::Status {
                url: url.to_string(),
                status: response.status(),
            })
        }
    }

    /// Raw `id|last|first|...` suggestion strings for active players matching `name`.
    pub async fn suggest_players(&self, name: &str) -> Result<Vec<String>, ApiError> {
        let url = suggest_url(&self.suggest_api, name)?;
        let response: SuggestResponse = self.get_json(url).await?;
        Ok(response.suggestions)
    }

    /// Regular-season games the goaltender appeared in, in game-log order.
    pub async fn game_log(&self, goalie_id: u64, season: Season) -> Result<Vec<GameRef>, ApiError> {
        let url = game_log_url(&self.stats_api, goalie_id, season)?;
        let response: GameLogResponse = self.get_json(url).await?;
        Ok(games_from_log(response))
    }
}

#[async_trait]
impl GameSource for NhlClient {
    async fn fetch_plays(&self, game: &GameRef) -> Result<Vec<PlayRecord>, FetchError> {
        let url = parse_url(&format!("{}{}", self.stats_api, game.link))?;
        let feed: LiveFeed = self.get_json(url).await?;
        Ok(feed.into_plays())
    }
}

fn parse_url(raw: &str) -> Result<Url, ApiError> {
    Url::parse(raw).map_err(|e| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

fn suggest_url(base: &str, name: &str) -> Result<Url, ApiError> {
    let mut url = parse_url(base)?;
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl {
            url: base.to_string(),
            reason: "cannot be a base URL".to_string(),
        })?
        .pop_if_empty()
        .extend(["svc", "suggest", "v1", "minactiveplayers", name])
        .push(&SUGGESTION_LIMIT.to_string());
    Ok(url)
}

fn game_log_url(base: &str, goalie_id: u64, season: Season) -> Result<Url, ApiError> {
    let mut url = parse_url(&format!("{base}/api/v1/people/{goalie_id}/stats"))?;
    url.query_pairs_mut()
        .append_pair("stats", "gameLog")
        .append_pair("season", &season.api_id())
        .append_pair("gameType", "R");
    Ok(url)
}

fn games_from_log(response: GameLogResponse) -> Vec<GameRef> {
    response
        .stats
        .into_iter()
        .next()
        .map(|group| {
            group
                .splits
                .into_iter()
                .map(|split| GameRef {
                    game_pk: split.game.game_pk,
                    link: split.game.link,
                    date: split.date,
                })
                .collect()
        })
        .unwrap_or_default()
}
