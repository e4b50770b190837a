use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use futures::pin_mut;
use futures::stream::{self, StreamExt};
use tokio::time::sleep;
use tracing::{debug, info, instrument};

use crate::error::{FetchError, RankingError};
use crate::plays::{extract_shot_events, GameRef, PlayRecord, ShotEvent};

/// Where game play-by-play comes from. The HTTP client implements this; tests use in-memory maps.
#[async_trait]
pub trait GameSource: Send + Sync {
    async fn fetch_plays(&self, game: &GameRef) -> Result<Vec<PlayRecord>, FetchError>;
}

/// Season totals for one shooter. `shots >= 1` and `goals <= shots` hold for every stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShooterRecord {
    pub name: String,
    pub goals: u32,
    pub shots: u32,
}

/// Per-shooter goals and shots, keyed by the shooter's player id.
#[derive(Debug, Clone, Default)]
pub struct ShooterTally {
    by_shooter: HashMap<u64, ShooterRecord>,
}

impl ShooterTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: &ShotEvent) {
        let entry = self
            .by_shooter
            .entry(event.shooter_id)
            .or_insert_with(|| ShooterRecord {
                name: event.shooter_name.clone(),
                goals: 0,
                shots: 0,
            });
        entry.shots += 1;
        if event.was_goal {
            entry.goals += 1;
        }
    }

    pub fn get(&self, shooter_id: u64) -> Option<&ShooterRecord> {
        self.by_shooter.get(&shooter_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &ShooterRecord)> {
        self.by_shooter.iter().map(|(id, record)| (*id, record))
    }

    pub fn len(&self) -> usize {
        self.by_shooter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_shooter.is_empty()
    }
}

impl Extend<ShotEvent> for ShooterTally {
    fn extend<I: IntoIterator<Item = ShotEvent>>(&mut self, events: I) {
        for event in events {
            self.record(&event);
        }
    }
}

impl FromIterator<ShotEvent> for ShooterTally {
    fn from_iter<I: IntoIterator<Item = ShotEvent>>(events: I) -> Self {
        let mut tally = ShooterTally::new();
        tally.extend(events);
        tally
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// Maximum number of game payloads in flight at once.
    pub concurrency: usize,
    /// Pause before each game request is started, whatever the concurrency.
    pub delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            delay: Duration::ZERO,
        }
    }
}

#[instrument(skip_all, fields(game = %game))]
async fn fetch_game<S>(source: &S, game: &GameRef) -> Result<Vec<PlayRecord>, RankingError>
where
    S: GameSource + ?Sized,
{
    debug!(link = %game.link, "fetching play-by-play");
    source
        .fetch_plays(game)
        .await
        .map_err(|source| RankingError::Fetch {
            game: game.clone(),
            source,
        })
}

/// Folds every game's shot events against `goalie_id` into one tally.
///
/// Fetches run with bounded concurrency but are folded one at a time in schedule order.
/// Request starts are paced by `options.delay` before they reach the concurrent stage.
/// The first fetch or extraction failure aborts the whole season.
pub async fn aggregate_season<S>(
    source: &S,
    games: &[GameRef],
    goalie_id: u64,
    options: FetchOptions,
) -> Result<ShooterTally, RankingError>
where
    S: GameSource + ?Sized,
{
    let total = games.len();
    let delay = options.delay;
    let fetches = stream::iter(games)
        .then(|game| async move {
            if !delay.is_zero() {
                sleep(delay).await;
            }
            game
        })
        .map(|game| async move { fetch_game(source, game).await.map(|plays| (game, plays)) })
        .buffered(options.concurrency.max(1));
    pin_mut!(fetches);

    let mut tally = ShooterTally::new();
    let mut processed = 0;
    while let Some(fetched) = fetches.next().await {
        let (game, plays) = fetched?;
        let events = extract_shot_events(game, &plays, goalie_id)?;
        processed += 1;
        info!(
            game = %game,
            date = ?game.date,
            shots = events.len(),
            "📊 Processed game {}/{}",
            processed,
            total
        );
        tally.extend(events);
    }

    Ok(tally)
}
