//! Ranks the skaters who scored most often against one goaltender over a regular season.
//!
//! The pipeline runs play extraction ([`plays`]), season aggregation ([`tally`]),
//! ranking ([`ranking`]) and text rendering ([`report`]). Network access lives behind
//! the [`tally::GameSource`] trait so the core can run against in-memory games.

pub mod api;
pub mod config;
pub mod error;
pub mod plays;
pub mod ranking;
pub mod report;
pub mod resolver;
pub mod season;
pub mod tally;

use crate::error::RankingError;
use crate::plays::GameRef;
use crate::ranking::{rank, RankOrder, RankedRow};
use crate::tally::{aggregate_season, FetchOptions, GameSource};

/// Fetches every game, tallies shots against `goalie_id` and returns the ordered ranking.
pub async fn compute_season_ranking<S>(
    goalie_id: u64,
    games: &[GameRef],
    source: &S,
    fetch: FetchOptions,
    order: RankOrder,
) -> Result<Vec<RankedRow>, RankingError>
where
    S: GameSource + ?Sized,
{
    let tally = aggregate_season(source, games, goalie_id, fetch).await?;
    Ok(rank(&tally, order))
}
