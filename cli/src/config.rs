use std::time::Duration;

use crate::ranking::RankOrder;
use crate::tally::FetchOptions;

pub const DEFAULT_STATS_API: &str = "https://statsapi.web.nhl.com";
pub const DEFAULT_SUGGEST_API: &str = "https://suggest.svc.nhl.com";

/// Everything a run needs beyond the goaltender and season.
#[derive(Debug, Clone)]
pub struct Config {
    pub stats_api: String,
    pub suggest_api: String,
    pub timeout: Duration,
    pub fetch: FetchOptions,
    pub order: RankOrder,
}
