use std::fmt;

use tracing::info;

use crate::api::NhlClient;
use crate::error::ResolutionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoaltenderIdentity {
    pub display_name: String,
    pub id: u64,
}

impl fmt::Display for GoaltenderIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id)
    }
}

/// Picks one goaltender when a name matches several.
pub trait Chooser {
    fn choose(&self, query: &str, candidates: &[GoaltenderIdentity]) -> Result<GoaltenderIdentity, ResolutionError>;
}

/// Parses an `id|last|first|...|G|...` suggestion, returning `None` for skaters and junk.
pub fn parse_goaltender_suggestion(suggestion: &str) -> Option<GoaltenderIdentity> {
    if !suggestion.contains("|G|") {
        return None;
    }

    let mut fields = suggestion.split('|');
    let id = fields.next()?.trim().parse().ok()?;
    let last = fields.next()?;
    let first = fields.next()?;

    Some(GoaltenderIdentity {
        display_name: format!("{first} {last}"),
        id,
    })
}

pub fn select_goaltender(
    query: &str,
    suggestions: &[String],
    chooser: &dyn Chooser,
) -> Result<GoaltenderIdentity, ResolutionError> {
    let mut candidates: Vec<GoaltenderIdentity> = suggestions
        .iter()
        .filter_map(|s| parse_goaltender_suggestion(s))
        .collect();

    match candidates.len() {
        0 => Err(ResolutionError::NotFound(query.to_string())),
        1 => Ok(candidates.remove(0)),
        _ => chooser.choose(query, &candidates),
    }
}

/// Looks `name` up against active players and narrows it to one goaltender.
pub async fn resolve_goaltender(
    client: &NhlClient,
    name: &str,
    chooser: &dyn Chooser,
) -> Result<GoaltenderIdentity, ResolutionError> {
    let suggestions = client.suggest_players(name).await?;
    let goalie = select_goaltender(name, &suggestions, chooser)?;
    info!(goalie = %goalie, "🥅 Resolved goaltender");
    Ok(goalie)
}
