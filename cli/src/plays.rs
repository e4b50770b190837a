use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ExtractionError;

/// One game in a goaltender's season log.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameRef {
    pub game_pk: u64,
    /// Path of the live feed relative to the stats API root.
    pub link: String,
    pub date: Option<NaiveDate>,
}

impl fmt::Display for GameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.game_pk)
    }
}

#[derive(Debug, Deserialize)]
pub struct LiveFeed {
    #[serde(rename = "liveData")]
    pub live_data: LiveData,
}

#[derive(Debug, Deserialize)]
pub struct LiveData {
    pub plays: Plays,
}

#[derive(Debug, Deserialize)]
pub struct Plays {
    #[serde(rename = "allPlays", default)]
    pub all_plays: Vec<PlayRecord>,
}

impl LiveFeed {
    pub fn into_plays(self) -> Vec<PlayRecord> {
        self.live_data.plays.all_plays
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayRecord {
    /// Absent on stoppages and other plays with nobody involved.
    pub players: Option<Vec<Participant>>,
    pub result: PlayResult,
    /// Missing on some older feeds; the play's position in the feed stands in for its index.
    #[serde(default)]
    pub about: Option<PlayAbout>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayResult {
    #[serde(rename = "eventTypeId")]
    pub event_type: EventType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayAbout {
    #[serde(rename = "eventIdx")]
    pub event_idx: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Shot,
    Goal,
    MissedShot,
    BlockedShot,
    Faceoff,
    Penalty,
    #[serde(other)]
    Other,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventType::Shot => "shot",
            EventType::Goal => "goal",
            EventType::MissedShot => "missed shot",
            EventType::BlockedShot => "blocked shot",
            EventType::Faceoff => "faceoff",
            EventType::Penalty => "penalty",
            EventType::Other => "other",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Participant {
    pub player: PlayerIdentity,
    #[serde(rename = "playerType")]
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerIdentity {
    pub id: u64,
    #[serde(rename = "fullName")]
    pub full_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Role {
    Shooter,
    Scorer,
    Goalie,
    Assist,
    #[serde(other)]
    Other,
}

/// A shot on goal or goal by one skater against the goaltender being analysed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotEvent {
    pub shooter_id: u64,
    pub shooter_name: String,
    pub was_goal: bool,
}

/// Pulls every shot and goal faced by `goalie_id` out of one game's plays, in feed order.
pub fn extract_shot_events(
    game: &GameRef,
    plays: &[PlayRecord],
    goalie_id: u64,
) -> Result<Vec<ShotEvent>, ExtractionError> {
    let mut events = Vec::new();

    for (position, play) in plays.iter().enumerate() {
        let Some(participants) = &play.players else {
            continue;
        };

        if !participants.iter().any(|p| p.player.id == goalie_id) {
            continue;
        }

        let event_type = play.result.event_type;
        let shooter_role = match event_type {
            EventType::Shot => Role::Shooter,
            EventType::Goal => Role::Scorer,
            _ => continue,
        };

        let shooter = participants
            .iter()
            .find(|p| p.role == shooter_role)
            .ok_or_else(|| ExtractionError::MissingShooter {
                game: game.clone(),
                event_idx: play
                    .about
                    .as_ref()
                    .map_or(position as u32, |about| about.event_idx),
                event_type,
            })?;

        events.push(ShotEvent {
            shooter_id: shooter.player.id,
            shooter_name: shooter.player.full_name.clone(),
            was_goal: event_type == EventType::Goal,
        });
    }

    Ok(events)
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const GOALIE: u64 = 8471679;

    fn goal_by(id: u64, name: &str, idx: u32) -> PlayRecord {
        play(
            idx,
            EventType::Goal,
            Some(vec![
                participant(id, name, Role::Scorer),
                participant(8470000, "Some Helper", Role::Assist),
                participant(GOALIE, "Carey Price", Role::Goalie),
            ]),
        )
    }

    fn shot_by(id: u64, name: &str, idx: u32) -> PlayRecord {
        play(
            idx,
            EventType::Shot,
            Some(vec![
                participant(id, name, Role::Shooter),
                participant(GOALIE, "Carey Price", Role::Goalie),
            ]),
        )
    }

    #[test]
    fn goal_against_goalie_yields_scoring_event() {
        let events = extract_shot_events(&game(1), &[goal_by(42, "X", 7)], GOALIE).unwrap();
        assert_eq!(
            events,
            vec![ShotEvent {
                shooter_id: 42,
                shooter_name: "X".to_string(),
                was_goal: true,
            }]
        );
    }

    #[rstest]
    #[case(EventType::MissedShot)]
    #[case(EventType::BlockedShot)]
    #[case(EventType::Faceoff)]
    #[case(EventType::Penalty)]
    #[case(EventType::Other)]
    fn non_shot_events_are_ignored(#[case] event_type: EventType) {
        let mut record = goal_by(42, "X", 7);
        record.result.event_type = event_type;
        let events = extract_shot_events(&game(1), &[record], GOALIE).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn plays_without_goalie_or_players_are_skipped() {
        let plays = vec![
            play(0, EventType::Other, None),
            play(
                1,
                EventType::Shot,
                Some(vec![
                    participant(42, "X", Role::Shooter),
                    participant(1, "Backup Goalie", Role::Goalie),
                ]),
            ),
        ];
        let events = extract_shot_events(&game(1), &plays, GOALIE).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn keeps_feed_order_and_duplicates() {
        let plays = vec![
            shot_by(42, "X", 1),
            shot_by(43, "Y", 2),
            goal_by(42, "X", 3),
            shot_by(42, "X", 4),
        ];
        let events = extract_shot_events(&game(1), &plays, GOALIE).unwrap();
        let summary: Vec<(&str, bool)> = events
            .iter()
            .map(|e| (e.shooter_name.as_str(), e.was_goal))
            .collect();
        assert_eq!(
            summary,
            vec![("X", false), ("Y", false), ("X", true), ("X", false)]
        );
    }

    #[test]
    fn shot_without_shooter_is_an_error() {
        let orphan = play(
            11,
            EventType::Shot,
            Some(vec![participant(GOALIE, "Carey Price", Role::Goalie)]),
        );
        let err = extract_shot_events(&game(2019020001), &[shot_by(42, "X", 1), orphan], GOALIE)
            .unwrap_err();
        assert_eq!(
            err,
            ExtractionError::MissingShooter {
                game: game(2019020001),
                event_idx: 11,
                event_type: EventType::Shot,
            }
        );
        assert!(err.to_string().contains("2019020001"));
    }

    #[test]
    fn goal_credits_scorer_not_assist() {
        let events = extract_shot_events(&game(1), &[goal_by(42, "X", 7)], GOALIE).unwrap();
        assert_eq!(events[0].shooter_id, 42);
    }

    #[test]
    fn plays_without_about_still_decode_and_extract() {
        let json = r#"{
            "liveData": { "plays": { "allPlays": [
                {
                    "players": [
                        { "player": { "id": 42, "fullName": "X" }, "playerType": "Shooter" },
                        { "player": { "id": 8471679, "fullName": "Carey Price" }, "playerType": "Goalie" }
                    ],
                    "result": { "eventTypeId": "SHOT" }
                },
                {
                    "players": [
                        { "player": { "id": 8471679, "fullName": "Carey Price" }, "playerType": "Goalie" }
                    ],
                    "result": { "eventTypeId": "GOAL" }
                }
            ] } }
        }"#;
        let plays = serde_json::from_str::<LiveFeed>(json).unwrap().into_plays();
        assert!(plays.iter().all(|p| p.about.is_none()));

        let events = extract_shot_events(&game(1), &plays[..1], GOALIE).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].shooter_name, "X");

        let err = extract_shot_events(&game(1), &plays, GOALIE).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::MissingShooter {
                game: game(1),
                event_idx: 1,
                event_type: EventType::Goal,
            }
        );
    }

    #[test]
    fn decodes_feed_event_types() {
        let json = r#"{
            "liveData": { "plays": { "allPlays": [
                { "result": { "eventTypeId": "GAME_SCHEDULED" }, "about": { "eventIdx": 0 } },
                {
                    "players": [
                        { "player": { "id": 42, "fullName": "X", "link": "/api/v1/people/42" }, "playerType": "Shooter" },
                        { "player": { "id": 8471679, "fullName": "Carey Price" }, "playerType": "Goalie" }
                    ],
                    "result": { "event": "Shot", "eventTypeId": "SHOT" },
                    "about": { "eventIdx": 1, "period": 1 }
                },
                {
                    "players": [
                        { "player": { "id": 42, "fullName": "X" }, "playerType": "Shooter" }
                    ],
                    "result": { "eventTypeId": "MISSED_SHOT" },
                    "about": { "eventIdx": 2 }
                }
            ] } }
        }"#;
        let plays = serde_json::from_str::<LiveFeed>(json).unwrap().into_plays();
        assert_eq!(plays.len(), 3);
        assert_eq!(plays[0].result.event_type, EventType::Other);
        assert!(plays[0].players.is_none());
        assert_eq!(plays[1].result.event_type, EventType::Shot);
        assert_eq!(plays[2].result.event_type, EventType::MissedShot);
        assert_eq!(plays[1].players.as_ref().unwrap()[1].role, Role::Goalie);
    }
}
