use std::panic;
use std::thread;

use crate::config::Credentials;
use crate::error::{Error, FetchError};
use crate::steam_api::{self, Player, Transport};

/// Steam's `personastate`. Only 0 and 1 matter for the badge; busy, away,
/// snooze and the "looking to" states are kept as raw codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresenceState {
    #[default]
    Offline,
    Online,
    Other(u8),
}

impl From<u8> for PresenceState {
    fn from(code: u8) -> Self {
        match code {
            0 => PresenceState::Offline,
            1 => PresenceState::Online,
            other => PresenceState::Other(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerSummary {
    pub display_name: String,
    pub avatar_url: String,
    pub presence_state: Option<PresenceState>,
    pub active_game_title: Option<String>,
    pub active_game_id: Option<String>,
    pub last_seen: Option<i64>,
}

impl PlayerSummary {
    pub fn is_in_game(&self) -> bool {
        self.active_game_title.is_some()
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<Player> for PlayerSummary {
    fn from(player: Player) -> Self {
        Self {
            display_name: player.personaname.unwrap_or_default(),
            avatar_url: player.avatarfull.unwrap_or_default(),
            presence_state: player.personastate.map(PresenceState::from),
            active_game_title: present(player.gameextrainfo),
            active_game_id: present(player.gameid),
            last_seen: player.lastlogoff,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OwnedGamesStat {
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelStat {
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub summary: PlayerSummary,
    pub owned_games: OwnedGamesStat,
    pub level: LevelStat,
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|payload| panic::resume_unwind(payload))
}

fn or_default<T: Default>(what: &str, result: Result<T, FetchError>) -> T {
    result.unwrap_or_else(|err| {
        tracing::warn!("Could not fetch {}, using default: {}", what, err);
        T::default()
    })
}

/// Fetches summary, owned games and level in parallel. Games and level fall
/// back to zero on any failure; a summary without a player record is fatal.
pub fn fetch_profile(transport: &dyn Transport, credentials: &Credentials) -> Result<Profile, Error> {
    let (summary, games, level) = thread::scope(|scope| {
        let games = scope.spawn(|| steam_api::get_owned_games(transport, credentials));
        let level = scope.spawn(|| steam_api::get_steam_level(transport, credentials));
        let summary = steam_api::get_player_summaries(transport, credentials);
        (summary, join(games), join(level))
    });
    tracing::debug!("Profile requests finished");

    let player = or_default("player summary", summary)
        .response
        .players
        .into_iter()
        .next()
        .ok_or_else(|| Error::PlayerNotFound(credentials.steam_id().to_string()))?;

    Ok(Profile {
        summary: PlayerSummary::from(player),
        owned_games: OwnedGamesStat {
            count: or_default("owned games", games).response.game_count,
        },
        level: LevelStat {
            level: or_default("steam level", level).response.player_level,
        },
    })
}
