use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Credentials;
use crate::error::FetchError;

pub const PLAYER_SUMMARIES_URL: &str =
    "https://api.steampowered.com/ISteamUser/GetPlayerSummaries/v0002/";
pub const OWNED_GAMES_URL: &str = "https://api.steampowered.com/IPlayerService/GetOwnedGames/v0001/";
pub const STEAM_LEVEL_URL: &str = "https://api.steampowered.com/IPlayerService/GetSteamLevel/v1/";
pub const APP_DETAILS_URL: &str = "https://store.steampowered.com/api/appdetails";

pub struct HttpResponse {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// A blocking GET. Shared across the fetch threads, hence `Sync`.
pub trait Transport: Sync {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, FetchError>;
}

pub struct SteamClient {
    client: Client,
}

impl SteamClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

impl Transport for SteamClient {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, FetchError> {
        tracing::debug!("GET {}", url);

        // reqwest puts the full url, api key included, in its error text.
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .map_err(reqwest::Error::without_url)?
            .to_vec();

        Ok(HttpResponse { content_type, body })
    }
}

fn get_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, FetchError> {
    let response = transport.get(url, query)?;
    Ok(serde_json::from_slice(&response.body)?)
}

/// Every Steam Web API response is wrapped in `{"response": {...}}`.
#[derive(Deserialize, Debug, Default)]
pub struct Envelope<T> {
    #[serde(default)]
    pub response: T,
}

#[derive(Deserialize, Debug, Default)]
pub struct PlayerList {
    #[serde(default)]
    pub players: Vec<Player>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Player {
    #[serde(default)]
    pub personaname: Option<String>,
    #[serde(default)]
    pub avatarfull: Option<String>,
    #[serde(default)]
    pub personastate: Option<u8>,
    #[serde(default)]
    pub gameextrainfo: Option<String>,
    #[serde(default)]
    pub gameid: Option<String>,
    #[serde(default)]
    pub lastlogoff: Option<i64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct OwnedGames {
    #[serde(default)]
    pub game_count: u32,
}

#[derive(Deserialize, Debug, Default)]
pub struct SteamLevel {
    #[serde(default)]
    pub player_level: u32,
}

#[derive(Deserialize, Debug, Default)]
pub struct AppDetails {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<AppData>,
}

#[derive(Deserialize, Debug, Default)]
pub struct AppData {
    #[serde(default)]
    pub header_image: Option<String>,
}

pub fn get_player_summaries(
    transport: &dyn Transport,
    credentials: &Credentials,
) -> Result<Envelope<PlayerList>, FetchError> {
    get_json(
        transport,
        PLAYER_SUMMARIES_URL,
        &[
            ("key", credentials.api_key()),
            ("steamids", credentials.steam_id()),
        ],
    )
}

pub fn get_owned_games(
    transport: &dyn Transport,
    credentials: &Credentials,
) -> Result<Envelope<OwnedGames>, FetchError> {
    get_json(
        transport,
        OWNED_GAMES_URL,
        &[
            ("key", credentials.api_key()),
            ("steamid", credentials.steam_id()),
            ("include_appinfo", "0"),
            ("include_played_free_games", "1"),
        ],
    )
}

pub fn get_steam_level(
    transport: &dyn Transport,
    credentials: &Credentials,
) -> Result<Envelope<SteamLevel>, FetchError> {
    get_json(
        transport,
        STEAM_LEVEL_URL,
        &[
            ("key", credentials.api_key()),
            ("steamid", credentials.steam_id()),
        ],
    )
}

/// The store keys its answer by app id: `{"70": {"success": true, "data": {...}}}`.
pub fn get_app_details(
    transport: &dyn Transport,
    app_id: &str,
) -> Result<HashMap<String, AppDetails>, FetchError> {
    get_json(transport, APP_DETAILS_URL, &[("appids", app_id)])
}

pub fn get_image(transport: &dyn Transport, url: &str) -> Result<HttpResponse, FetchError> {
    transport.get(url, &[])
}
