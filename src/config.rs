use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;
use crate::Args;

pub const API_KEY_VAR: &str = "STEAM_API_KEY";
pub const STEAM_ID_VAR: &str = "STEAM_ID";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    steam_id: String,
}

impl Credentials {
    pub fn new(api_key: Option<&str>, steam_id: Option<&str>) -> Result<Self, Error> {
        let api_key = non_blank(api_key).ok_or(Error::MissingCredential(API_KEY_VAR))?;
        let steam_id = non_blank(steam_id).ok_or(Error::MissingCredential(STEAM_ID_VAR))?;

        Ok(Self { api_key, steam_id })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn steam_id(&self) -> &str {
        &self.steam_id
    }
}

// Keeps the key out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("steam_id", &self.steam_id)
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// How the header image of the game being played ends up in the badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderImage {
    /// Reference the store CDN url; the viewer loads it.
    #[default]
    Link,
    /// Download it and inline it as a base64 data URI.
    Embed,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub output: PathBuf,
    pub header_image: HeaderImage,
    pub timeout: Duration,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self, Error> {
        let credentials = Credentials::new(args.api_key.as_deref(), args.steam_id.as_deref())?;
        let header_image = if args.embed_header {
            HeaderImage::Embed
        } else {
            HeaderImage::Link
        };

        Ok(Self {
            credentials,
            output: args.output.clone(),
            header_image,
            timeout: Duration::from_secs(args.timeout),
        })
    }
}

#[cfg(test)]
pub(crate) fn test_args(api_key: Option<&str>, steam_id: Option<&str>) -> Args {
    Args {
        api_key: api_key.map(str::to_string),
        steam_id: steam_id.map(str::to_string),
        output: PathBuf::from(crate::DEFAULT_OUTPUT),
        embed_header: false,
        timeout: 10,
        verbose: false,
    }
}
