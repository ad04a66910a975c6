use crate::activity;
use crate::badge::Badge;
use crate::config::Config;
use crate::error::Error;
use crate::profile;
use crate::steam_api::Transport;

/// Fetches everything the badge needs and renders it. Only a missing player
/// record stops the run; every other failed call degrades to a default.
pub fn generate(config: &Config, transport: &dyn Transport) -> Result<String, Error> {
    let profile = profile::fetch_profile(transport, &config.credentials)?;
    tracing::info!(
        "Fetched profile for {} ({} games, level {})",
        profile.summary.display_name,
        profile.owned_games.count,
        profile.level.level
    );

    let promo = activity::resolve_promo(transport, &profile.summary, config.header_image);

    Ok(Badge::new(&profile, promo.as_ref()).to_svg())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badge::tests::texts;
    use crate::config::{test_args, HeaderImage};
    use crate::profile::tests::FakeSteam;
    use crate::steam_api::{APP_DETAILS_URL, PLAYER_SUMMARIES_URL};

    fn config() -> Config {
        Config::from_args(&test_args(Some("KEY"), Some("76561197960287930"))).unwrap()
    }

    #[test]
    fn missing_credentials_make_no_requests() {
        let steam = FakeSteam::new();
        let result = Config::from_args(&test_args(Some("KEY"), None))
            .and_then(|config| generate(&config, &steam));

        assert!(matches!(result, Err(Error::MissingCredential(_))));
        assert_eq!(steam.call_count(), 0);
    }

    #[test]
    fn online_player_without_game() {
        let steam = FakeSteam::new()
            .summary(r#"{"response":{"players":[{"personaname":"Ana","personastate":1}]}}"#)
            .games(r#"{"response":{"game_count":42}}"#)
            .level(r#"{"response":{"player_level":10}}"#);

        let svg = generate(&config(), &steam).unwrap();

        let texts = texts(&svg);
        assert!(texts.contains(&"Online".to_string()));
        assert!(texts.contains(&"Level 10 \u{2022} 42 games".to_string()));
        assert!(svg.contains("height=\"180\""));
        assert!(!svg.contains("gameClip"));
        assert!(!steam.requested(APP_DETAILS_URL));
    }

    #[test]
    fn player_in_game_gets_header_band() {
        let steam = FakeSteam::new()
            .summary(r#"{"response":{"players":[{"personaname":"Leo","gameextrainfo":"Half-Life","gameid":"70","personastate":0}]}}"#)
            .store(r#"{"70":{"success":true,"data":{"header_image":"https://cdn/70/header.jpg"}}}"#);

        let svg = generate(&config(), &steam).unwrap();

        assert!(texts(&svg).contains(&"Playing Half-Life".to_string()));
        assert!(svg.contains("height=\"220\""));
        assert!(svg.contains("href=\"https://cdn/70/header.jpg\""));
        assert!(svg.contains("id=\"gameClip\""));
    }

    #[test]
    fn embedded_header_band() {
        let steam = FakeSteam::new()
            .summary(r#"{"response":{"players":[{"personaname":"Leo","gameextrainfo":"Half-Life","gameid":"70"}]}}"#)
            .store(r#"{"70":{"success":true,"data":{"header_image":"https://cdn/70/header.png"}}}"#)
            .image("https://cdn/70/header.png", "image/png", b"abc");
        let config = Config {
            header_image: HeaderImage::Embed,
            ..config()
        };

        let svg = generate(&config, &steam).unwrap();

        assert!(svg.contains("href=\"data:image/png;base64,YWJj\""));
        assert!(!svg.contains("https://cdn/70/header.png"));
    }

    #[test]
    fn everything_timing_out_is_fatal() {
        let steam = FakeSteam::new();
        let err = generate(&config(), &steam).unwrap_err();

        assert!(matches!(err, Error::PlayerNotFound(_)));
        assert_eq!(steam.call_count(), 3);
        assert!(!steam.requested(APP_DETAILS_URL));
    }

    #[test]
    fn missing_player_skips_store_lookup() {
        let steam = FakeSteam::new().summary(r#"{"response":{"players":[]}}"#);
        assert!(generate(&config(), &steam).is_err());
        assert!(steam.requested(PLAYER_SUMMARIES_URL));
        assert!(!steam.requested(APP_DETAILS_URL));
    }

    #[test]
    fn failed_stats_render_as_zero() {
        let steam = FakeSteam::new()
            .summary(r#"{"response":{"players":[{"personaname":"Ana","personastate":1}]}}"#);

        let svg = generate(&config(), &steam).unwrap();

        let texts = texts(&svg);
        assert!(texts.contains(&"Ana".to_string()));
        assert!(texts.contains(&"Online".to_string()));
        assert!(texts.contains(&"Level 0 \u{2022} 0 games".to_string()));
    }

    #[test]
    fn identical_responses_render_identically() {
        let steam = || {
            FakeSteam::new()
                .summary(r#"{"response":{"players":[{"personaname":"Ana","lastlogoff":1700000000}]}}"#)
                .games(r#"{"response":{"game_count":5}}"#)
        };
        assert_eq!(
            generate(&config(), &steam()).unwrap(),
            generate(&config(), &steam()).unwrap()
        );
    }
}
