use crate::config::HeaderImage;
use crate::profile::PlayerSummary;
use crate::steam_api::{self, Transport};
use crate::utils;

/// Header image of the game being played, as it will appear in the badge's
/// `href`: either the store url or a self-contained data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamePromoAsset {
    pub image_url: String,
}

/// Looks up the store header image for the player's current game. Any failure
/// along the way yields `None`; the badge is then drawn without the band.
pub fn resolve_promo(
    transport: &dyn Transport,
    summary: &PlayerSummary,
    mode: HeaderImage,
) -> Option<GamePromoAsset> {
    let (Some(title), Some(app_id)) = (&summary.active_game_title, &summary.active_game_id) else {
        return None;
    };
    tracing::debug!("Player is in {} ({}), looking up store header", title, app_id);

    let mut details = match steam_api::get_app_details(transport, app_id) {
        Ok(details) => details,
        Err(error) => {
            tracing::warn!("Error fetching app details for: {}, {}", app_id, error);
            return None;
        }
    };

    let header_url = details
        .remove(app_id.as_str())
        .filter(|app| app.success)
        .and_then(|app| app.data)
        .and_then(|data| data.header_image)
        .filter(|url| !url.trim().is_empty());

    let Some(header_url) = header_url else {
        tracing::warn!("No header image in store listing for: {}", app_id);
        return None;
    };

    let image_url = match mode {
        HeaderImage::Link => header_url,
        HeaderImage::Embed => embed(transport, header_url),
    };

    Some(GamePromoAsset { image_url })
}

// Falls back to linking when the download fails; the url is still valid.
fn embed(transport: &dyn Transport, url: String) -> String {
    match steam_api::get_image(transport, &url) {
        Ok(image) if !image.body.is_empty() => {
            let mime = utils::image_mime(image.content_type.as_deref(), &url);
            tracing::debug!("Embedding {} bytes of {}", image.body.len(), mime);
            utils::data_uri(&mime, &image.body)
        }
        Ok(_) => {
            tracing::warn!("Header image at {} is empty, linking instead", url);
            url
        }
        Err(error) => {
            tracing::warn!("Could not download header image, linking instead: {}", error);
            url
        }
    }
}
