use crate::api::{VideoResponse, VideoStatus};
use crate::state::auth::AuthState;
use crate::utils::format::format_price;

/// The call to action next to a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailAction {
    /// Not playable yet, nothing to offer.
    Unavailable,
    /// The creator looking at their own video.
    OwnerPreview,
    SignInToBuy,
    CheckingAccess,
    Watch,
    Buy { label: String },
}

pub fn is_owner(auth: &AuthState, video: &VideoResponse) -> bool {
    let creator_id = video.creator_id.to_string();
    auth.user
        .as_ref()
        .map(|user| user.id.eq_ignore_ascii_case(&creator_id))
        .unwrap_or(false)
}

pub fn buy_label(price_cents: i64) -> String {
    if price_cents == 0 {
        "Get for free".to_string()
    } else {
        format!("Buy for {}", format_price(price_cents))
    }
}

/// `has_access` is `None` while the access check is still running.
pub fn detail_action(
    video: &VideoResponse,
    auth: &AuthState,
    has_access: Option<bool>,
) -> DetailAction {
    if video.status != VideoStatus::Ready {
        return DetailAction::Unavailable;
    }
    if is_owner(auth, video) {
        return DetailAction::OwnerPreview;
    }
    if !auth.is_authenticated {
        return DetailAction::SignInToBuy;
    }
    match has_access {
        None => DetailAction::CheckingAccess,
        Some(true) => DetailAction::Watch,
        Some(false) => DetailAction::Buy {
            label: buy_label(video.price_cents),
        },
    }
}

pub fn watch_href(video: &VideoResponse) -> String {
    format!("/videos/{}/watch", video.id)
}

pub fn edit_href(video: &VideoResponse) -> String {
    format!("/creator/videos/{}/edit", video.id)
}

pub fn detail_href(video: &VideoResponse) -> String {
    format!("/videos/{}", video.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{creator_user, sample_video, viewer_user};

    fn signed_in(user: crate::api::AuthUser) -> AuthState {
        AuthState {
            user: Some(user),
            is_authenticated: true,
        }
    }

    #[test]
    fn guests_are_asked_to_sign_in() {
        let video = sample_video("Intro", 1299, VideoStatus::Ready);
        assert_eq!(
            detail_action(&video, &AuthState::default(), None),
            DetailAction::SignInToBuy
        );
    }

    #[test]
    fn owner_gets_preview_regardless_of_access() {
        let video = sample_video("Intro", 1299, VideoStatus::Ready);
        let auth = signed_in(creator_user());
        assert!(is_owner(&auth, &video));
        assert_eq!(detail_action(&video, &auth, Some(false)), DetailAction::OwnerPreview);
    }

    #[test]
    fn viewer_flow_follows_access_check() {
        let video = sample_video("Intro", 1299, VideoStatus::Ready);
        let auth = signed_in(viewer_user());
        assert_eq!(detail_action(&video, &auth, None), DetailAction::CheckingAccess);
        assert_eq!(detail_action(&video, &auth, Some(true)), DetailAction::Watch);
        assert_eq!(
            detail_action(&video, &auth, Some(false)),
            DetailAction::Buy {
                label: "Buy for $12.99".into()
            }
        );
    }

    #[test]
    fn free_videos_are_claimed_not_bought() {
        assert_eq!(buy_label(0), "Get for free");
    }

    #[test]
    fn unfinished_videos_offer_nothing() {
        let video = sample_video("Intro", 1299, VideoStatus::Processing);
        assert_eq!(
            detail_action(&video, &signed_in(creator_user()), Some(true)),
            DetailAction::Unavailable
        );
    }

    #[test]
    fn hrefs_point_at_video_routes() {
        let video = sample_video("Intro", 0, VideoStatus::Ready);
        assert_eq!(watch_href(&video), format!("/videos/{}/watch", video.id));
        assert_eq!(edit_href(&video), format!("/creator/videos/{}/edit", video.id));
        assert_eq!(detail_href(&video), format!("/videos/{}", video.id));
    }
}
