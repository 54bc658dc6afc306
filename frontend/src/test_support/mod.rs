#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{AuthUser, UserRole, VideoResponse, VideoStatus};
    use crate::state::auth::AuthState;
    use chrono::{TimeZone, Utc};
    use leptos::*;
    use uuid::Uuid;

    pub const CREATOR_ID: &str = "2d5d3c0e-8d5f-4a3b-9b8e-3c7a2d1e0f11";
    pub const VIEWER_ID: &str = "9a0b7c6d-1e2f-4a3b-8c9d-0e1f2a3b4c5d";

    pub fn viewer_user() -> AuthUser {
        AuthUser {
            id: VIEWER_ID.into(),
            email: "viewer@example.com".into(),
            role: UserRole::Viewer,
        }
    }

    pub fn creator_user() -> AuthUser {
        AuthUser {
            id: CREATOR_ID.into(),
            email: "creator@example.com".into(),
            role: UserRole::Creator,
        }
    }

    pub fn provide_auth(user: Option<AuthUser>) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let (auth, set_auth) = create_signal(AuthState {
            is_authenticated: user.is_some(),
            user,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }

    pub fn sample_video(title: &str, price_cents: i64, status: VideoStatus) -> VideoResponse {
        let created = Utc.with_ymd_and_hms(2025, 1, 5, 10, 0, 0).unwrap();
        VideoResponse {
            id: Uuid::new_v4(),
            creator_id: Uuid::parse_str(CREATOR_ID).unwrap(),
            title: title.into(),
            description: Some(format!("About {}", title)),
            price_cents,
            status,
            thumbnail_url: None,
            duration_secs: Some(615),
            created_at: created,
            updated_at: created,
        }
    }
}
