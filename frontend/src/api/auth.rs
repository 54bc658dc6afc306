use super::{
    client::{parse_json, ApiClient},
    types::{ApiError, AuthResponse, AuthUser, LoginRequest, RefreshRequest, RegisterRequest},
};

// Auth endpoints go through `dispatch` directly: a 401 from login or refresh
// must never start another refresh.
impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .dispatch(
                self.http_client()
                    .post(format!("{}/auth/login", base_url))
                    .json(request),
            )
            .await?;
        let tokens: AuthResponse = parse_json(response).await?;
        self.session().store(tokens);
        log::info!("Signed in");
        Ok(())
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .dispatch(
                self.http_client()
                    .post(format!("{}/auth/register", base_url))
                    .json(request),
            )
            .await?;
        let tokens: AuthResponse = parse_json(response).await?;
        self.session().store(tokens);
        log::info!("Account registered");
        Ok(())
    }

    /// Exchanges the refresh token for a new pair. Any failure ends the
    /// session; without a refresh token nothing is sent.
    pub async fn refresh(&self) -> bool {
        let Some(refresh_token) = self.session().refresh_token() else {
            log::debug!("No refresh token held, skipping refresh");
            return false;
        };

        match self.request_refresh(refresh_token).await {
            Ok(tokens) => {
                self.session().store(tokens);
                log::debug!("Access token refreshed");
                true
            }
            Err(err) => {
                log::warn!("Token refresh failed, signing out: {}", err);
                self.session().clear();
                false
            }
        }
    }

    async fn request_refresh(&self, refresh_token: String) -> Result<AuthResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .dispatch(
                self.http_client()
                    .post(format!("{}/auth/refresh", base_url))
                    .json(&RefreshRequest { refresh_token }),
            )
            .await?;
        parse_json(response).await
    }

    pub fn logout(&self) {
        self.session().clear();
        log::info!("Signed out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.session().user()
    }
}
