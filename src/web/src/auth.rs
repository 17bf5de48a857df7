use crate::{ApiError, ApiResult, LeagueAppData};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use league_core::user::User;
use league_core::{AccessScope, UserContext};

pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity of the request sender, resolved from the `x-user-id` header.
#[derive(Debug, Clone, Default)]
pub struct Caller {
    pub user: Option<User>,
    pub context: Option<UserContext>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Caller::default()
    }

    pub fn from_user(user: User) -> Self {
        Caller {
            context: Some(UserContext::from_user(&user)),
            user: Some(user),
        }
    }

    pub fn scope(&self) -> AccessScope<'_> {
        AccessScope::new(self.context.as_ref())
    }

    pub fn require_user(&self) -> ApiResult<&User> {
        self.user
            .as_ref()
            .ok_or_else(|| ApiError::unauthorized("sign in required"))
    }

    pub fn require_admin(&self) -> ApiResult<()> {
        self.require_user()?;

        if self.scope().is_admin() {
            Ok(())
        } else {
            Err(ApiError::forbidden())
        }
    }

    pub fn require(&self, allowed: bool) -> ApiResult<()> {
        self.require_user()?;

        if allowed { Ok(()) } else { Err(ApiError::forbidden()) }
    }
}

impl FromRequestParts<LeagueAppData> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &LeagueAppData) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(Caller::anonymous());
        };

        let user_id: u32 = raw
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .ok_or_else(|| ApiError::unauthorized("invalid x-user-id header"))?;

        let data = state.data.read().await;

        let user = data
            .user(user_id)
            .cloned()
            .ok_or_else(|| ApiError::unauthorized(format!("user {} not found", user_id)))?;

        Ok(Caller::from_user(user))
    }
}
