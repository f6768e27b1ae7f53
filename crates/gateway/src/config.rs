// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Origin used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Path prefix every endpoint lives under.
pub const API_PREFIX: &str = "/api";

/// Connection settings for the backend.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// HTTP origin without the API prefix, e.g. `http://localhost:8000`.
    base_url: String,
    /// Static bearer credential sent with every request.
    token: String,
}

impl GatewayConfig {
    /// Creates a new configuration.
    ///
    /// Trailing slashes on `base_url` are dropped.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The backend origin
    /// * `token` - The bearer credential
    #[must_use]
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Returns the backend origin.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the bearer credential.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the absolute URL of an endpoint path such as `/libros`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }
}

// The credential never ends up in logs.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
