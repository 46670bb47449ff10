/// Drinks API configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Identity provider domain (e.g. `example.us.auth0.com`).
    pub auth_domain: String,
    /// Audience string expected in access tokens.
    pub api_audience: String,
    /// Port the HTTP server binds to.
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Panics with a descriptive message if a required variable is missing.
    pub fn from_env() -> Self {
        Self {
            database_url: required_var("DATABASE_URL"),
            auth_domain: required_var("AUTH_DOMAIN"),
            api_audience: required_var("API_AUDIENCE"),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
        }
    }

    /// Issuer expected in access tokens: `https://<domain>/`.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.auth_domain)
    }

    /// Origin the JWKS endpoint is fetched from.
    pub fn jwks_origin(&self) -> String {
        format!("https://{}", self.auth_domain)
    }
}

fn required_var(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{name} env var is required"))
}
