use serde::Deserialize;

/// Configuration options for the blog admin service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub address: String,
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Key used to sign session and flash message cookies (at least 64 bytes).
    pub secret: String,
    /// Directory holding the Tera templates.
    pub templates_dir: String,
    /// Directory served under `/assets`.
    pub assets_dir: String,
    /// Base URL of the external auth service, used as the home link.
    pub auth_service_url: String,
}

#[cfg(feature = "server")]
impl ServerConfig {
    /// Load settings from `{config_dir}/default.yaml`, the optional
    /// `{config_dir}/{app_env}.yaml` and `APP_*` environment variables, in
    /// that order of precedence.
    pub fn load(config_dir: &str, app_env: &str) -> Result<Self, ::config::ConfigError> {
        ::config::Config::builder()
            .add_source(::config::File::with_name(&format!("{config_dir}/default")))
            .add_source(
                ::config::File::with_name(&format!("{config_dir}/{app_env}")).required(false),
            )
            .add_source(::config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
