use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port the proxy listens on. Set via CORSGATE_PORT (or PORT). Default: 3000.
    pub port: u16,
    /// Upper bound on a single upstream call, in seconds.
    /// Set via CORSGATE_UPSTREAM_TIMEOUT_SECS. Default: 30.
    pub upstream_timeout_secs: u64,
    /// Maximum inbound request body size in bytes.
    /// Set via CORSGATE_BODY_LIMIT_BYTES. Default: 25 MiB.
    pub body_limit_bytes: usize,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    Ok(Config {
        port: std::env::var("CORSGATE_PORT")
            .or_else(|_| std::env::var("PORT"))
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000),
        upstream_timeout_secs: std::env::var("CORSGATE_UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30),
        body_limit_bytes: std::env::var("CORSGATE_BODY_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(25 * 1024 * 1024),
    })
}
