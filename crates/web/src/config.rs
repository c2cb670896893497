use anyhow::{Context, Result, bail};

const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub session_secret: String,
    pub session_ttl_seconds: i64,
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let session_secret =
            std::env::var("SESSION_SECRET").context("Cannot load SESSION_SECRET env variable")?;
        if session_secret.len() < MIN_SECRET_LEN {
            bail!("SESSION_SECRET must be at least {MIN_SECRET_LEN} bytes");
        }

        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            session_secret,
            // One day, as the league has always issued
            session_ttl_seconds: match std::env::var("SESSION_TTL_SECONDS") {
                Ok(ttl) => ttl.parse().context("SESSION_TTL_SECONDS must be a number")?,
                Err(_) => 60 * 60 * 24,
            },
            secure_cookies: std::env::var("SECURE_COOKIES")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }
}
