// src/config/settings.rs

use std::{env, time::Duration};

use anyhow::{bail, Context};
use reqwest::Url;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Base of the REST backend (`/api/...`).
    pub api_url: String,
    /// Base of the auth service (`/get-session`, `/sign-in/email`, ...).
    pub auth_url: String,
    /// Public URL of this storefront; the auth service sees it as the request origin.
    pub frontend_api: String,
    pub bind_addr: String,
    /// Freshness window of cached reads; `None` keeps them until a tag is revalidated.
    pub revalidate: Option<Duration>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_url = required_url("API_URL")?;
        let auth_url = required_url("AUTH_URL")?;
        let frontend_api = match env::var("FRONTEND_API") {
            Ok(raw) => parse_base_url("FRONTEND_API", &raw)?,
            Err(_) => "http://localhost:3000".to_string(),
        };
        let bind_addr = env::var("BIND_ADDR").unwrap_or("0.0.0.0:3000".to_string());

        let seconds = match env::var("REVALIDATE_SECONDS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("REVALIDATE_SECONDS must be a whole number, got '{raw}'"))?,
            Err(_) => 60,
        };

        Ok(Self {
            api_url,
            auth_url,
            frontend_api,
            bind_addr,
            revalidate: revalidate_window(seconds),
        })
    }
}

fn revalidate_window(seconds: u64) -> Option<Duration> {
    (seconds > 0).then(|| Duration::from_secs(seconds))
}

fn required_url(name: &str) -> anyhow::Result<String> {
    let raw = env::var(name).with_context(|| format!("{name} must be set"))?;
    parse_base_url(name, &raw)
}

fn parse_base_url(name: &str, raw: &str) -> anyhow::Result<String> {
    let url = Url::parse(raw.trim()).with_context(|| format!("{name} is not a valid URL: '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("{name} must be an http(s) URL, got '{raw}'");
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_urls_lose_trailing_slash() {
        assert_eq!(
            parse_base_url("API_URL", "https://api.example.com/").unwrap(),
            "https://api.example.com"
        );
        assert_eq!(
            parse_base_url("AUTH_URL", "http://localhost:5000/api/auth").unwrap(),
            "http://localhost:5000/api/auth"
        );
    }

    #[test]
    fn invalid_urls_name_the_variable() {
        let err = parse_base_url("API_URL", "not a url").unwrap_err();
        assert!(err.to_string().contains("API_URL"));
        assert!(parse_base_url("AUTH_URL", "ftp://files.example.com").is_err());
    }

    #[test]
    fn zero_seconds_disables_expiry() {
        assert_eq!(revalidate_window(0), None);
        assert_eq!(revalidate_window(30), Some(Duration::from_secs(30)));
    }
}
