use crate::error::{Error, Result};
use crate::utils::validation::FormVariant;
use dotenvy::dotenv;
use std::env;
use url::Url;

pub const DEFAULT_BUCKET: &str = "applications";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub supabase_url: Url,
    pub supabase_anon_key: String,
    pub storage_bucket: String,
    pub public_rps: u32,
    pub form_variant: FormVariant,
    pub max_upload_bytes: usize,
    pub store_timeout_secs: u64,
    pub cors_allowed_origin: Option<String>,
    /// JSON log lines, only when `LOG_FORMAT=json`.
    pub json_logs: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_source(|name| env::var(name).ok())
    }

    /// Builds the configuration from any key lookup. A missing Supabase URL or
    /// key is fatal: the process has nowhere to send applications.
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = get_var(&lookup, "SUPABASE_URL")?;
        let supabase_url = Url::parse(raw_url.trim())
            .map_err(|e| Error::Config(format!("Invalid value for SUPABASE_URL: {}", e)))?;

        let supabase_anon_key = get_var(&lookup, "SUPABASE_ANON_KEY")?;
        if supabase_anon_key.trim().is_empty() {
            return Err(Error::Config(
                "Missing environment variable: SUPABASE_ANON_KEY".to_string(),
            ));
        }

        Ok(Self {
            server_address: get_var(&lookup, "SERVER_ADDRESS")?,
            supabase_url,
            supabase_anon_key,
            storage_bucket: lookup("SUPABASE_BUCKET")
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            public_rps: get_var_parse_or(&lookup, "PUBLIC_RPS", 20)?,
            form_variant: get_var_parse_or(&lookup, "FORM_VARIANT", FormVariant::Standard)?,
            max_upload_bytes: get_var_parse_or(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            store_timeout_secs: get_var_parse_or(&lookup, "STORE_TIMEOUT_SECS", 30)?,
            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN").filter(|o| !o.trim().is_empty()),
            json_logs: lookup("LOG_FORMAT")
                .map(|f| f.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }
}

fn get_var<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or_else(|| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_var_parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let config = Config::from_source(source(&[
            ("SERVER_ADDRESS", "127.0.0.1:8080"),
            ("SUPABASE_URL", "https://project.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon-key"),
        ]))
        .unwrap();

        assert_eq!(config.server_address, "127.0.0.1:8080");
        assert_eq!(config.supabase_url.as_str(), "https://project.supabase.co/");
        assert_eq!(config.storage_bucket, DEFAULT_BUCKET);
        assert_eq!(config.public_rps, 20);
        assert_eq!(config.form_variant, FormVariant::Standard);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.cors_allowed_origin.is_none());
        assert!(!config.json_logs);
    }

    #[test]
    fn missing_store_credentials_are_fatal() {
        let err = Config::from_source(source(&[
            ("SERVER_ADDRESS", "127.0.0.1:8080"),
            ("SUPABASE_URL", "https://project.supabase.co"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SUPABASE_ANON_KEY"));

        let err = Config::from_source(source(&[
            ("SERVER_ADDRESS", "127.0.0.1:8080"),
            ("SUPABASE_ANON_KEY", "anon-key"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SUPABASE_URL"));
    }

    #[test]
    fn rejects_malformed_values() {
        let err = Config::from_source(source(&[
            ("SERVER_ADDRESS", "127.0.0.1:8080"),
            ("SUPABASE_URL", "not a url"),
            ("SUPABASE_ANON_KEY", "anon-key"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::from_source(source(&[
            ("SERVER_ADDRESS", "127.0.0.1:8080"),
            ("SUPABASE_URL", "https://project.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon-key"),
            ("FORM_VARIANT", "lenient"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("FORM_VARIANT"));
    }

    #[test]
    fn reads_optional_overrides() {
        let config = Config::from_source(source(&[
            ("SERVER_ADDRESS", "0.0.0.0:3000"),
            ("SUPABASE_URL", "http://localhost:54321"),
            ("SUPABASE_ANON_KEY", "anon-key"),
            ("SUPABASE_BUCKET", "careers"),
            ("PUBLIC_RPS", "5"),
            ("FORM_VARIANT", "strict"),
            ("CORS_ALLOWED_ORIGIN", "https://careers.consulnigeria.ae"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert!(config.json_logs);

        assert_eq!(config.storage_bucket, "careers");
        assert_eq!(config.public_rps, 5);
        assert_eq!(config.form_variant, FormVariant::Strict);
        assert_eq!(
            config.cors_allowed_origin.as_deref(),
            Some("https://careers.consulnigeria.ae")
        );
    }

    #[test]
    fn plain_logs_unless_json_is_asked_for() {
        for format in ["text", "pretty", ""] {
            let config = Config::from_source(source(&[
                ("SERVER_ADDRESS", "127.0.0.1:8080"),
                ("SUPABASE_URL", "https://project.supabase.co"),
                ("SUPABASE_ANON_KEY", "anon-key"),
                ("LOG_FORMAT", format),
            ]))
            .unwrap();
            assert!(!config.json_logs, "LOG_FORMAT={:?}", format);
        }
    }
}
