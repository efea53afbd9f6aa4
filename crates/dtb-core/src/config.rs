use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

/// Typed configuration, read from the environment (and `.env` if present).
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    /// Empty means anyone may use the bot.
    pub telegram_allowed_users: Vec<i64>,

    pub log_level: String,

    // Inbound rate limiting (per user)
    pub rate_limit_enabled: bool,
    pub rate_limit_requests: u32,
    pub rate_limit_window: Duration,

    // Outbound throttling
    pub throttle_global_interval: Duration,
    pub throttle_per_chat_interval: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = get("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }
        let telegram_allowed_users = parse_csv_i64(get("TELEGRAM_ALLOWED_USERS"));

        let log_level = get("LOG_LEVEL")
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "info".to_string());

        let rate_limit_enabled = parse_bool(get("RATE_LIMIT_ENABLED")).unwrap_or(true);
        let rate_limit_requests = parse_num::<u32>(get("RATE_LIMIT_REQUESTS")).unwrap_or(20);
        let rate_limit_window =
            Duration::from_secs(parse_num::<u64>(get("RATE_LIMIT_WINDOW")).unwrap_or(60));

        let throttle_global_interval =
            Duration::from_millis(parse_num::<u64>(get("THROTTLE_GLOBAL_MS")).unwrap_or(40));
        let throttle_per_chat_interval =
            Duration::from_millis(parse_num::<u64>(get("THROTTLE_PER_CHAT_MS")).unwrap_or(1050));

        Ok(Self {
            telegram_bot_token,
            telegram_allowed_users,
            log_level,
            rate_limit_enabled,
            rate_limit_requests,
            rate_limit_window,
            throttle_global_interval,
            throttle_per_chat_interval,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = &val[1..val.len() - 1];
        }

        out.push((key.to_string(), val.to_string()));
    }
    out
}

fn parse_bool(v: Option<String>) -> Option<bool> {
    v.map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn parse_num<T: std::str::FromStr>(v: Option<String>) -> Option<T> {
    v.and_then(|s| s.trim().parse::<T>().ok())
}

fn parse_csv_i64(v: Option<String>) -> Vec<i64> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<i64>().ok())
        .collect()
}
