use std::env;

use chrono::{FixedOffset, Offset, Utc};

use crate::services::patterns::{PatternConfig, ANXIETY_MOODS, ANXIETY_THRESHOLD, STRESS_LEXICON};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub jwt_secret: String,

    pub claude_api_key: String,
    pub claude_api_url: String,
    pub claude_model: String,
    pub claude_max_tokens: u32,
    pub summarizer_timeout_secs: u64,

    // Per-user cap on AI insight requests
    pub insight_rate_limit: u32,
    pub insight_rate_window_secs: u64,

    // Pattern analysis
    /// Fixed UTC offset used for hour and weekday buckets. It does not follow
    /// daylight saving time: in a zone with DST, buckets are an hour off for
    /// the part of the year the configured offset does not cover.
    pub analysis_utc_offset_minutes: i32,
    pub anxiety_moods: Vec<String>,
    pub anxiety_threshold: usize,
    pub stress_keywords: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key/value source; `from_env` passes the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let analysis_utc_offset_minutes: i32 = var("ANALYSIS_UTC_OFFSET_MINUTES", "0")
            .parse()
            .expect("ANALYSIS_UTC_OFFSET_MINUTES must be a number");
        assert!(
            analysis_utc_offset_minutes.abs() < 24 * 60,
            "ANALYSIS_UTC_OFFSET_MINUTES must be within ±1439"
        );

        Self {
            database_url: lookup("DATABASE_URL").expect("DATABASE_URL must be set"),
            database_max_connections: var("DATABASE_MAX_CONNECTIONS", "20")
                .parse()
                .expect("DATABASE_MAX_CONNECTIONS must be a number"),
            host: var("HOST", "0.0.0.0"),
            port: var("PORT", "8080")
                .parse()
                .expect("PORT must be a number"),
            frontend_url: var("FRONTEND_URL", "http://localhost:3000"),

            jwt_secret: lookup("JWT_SECRET").expect("JWT_SECRET must be set"),

            claude_api_key: var("CLAUDE_API_KEY", ""),
            claude_api_url: var("CLAUDE_API_URL", "https://api.anthropic.com/v1/messages"),
            claude_model: var("CLAUDE_MODEL", "claude-sonnet-4-20250514"),
            claude_max_tokens: var("CLAUDE_MAX_TOKENS", "1024").parse().unwrap_or(1024),
            summarizer_timeout_secs: var("SUMMARIZER_TIMEOUT_SECS", "30").parse().unwrap_or(30),

            insight_rate_limit: var("INSIGHT_RATE_LIMIT", "5").parse().unwrap_or(5),
            insight_rate_window_secs: var("INSIGHT_RATE_WINDOW_SECS", "3600") // 1 hour
                .parse()
                .unwrap_or(3600),

            analysis_utc_offset_minutes,
            anxiety_moods: lookup("ANXIETY_MOODS")
                .map(|raw| parse_list(&raw))
                .unwrap_or_else(|| ANXIETY_MOODS.iter().map(|m| m.to_string()).collect()),
            anxiety_threshold: var("ANXIETY_THRESHOLD", &ANXIETY_THRESHOLD.to_string())
                .parse()
                .expect("ANXIETY_THRESHOLD must be a number"),
            // Kept as written; matching lowercases both sides
            stress_keywords: lookup("STRESS_KEYWORDS")
                .map(|raw| parse_list(&raw))
                .unwrap_or_else(|| STRESS_LEXICON.iter().map(|k| k.to_string()).collect()),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn pattern_config(&self) -> PatternConfig {
        PatternConfig {
            anxiety_moods: self.anxiety_moods.clone(),
            anxiety_threshold: self.anxiety_threshold,
            lexicon: self.stress_keywords.clone(),
            utc_offset: FixedOffset::east_opt(self.analysis_utc_offset_minutes * 60)
                .unwrap_or_else(|| Utc.fix()),
        }
    }
}

/// Comma-separated list; blanks and duplicates are dropped, order kept.
fn parse_list(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !items.iter().any(|existing| existing == item) {
            items.push(item.to_string());
        }
    }
    items
}

#[cfg(test)]
impl Config {
    pub fn test_default() -> Self {
        Self {
            database_url: "postgres://localhost/moodlog_test".into(),
            database_max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            jwt_secret: "test-secret".into(),
            claude_api_key: String::new(),
            claude_api_url: "http://127.0.0.1:9/v1/messages".into(),
            claude_model: "test-model".into(),
            claude_max_tokens: 64,
            summarizer_timeout_secs: 1,
            insight_rate_limit: 5,
            insight_rate_window_secs: 3600,
            analysis_utc_offset_minutes: 0,
            anxiety_moods: ANXIETY_MOODS.iter().map(|m| m.to_string()).collect(),
            anxiety_threshold: ANXIETY_THRESHOLD,
            stress_keywords: STRESS_LEXICON.iter().map(|k| k.to_string()).collect(),
        }
    }
}
