use std::path::PathBuf;
use std::time::Duration;

use chorus_llm::LlmConfig;
use chorus_replies::SchedulerConfig;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub scheduler: SchedulerConfig,
    pub llm: LlmConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("CHORUS_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("CHORUS_PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()?;
        let db_path: PathBuf = std::env::var("CHORUS_DB_PATH")
            .unwrap_or_else(|_| "chorus.db".into())
            .into();

        let defaults = SchedulerConfig::default();
        let scheduler = SchedulerConfig {
            reply_probability: parsed("CHORUS_REPLY_PROBABILITY").unwrap_or(defaults.reply_probability),
            min_delay: parsed("CHORUS_REPLY_DELAY_MIN_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.min_delay),
            max_delay: parsed("CHORUS_REPLY_DELAY_MAX_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.max_delay),
        };

        Ok(Self {
            host,
            port,
            db_path,
            scheduler,
            llm: LlmConfig::from_env(),
        })
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
