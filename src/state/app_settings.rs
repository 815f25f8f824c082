use anyhow::{Context, bail};
use log::LevelFilter;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_REFRESH: Duration = Duration::from_secs(120);
const MIN_REFRESH_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub refresh_interval: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { full_screen: false, log_level: None, refresh_interval: DEFAULT_REFRESH }
    }
}

impl AppSettings {
    /// `SPORTSDASH_REFRESH_SECS` and `SPORTSDASH_LOG` override the defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(raw) = lookup("SPORTSDASH_REFRESH_SECS").filter(|v| !v.trim().is_empty()) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("SPORTSDASH_REFRESH_SECS={raw:?} is not a number"))?;
            settings.refresh_interval = Duration::from_secs(secs.max(MIN_REFRESH_SECS));
        }

        if let Some(raw) = lookup("SPORTSDASH_LOG").filter(|v| !v.trim().is_empty()) {
            match LevelFilter::from_str(raw.trim()) {
                Ok(level) => settings.log_level = Some(level),
                Err(_) => bail!("SPORTSDASH_LOG={raw:?}: expected off|error|warn|info|debug|trace"),
            }
        }

        Ok(settings)
    }

    pub fn effective_log_level(&self) -> LevelFilter {
        self.log_level.unwrap_or(LevelFilter::Info)
    }
}
