//! Session configuration.
//!
//! A closed, validated record — the redesign spec §9 calls for in place of
//! dynamic/stringly-typed configuration. Every field here is one spec §6
//! names; there is no escape hatch for unknown keys because there is no
//! map to put them in.

use crate::error::CoreError;
use std::collections::HashSet;
use std::time::Duration;

/// How the session handles `Interactive` (human-in-the-loop) challenges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChallengeSolveMode {
    /// Solve `JsInterstitial`/`ManagedWait`/`RateLimited` automatically;
    /// `Interactive` surfaces as `ChallengeUnsolvable{reason: Interactive}`.
    #[default]
    Auto,
    /// Never invoke the Solver; the Detector still classifies responses and
    /// they are returned to the caller unsolved with `challenge_record` set.
    Off,
    /// Like `Auto`, but `Interactive` is delegated to the session's
    /// `interactive_resolver` callback instead of failing immediately.
    ExternalInteractive,
}

#[derive(Clone)]
pub struct SessionConfig {
    pub profile: String,
    pub max_concurrency: usize,
    pub rate_per_second: f64,
    pub rate_burst: u32,
    pub default_deadline: Duration,
    pub origin_whitelist: Option<HashSet<String>>,
    pub challenge_solve: ChallengeSolveMode,
    pub follow_redirects: u32,
    pub idle_connection_timeout: Duration,
    pub sandbox_memory_limit: usize,
    pub sandbox_wall_time: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            profile: "chrome-124-desktop-windows".to_string(),
            max_concurrency: 1000,
            rate_per_second: 5.0,
            rate_burst: 10,
            default_deadline: Duration::from_secs(30),
            origin_whitelist: None,
            challenge_solve: ChallengeSolveMode::Auto,
            follow_redirects: 10,
            idle_connection_timeout: Duration::from_secs(90),
            sandbox_memory_limit: 50 * 1024 * 1024,
            sandbox_wall_time: Duration::from_secs(10),
        }
    }
}

#[derive(Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.config.profile = profile.into();
        self
    }

    pub fn max_concurrency(mut self, n: usize) -> Self {
        self.config.max_concurrency = n;
        self
    }

    pub fn rate_per_second(mut self, rate: f64) -> Self {
        self.config.rate_per_second = rate;
        self
    }

    pub fn rate_burst(mut self, burst: u32) -> Self {
        self.config.rate_burst = burst;
        self
    }

    pub fn default_deadline(mut self, deadline: Duration) -> Self {
        self.config.default_deadline = deadline;
        self
    }

    pub fn origin_whitelist(mut self, hosts: impl IntoIterator<Item = String>) -> Self {
        self.config.origin_whitelist = Some(hosts.into_iter().collect());
        self
    }

    pub fn challenge_solve(mut self, mode: ChallengeSolveMode) -> Self {
        self.config.challenge_solve = mode;
        self
    }

    pub fn follow_redirects(mut self, n: u32) -> Self {
        self.config.follow_redirects = n;
        self
    }

    pub fn idle_connection_timeout(mut self, d: Duration) -> Self {
        self.config.idle_connection_timeout = d;
        self
    }

    pub fn sandbox_memory_limit(mut self, bytes: usize) -> Self {
        self.config.sandbox_memory_limit = bytes;
        self
    }

    pub fn sandbox_wall_time(mut self, d: Duration) -> Self {
        self.config.sandbox_wall_time = d;
        self
    }

    pub fn build(self) -> Result<SessionConfig, CoreError> {
        let c = self.config;
        if c.profile.trim().is_empty() {
            return Err(CoreError::ConfigError {
                detail: "profile must be set".into(),
            });
        }
        if c.rate_per_second <= 0.0 {
            return Err(CoreError::ConfigError {
                detail: "rate_per_second must be positive".into(),
            });
        }
        if c.rate_burst == 0 {
            return Err(CoreError::ConfigError {
                detail: "rate_burst must be positive".into(),
            });
        }
        if c.max_concurrency == 0 {
            return Err(CoreError::ConfigError {
                detail: "max_concurrency must be positive".into(),
            });
        }
        if c.follow_redirects > 20 {
            return Err(CoreError::ConfigError {
                detail: "follow_redirects must be <= 20".into(),
            });
        }
        if c.sandbox_memory_limit == 0 {
            return Err(CoreError::ConfigError {
                detail: "sandbox_memory_limit must be positive".into(),
            });
        }
        Ok(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SessionConfigBuilder::new().build().unwrap();
        assert_eq!(cfg.profile, "chrome-124-desktop-windows");
        assert_eq!(cfg.follow_redirects, 10);
    }

    #[test]
    fn rejects_zero_rate() {
        let err = SessionConfigBuilder::new()
            .rate_per_second(0.0)
            .build()
            .unwrap_err();
        assert_eq!(err.code(), "config_error");
    }

    #[test]
    fn rejects_excessive_redirects() {
        let err = SessionConfigBuilder::new()
            .follow_redirects(21)
            .build()
            .unwrap_err();
        assert_eq!(err.code(), "config_error");
    }

    #[test]
    fn builder_overrides_apply() {
        let cfg = SessionConfigBuilder::new()
            .max_concurrency(50)
            .rate_per_second(2.5)
            .rate_burst(4)
            .follow_redirects(3)
            .build()
            .unwrap();
        assert_eq!(cfg.max_concurrency, 50);
        assert_eq!(cfg.rate_burst, 4);
        assert_eq!(cfg.follow_redirects, 3);
    }
}
