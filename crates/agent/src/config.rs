//! Command-line configuration for the agent.
//!
//! Per-game settings (side, depth limit, caching, algorithm) arrive in the
//! protocol handshake. Everything here is fixed for the life of the process.

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use mancala_mcts::MctsConfig;
use mancala_search::Heuristic;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

/// Evaluation used when the depth limit cuts a search off.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicKind {
    /// Store difference, the same formula as the end-of-game utility
    StoreDifference,
    /// Banked stones weighted four to one over stones still on the row
    Weighted,
}

impl HeuristicKind {
    pub fn heuristic(self) -> Heuristic {
        match self {
            HeuristicKind::StoreDifference => Heuristic::StoreDifference,
            HeuristicKind::Weighted => Heuristic::WEIGHTED,
        }
    }
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "mancala-agent")]
#[command(about = "Mancala AI - plays Kalah against a game manager")]
#[command(
    long_about = "Plays Kalah for a game manager over stdin/stdout. The manager picks the
side, depth limit, caching and algorithm (minimax, alpha-beta or MCTS) in the
first line it sends. Diagnostics are written to stderr."
)]
pub struct Config {
    /// Name announced to the game manager
    #[arg(long, default_value = "Mancala AI")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Number of MCTS rollouts per move
    #[arg(long, default_value_t = 50)]
    pub rollouts: usize,

    /// Exploration weight in the MCTS UCB formula
    #[arg(long, default_value_t = 1.0)]
    pub exploration_weight: f64,

    /// Seed for MCTS playouts (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Evaluation at the depth limit for minimax and alpha-beta
    #[arg(long, value_enum, default_value_t = HeuristicKind::StoreDifference)]
    pub heuristic: HeuristicKind,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(anyhow!("name cannot be empty"));
        }

        if self.name.contains(['\n', '\r']) {
            return Err(anyhow!("name must fit on one line"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        self.mcts_config().validate()?;

        Ok(())
    }

    pub fn mcts_config(&self) -> MctsConfig {
        MctsConfig {
            exploration_weight: self.exploration_weight,
            rollouts: self.rollouts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            name: "Mancala AI".into(),
            log_level: "info".into(),
            rollouts: 50,
            exploration_weight: 1.0,
            seed: None,
            heuristic: HeuristicKind::StoreDifference,
        }
    }

    #[test]
    fn defaults_match_cli() {
        let cfg = Config::parse_from(["mancala-agent"]);
        assert_eq!(cfg.name, "Mancala AI");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.rollouts, 50);
        assert_eq!(cfg.exploration_weight, 1.0);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.heuristic, HeuristicKind::StoreDifference);
    }

    #[test]
    fn parses_overrides() {
        let cfg = Config::parse_from([
            "mancala-agent",
            "--name",
            "Kalah Bot",
            "--rollouts",
            "400",
            "--exploration-weight",
            "1.4",
            "--seed",
            "7",
            "--heuristic",
            "weighted",
        ]);
        assert_eq!(cfg.name, "Kalah Bot");
        assert_eq!(cfg.rollouts, 400);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.heuristic, HeuristicKind::Weighted);
        assert_eq!(cfg.heuristic.heuristic(), Heuristic::WEIGHTED);
    }

    #[test]
    fn validate_accepts_valid_configuration() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_name() {
        let mut cfg = base_config();
        cfg.name = "  ".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn validate_rejects_multiline_name() {
        let mut cfg = base_config();
        cfg.name = "Mancala\nAI".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut cfg = base_config();
        cfg.log_level = "nope".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn validate_rejects_negative_exploration_weight() {
        let mut cfg = base_config();
        cfg.exploration_weight = -0.1;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("exploration weight"));
    }

    #[test]
    fn validate_accepts_zero_rollouts() {
        let mut cfg = base_config();
        cfg.rollouts = 0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn serializes_heuristic_in_kebab_case() {
        let json = serde_json::to_string(&base_config()).unwrap();
        assert!(json.contains("\"heuristic\":\"store-difference\""));
    }
}
