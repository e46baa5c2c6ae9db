use std::path::Path;

use crate::{
    foundation::core::{ControlParameters, Fps},
    foundation::error::{LoopError, LoopResult},
    model::contract::ModelContract,
    trajectory::calibration::Calibration,
};

/// Playback and scheduling options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayerOpts {
    /// Playback rate of the loop.
    pub fps: Fps,
    /// Override the number of inference worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Parameters generated at startup, before any control input arrives.
    pub initial: ControlParameters,
}

impl Default for PlayerOpts {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            threads: None,
            initial: ControlParameters::default(),
        }
    }
}

/// Full runtime configuration: model interface, calibration and player options.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Slot names and shapes of the model artifacts.
    pub contract: ModelContract,
    /// Latent manifold constants shipped with the model.
    pub calibration: Calibration,
    /// Playback options.
    pub player: PlayerOpts,
}

impl LoopConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> LoopResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| LoopError::validation(format!("config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> LoopResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            LoopError::validation(format!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    /// Check every section.
    pub fn validate(&self) -> LoopResult<()> {
        self.contract.validate()?;
        self.calibration.validate()?;
        Fps::new(self.player.fps.num, self.player.fps.den)?;
        if self.player.threads == Some(0) {
            return Err(LoopError::validation("player threads must be >= 1 when set"));
        }
        let p = self.player.initial;
        ControlParameters::new(p.time_phase, p.amplitude)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
