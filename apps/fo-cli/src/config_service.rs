//! Loading configurations and applying command-line overrides.

use std::path::Path;

use fo_controls::{ControllerGains, ControllerKind, InputKind};
use fo_sim::SimulationConfig;

use crate::error::{CliError, CliResult};

/// Load a configuration from a YAML file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> CliResult<SimulationConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::ConfigFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> CliResult<SimulationConfig> {
    serde_yaml::from_str(content)
        .map_err(|e| CliError::ConfigParse(format!("Failed to parse config YAML: {}", e)))
}

pub fn config_to_yaml(config: &SimulationConfig) -> CliResult<String> {
    serde_yaml::to_string(config)
        .map_err(|e| CliError::ConfigParse(format!("Failed to serialize config: {}", e)))
}

/// Values given on the command line. `None` keeps the base value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub k: Option<f64>,
    pub tau: Option<f64>,
    pub t_sim: Option<f64>,
    pub dt: Option<f64>,
    pub input: Option<String>,
    pub amplitude: Option<f64>,
    pub slope: Option<f64>,
    pub controller: Option<String>,
    pub kp: Option<f64>,
    pub ki: Option<f64>,
    pub kd: Option<f64>,
}

impl ConfigOverrides {
    /// Merge onto `base` and validate the result.
    ///
    /// Input and controller kinds are resolved by label. Gains not given on
    /// the command line are taken from `base` when it already uses them;
    /// a gain the selected controller needs that is in neither place is an
    /// error.
    pub fn apply(&self, base: SimulationConfig) -> CliResult<SimulationConfig> {
        let mut config = base;
        if let Some(k) = self.k {
            config.k = k;
        }
        if let Some(tau) = self.tau {
            config.tau = tau;
        }
        if let Some(t_sim) = self.t_sim {
            config.t_sim = t_sim;
        }
        if let Some(dt) = self.dt {
            config.dt = dt;
        }

        config.input = self.resolve_input(&config.input)?;
        config.controller = self.resolve_controller(&config.controller)?;

        config.validate()?;
        Ok(config)
    }

    fn resolve_input(&self, base: &InputKind) -> CliResult<InputKind> {
        let label = self.input.as_deref().unwrap_or(base.label());
        let inherited = |kind: &str| (base.label() == kind).then(|| base.parameter());
        let parameter = match label.trim().to_ascii_lowercase().as_str() {
            "step" => self.amplitude.or_else(|| inherited("step")).unwrap_or(1.0),
            "ramp" => self.slope.or_else(|| inherited("ramp")).unwrap_or(1.0),
            // Let from_label report the unknown kind.
            _ => 0.0,
        };
        Ok(InputKind::from_label(label, parameter)?)
    }

    fn resolve_controller(&self, base: &ControllerKind) -> CliResult<ControllerKind> {
        let (base_kp, base_ki, base_kd) = match *base {
            ControllerKind::None => (None, None, None),
            ControllerKind::P { kp } => (Some(kp), None, None),
            ControllerKind::Pi { kp, ki } => (Some(kp), Some(ki), None),
            ControllerKind::Pid { kp, ki, kd } => (Some(kp), Some(ki), Some(kd)),
        };
        let gains = ControllerGains {
            kp: self.kp.or(base_kp),
            ki: self.ki.or(base_ki),
            kd: self.kd.or(base_kd),
        };
        let label = self.controller.as_deref().unwrap_or(base.label());
        Ok(ControllerKind::from_label(label, gains)?)
    }
}
