use crate::core::classify::{Band, Scale};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub scales: ScalesConfig,
    pub frameworks: FrameworksConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub fail_on: FailOn,
    pub min_score: u8,
    pub json: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            fail_on: FailOn::Risk,
            min_score: 40,
            json: false,
        }
    }
}

/// Which deals sink the run: `stalled` fails only deals in the weakest band,
/// `risk` also fails the band above it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    #[default]
    Risk,
    Stalled,
    None,
}

impl fmt::Display for FailOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Risk => write!(f, "risk"),
            Self::Stalled => write!(f, "stalled"),
            Self::None => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalesConfig {
    pub quality: ScaleConfig,
    pub intent: ScaleConfig,
    pub velocity: VelocityConfig,
}

impl Default for ScalesConfig {
    fn default() -> Self {
        Self {
            quality: ScaleConfig {
                bands: vec![
                    BandConfig::new(90.0, "excellent", "green"),
                    BandConfig::new(70.0, "good", "cyan"),
                    BandConfig::new(50.0, "fair", "yellow"),
                    BandConfig::new(0.0, "poor", "red"),
                ],
            },
            intent: ScaleConfig {
                bands: vec![
                    BandConfig::new(80.0, "hot", "magenta"),
                    BandConfig::new(60.0, "warm", "yellow"),
                    BandConfig::new(40.0, "engaged", "cyan"),
                    BandConfig::new(20.0, "aware", "blue"),
                    BandConfig::new(0.0, "cold", "white"),
                ],
            },
            velocity: VelocityConfig::default(),
        }
    }
}

impl ScalesConfig {
    pub fn resolve(&self, name: &str) -> Result<Scale> {
        match name {
            "quality" => Ok(self.quality.to_scale("quality")?),
            "intent" => Ok(self.intent.to_scale("intent")?),
            other => bail!("unknown scale `{}` (expected `quality` or `intent`)", other),
        }
    }
}

/// A threshold table as configuration: band minimums are percentages of the
/// scored value's max, so one table shape serves percentage scores and
/// 0-5 signal strengths alike.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub bands: Vec<BandConfig>,
}

impl ScaleConfig {
    pub fn to_scale(&self, name: &str) -> Result<Scale, crate::core::classify::ScoreError> {
        let bands = self
            .bands
            .iter()
            .map(|band| Band::new(band.min, band.label.clone(), band.color.clone()))
            .collect();
        Scale::new(name, bands)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandConfig {
    pub min: f64,
    pub label: String,
    pub color: String,
}

impl BandConfig {
    fn new(min: f64, label: &str, color: &str) -> Self {
        Self {
            min,
            label: label.to_string(),
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocityConfig {
    pub stable_tolerance: f64,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            stable_tolerance: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworksConfig {
    pub bant: BantConfig,
    pub meddpicc: MeddpiccConfig,
    pub signals: SignalsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BantConfig {
    pub enabled: bool,
    pub dimension_max: f64,
}

impl Default for BantConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dimension_max: 25.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeddpiccConfig {
    pub enabled: bool,
    pub dimension_max: f64,
}

impl Default for MeddpiccConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dimension_max: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalsConfig {
    pub enabled: bool,
    pub strength_max: f64,
}

impl Default for SignalsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            strength_max: 5.0,
        }
    }
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    if let Some(path) = cli_config_path {
        if !path.exists() {
            bail!(
                "config file not found at {} (passed with --config)",
                path.display()
            );
        }

        return Ok(LoadedConfig {
            config: read_config(path)?,
        });
    }

    let local_path = cwd.join("dealgauge.toml");
    if local_path.exists() {
        return Ok(LoadedConfig {
            config: read_config(&local_path)?,
        });
    }

    Ok(LoadedConfig {
        config: Config::default(),
    })
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "refusing to overwrite existing config file: {}",
            path.display()
        );
    }

    let content = default_config_toml()?;
    fs::write(path, content).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("failed to serialize default config")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("failed parsing config file {}", path.display()))?;
    Ok(config)
}
