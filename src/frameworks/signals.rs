use crate::config::Config;
use crate::core::DealRecord;
use crate::core::aggregate::{Dimension, aggregate};
use crate::core::report::FrameworkAssessment;
use crate::frameworks::Framework;
use anyhow::{Result, bail};

pub struct SignalsFramework;

impl Framework for SignalsFramework {
    fn name(&self) -> &'static str {
        "signals"
    }

    fn is_enabled(&self, cfg: &Config) -> bool {
        cfg.frameworks.signals.enabled
    }

    fn detect(&self, deal: &DealRecord) -> bool {
        !deal.signals.is_empty()
    }

    fn assess(&self, deal: &DealRecord, cfg: &Config) -> Result<FrameworkAssessment> {
        if deal.signals.is_empty() {
            bail!("deal `{}` has no intent signals", deal.name);
        }

        let scale = cfg.scales.intent.to_scale("intent")?;
        let max = cfg.frameworks.signals.strength_max;
        let dimensions: Vec<Dimension> = deal
            .signals
            .iter()
            .map(|signal| Dimension::new(signal.kind.clone(), signal.strength, max))
            .collect();

        Ok(FrameworkAssessment {
            framework: self.name().to_string(),
            scale: scale.name.clone(),
            scores: aggregate(&dimensions, &scale)?,
        })
    }
}
