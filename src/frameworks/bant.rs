use crate::config::Config;
use crate::core::DealRecord;
use crate::core::aggregate::{Dimension, aggregate};
use crate::core::report::FrameworkAssessment;
use crate::frameworks::Framework;
use anyhow::{Result, bail};

pub struct BantFramework;

impl Framework for BantFramework {
    fn name(&self) -> &'static str {
        "bant"
    }

    fn is_enabled(&self, cfg: &Config) -> bool {
        cfg.frameworks.bant.enabled
    }

    fn detect(&self, deal: &DealRecord) -> bool {
        deal.bant.is_some()
    }

    fn assess(&self, deal: &DealRecord, cfg: &Config) -> Result<FrameworkAssessment> {
        let Some(block) = deal.bant.as_ref() else {
            bail!("deal `{}` has no bant block", deal.name);
        };

        let scale = cfg.scales.quality.to_scale("quality")?;
        let max = cfg.frameworks.bant.dimension_max;
        let dimensions = vec![
            Dimension::new("budget", block.budget, max),
            Dimension::new("authority", block.authority, max),
            Dimension::new("need", block.need, max),
            Dimension::new("timeline", block.timeline, max),
        ];

        Ok(FrameworkAssessment {
            framework: self.name().to_string(),
            scale: scale.name.clone(),
            scores: aggregate(&dimensions, &scale)?,
        })
    }
}
