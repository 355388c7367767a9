use crate::config::Config;
use crate::core::DealRecord;
use crate::core::aggregate::{Dimension, aggregate};
use crate::core::report::FrameworkAssessment;
use crate::frameworks::Framework;
use anyhow::{Result, bail};

pub struct MeddpiccFramework;

impl Framework for MeddpiccFramework {
    fn name(&self) -> &'static str {
        "meddpicc"
    }

    fn is_enabled(&self, cfg: &Config) -> bool {
        cfg.frameworks.meddpicc.enabled
    }

    fn detect(&self, deal: &DealRecord) -> bool {
        deal.meddpicc.is_some()
    }

    fn assess(&self, deal: &DealRecord, cfg: &Config) -> Result<FrameworkAssessment> {
        let Some(block) = deal.meddpicc.as_ref() else {
            bail!("deal `{}` has no meddpicc block", deal.name);
        };

        let scale = cfg.scales.quality.to_scale("quality")?;
        let max = cfg.frameworks.meddpicc.dimension_max;
        let dimensions = vec![
            Dimension::new("metrics", block.metrics, max),
            Dimension::new("economic_buyer", block.economic_buyer, max),
            Dimension::new("decision_criteria", block.decision_criteria, max),
            Dimension::new("decision_process", block.decision_process, max),
            Dimension::new("paper_process", block.paper_process, max),
            Dimension::new("identify_pain", block.identify_pain, max),
            Dimension::new("champion", block.champion, max),
            Dimension::new("competition", block.competition, max),
        ];

        Ok(FrameworkAssessment {
            framework: self.name().to_string(),
            scale: scale.name.clone(),
            scores: aggregate(&dimensions, &scale)?,
        })
    }
}
