pub mod aggregate;
pub mod classify;
pub mod report;

use crate::config::Config;
use crate::core::aggregate::{Dimension, aggregate};
use crate::core::classify::{Scale, classify, trend};
use crate::core::report::{Counts, DealAssessment, FinalReport, PortfolioScore};
use crate::frameworks;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The input file: a book of deal records as exported from a CRM or
/// assembled by hand. Unknown blocks on a deal are simply absent options.
#[derive(Debug, Clone, Deserialize)]
pub struct DealBook {
    #[serde(default)]
    pub deals: Vec<DealRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DealRecord {
    pub name: String,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub bant: Option<BantScores>,
    #[serde(default)]
    pub meddpicc: Option<MeddpiccScores>,
    #[serde(default)]
    pub signals: Vec<SignalRecord>,
    #[serde(default)]
    pub health: Option<f64>,
    #[serde(default)]
    pub velocity: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BantScores {
    pub budget: f64,
    pub authority: f64,
    pub need: f64,
    pub timeline: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MeddpiccScores {
    pub metrics: f64,
    pub economic_buyer: f64,
    pub decision_criteria: f64,
    pub decision_process: f64,
    pub paper_process: f64,
    pub identify_pain: f64,
    pub champion: f64,
    pub competition: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignalRecord {
    pub kind: String,
    pub strength: f64,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub enum RunProfile {
    Full,
    BantOnly,
    MeddpiccOnly,
    SignalsOnly,
}

impl RunProfile {
    fn includes(self, framework: &str) -> bool {
        match self {
            Self::Full => true,
            Self::BantOnly => framework == "bant",
            Self::MeddpiccOnly => framework == "meddpicc",
            Self::SignalsOnly => framework == "signals",
        }
    }
}

pub fn run_assessment(input: &Path, cfg: &Config, profile: RunProfile) -> Result<FinalReport> {
    let book = load_deal_book(input)?;
    assess_book(&book, cfg, profile)
}

pub fn load_deal_book(path: &Path) -> Result<DealBook> {
    if !path.exists() {
        bail!("input file not found: {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading input file {}", path.display()))?;
    let book = serde_json::from_str::<DealBook>(&content)
        .with_context(|| format!("failed parsing input file {}", path.display()))?;
    Ok(book)
}

pub fn assess_book(book: &DealBook, cfg: &Config, profile: RunProfile) -> Result<FinalReport> {
    if book.deals.is_empty() {
        bail!("input contains no deals");
    }

    let quality = cfg.scales.quality.to_scale("quality")?;

    let mut assessments = Vec::with_capacity(book.deals.len());
    for deal in &book.deals {
        assessments.push(assess_deal(deal, cfg, profile, &quality)?);
    }
    sort_assessments(&mut assessments);

    let scored: Vec<Dimension> = assessments
        .iter()
        .filter(|assessment| assessment.overall.is_some())
        .map(|assessment| Dimension::new(assessment.name.clone(), assessment.total, assessment.total_max))
        .collect();
    if scored.is_empty() {
        bail!("no scorable data found in any deal");
    }

    let rollup = aggregate(&scored, &quality)?;
    let portfolio = PortfolioScore {
        total: rollup.total,
        total_max: rollup.total_max,
        deals_scored: scored.len(),
        overall: rollup.overall,
    };

    let counts = Counts::from_assessments(&assessments, &quality);
    let exit = report::evaluate_exit(&portfolio, &assessments, cfg, quality.len());

    Ok(FinalReport {
        portfolio,
        counts,
        deals: assessments,
        config: report::ConfigSummary {
            fail_on: cfg.general.fail_on,
            min_score: cfg.general.min_score,
        },
        exit,
    })
}

fn assess_deal(
    deal: &DealRecord,
    cfg: &Config,
    profile: RunProfile,
    quality: &Scale,
) -> Result<DealAssessment> {
    let mut sections = Vec::new();
    for framework in frameworks::all_frameworks() {
        if !profile.includes(framework.name()) {
            continue;
        }
        if !framework.is_enabled(cfg) || !framework.detect(deal) {
            continue;
        }
        sections.push(framework.assess(deal, cfg)?);
    }

    let full_run = matches!(profile, RunProfile::Full);
    let health = if full_run {
        deal.health
            .map(|value| classify(value, 100.0, quality))
            .transpose()
            .with_context(|| format!("invalid health score on deal `{}`", deal.name))?
    } else {
        None
    };
    let velocity = if full_run {
        deal.velocity
            .map(|delta| trend(delta, cfg.scales.velocity.stable_tolerance))
            .transpose()
            .with_context(|| format!("invalid velocity on deal `{}`", deal.name))?
    } else {
        None
    };

    let mut dimensions: Vec<Dimension> = sections
        .iter()
        .map(|section| {
            Dimension::new(
                section.framework.clone(),
                section.scores.total,
                section.scores.total_max,
            )
        })
        .collect();
    if let Some(value) = deal.health
        && full_run
    {
        dimensions.push(Dimension::new("health", value, 100.0));
    }

    let (total, total_max, overall) = if dimensions.is_empty() {
        (0.0, 0.0, None)
    } else {
        let rollup = aggregate(&dimensions, quality)
            .with_context(|| format!("failed scoring deal `{}`", deal.name))?;
        (rollup.total, rollup.total_max, Some(rollup.overall))
    };

    Ok(DealAssessment {
        name: deal.name.clone(),
        stage: deal.stage.clone(),
        frameworks: sections,
        health,
        velocity,
        total,
        total_max,
        overall,
    })
}

fn sort_assessments(assessments: &mut [DealAssessment]) {
    assessments.sort_by(|a, b| {
        let weight = |assessment: &DealAssessment| {
            assessment
                .overall
                .as_ref()
                .map(|score| score.rank as i64)
                .unwrap_or(-1)
        };
        // weakest deals first, unscored last
        weight(b).cmp(&weight(a)).then(a.name.cmp(&b.name))
    });
}
