use crate::config::{Config, FailOn};
use crate::core::aggregate::AggregateScore;
use crate::core::classify::{ClassifiedScore, Scale, TrendReading};
use colored::Colorize;
use serde::Serialize;

/// One framework's scored section of a deal. `scale` names the threshold
/// table the section was classified on.
#[derive(Debug, Clone, Serialize)]
pub struct FrameworkAssessment {
    pub framework: String,
    pub scale: String,
    pub scores: AggregateScore,
}

#[derive(Debug, Clone, Serialize)]
pub struct DealAssessment {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    pub frameworks: Vec<FrameworkAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<ClassifiedScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity: Option<TrendReading>,
    pub total: f64,
    pub total_max: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<ClassifiedScore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioScore {
    pub total: f64,
    pub total_max: f64,
    pub deals_scored: usize,
    pub overall: ClassifiedScore,
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelCount {
    pub label: String,
    pub color: String,
    pub deals: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Counts {
    pub per_level: Vec<LevelCount>,
    pub unscored: usize,
    pub total: usize,
}

impl Counts {
    pub fn from_assessments(assessments: &[DealAssessment], scale: &Scale) -> Self {
        let mut per_level: Vec<LevelCount> = scale
            .bands()
            .iter()
            .map(|band| LevelCount {
                label: band.label.clone(),
                color: band.color.clone(),
                deals: 0,
            })
            .collect();
        let mut unscored = 0;

        for assessment in assessments {
            match &assessment.overall {
                Some(score) if score.rank < per_level.len() => per_level[score.rank].deals += 1,
                Some(_) => {}
                None => unscored += 1,
            }
        }

        Self {
            per_level,
            unscored,
            total: assessments.len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExitStatus {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl ExitStatus {
    pub fn reason_line(&self) -> String {
        self.reasons.join("; ")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub fail_on: FailOn,
    pub min_score: u8,
}

#[derive(Debug, Clone)]
pub struct FinalReport {
    pub portfolio: PortfolioScore,
    pub counts: Counts,
    pub deals: Vec<DealAssessment>,
    pub config: ConfigSummary,
    pub exit: ExitStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub portfolio: PortfolioScore,
    pub counts: Counts,
    pub deals: Vec<DealAssessment>,
    pub config: ConfigSummary,
}

impl From<&FinalReport> for JsonReport {
    fn from(report: &FinalReport) -> Self {
        Self {
            portfolio: report.portfolio.clone(),
            counts: report.counts.clone(),
            deals: report.deals.clone(),
            config: report.config.clone(),
        }
    }
}

pub fn meets_fail_on(score: &ClassifiedScore, band_count: usize, fail_on: FailOn) -> bool {
    let from_bottom = band_count.saturating_sub(1).saturating_sub(score.rank);
    match fail_on {
        FailOn::None => false,
        FailOn::Stalled => from_bottom == 0,
        FailOn::Risk => from_bottom <= 1,
    }
}

pub fn evaluate_exit(
    portfolio: &PortfolioScore,
    deals: &[DealAssessment],
    cfg: &Config,
    band_count: usize,
) -> ExitStatus {
    let mut reasons = Vec::new();

    if portfolio.overall.percentage < cfg.general.min_score as f64 {
        reasons.push(format!(
            "portfolio score {:.1}% is below min_score {}",
            portfolio.overall.percentage, cfg.general.min_score
        ));
    }

    if cfg.general.fail_on != FailOn::None {
        let failing: Vec<&str> = deals
            .iter()
            .filter(|deal| {
                deal.overall
                    .as_ref()
                    .is_some_and(|score| meets_fail_on(score, band_count, cfg.general.fail_on))
            })
            .map(|deal| deal.name.as_str())
            .collect();

        if !failing.is_empty() {
            reasons.push(match cfg.general.fail_on {
                FailOn::Risk => format!("found at-risk deals: {}", failing.join(", ")),
                FailOn::Stalled => format!("found stalled deals: {}", failing.join(", ")),
                FailOn::None => String::new(),
            });
        }
    }

    ExitStatus {
        ok: reasons.is_empty(),
        reasons,
    }
}

fn paint(text: &str, color: &str) -> String {
    match color {
        "green" => text.green().bold().to_string(),
        "cyan" => text.cyan().bold().to_string(),
        "yellow" => text.yellow().bold().to_string(),
        "red" => text.red().bold().to_string(),
        "magenta" => text.magenta().bold().to_string(),
        "blue" => text.blue().bold().to_string(),
        "white" => text.white().bold().to_string(),
        _ => text.bold().to_string(),
    }
}

fn painted_score(score: &ClassifiedScore) -> String {
    format!("{:.1}% ({})", score.percentage, paint(&score.label, &score.color))
}

pub fn print_human(report: &FinalReport) {
    println!(
        "Pipeline Score: {:.1}% ({})",
        report.portfolio.overall.percentage,
        paint(&report.portfolio.overall.label, &report.portfolio.overall.color)
    );
    println!(
        "deals scored: {}/{}",
        report.portfolio.deals_scored, report.counts.total
    );

    for level in &report.counts.per_level {
        if level.deals == 0 {
            continue;
        }
        println!("{}: {}", paint(&level.label, &level.color), level.deals);
    }
    if report.counts.unscored > 0 {
        println!("unscored: {}", report.counts.unscored);
    }

    for deal in &report.deals {
        println!();
        print_deal(deal);
    }

    println!();
    if report.exit.ok {
        println!("exit: OK");
    } else {
        println!("exit: FAILED ({})", report.exit.reason_line());
    }
}

fn print_deal(deal: &DealAssessment) {
    let stage = deal
        .stage
        .as_ref()
        .map(|stage| format!(" [{}]", stage))
        .unwrap_or_default();

    match &deal.overall {
        Some(overall) => println!("{}{} - {}", deal.name, stage, painted_score(overall)),
        None => println!("{}{} - no scorable data", deal.name, stage),
    }

    for section in &deal.frameworks {
        println!(
            "  {}: {}",
            section.framework,
            painted_score(&section.scores.overall)
        );
        for dimension in &section.scores.per_dimension {
            println!(
                "    {} {}/{} - {}",
                dimension.name,
                dimension.value,
                dimension.max,
                painted_score(&dimension.score)
            );
        }
    }

    if let Some(health) = &deal.health {
        println!("  health: {}", painted_score(health));
    }
    if let Some(velocity) = &deal.velocity {
        println!(
            "  velocity: {:+.1} ({})",
            velocity.delta,
            paint(&velocity.direction, &velocity.color)
        );
    }
}

pub fn print_classified(name: &str, value: f64, max: f64, score: &ClassifiedScore) {
    println!("{} {}/{} - {}", name, value, max, painted_score(score));
}

pub fn print_aggregate(result: &AggregateScore) {
    for dimension in &result.per_dimension {
        print_classified(&dimension.name, dimension.value, dimension.max, &dimension.score);
    }
    println!(
        "overall {}/{} - {}",
        result.total,
        result.total_max,
        painted_score(&result.overall)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::{Band, classify};

    fn quality() -> Scale {
        Scale::new(
            "quality",
            vec![
                Band::new(90.0, "excellent", "green"),
                Band::new(70.0, "good", "cyan"),
                Band::new(50.0, "fair", "yellow"),
                Band::new(0.0, "poor", "red"),
            ],
        )
        .unwrap()
    }

    fn assessment(name: &str, value: f64, max: f64, scale: &Scale) -> DealAssessment {
        DealAssessment {
            name: name.to_string(),
            stage: None,
            frameworks: Vec::new(),
            health: None,
            velocity: None,
            total: value,
            total_max: max,
            overall: Some(classify(value, max, scale).unwrap()),
        }
    }

    fn portfolio(percentage: f64, scale: &Scale) -> PortfolioScore {
        PortfolioScore {
            total: percentage,
            total_max: 100.0,
            deals_scored: 1,
            overall: classify(percentage, 100.0, scale).unwrap(),
        }
    }

    #[test]
    fn fail_on_matches_bottom_bands() {
        let scale = quality();
        let poor = classify(10.0, 100.0, &scale).unwrap();
        let fair = classify(55.0, 100.0, &scale).unwrap();
        let good = classify(75.0, 100.0, &scale).unwrap();

        assert!(meets_fail_on(&poor, scale.len(), FailOn::Stalled));
        assert!(!meets_fail_on(&fair, scale.len(), FailOn::Stalled));
        assert!(meets_fail_on(&poor, scale.len(), FailOn::Risk));
        assert!(meets_fail_on(&fair, scale.len(), FailOn::Risk));
        assert!(!meets_fail_on(&good, scale.len(), FailOn::Risk));
        assert!(!meets_fail_on(&poor, scale.len(), FailOn::None));
    }

    #[test]
    fn exit_fails_below_min_score() {
        let scale = quality();
        let cfg = Config::default();
        let exit = evaluate_exit(&portfolio(30.0, &scale), &[], &cfg, scale.len());
        assert!(!exit.ok);
        assert!(exit.reason_line().contains("below min_score"));
    }

    #[test]
    fn exit_names_failing_deals() {
        let scale = quality();
        let cfg = Config::default();
        let deals = vec![
            assessment("weak", 20.0, 100.0, &scale),
            assessment("strong", 95.0, 100.0, &scale),
        ];
        let exit = evaluate_exit(&portfolio(57.5, &scale), &deals, &cfg, scale.len());
        assert!(!exit.ok);
        assert!(exit.reason_line().contains("weak"));
        assert!(!exit.reason_line().contains("strong"));
    }

    #[test]
    fn exit_passes_when_gates_are_met() {
        let scale = quality();
        let cfg = Config::default();
        let deals = vec![assessment("strong", 95.0, 100.0, &scale)];
        let exit = evaluate_exit(&portfolio(95.0, &scale), &deals, &cfg, scale.len());
        assert!(exit.ok);
        assert!(exit.reasons.is_empty());
    }

    #[test]
    fn fail_on_none_disables_deal_gating() {
        let scale = quality();
        let mut cfg = Config::default();
        cfg.general.fail_on = FailOn::None;
        let deals = vec![assessment("weak", 45.0, 100.0, &scale)];
        let exit = evaluate_exit(&portfolio(45.0, &scale), &deals, &cfg, scale.len());
        assert!(exit.ok);
    }

    #[test]
    fn counts_group_deals_by_level() {
        let scale = quality();
        let mut assessments = vec![
            assessment("a", 95.0, 100.0, &scale),
            assessment("b", 72.0, 100.0, &scale),
            assessment("c", 71.0, 100.0, &scale),
            assessment("d", 10.0, 100.0, &scale),
        ];
        assessments.push(DealAssessment {
            name: "unscored".to_string(),
            stage: None,
            frameworks: Vec::new(),
            health: None,
            velocity: None,
            total: 0.0,
            total_max: 0.0,
            overall: None,
        });

        let counts = Counts::from_assessments(&assessments, &scale);
        assert_eq!(counts.total, 5);
        assert_eq!(counts.unscored, 1);
        assert_eq!(counts.per_level[0].deals, 1); // excellent
        assert_eq!(counts.per_level[1].deals, 2); // good
        assert_eq!(counts.per_level[2].deals, 0); // fair
        assert_eq!(counts.per_level[3].deals, 1); // poor
    }
}
