use crate::core::aggregate::Dimension;
use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;

static DIMENSION_SPEC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z0-9_ -]*?)\s*=\s*(-?[0-9]+(?:\.[0-9]+)?)\s*/\s*(-?[0-9]+(?:\.[0-9]+)?)\s*$")
        .expect("valid dimension spec regex")
});

/// Parses an ad-hoc dimension spec of the form `name=value/max`,
/// e.g. `budget=18/25` or `need = 4.5/5`.
pub fn parse_dimension_spec(spec: &str) -> Result<Dimension> {
    let Some(captures) = DIMENSION_SPEC_RE.captures(spec) else {
        bail!("invalid dimension spec `{}` (expected name=value/max)", spec);
    };

    let name = captures[1].trim().to_string();
    let value: f64 = captures[2]
        .parse()
        .with_context(|| format!("invalid value in dimension spec `{}`", spec))?;
    let max: f64 = captures[3]
        .parse()
        .with_context(|| format!("invalid max in dimension spec `{}`", spec))?;

    Ok(Dimension::new(name, value, max))
}
