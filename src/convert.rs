//! Pure conversion functions: TOML config structs -> crate API config types.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};

use koppen_classify::Convention;
use koppen_climatology::{ClimatologyConfig, EdgePolicy};

use crate::cli::ClassifyArgs;
use crate::config::{ClassifyToml, PeriodToml};

/// Where the per-cell summer half-year comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummerSource {
    /// The warmer of April-September and October-March.
    Temperature,
    /// April-September north of the equator.
    Latitude,
}

/// Parses a summer source name into the corresponding enum variant.
pub fn parse_summer(s: &str) -> Result<SummerSource> {
    match s.to_lowercase().as_str() {
        "temperature" => Ok(SummerSource::Temperature),
        "latitude" => Ok(SummerSource::Latitude),
        other => bail!("unknown summer source: {other:?}"),
    }
}

/// Summer source a convention uses unless overridden: the hemisphere for
/// Kottek06 and GFDL, the warmer half-year for Peel07.
pub fn default_summer(convention: Convention) -> SummerSource {
    match convention {
        Convention::Peel07 => SummerSource::Temperature,
        Convention::Kottek06 | Convention::Gfdl => SummerSource::Latitude,
    }
}

/// Pairs every convention with its summer source, applying `overrides`
/// keyed by convention name.
pub fn resolve_summer(
    conventions: &[Convention],
    overrides: &BTreeMap<String, String>,
) -> Result<Vec<(Convention, SummerSource)>> {
    let mut parsed = Vec::with_capacity(overrides.len());
    for (name, source) in overrides {
        let convention: Convention = name
            .parse()
            .with_context(|| format!("invalid convention in [classify.summer]: {name:?}"))?;
        parsed.push((convention, parse_summer(source)?));
    }
    Ok(conventions
        .iter()
        .map(|&convention| {
            let source = parsed
                .iter()
                .find(|(c, _)| *c == convention)
                .map_or_else(|| default_summer(convention), |&(_, s)| s);
            (convention, source)
        })
        .collect())
}

/// Parses convention names, dropping repeats while keeping their order.
pub fn parse_conventions(names: &[String]) -> Result<Vec<Convention>> {
    if names.is_empty() {
        bail!("no conventions requested");
    }
    let mut conventions = Vec::new();
    for name in names {
        let convention: Convention = name
            .parse()
            .with_context(|| format!("invalid convention in config: {name:?}"))?;
        if !conventions.contains(&convention) {
            conventions.push(convention);
        }
    }
    Ok(conventions)
}

/// Resolves the analysis period, CLI flags taking precedence.
pub fn resolve_period(period: &PeriodToml, args: &ClassifyArgs) -> (i32, i32) {
    (
        args.start_year.unwrap_or(period.start_year),
        args.end_year.unwrap_or(period.end_year),
    )
}

/// Builds a [`ClimatologyConfig`] for one input field.
///
/// Explicit per-sample weights from the field document replace calendar
/// weights.
pub fn build_climatology_config(
    start_year: i32,
    end_year: i32,
    classify: &ClassifyToml,
    sample_weights: Option<&[f64]>,
) -> ClimatologyConfig {
    let policy = if classify.truncate_seasons {
        EdgePolicy::Truncate
    } else {
        EdgePolicy::Skip
    };
    let mut cfg = ClimatologyConfig::new(start_year, end_year).with_edge_policy(policy);
    if let Some(w) = sample_weights {
        cfg = cfg.with_sample_weights(w.to_vec());
    }
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> ClassifyArgs {
        ClassifyArgs {
            config: PathBuf::from("koppen.toml"),
            tas: None,
            pr: None,
            output: None,
            start_year: None,
            end_year: Some(2014),
            conventions: Vec::new(),
        }
    }

    #[test]
    fn summer_sources() {
        assert_eq!(parse_summer("Temperature").unwrap(), SummerSource::Temperature);
        assert_eq!(parse_summer("latitude").unwrap(), SummerSource::Latitude);
        assert!(parse_summer("hemisphere").is_err());
    }

    #[test]
    fn summer_source_per_convention() {
        let all = Convention::ALL;
        let plan = resolve_summer(&all, &BTreeMap::new()).unwrap();
        for (convention, source) in plan {
            let expected = if convention == Convention::Peel07 {
                SummerSource::Temperature
            } else {
                SummerSource::Latitude
            };
            assert_eq!(source, expected, "{convention}");
        }

        let overrides = BTreeMap::from([("gfdl".to_string(), "temperature".to_string())]);
        let plan = resolve_summer(&[Convention::Gfdl, Convention::Kottek06], &overrides).unwrap();
        assert_eq!(
            plan,
            [
                (Convention::Gfdl, SummerSource::Temperature),
                (Convention::Kottek06, SummerSource::Latitude),
            ]
        );

        let bad = BTreeMap::from([("Trewartha".to_string(), "latitude".to_string())]);
        assert!(resolve_summer(&all, &bad).is_err());
        let bad = BTreeMap::from([("Peel07".to_string(), "equator".to_string())]);
        assert!(resolve_summer(&all, &bad).is_err());
    }

    #[test]
    fn conventions_deduplicated_in_order() {
        let names = ["gfdl", "Kottek06", "GFDL"].map(String::from);
        assert_eq!(
            parse_conventions(&names).unwrap(),
            [Convention::Gfdl, Convention::Kottek06]
        );
        assert!(parse_conventions(&[]).is_err());
        let err = parse_conventions(&["Trewartha".to_string()]).unwrap_err();
        assert!(format!("{err:#}").contains("unrecognized convention 'Trewartha'"));
    }

    #[test]
    fn cli_overrides_period() {
        let period = PeriodToml {
            start_year: 1981,
            end_year: 2010,
        };
        assert_eq!(resolve_period(&period, &args()), (1981, 2014));
    }

    #[test]
    fn climatology_config_from_toml() {
        let mut classify = ClassifyToml::default();
        let cfg = build_climatology_config(1981, 2010, &classify, None);
        assert_eq!(cfg.edge_policy(), EdgePolicy::Skip);
        assert!(cfg.sample_weights().is_none());

        classify.truncate_seasons = true;
        let cfg = build_climatology_config(1981, 2010, &classify, Some(&[1.0, 2.0]));
        assert_eq!(cfg.edge_policy(), EdgePolicy::Truncate);
        assert_eq!(cfg.sample_weights(), Some(&[1.0, 2.0][..]));
    }
}
