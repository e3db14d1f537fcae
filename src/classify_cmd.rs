//! Classify command: climatologies of tas and pr, then one class grid per
//! convention.

use std::path::PathBuf;

use anyhow::{Context, Result};
use ndarray::ArrayD;
use rayon::prelude::*;
use tracing::{info, info_span};

use koppen_classify::{
    Classification, Mask, classify, flag_meanings, flag_values, legend, summer_from_latitude,
};
use koppen_climatology::{Aggregate, Climatology, ClimatologyResult, GriddedField};

use crate::cli::ClassifyArgs;
use crate::config::KoppenConfig;
use crate::convert::{self, SummerSource};
use crate::document::{ClassesDocument, ConventionClasses, FieldDocument, write_json};
use crate::prep::{prepare_precipitation, prepare_temperature};

/// Run the classification pipeline.
pub fn run(args: ClassifyArgs) -> Result<()> {
    let _cmd = info_span!("classify").entered();
    let config = KoppenConfig::load(&args.config)?;

    // 1. Resolve inputs, period and conventions
    let tas_path = required(args.tas.as_ref(), config.input.tas.as_ref(), "[input].tas", "--tas")?;
    let pr_path = required(args.pr.as_ref(), config.input.pr.as_ref(), "[input].pr", "--pr")?;
    let output = required(
        args.output.as_ref(),
        config.output.path.as_ref(),
        "[output].path",
        "--output",
    )?;
    let (start_year, end_year) = convert::resolve_period(&config.period, &args);
    let names = if args.conventions.is_empty() {
        &config.classify.conventions
    } else {
        &args.conventions
    };
    let conventions = convert::parse_conventions(names)?;
    let plan = convert::resolve_summer(&conventions, &config.classify.summer)?;

    // 2. Read field documents
    info!(path = %tas_path.display(), "reading temperature");
    let tas_doc = FieldDocument::read(&tas_path)?;
    tas_doc.check_variable(&config.input.tas_var)?;
    info!(path = %pr_path.display(), "reading precipitation");
    let pr_doc = FieldDocument::read(&pr_path)?;
    pr_doc.check_variable(&config.input.pr_var)?;

    // 3. Climatologies, one per variable
    let factor = config.input.pr_conversion_factor;
    let (tas_clim, pr_clim) = rayon::join(
        || {
            climatology(&tas_doc, start_year, end_year, &config, Aggregate::Mean, |data| {
                prepare_temperature(data, &tas_doc.units)
            })
        },
        || {
            climatology(&pr_doc, start_year, end_year, &config, Aggregate::Total, |data| {
                prepare_precipitation(data, factor)
            })
        },
    );
    let tas_clim = tas_clim.context("temperature climatology failed")?;
    let pr_clim = pr_clim.context("precipitation climatology failed")?;
    info!(shape = ?tas_clim.spatial_shape(), "climatologies computed");

    // 4. Summer half-year from latitude, when any convention needs it
    let lat_summer = if plan.iter().any(|(_, s)| *s == SummerSource::Latitude) {
        Some(latitude_summer(&tas_doc, tas_clim.spatial_shape())?)
    } else {
        None
    };

    // 5. Classify every convention
    let results: Vec<Classification> = plan
        .par_iter()
        .map(|&(convention, source)| {
            let summer = match source {
                SummerSource::Temperature => None,
                SummerSource::Latitude => lat_summer.as_ref(),
            };
            classify(&tas_clim, &pr_clim, convention, summer)
        })
        .collect::<Result<_, _>>()
        .context("classification failed")?;
    for (result, (_, source)) in results.iter().zip(&plan) {
        info!(
            convention = %result.convention(),
            summer = ?source,
            n_missing = result.n_missing(),
            n_classes = result.counts().len(),
            "classified"
        );
    }

    // 6. Write output document
    let document = ClassesDocument {
        start_year,
        end_year,
        dims: tas_doc.spatial_dims(),
        shape: tas_doc.spatial_shape(),
        lat: tas_doc.lat.clone(),
        lon: tas_doc.lon.clone(),
        lat_bnds: tas_doc.lat_bnds.clone(),
        lon_bnds: tas_doc.lon_bnds.clone(),
        flag_values: flag_values(),
        flag_meanings: flag_meanings(),
        legend: legend().into_iter().map(Into::into).collect(),
        classifications: results.iter().map(ConventionClasses::from).collect(),
    };
    write_json(&output, &document)?;
    info!(path = %output.display(), "classes written");

    Ok(())
}

/// Picks the CLI value, then the config value, or explains how to set one.
fn required(
    cli: Option<&PathBuf>,
    config: Option<&PathBuf>,
    key: &str,
    flag: &str,
) -> Result<PathBuf> {
    cli.or(config)
        .cloned()
        .with_context(|| format!("no path: set {key} in config or use {flag}"))
}

/// Summer mask north of the equator, from the document's latitudes.
fn latitude_summer(doc: &FieldDocument, shape: &[usize]) -> Result<Mask> {
    let lat = doc
        .lat
        .as_deref()
        .context("latitude summer requires a lat coordinate")?;
    let lat_axis = doc
        .lat_dim()
        .context("latitude summer requires a lat dimension")?;
    Ok(summer_from_latitude(lat, shape, lat_axis)?)
}

/// Prepares units and computes the Köppen climatologies of one document.
fn climatology(
    doc: &FieldDocument,
    start_year: i32,
    end_year: i32,
    config: &KoppenConfig,
    aggregate: Aggregate,
    prepare: impl FnOnce(&mut ArrayD<f64>),
) -> Result<ClimatologyResult> {
    let mut data = doc.array()?;
    prepare(&mut data);
    let axis = doc.time_axis()?;
    let weights = doc.sample_weights()?;
    let cfg = convert::build_climatology_config(
        start_year,
        end_year,
        &config.classify,
        weights.as_deref(),
    );
    let clim = Climatology::new(&axis, &cfg)
        .with_context(|| format!("{}: cannot average {start_year}..={end_year}", doc.variable))?;
    let field = GriddedField::new(data.view(), doc.time_dim()?)?;
    Ok(clim.koppen_averages(&field, aggregate)?)
}
