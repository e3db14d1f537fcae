//! The classification driver.

use koppen_climatology::ClimatologyResult;
use ndarray::{ArrayD, Axis, IxDyn, Zip};
use tracing::{debug, warn};

use crate::convention::Convention;
use crate::error::ClassifyError;
use crate::masks::{ClassMasks, Mask, and};
use crate::stats::ClimateStats;
use crate::summer::summer_from_temperature;
use crate::table::{MISSING_CODE, label_for_code};
use crate::taxonomy::{KoppenClass, catalog};

/// Per-cell class codes for one convention, with diagnostics.
///
/// Codes follow [`catalog`] (1..=N); [`MISSING_CODE`] marks cells with
/// missing input and cells no class matched.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    classes: ArrayD<u8>,
    convention: Convention,
    n_missing: usize,
    n_unclassified: usize,
    n_ambiguous: usize,
}

impl Classification {
    /// Class codes with the spatial shape of the inputs.
    pub fn classes(&self) -> &ArrayD<u8> {
        &self.classes
    }

    /// Consumes the result, returning the code array.
    pub fn into_classes(self) -> ArrayD<u8> {
        self.classes
    }

    /// Convention the codes were derived under.
    pub fn convention(&self) -> Convention {
        self.convention
    }

    /// Cells with any non-finite climatology value.
    pub fn n_missing(&self) -> usize {
        self.n_missing
    }

    /// Cells with complete input that matched no class.
    pub fn n_unclassified(&self) -> usize {
        self.n_unclassified
    }

    /// Cells that matched more than one class; the first in catalog order
    /// was kept.
    pub fn n_ambiguous(&self) -> usize {
        self.n_ambiguous
    }

    /// Number of cells per class, in catalog order, omitting empty classes.
    pub fn counts(&self) -> Vec<(KoppenClass, usize)> {
        let mut tally = vec![0usize; catalog().len() + 1];
        for &code in &self.classes {
            if let Some(n) = tally.get_mut(usize::from(code)) {
                *n += 1;
            }
        }
        catalog()
            .iter()
            .map(|&class| (class, tally[usize::from(class.code())]))
            .filter(|&(_, n)| n > 0)
            .collect()
    }

    /// Label of the cell at `index`, or `None` if the index is out of bounds.
    pub fn label_at(&self, index: &[usize]) -> Option<String> {
        self.classes.get(IxDyn(index)).map(|&code| label_for_code(code))
    }
}

/// Classifies every grid cell under `convention`.
///
/// `tas` holds temperature climatologies in °C and `pr` precipitation
/// totals in mm (monthly totals, annual and half-year totals). When
/// `summer_is_apr_sep` is `None` it is derived from `tas` with
/// [`summer_from_temperature`].
///
/// Cells with any non-finite input become [`MISSING_CODE`]; no numeric
/// edge case is an error.
///
/// # Errors
///
/// Returns [`ClassifyError::ShapeMismatch`] if `pr` or `summer_is_apr_sep`
/// does not share the spatial shape of `tas`.
#[tracing::instrument(
    skip(tas, pr, summer_is_apr_sep),
    fields(shape = ?tas.spatial_shape())
)]
pub fn classify(
    tas: &ClimatologyResult,
    pr: &ClimatologyResult,
    convention: Convention,
    summer_is_apr_sep: Option<&Mask>,
) -> Result<Classification, ClassifyError> {
    let shape = tas.spatial_shape();
    if pr.spatial_shape() != shape {
        return Err(ClassifyError::ShapeMismatch {
            field: "pr",
            expected: shape.to_vec(),
            got: pr.spatial_shape().to_vec(),
        });
    }
    let derived;
    let summer = match summer_is_apr_sep {
        Some(mask) => {
            if mask.shape() != shape {
                return Err(ClassifyError::ShapeMismatch {
                    field: "summer_is_apr_sep",
                    expected: shape.to_vec(),
                    got: mask.shape().to_vec(),
                });
            }
            mask
        }
        None => {
            debug!("deriving summer half-year from temperature");
            derived = summer_from_temperature(tas);
            &derived
        }
    };

    let valid = and(&complete(tas), &complete(pr));
    let stats = ClimateStats::new(tas, pr, summer);
    let masks = ClassMasks::build(convention.rules(), &stats);
    Ok(make_classes(&masks, &valid, convention))
}

/// Cells where every climatology value of `r` is finite.
fn complete(r: &ClimatologyResult) -> Mask {
    let monthly = r
        .monthly()
        .map_axis(Axis(0), |lane| lane.iter().all(|v| v.is_finite()));
    Zip::from(&monthly)
        .and(r.annual())
        .and(r.apr_sep())
        .and(r.oct_mar())
        .map_collect(|&m, a, s, w| m && a.is_finite() && s.is_finite() && w.is_finite())
}

/// Combines criterion masks into class codes.
///
/// Each class is the conjunction of its major-group, precipitation and
/// temperature masks. The first matching class in catalog order is written.
pub(crate) fn make_classes(masks: &ClassMasks, valid: &Mask, convention: Convention) -> Classification {
    let mut classes = ArrayD::<u8>::from_elem(valid.raw_dim(), MISSING_CODE);
    let mut hits = ArrayD::<u8>::zeros(valid.raw_dim());

    for &class in catalog() {
        let major = masks.major(class.major());
        let (Some(precip), Some(temp)) = (
            masks.precip(class.major(), class.precip()),
            masks.temp(class.major(), class.temp()),
        ) else {
            continue;
        };
        let code = class.code();
        Zip::from(&mut classes)
            .and(&mut hits)
            .and(valid)
            .and(major)
            .and(precip)
            .and(temp)
            .for_each(|c, h, &v, &m, &p, &t| {
                if v && m && p && t {
                    if *c == MISSING_CODE {
                        *c = code;
                    }
                    *h = h.saturating_add(1);
                }
            });
    }

    let n_missing = valid.iter().filter(|&&v| !v).count();
    let n_unclassified = Zip::from(valid)
        .and(&hits)
        .fold(0, |n, &v, &h| if v && h == 0 { n + 1 } else { n });
    let n_ambiguous = hits.iter().filter(|&&h| h > 1).count();

    if n_unclassified > 0 {
        warn!(convention = %convention, n_unclassified, "cells matched no class");
    }
    if n_ambiguous > 0 {
        warn!(convention = %convention, n_ambiguous, "cells matched more than one class");
    }
    debug!(convention = %convention, n_missing, "classification complete");

    Classification {
        classes,
        convention,
        n_missing,
        n_unclassified,
        n_ambiguous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, arr1};

    /// A one-cell climatology from twelve monthly values; `total` sums the
    /// annual and half-year values, otherwise they are means.
    fn cell(monthly: [f64; 12], total: bool) -> ClimatologyResult {
        let m = Array1::from(monthly.to_vec());
        let apr_sep: f64 = m.iter().skip(3).take(6).sum();
        let annual: f64 = m.sum();
        let oct_mar = annual - apr_sep;
        let (annual, apr_sep, oct_mar) = if total {
            (annual, apr_sep, oct_mar)
        } else {
            (annual / 12.0, apr_sep / 6.0, oct_mar / 6.0)
        };
        ClimatologyResult::new(
            arr1(&[annual]).into_dyn(),
            arr1(&[apr_sep]).into_dyn(),
            arr1(&[oct_mar]).into_dyn(),
            m.into_shape_with_order((12, 1)).unwrap().into_dyn(),
        )
        .unwrap()
    }

    #[test]
    fn pr_shape_must_match() {
        let tas = cell([20.0; 12], false);
        let pr = ClimatologyResult::new(
            ArrayD::zeros(IxDyn(&[2])),
            ArrayD::zeros(IxDyn(&[2])),
            ArrayD::zeros(IxDyn(&[2])),
            ArrayD::zeros(IxDyn(&[12, 2])),
        )
        .unwrap();
        assert_eq!(
            classify(&tas, &pr, Convention::Gfdl, None).unwrap_err(),
            ClassifyError::ShapeMismatch {
                field: "pr",
                expected: vec![1],
                got: vec![2],
            }
        );
    }

    #[test]
    fn summer_shape_must_match() {
        let tas = cell([20.0; 12], false);
        let pr = cell([100.0; 12], true);
        let summer = ArrayD::from_elem(IxDyn(&[2, 1]), true);
        assert!(matches!(
            classify(&tas, &pr, Convention::Kottek06, Some(&summer)),
            Err(ClassifyError::ShapeMismatch {
                field: "summer_is_apr_sep",
                ..
            })
        ));
    }

    #[test]
    fn missing_cell_is_zero() {
        let tas = cell([f64::NAN; 12], false);
        let pr = cell([100.0; 12], true);
        let result = classify(&tas, &pr, Convention::Peel07, None).unwrap();
        assert_eq!(result.classes()[[0]], MISSING_CODE);
        assert_eq!(result.n_missing(), 1);
        assert_eq!(result.n_unclassified(), 0);
        assert_eq!(result.label_at(&[0]).as_deref(), Some("None"));
    }

    #[test]
    fn counts_and_labels() {
        let tas = cell([26.0; 12], false);
        let pr = cell([200.0; 12], true);
        let result = classify(&tas, &pr, Convention::Kottek06, None).unwrap();
        assert_eq!(result.label_at(&[0]).as_deref(), Some("Af"));
        assert_eq!(result.label_at(&[5]), None);
        let counts = result.counts();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].0.label(), "Af");
        assert_eq!(counts[0].1, 1);
        assert_eq!(result.n_ambiguous(), 0);
        assert_eq!(result.convention(), Convention::Kottek06);
    }
}
