//! JSON documents exchanged with the data-staging and plotting collaborators.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use koppen_calendar::TimeAxis;
use koppen_classify::{Classification, LegendEntry};
use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

/// Name of the time dimension in [`FieldDocument::dims`].
const TIME_DIM: &str = "time";

/// Names recognised as the latitude dimension.
const LAT_DIMS: &[&str] = &["lat", "latitude"];

/// One gridded variable with its time coordinate.
///
/// `data` is row-major over `shape`; `null` marks a missing value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDocument {
    pub variable: String,
    #[serde(default)]
    pub units: String,
    pub dims: Vec<String>,
    pub shape: Vec<usize>,
    pub data: Vec<Option<f64>>,
    pub time: TimeDocument,
    #[serde(default)]
    pub lat: Option<Vec<f64>>,
    #[serde(default)]
    pub lon: Option<Vec<f64>>,
    #[serde(default)]
    pub lat_bnds: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    pub lon_bnds: Option<Vec<[f64; 2]>>,
    /// Per-sample averaging weights in days; take precedence over everything
    /// else.
    #[serde(default)]
    pub average_dt: Option<Vec<f64>>,
    /// Time cell bounds in time units; their widths weight the samples when
    /// `average_dt` is absent.
    #[serde(default)]
    pub time_bnds: Option<Vec<[f64; 2]>>,
}

/// CF-style time coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeDocument {
    pub values: Vec<f64>,
    pub units: String,
    #[serde(default = "default_calendar")]
    pub calendar: String,
}

fn default_calendar() -> String {
    "standard".to_string()
}

impl FieldDocument {
    /// Reads a field document from `path`.
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read field document: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse field document: {}", path.display()))
    }

    /// Fails unless the document holds `expected`.
    pub fn check_variable(&self, expected: &str) -> Result<()> {
        ensure!(
            self.variable == expected,
            "expected variable '{expected}', found '{}'",
            self.variable
        );
        Ok(())
    }

    /// Data as an n-dimensional array with missing values as NaN.
    pub fn array(&self) -> Result<ArrayD<f64>> {
        ensure!(
            self.dims.len() == self.shape.len(),
            "{}: {} dimension names for a {}-dimensional shape",
            self.variable,
            self.dims.len(),
            self.shape.len()
        );
        let values: Vec<f64> = self
            .data
            .iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        ArrayD::from_shape_vec(IxDyn(&self.shape), values)
            .with_context(|| format!("{}: data does not match shape {:?}", self.variable, self.shape))
    }

    /// Position of the time dimension.
    pub fn time_dim(&self) -> Result<usize> {
        match self.dims.iter().position(|d| d == TIME_DIM) {
            Some(index) => Ok(index),
            None => bail!(
                "{}: no '{}' dimension in {:?}",
                self.variable,
                TIME_DIM,
                self.dims
            ),
        }
    }

    /// The time coordinate as a validated axis.
    pub fn time_axis(&self) -> Result<TimeAxis> {
        let n_times = self.shape.get(self.time_dim()?).copied().unwrap_or(0);
        ensure!(
            self.time.values.len() == n_times,
            "{}: {} time values for a time dimension of length {n_times}",
            self.variable,
            self.time.values.len()
        );
        TimeAxis::from_cf(
            self.time.values.clone(),
            &self.time.units,
            &self.time.calendar,
        )
        .with_context(|| format!("{}: invalid time coordinate", self.variable))
    }

    /// Explicit per-sample weights in days, or `None` to weight by calendar.
    ///
    /// `average_dt` wins over `time_bnds`; bound widths are converted from
    /// time units to days.
    pub fn sample_weights(&self) -> Result<Option<Vec<f64>>> {
        if let Some(dt) = &self.average_dt {
            return Ok(Some(dt.clone()));
        }
        let Some(bounds) = &self.time_bnds else {
            return Ok(None);
        };
        ensure!(
            bounds.len() == self.time.values.len(),
            "{}: {} time bounds for {} time values",
            self.variable,
            bounds.len(),
            self.time.values.len()
        );
        let unit_days = self.time_axis()?.units().unit_days();
        let widths = bounds
            .iter()
            .enumerate()
            .map(|(index, &[lo, hi])| {
                ensure!(
                    hi >= lo,
                    "{}: time bounds {index} are reversed ({lo} > {hi})",
                    self.variable
                );
                Ok((hi - lo) * unit_days)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(widths))
    }

    /// Dimension names without time.
    pub fn spatial_dims(&self) -> Vec<String> {
        self.dims
            .iter()
            .filter(|d| *d != TIME_DIM)
            .cloned()
            .collect()
    }

    /// Shape without the time dimension.
    pub fn spatial_shape(&self) -> Vec<usize> {
        self.dims
            .iter()
            .zip(&self.shape)
            .filter(|(d, _)| *d != TIME_DIM)
            .map(|(_, &n)| n)
            .collect()
    }

    /// Position of the latitude dimension among the spatial dimensions.
    pub fn lat_dim(&self) -> Option<usize> {
        self.spatial_dims()
            .iter()
            .position(|d| LAT_DIMS.contains(&d.to_lowercase().as_str()))
    }
}

/// Class codes of one grid under every requested convention, plus the
/// metadata a writer or plotter needs to decode them.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassesDocument {
    pub start_year: i32,
    pub end_year: i32,
    pub dims: Vec<String>,
    pub shape: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat_bnds: Option<Vec<[f64; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon_bnds: Option<Vec<[f64; 2]>>,
    pub flag_values: Vec<u8>,
    pub flag_meanings: String,
    pub legend: Vec<LegendRow>,
    pub classifications: Vec<ConventionClasses>,
}

/// One row of the class table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendRow {
    pub code: u8,
    pub label: String,
    pub color: [u8; 3],
}

impl From<LegendEntry> for LegendRow {
    fn from(entry: LegendEntry) -> Self {
        Self {
            code: entry.code,
            label: entry.label,
            color: entry.color,
        }
    }
}

/// Row-major class codes under one convention.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConventionClasses {
    pub convention: String,
    pub classes: Vec<u8>,
    /// Cells per class label, empty classes omitted.
    pub counts: BTreeMap<String, usize>,
    pub n_missing: usize,
    pub n_unclassified: usize,
    pub n_ambiguous: usize,
}

impl From<&Classification> for ConventionClasses {
    fn from(result: &Classification) -> Self {
        Self {
            convention: result.convention().to_string(),
            classes: result.classes().iter().copied().collect(),
            counts: result
                .counts()
                .into_iter()
                .map(|(class, n)| (class.label(), n))
                .collect(),
            n_missing: result.n_missing(),
            n_unclassified: result.n_unclassified(),
            n_ambiguous: result.n_ambiguous(),
        }
    }
}

/// Serializes `value` as pretty-printed JSON to `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize JSON")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn document() -> FieldDocument {
        serde_json::from_str(
            r#"{
                "variable": "tas",
                "units": "K",
                "dims": ["time", "lat", "lon"],
                "shape": [2, 2, 1],
                "data": [280.0, null, 281.0, 282.0],
                "time": {"values": [15.5, 45.0], "units": "days since 2000-01-01", "calendar": "noleap"},
                "lat": [-10.0, 10.0],
                "lon": [0.0]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn array_maps_null_to_nan() {
        let a = document().array().unwrap();
        assert_eq!(a.shape(), &[2, 2, 1]);
        assert_eq!(a[[0, 0, 0]], 280.0);
        assert!(a[[0, 1, 0]].is_nan());
        assert_eq!(a[[1, 1, 0]], 282.0);
    }

    #[test]
    fn dimensions() {
        let doc = document();
        assert_eq!(doc.time_dim().unwrap(), 0);
        assert_eq!(doc.spatial_dims(), ["lat", "lon"]);
        assert_eq!(doc.spatial_shape(), [2, 1]);
        assert_eq!(doc.lat_dim(), Some(0));
        assert_eq!(doc.time_axis().unwrap().len(), 2);
        assert!(doc.average_dt.is_none());
    }

    #[test]
    fn shape_and_time_mismatches_fail() {
        let mut doc = document();
        doc.data.pop();
        assert!(doc.array().is_err());

        let mut doc = document();
        doc.time.values.push(74.5);
        assert!(doc.time_axis().is_err());

        let mut doc = document();
        doc.dims = vec!["t".into(), "lat".into(), "lon".into()];
        assert!(doc.time_dim().is_err());
    }

    #[test]
    fn variable_check() {
        let doc = document();
        assert!(doc.check_variable("tas").is_ok());
        let err = doc.check_variable("pr").unwrap_err();
        assert_eq!(err.to_string(), "expected variable 'pr', found 'tas'");
    }

    #[test]
    fn read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&document()).unwrap().as_bytes())
            .unwrap();
        let doc = FieldDocument::read(file.path()).unwrap();
        assert_eq!(doc.time.calendar, "noleap");
        assert_eq!(doc.lat, Some(vec![-10.0, 10.0]));
    }

    #[test]
    fn time_bounds_weight_samples_in_days() {
        let mut doc = document();
        assert!(doc.sample_weights().unwrap().is_none());

        // Calendar weights would be 31 and 28 days.
        doc.time_bnds = Some(vec![[0.0, 10.0], [10.0, 40.0]]);
        assert_eq!(doc.sample_weights().unwrap(), Some(vec![10.0, 30.0]));

        doc.time.units = "hours since 2000-01-01".into();
        doc.time.values = vec![6.0, 30.0];
        doc.time_bnds = Some(vec![[0.0, 12.0], [12.0, 48.0]]);
        assert_eq!(doc.sample_weights().unwrap(), Some(vec![0.5, 1.5]));
    }

    #[test]
    fn average_dt_wins_over_time_bounds() {
        let mut doc = document();
        doc.time_bnds = Some(vec![[0.0, 10.0], [10.0, 40.0]]);
        doc.average_dt = Some(vec![31.0, 28.0]);
        assert_eq!(doc.sample_weights().unwrap(), Some(vec![31.0, 28.0]));
    }

    #[test]
    fn bad_time_bounds_fail() {
        let mut doc = document();
        doc.time_bnds = Some(vec![[0.0, 10.0]]);
        assert!(doc.sample_weights().is_err());

        doc.time_bnds = Some(vec![[0.0, 10.0], [40.0, 10.0]]);
        let err = doc.sample_weights().unwrap_err();
        assert!(err.to_string().contains("reversed"));
    }

    #[test]
    fn spatial_bounds_are_read() {
        let doc: FieldDocument = serde_json::from_value(serde_json::json!({
            "variable": "pr",
            "dims": ["time", "lat"],
            "shape": [1, 2],
            "data": [1.0, 2.0],
            "time": {"values": [0.0], "units": "days since 2000-01-01"},
            "lat": [-45.0, 45.0],
            "lat_bnds": [[-90.0, 0.0], [0.0, 90.0]],
        }))
        .unwrap();
        assert_eq!(doc.lat_bnds, Some(vec![[-90.0, 0.0], [0.0, 90.0]]));
        assert!(doc.lon_bnds.is_none());
    }

    #[test]
    fn calendar_defaults_to_standard() {
        let time: TimeDocument =
            serde_json::from_str(r#"{"values": [0.0], "units": "days since 1850-01-01"}"#).unwrap();
        assert_eq!(time.calendar, "standard");
    }
}
