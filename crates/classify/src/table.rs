//! Integer encoding and legend table for downstream writers and plotters.

use crate::taxonomy::{KoppenClass, catalog};

/// Code written for missing or unclassifiable cells.
pub const MISSING_CODE: u8 = 0;

/// Label paired with [`MISSING_CODE`] in the flag metadata.
pub const MISSING_LABEL: &str = "None";

/// Legend colours (RGB) after Peel et al. (2007). `As` shares `Aw`'s colour.
const PEEL07_COLORS: [(&str, [u8; 3]); 31] = [
    ("Af", [0, 0, 255]),
    ("Am", [0, 120, 255]),
    ("As", [70, 170, 250]),
    ("Aw", [70, 170, 250]),
    ("BSh", [245, 165, 0]),
    ("BSk", [255, 220, 100]),
    ("BWh", [255, 0, 0]),
    ("BWk", [255, 150, 150]),
    ("Cfa", [200, 255, 80]),
    ("Cfb", [102, 255, 51]),
    ("Cfc", [50, 199, 0]),
    ("Csa", [255, 255, 0]),
    ("Csb", [198, 199, 0]),
    ("Csc", [150, 150, 0]),
    ("Cwa", [150, 255, 150]),
    ("Cwb", [99, 199, 99]),
    ("Cwc", [50, 150, 50]),
    ("Dfa", [0, 255, 255]),
    ("Dfb", [56, 199, 255]),
    ("Dfc", [0, 126, 125]),
    ("Dfd", [0, 69, 94]),
    ("Dsa", [255, 0, 254]),
    ("Dsb", [198, 0, 199]),
    ("Dsc", [150, 50, 149]),
    ("Dsd", [150, 100, 149]),
    ("Dwa", [171, 177, 255]),
    ("Dwb", [90, 199, 219]),
    ("Dwc", [76, 81, 181]),
    ("Dwd", [50, 0, 135]),
    ("EF", [104, 104, 104]),
    ("ET", [178, 178, 178]),
];

/// Colour used for cells without a class.
const MISSING_COLOR: [u8; 3] = [255, 255, 255];

/// One row of the class table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    /// Integer code.
    pub code: u8,
    /// Class label, or [`MISSING_LABEL`].
    pub label: String,
    /// RGB legend colour.
    pub color: [u8; 3],
}

/// Legend colour of `class`.
pub fn color(class: KoppenClass) -> [u8; 3] {
    let label = class.label();
    PEEL07_COLORS
        .iter()
        .find(|(l, _)| *l == label)
        .map_or(MISSING_COLOR, |&(_, rgb)| rgb)
}

/// Label for an integer code; unknown codes map to [`MISSING_LABEL`].
pub fn label_for_code(code: u8) -> String {
    KoppenClass::from_code(code).map_or_else(|| MISSING_LABEL.to_string(), |c| c.label())
}

/// Codes in the order written to `flag_values`: every class, then the
/// missing code.
pub fn flag_values() -> Vec<u8> {
    catalog()
        .iter()
        .map(|c| c.code())
        .chain(std::iter::once(MISSING_CODE))
        .collect()
}

/// Space-separated labels matching [`flag_values`].
pub fn flag_meanings() -> String {
    catalog()
        .iter()
        .map(|c| c.label())
        .chain(std::iter::once(MISSING_LABEL.to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full table in `flag_values` order.
pub fn legend() -> Vec<LegendEntry> {
    catalog()
        .iter()
        .map(|&c| LegendEntry {
            code: c.code(),
            label: c.label(),
            color: color(c),
        })
        .chain(std::iter::once(LegendEntry {
            code: MISSING_CODE,
            label: MISSING_LABEL.to_string(),
            color: MISSING_COLOR,
        }))
        .collect()
}
