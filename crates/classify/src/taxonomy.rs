//! The Köppen taxonomy: major groups, subtypes and the class catalog.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::ClassifyError;

/// Top-level Köppen category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MajorGroup {
    /// A
    Tropical,
    /// B
    Arid,
    /// C
    Temperate,
    /// D
    Continental,
    /// E
    Polar,
}

impl MajorGroup {
    /// Every major group, in letter order.
    pub const ALL: [MajorGroup; 5] = [
        MajorGroup::Tropical,
        MajorGroup::Arid,
        MajorGroup::Temperate,
        MajorGroup::Continental,
        MajorGroup::Polar,
    ];

    /// Code letter.
    pub fn letter(self) -> &'static str {
        match self {
            MajorGroup::Tropical => "A",
            MajorGroup::Arid => "B",
            MajorGroup::Temperate => "C",
            MajorGroup::Continental => "D",
            MajorGroup::Polar => "E",
        }
    }

    /// Precipitation subtypes defined for this group.
    pub fn precip_types(self) -> &'static [PrecipType] {
        match self {
            MajorGroup::Tropical => &[
                PrecipType::Rainforest,
                PrecipType::Monsoon,
                PrecipType::SavannaDryWinter,
                PrecipType::SavannaDrySummer,
            ],
            MajorGroup::Arid => &[PrecipType::Desert, PrecipType::Steppe],
            MajorGroup::Temperate | MajorGroup::Continental => &[
                PrecipType::DrySummer,
                PrecipType::DryWinter,
                PrecipType::WithoutDrySeason,
            ],
            MajorGroup::Polar => &[PrecipType::None],
        }
    }

    /// Temperature subtypes defined for this group.
    pub fn temp_types(self) -> &'static [TempType] {
        match self {
            MajorGroup::Tropical => &[TempType::None],
            MajorGroup::Arid => &[TempType::Hot, TempType::Cold],
            MajorGroup::Temperate => &[
                TempType::HotSummer,
                TempType::WarmSummer,
                TempType::ColdSummer,
            ],
            MajorGroup::Continental => &[
                TempType::HotSummer,
                TempType::WarmSummer,
                TempType::ColdSummer,
                TempType::VeryColdWinter,
            ],
            MajorGroup::Polar => &[TempType::Tundra, TempType::EternalFrost],
        }
    }
}

/// Precipitation-pattern subtype (second letter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrecipType {
    /// No precipitation subdivision.
    None,
    /// Af
    Rainforest,
    /// Am
    Monsoon,
    /// Aw
    SavannaDryWinter,
    /// As
    SavannaDrySummer,
    /// BW
    Desert,
    /// BS
    Steppe,
    /// Cs, Ds
    DrySummer,
    /// Cw, Dw
    DryWinter,
    /// Cf, Df
    WithoutDrySeason,
}

impl PrecipType {
    /// Code letter, empty for [`PrecipType::None`].
    pub fn letter(self) -> &'static str {
        match self {
            PrecipType::None => "",
            PrecipType::Rainforest | PrecipType::WithoutDrySeason => "f",
            PrecipType::Monsoon => "m",
            PrecipType::SavannaDryWinter | PrecipType::DryWinter => "w",
            PrecipType::SavannaDrySummer | PrecipType::DrySummer => "s",
            PrecipType::Desert => "W",
            PrecipType::Steppe => "S",
        }
    }
}

/// Temperature-pattern subtype (third letter, or second for polar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TempType {
    /// No temperature subdivision.
    None,
    /// Bxh
    Hot,
    /// Bxk
    Cold,
    /// Cxa, Dxa
    HotSummer,
    /// Cxb, Dxb
    WarmSummer,
    /// Cxc, Dxc
    ColdSummer,
    /// Dxd
    VeryColdWinter,
    /// ET
    Tundra,
    /// EF
    EternalFrost,
}

impl TempType {
    /// Code letter, empty for [`TempType::None`].
    pub fn letter(self) -> &'static str {
        match self {
            TempType::None => "",
            TempType::Hot => "h",
            TempType::Cold => "k",
            TempType::HotSummer => "a",
            TempType::WarmSummer => "b",
            TempType::ColdSummer => "c",
            TempType::VeryColdWinter => "d",
            TempType::Tundra => "T",
            TempType::EternalFrost => "F",
        }
    }
}

/// One Köppen class: a (major group, precipitation subtype, temperature
/// subtype) triple from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KoppenClass {
    major: MajorGroup,
    precip: PrecipType,
    temp: TempType,
}

/// All classes ordered by major-group letter, then precipitation letter,
/// then temperature letter. A class's code is its position plus one.
static CATALOG: LazyLock<Vec<KoppenClass>> = LazyLock::new(|| {
    let mut classes = Vec::new();
    for major in MajorGroup::ALL {
        let mut precips = major.precip_types().to_vec();
        precips.sort_by_key(|p| p.letter());
        let mut temps = major.temp_types().to_vec();
        temps.sort_by_key(|t| t.letter());
        for &precip in &precips {
            for &temp in &temps {
                classes.push(KoppenClass {
                    major,
                    precip,
                    temp,
                });
            }
        }
    }
    classes
});

/// Every class in code order (code 1 first).
pub fn catalog() -> &'static [KoppenClass] {
    &CATALOG
}

impl KoppenClass {
    /// Returns the major group.
    pub fn major(self) -> MajorGroup {
        self.major
    }

    /// Returns the precipitation subtype.
    pub fn precip(self) -> PrecipType {
        self.precip
    }

    /// Returns the temperature subtype.
    pub fn temp(self) -> TempType {
        self.temp
    }

    /// Concatenated code letters, e.g. `"Cfa"`.
    pub fn label(self) -> String {
        format!(
            "{}{}{}",
            self.major.letter(),
            self.precip.letter(),
            self.temp.letter()
        )
    }

    /// Integer code in 1..=N; 0 is reserved for missing cells.
    pub fn code(self) -> u8 {
        CATALOG
            .iter()
            .position(|&c| c == self)
            .map_or(0, |i| i as u8 + 1)
    }

    /// Class with the given code, or `None` for 0 and out-of-range codes.
    pub fn from_code(code: u8) -> Option<Self> {
        let index = usize::from(code).checked_sub(1)?;
        CATALOG.get(index).copied()
    }
}

impl fmt::Display for KoppenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for KoppenClass {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .iter()
            .copied()
            .find(|c| c.label() == s)
            .ok_or_else(|| ClassifyError::UnknownClass {
                label: s.to_string(),
            })
    }
}
