mod common;

use common::precipitation as p;
use common::temperature as t;
use common::{grid, northern};
use koppen_classify::{Convention, MISSING_CODE, catalog, classify};

/// (temperature, precipitation, Kottek06, Peel07, GFDL)
const FIXTURES: &[([f64; 12], [f64; 12], &str, &str, &str)] = &[
    (t::TROPICAL, p::WET, "Af", "Af", "Af"),
    (t::TROPICAL, p::MONSOON, "Am", "Am", "Am"),
    (t::TROPICAL, p::SAVANNA_DRY_WINTER, "Aw", "Aw", "Aw"),
    (t::TROPICAL, p::SAVANNA_DRY_SUMMER, "As", "Aw", "As"),
    (t::HOT_DRY, p::DESERT, "BWh", "BWh", "BWh"),
    (t::HOT_DRY, p::HOT_STEPPE, "BSh", "BSh", "BSh"),
    (t::COLD_DRY, p::COLD_DESERT, "BWk", "BWk", "BWk"),
    (t::COLD_DRY, p::COLD_STEPPE, "BSk", "BSk", "BSk"),
    (t::TEMPERATE_HOT, p::WET, "Cfa", "Cfa", "Cfa"),
    (t::TEMPERATE_WARM, p::WET, "Cfb", "Cfb", "Cfb"),
    (t::TEMPERATE_COLD, p::WET, "Cfc", "Cfc", "Cfc"),
    (t::TEMPERATE_HOT, p::DRY_SUMMER, "Csa", "Csa", "Csa"),
    (t::TEMPERATE_WARM, p::DRY_SUMMER, "Csb", "Csb", "Csb"),
    (t::TEMPERATE_COLD, p::DRY_SUMMER, "Csc", "Csc", "Csc"),
    (t::TEMPERATE_HOT, p::DRY_WINTER, "Cwa", "Cwa", "Cwa"),
    (t::TEMPERATE_WARM, p::DRY_WINTER, "Cwb", "Cwb", "Cwb"),
    (t::TEMPERATE_COLD, p::DRY_WINTER, "Cwc", "Cwc", "Cwc"),
    (t::CONTINENTAL_HOT, p::WET, "Dfa", "Dfa", "Dfa"),
    (t::CONTINENTAL_WARM, p::WET, "Dfb", "Dfb", "Dfb"),
    (t::CONTINENTAL_COLD, p::WET, "Dfc", "Dfc", "Dfc"),
    (t::VERY_COLD, p::WET, "Dfd", "Dfd", "Dfd"),
    (t::CONTINENTAL_HOT, p::DRY_SUMMER, "Dsa", "Dsa", "Dsa"),
    (t::CONTINENTAL_WARM, p::DRY_SUMMER, "Dsb", "Dsb", "Dsb"),
    (t::CONTINENTAL_COLD, p::DRY_SUMMER, "Dsc", "Dsc", "Dsc"),
    (t::VERY_COLD, p::DRY_SUMMER, "Dsd", "Dsd", "Dsd"),
    (t::CONTINENTAL_HOT, p::DRY_WINTER, "Dwa", "Dwa", "Dwa"),
    (t::CONTINENTAL_WARM, p::DRY_WINTER, "Dwb", "Dwb", "Dwb"),
    (t::CONTINENTAL_COLD, p::DRY_WINTER, "Dwc", "Dwc", "Dwc"),
    (t::VERY_COLD, p::DRY_WINTER, "Dwd", "Dwd", "Dwd"),
    (t::FROST, p::WET, "EF", "EF", "EF"),
    (t::TUNDRA, p::WET, "ET", "ET", "ET"),
    (t::MILD_WINTER, p::WET, "Cfa", "Dfa", "Cfa"),
    (t::TROPICAL_EDGE, p::WET, "Af", "Af", "Cfa"),
    (t::TEMPERATE_HOT, p::WEAK_DRY_SUMMER, "Cfa", "Csa", "Csa"),
];

fn labels(convention: Convention) -> Vec<String> {
    let tas = grid(&FIXTURES.iter().map(|f| f.0).collect::<Vec<_>>(), false);
    let pr = grid(&FIXTURES.iter().map(|f| f.1).collect::<Vec<_>>(), true);
    let result = classify(&tas, &pr, convention, Some(&northern(FIXTURES.len()))).unwrap();
    assert_eq!(result.n_missing(), 0);
    assert_eq!(result.n_unclassified(), 0, "{convention}");
    assert_eq!(result.n_ambiguous(), 0, "{convention}");
    (0..FIXTURES.len())
        .map(|i| result.label_at(&[i]).unwrap())
        .collect()
}

fn expected(column: usize) -> Vec<&'static str> {
    FIXTURES
        .iter()
        .map(|f| match column {
            0 => f.2,
            1 => f.3,
            _ => f.4,
        })
        .collect()
}

#[test]
fn kottek06_fixtures() {
    assert_eq!(labels(Convention::Kottek06), expected(0));
}

#[test]
fn peel07_fixtures() {
    assert_eq!(labels(Convention::Peel07), expected(1));
}

#[test]
fn gfdl_fixtures() {
    assert_eq!(labels(Convention::Gfdl), expected(2));
}

#[test]
fn fixtures_reach_every_class() {
    let gfdl = expected(2);
    for class in catalog() {
        assert!(gfdl.contains(&class.label().as_str()), "{class} not covered");
    }
}

#[test]
fn derived_summer_matches_northern_mask() {
    let tas = grid(&FIXTURES.iter().map(|f| f.0).collect::<Vec<_>>(), false);
    let pr = grid(&FIXTURES.iter().map(|f| f.1).collect::<Vec<_>>(), true);
    for convention in Convention::ALL {
        let derived = classify(&tas, &pr, convention, None).unwrap();
        let given = classify(&tas, &pr, convention, Some(&northern(FIXTURES.len()))).unwrap();
        assert_eq!(derived.classes(), given.classes(), "{convention}");
    }
}

#[test]
fn southern_summer_flips_savanna_season() {
    let tas = grid(&[t::TROPICAL], false);
    let pr = grid(&[p::SAVANNA_DRY_WINTER], true);
    let south = ndarray::ArrayD::from_elem(ndarray::IxDyn(&[1]), false);
    let kottek = classify(&tas, &pr, Convention::Kottek06, Some(&south)).unwrap();
    assert_eq!(kottek.label_at(&[0]).as_deref(), Some("As"));
    let peel = classify(&tas, &pr, Convention::Peel07, Some(&south)).unwrap();
    assert_eq!(peel.label_at(&[0]).as_deref(), Some("Aw"));
}

#[test]
fn missing_months_give_missing_code() {
    let mut gap = t::TEMPERATE_HOT;
    gap[4] = f64::NAN;
    let tas = grid(&[gap, t::TEMPERATE_HOT, [f64::NAN; 12]], false);
    let pr = grid(&[p::WET, [f64::NAN; 12], [f64::NAN; 12]], true);
    for convention in Convention::ALL {
        let result = classify(&tas, &pr, convention, None).unwrap();
        assert!(result.classes().iter().all(|&c| c == MISSING_CODE));
        assert_eq!(result.n_missing(), 3);
        assert_eq!(result.n_unclassified(), 0);
        assert!(result.counts().is_empty());
    }
}

#[test]
fn counts_tally_fixture_classes() {
    let tas = grid(&[t::TROPICAL, t::TROPICAL, t::FROST], false);
    let pr = grid(&[p::WET, p::WET, p::WET], true);
    let result = classify(&tas, &pr, Convention::Gfdl, None).unwrap();
    let counts: Vec<(String, usize)> = result
        .counts()
        .into_iter()
        .map(|(c, n)| (c.label(), n))
        .collect();
    assert_eq!(counts, [("Af".to_string(), 2), ("EF".to_string(), 1)]);
}
