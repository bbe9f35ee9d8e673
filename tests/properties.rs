// tests/properties.rs
use proptest::prelude::*;

use cdms_scrape::matcher::SequenceMatcher;
use cdms_scrape::physics::{self, SPEED_OF_LIGHT};
use cdms_scrape::specs::partition::parse_partition_rows;
use cdms_scrape::table::{ColumnLayout, parse_results_table};

/// A catalog-file line at the per-species offsets.
fn species_line(freq: &str, err: &str, lgint: &str, elow: &str, gup: i64, tag: i64, q1: &str, q2: &str) -> String {
    format!("{freq:>13}{err:>8}{lgint:>8}{:>2}{elow:>10}{gup:>3}{tag:>7}{:>4}{q1:>12}{q2:>12}", 3, 101)
}

proptest! {
    #[test]
    fn encoded_rows_decode_back(
        freq in 1u64..99_999_999_999,
        err in 0u32..99_999,
        lgint in -99_999i32..0,
        elow in 0u64..99_999_999,
        gup in 1i64..999,
        tag in prop_oneof![1i64..999_999, -999_999i64..-1],
        q1 in 0u8..99,
        q2 in 0u8..99,
    ) {
        let freq_s = format!("{}.{:04}", freq / 10_000, freq % 10_000);
        let err_s = format!("{}.{:04}", err / 10_000, err % 10_000);
        let lgint_s = format!("-{}.{:04}", -lgint / 10_000, -lgint % 10_000);
        let elow_s = format!("{}.{:04}", elow / 10_000, elow % 10_000);
        let line = species_line(&freq_s, &err_s, &lgint_s, &elow_s, gup, tag, &q1.to_string(), &q2.to_string());

        let table = parse_results_table(&line, &ColumnLayout::species()).unwrap();
        prop_assert_eq!(table.len(), 1);
        let l = &table.lines[0];
        prop_assert_eq!(l.freq_rest, freq_s.parse::<f64>().unwrap() * 1e-3);
        prop_assert_eq!(l.freqerr, err_s.parse::<f64>().unwrap() * 1e-3);
        prop_assert_eq!(l.aij, lgint_s.parse::<f64>().unwrap());
        prop_assert_eq!(l.elow_cm, elow_s.parse::<f64>().unwrap());
        prop_assert_eq!(l.gup, gup);
        prop_assert_eq!(l.tag, tag);
        prop_assert_eq!(l.is_experimental(), tag < 0);
        prop_assert_eq!(&l.qnum1, &q1.to_string());
        prop_assert_eq!(&l.qnum2, &q2.to_string());
    }

    #[test]
    fn upper_energy_adds_photon_energy(elow_cm in 0.0f64..20_000.0, ghz in 0.001f64..5_000.0) {
        let d = physics::derive(elow_cm, ghz);
        let expected = elow_cm + ghz * 1e9 / (SPEED_OF_LIGHT * 100.0);
        prop_assert!((d.eup_cm - expected).abs() <= 1e-9 * expected.max(1.0));
        prop_assert!(d.eup >= d.elow);
    }

    #[test]
    fn partition_rows_come_out_sorted(rows in prop::collection::vec((1u32..1_000_000, 0u32..10_000_000), 0..25)) {
        let body: String = rows
            .iter()
            .map(|(t, q)| format!("<tr><td>Q({}.{:02})</td><td>{}.{:04}</td></tr>", t / 100, t % 100, q / 10_000, q % 10_000))
            .collect();
        let parsed = parse_partition_rows(&format!("<table>{body}</table>")).unwrap();
        prop_assert_eq!(parsed.len(), rows.len());
        prop_assert!(parsed.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn ratio_is_bounded_and_reflexive(a in "[A-Za-z0-9+,= -]{0,40}", b in "[A-Za-z0-9+,= -]{0,40}") {
        let r = SequenceMatcher::plain(&a, &b).ratio();
        prop_assert!((0.0..=1.0).contains(&r));
        prop_assert_eq!(SequenceMatcher::plain(&a, &a).ratio(), 1.0);
    }
}
