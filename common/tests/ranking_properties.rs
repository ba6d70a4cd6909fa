//! 순위/스케일 불변식 속성 테스트

use pairing_common::{CellValue, PairingSource, PairingTable, RawTable, ScoreUnit};
use proptest::prelude::*;

const DRINKS: [&str; 7] = ["소주", "맥주", "와인", "막걸리", "위스키", "칵테일", "사케"];

fn build_table(rows: &[Vec<Option<f64>>]) -> RawTable {
    let width = rows.first().map_or(0, Vec::len);
    let mut headers = vec!["음식명".to_string()];
    headers.extend(DRINKS[..width].iter().map(|d| d.to_string()));

    let rows = rows
        .iter()
        .enumerate()
        .map(|(i, scores)| {
            let mut row = vec![CellValue::text(format!("음식{}", i))];
            row.extend(
                scores
                    .iter()
                    .map(|s| s.map_or(CellValue::Empty, CellValue::Number)),
            );
            row
        })
        .collect();
    RawTable::new(headers, rows)
}

/// 표마다 점수 상한을 하나 고른다 (비율 표 / 경계 부근 / 원점수 표)
fn score_rows() -> impl Strategy<Value = Vec<Vec<Option<f64>>>> {
    let upper = prop_oneof![Just(1.0f64), Just(1.0001f64), Just(150.0f64)];
    (1usize..=7, upper).prop_flat_map(|(width, upper)| {
        prop::collection::vec(
            prop::collection::vec(prop::option::weighted(0.95, 0.0f64..=upper), width),
            1..30,
        )
    })
}

proptest! {
    #[test]
    fn pt_ranked_pairs_sorted_and_subset(rows in score_rows()) {
        let Ok(table) = PairingTable::from_raw(build_table(&rows)) else {
            return Ok(());
        };
        let columns = table.score_columns();
        // 결측이 10% 넘는 열은 점수 열에서 빠진다
        if columns.len() != rows[0].len() {
            return Ok(());
        }

        for (i, scores) in rows.iter().enumerate() {
            let Ok(result) = table.query(&format!("음식{}", i)) else {
                prop_assert!(scores.iter().all(Option::is_none));
                continue;
            };
            prop_assert!(result
                .ranked_pairs
                .windows(2)
                .all(|w| w[0].raw_score >= w[1].raw_score));
            prop_assert_eq!(
                result.ranked_pairs.len(),
                scores.iter().filter(|s| s.is_some()).count()
            );
            for pair in &result.ranked_pairs {
                prop_assert!(columns.contains(&pair.drink.as_str()));
            }
        }
    }

    #[test]
    fn pt_percentage_iff_max_at_most_one(rows in score_rows()) {
        let Ok(table) = PairingTable::from_raw(build_table(&rows)) else {
            return Ok(());
        };
        if table.score_columns().len() != rows[0].len() {
            return Ok(());
        }
        let max = rows
            .iter()
            .flatten()
            .flatten()
            .copied()
            .fold(f64::MIN, f64::max);
        let expected = if max <= 1.0 { ScoreUnit::Percentage } else { ScoreUnit::Raw };
        prop_assert_eq!(table.scale().unit, expected);
    }

    #[test]
    fn pt_fraction_tables_are_percentage(
        rows in (1usize..=7).prop_flat_map(|width| {
            prop::collection::vec(prop::collection::vec(0.0f64..=1.0, width), 1..30)
        })
    ) {
        let rows: Vec<Vec<Option<f64>>> =
            rows.into_iter().map(|r| r.into_iter().map(Some).collect()).collect();
        let table = PairingTable::from_raw(build_table(&rows)).unwrap();
        prop_assert_eq!(table.scale().unit, ScoreUnit::Percentage);
        prop_assert_eq!(table.scale().display_max, 100.0);
    }

    #[test]
    fn pt_reloading_is_identical(rows in score_rows()) {
        let first = PairingTable::from_raw(build_table(&rows));
        let second = PairingTable::from_raw(build_table(&rows));
        if let (Ok(a), Ok(b)) = (first, second) {
            prop_assert_eq!(a, b);
        }
    }
}
