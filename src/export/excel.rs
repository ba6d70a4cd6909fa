//! Excel 생성
//!
//! 순위표 시트 + 막대 차트 (값 축 상한 = 표시 최대값)

use crate::error::Result;
use pairing_common::{PairingResult, ScoreUnit};
use rust_xlsxwriter::*;
use std::path::Path;

const SHEET_NAME: &str = "Pairing";
const HEADER_ROW: u32 = 3;

pub fn generate_excel(result: &PairingResult, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let title_format = Format::new().set_bold().set_font_size(14.0);
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));
    let score_format = Format::new().set_num_format("0.00");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    worksheet.set_column_width(0, 6)?;
    worksheet.set_column_width(1, 16)?;
    worksheet.set_column_width(2, 12)?;
    worksheet.set_column_width(3, 12)?;

    let unit_label = match result.scale.unit {
        ScoreUnit::Percentage => "%",
        ScoreUnit::Raw => "점",
    };

    worksheet.write_string_with_format(
        0,
        0,
        format!("{} 궁합 순위", result.food_name),
        &title_format,
    )?;
    worksheet.write_string(
        1,
        0,
        format!("생성일: {}", chrono::Local::now().format("%Y-%m-%d %H:%M")),
    )?;

    let headers = [
        "순위".to_string(),
        "음료".to_string(),
        "원점수".to_string(),
        format!("점수({})", unit_label),
    ];
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(HEADER_ROW, col as u16, header, &header_format)?;
    }

    for (i, pair) in result.ranked_pairs.iter().enumerate() {
        let row = HEADER_ROW + 1 + i as u32;
        worksheet.write_number(row, 0, (i + 1) as f64)?;
        worksheet.write_string(row, 1, pair.drink.as_str())?;
        worksheet.write_number_with_format(row, 2, pair.raw_score, &score_format)?;
        worksheet.write_number_with_format(row, 3, pair.display_score, &score_format)?;
    }

    if !result.ranked_pairs.is_empty() {
        let first = HEADER_ROW + 1;
        let last = HEADER_ROW + result.ranked_pairs.len() as u32;

        let mut chart = Chart::new(ChartType::Column);
        chart
            .add_series()
            .set_name(format!("{} 궁합", result.food_name).as_str())
            .set_categories((SHEET_NAME, first, 1, last, 1))
            .set_values((SHEET_NAME, first, 3, last, 3));
        chart.title().set_name(format!("{} 궁합 점수", result.food_name).as_str());
        chart.legend().set_hidden();
        chart.y_axis().set_min(0.0).set_max(result.scale.display_max);

        worksheet.insert_chart(HEADER_ROW, 5, &chart)?;
    }

    workbook.save(output_path)?;
    Ok(())
}
