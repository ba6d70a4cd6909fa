//! 터미널 출력

use pairing_common::{PairingResult, RankedPair, ScoreUnit};

/// 막대 최대 길이 (글자 수)
const BAR_WIDTH: usize = 30;

fn unit_suffix(unit: ScoreUnit) -> &'static str {
    match unit {
        ScoreUnit::Percentage => "%",
        ScoreUnit::Raw => "점",
    }
}

/// 표시 최대값 기준 막대 (최대값을 넘으면 잘라낸다)
pub fn score_bar(display_score: f64, display_max: f64) -> String {
    if display_max <= 0.0 {
        return String::new();
    }
    let ratio = (display_score / display_max).clamp(0.0, 1.0);
    "█".repeat((ratio * BAR_WIDTH as f64).round() as usize)
}

/// 결과를 텍스트로 만든다
pub fn render_result(result: &PairingResult) -> String {
    let suffix = unit_suffix(result.scale.unit);
    let mut lines = Vec::new();

    lines.push(format!("🍽️  선택한 음식: {}", result.food_name));
    if let Some(best) = result.best() {
        lines.push(format!(
            "🥇 가장 잘 어울리는 술: {} ({}{})",
            best.drink, best.display_score, suffix
        ));
    }
    lines.push(String::new());

    let name_width = result
        .ranked_pairs
        .iter()
        .map(|p| p.drink.chars().count())
        .max()
        .unwrap_or(0);

    for (i, pair) in result.ranked_pairs.iter().enumerate() {
        let padding = " ".repeat(name_width - pair.drink.chars().count());
        lines.push(format!(
            "{:>2}. {}{}  {:>7.2}{} {}",
            i + 1,
            pair.drink,
            padding,
            pair.display_score,
            suffix,
            score_bar(pair.display_score, result.scale.display_max)
        ));
    }

    lines.join("\n")
}

/// 무작위 조합 한 줄
pub fn render_pair(food: &str, pair: &RankedPair, unit: ScoreUnit) -> String {
    format!(
        "🎲 {} + {} = {}{} 🍷",
        food,
        pair.drink,
        pair.display_score,
        unit_suffix(unit)
    )
}
