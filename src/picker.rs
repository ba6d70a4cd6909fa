//! 대화식 음식 선택

use crate::error::{PairingAppError, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use pairing_common::PairingSource;

/// 음식 목록에서 하나를 고른다 (취소하면 None)
pub fn pick_food<S: PairingSource>(source: &S) -> Result<Option<String>> {
    let foods = source.list_foods();
    if foods.is_empty() {
        return Err(PairingAppError::Interactive("선택할 음식이 없습니다".into()));
    }

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("🍴 음식을 선택하세요")
        .items(&foods)
        .default(0)
        .max_length(15)
        .interact_opt()?;

    Ok(selection.map(|index| foods[index].to_string()))
}
