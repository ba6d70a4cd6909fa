//! 벡터 유사도 궁합
//!
//! 점수표 대신 음식 영양 비율(단백질/지방/탄수화물)과 음료 맛 프로필
//! (단맛/산도/바디감)의 유클리드 거리로 0~100점을 계산한다.
//!
//! - 음식 벡터: 각 성분 / 합계
//! - 음료 벡터: 각 성분 / 최대값
//! - 점수: `max(0, 100 - 100 * ‖food - drink‖)`

use crate::error::{Error, Result};
use crate::source::{rank_scores, PairingSource};
use crate::text::header_key;
use crate::types::{PairingResult, RawTable, ScoreScale};
use serde::{Deserialize, Serialize};

/// 음식 영양 프로필
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodProfile {
    pub name: String,
    #[serde(default)]
    pub kcal: Option<f64>,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// 음료 맛 프로필
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkProfile {
    pub name: String,
    pub sweetness: f64,
    pub acidity: f64,
    pub body: f64,
}

const FOOD_NAME_HEADERS: &[&str] = &["food", "name", "음식", "음식명", "메뉴"];
const KCAL_HEADERS: &[&str] = &["kcal", "calories", "열량", "칼로리"];
const PROTEIN_HEADERS: &[&str] = &["protein", "단백질"];
const FAT_HEADERS: &[&str] = &["fat", "지방"];
const CARBS_HEADERS: &[&str] = &["carbs", "carbohydrate", "탄수화물"];

const DRINK_NAME_HEADERS: &[&str] = &["drink", "name", "음료", "술", "주종"];
const SWEETNESS_HEADERS: &[&str] = &["sweetness", "단맛", "당도"];
const ACIDITY_HEADERS: &[&str] = &["acidity", "산도", "산미"];
const BODY_HEADERS: &[&str] = &["body", "바디감", "바디"];

/// 헤더 동의어 중 처음 일치하는 열 (정확 일치)
fn find_column(raw: &RawTable, synonyms: &[&str]) -> Option<usize> {
    raw.headers
        .iter()
        .position(|h| synonyms.contains(&header_key(h).as_str()))
}

fn require_column(raw: &RawTable, synonyms: &[&str]) -> Result<usize> {
    find_column(raw, synonyms).ok_or_else(|| {
        Error::schema(format!(
            "필수 열이 없습니다: {} (열: {})",
            synonyms[0],
            raw.headers.join(", ")
        ))
    })
}

/// 성분 값을 읽는다 (숫자가 아니면 Schema, 음수면 NegativeComponent)
fn read_component(raw: &RawTable, row: usize, column: usize, name: &str) -> Result<f64> {
    let header = raw.header(column);
    let value = raw.rows[row][column].as_number().ok_or_else(|| {
        Error::schema(format!(
            "{}행 '{}' 값이 숫자가 아닙니다",
            row + 2,
            header
        ))
    })?;
    if value < 0.0 {
        return Err(Error::NegativeComponent {
            name: name.to_string(),
            field: header.to_string(),
        });
    }
    Ok(value)
}

impl FoodProfile {
    /// 음식 영양 표를 읽는다 (`food, protein, fat, carbs[, kcal]`)
    pub fn list_from_raw(raw: &RawTable) -> Result<Vec<Self>> {
        let name_col = require_column(raw, FOOD_NAME_HEADERS)?;
        let protein_col = require_column(raw, PROTEIN_HEADERS)?;
        let fat_col = require_column(raw, FAT_HEADERS)?;
        let carbs_col = require_column(raw, CARBS_HEADERS)?;
        let kcal_col = find_column(raw, KCAL_HEADERS);

        (0..raw.row_count())
            .map(|row| {
                let name = raw.rows[row][name_col].as_clean_text();
                Ok(Self {
                    protein: read_component(raw, row, protein_col, &name)?,
                    fat: read_component(raw, row, fat_col, &name)?,
                    carbs: read_component(raw, row, carbs_col, &name)?,
                    kcal: kcal_col.and_then(|c| raw.rows[row][c].as_number()),
                    name,
                })
            })
            .collect()
    }

    /// 탄단지 비율 벡터 (합이 1)
    pub fn vector(&self) -> Result<[f64; 3]> {
        let sum = self.protein + self.fat + self.carbs;
        if sum <= 0.0 {
            return Err(Error::DegenerateVector {
                name: self.name.clone(),
            });
        }
        Ok([self.protein / sum, self.fat / sum, self.carbs / sum])
    }
}

impl DrinkProfile {
    /// 음료 맛 표를 읽는다 (`drink, sweetness, acidity, body`)
    pub fn list_from_raw(raw: &RawTable) -> Result<Vec<Self>> {
        let name_col = require_column(raw, DRINK_NAME_HEADERS)?;
        let sweetness_col = require_column(raw, SWEETNESS_HEADERS)?;
        let acidity_col = require_column(raw, ACIDITY_HEADERS)?;
        let body_col = require_column(raw, BODY_HEADERS)?;

        (0..raw.row_count())
            .map(|row| {
                let name = raw.rows[row][name_col].as_clean_text();
                Ok(Self {
                    sweetness: read_component(raw, row, sweetness_col, &name)?,
                    acidity: read_component(raw, row, acidity_col, &name)?,
                    body: read_component(raw, row, body_col, &name)?,
                    name,
                })
            })
            .collect()
    }

    /// 성분이 모두 0 이상인지
    fn check_components(&self) -> Result<()> {
        let fields = [
            ("sweetness", self.sweetness),
            ("acidity", self.acidity),
            ("body", self.body),
        ];
        match fields.iter().find(|(_, value)| *value < 0.0) {
            Some((field, _)) => Err(Error::NegativeComponent {
                name: self.name.clone(),
                field: field.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// 최대 성분 기준 정규화 벡터
    pub fn vector(&self) -> Result<[f64; 3]> {
        let max = self.sweetness.max(self.acidity).max(self.body);
        if max <= 0.0 {
            return Err(Error::DegenerateVector {
                name: self.name.clone(),
            });
        }
        Ok([self.sweetness / max, self.acidity / max, self.body / max])
    }
}

/// 두 프로필의 궁합 점수 (0~100, 높을수록 유사)
pub fn pairing_score(food: &FoodProfile, drink: &DrinkProfile) -> Result<f64> {
    Ok(score_vectors(&food.vector()?, &drink.vector()?))
}

fn score_vectors(food: &[f64; 3], drink: &[f64; 3]) -> f64 {
    let distance = food
        .iter()
        .zip(drink)
        .map(|(f, d)| (f - d).powi(2))
        .sum::<f64>()
        .sqrt();
    (100.0 - distance * 100.0).max(0.0)
}

/// 벡터 유사도 모드 데이터 소스
#[derive(Debug, Clone, PartialEq)]
pub struct VectorPairing {
    foods: Vec<FoodProfile>,
    drinks: Vec<DrinkProfile>,
    /// 적재 시 정규화된 음료 벡터 (drinks와 같은 순서)
    drink_vectors: Vec<[f64; 3]>,
    food_names: Vec<String>,
}

impl VectorPairing {
    pub fn new(foods: Vec<FoodProfile>, drinks: Vec<DrinkProfile>) -> Result<Self> {
        if foods.is_empty() {
            return Err(Error::schema("음식 데이터 행이 없습니다"));
        }
        if drinks.is_empty() {
            return Err(Error::schema("음료 데이터 행이 없습니다"));
        }
        // 음료 벡터는 음식과 무관하므로 여기서 한 번만 검증한다
        let drink_vectors = drinks
            .iter()
            .map(|drink| {
                drink.check_components()?;
                drink.vector()
            })
            .collect::<Result<Vec<_>>>()?;

        let food_names = foods.iter().map(|f| f.name.clone()).collect();
        Ok(Self {
            foods,
            drinks,
            drink_vectors,
            food_names,
        })
    }

    /// 음식 표와 음료 표에서 만든다
    pub fn from_raw(food_raw: &RawTable, drink_raw: &RawTable) -> Result<Self> {
        Self::new(
            FoodProfile::list_from_raw(food_raw)?,
            DrinkProfile::list_from_raw(drink_raw)?,
        )
    }

    pub fn foods(&self) -> &[FoodProfile] {
        &self.foods
    }

    pub fn drinks(&self) -> &[DrinkProfile] {
        &self.drinks
    }

    /// 이름으로 음식 프로필 조회 (첫 행)
    pub fn food_profile(&self, food: &str) -> Result<&FoodProfile> {
        let row = self.find_row(food)?;
        Ok(&self.foods[row])
    }
}

impl PairingSource for VectorPairing {
    fn row_foods(&self) -> &[String] {
        &self.food_names
    }

    fn rank_row(&self, row: usize) -> Result<PairingResult> {
        let food = &self.foods[row];
        let food_vec = food.vector()?;

        let scores = self
            .drinks
            .iter()
            .zip(&self.drink_vectors)
            .map(|(drink, drink_vec)| {
                (drink.name.as_str(), Some(score_vectors(&food_vec, drink_vec)))
            });

        rank_scores(&food.name, scores, ScoreScale::hundred_point())
    }
}
