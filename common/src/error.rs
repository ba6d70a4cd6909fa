//! 에러 타입 정의

use thiserror::Error;

/// 공통 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    /// 음식/점수 열을 추론할 수 없음 (원본 레이아웃 수정 필요)
    #[error("스키마 추론 실패: {reason}")]
    Schema { reason: String },

    /// 점수 열에 숫자가 하나도 없음
    #[error("점수 데이터가 비어 있어 스케일을 결정할 수 없습니다 (점수 열: {columns})")]
    EmptyScoreData { columns: String },

    #[error("음식을 찾을 수 없습니다: {food}")]
    FoodNotFound { food: String },

    #[error("사용 가능한 점수가 없습니다: {food}")]
    NoScoresAvailable { food: String },

    /// 크기 0 벡터 (정규화 불가)
    #[error("영벡터는 정규화할 수 없습니다: {name}")]
    DegenerateVector { name: String },

    #[error("음수 성분은 허용되지 않습니다: {name} ({field})")]
    NegativeComponent { name: String, field: String },
}

impl Error {
    pub fn schema(reason: impl Into<String>) -> Self {
        Error::Schema {
            reason: reason.into(),
        }
    }

    /// 적재 시점 에러인지 (테이블 전체가 사용 불가)
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Error::Schema { .. }
                | Error::EmptyScoreData { .. }
                | Error::NegativeComponent { .. }
        )
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, Error>;
