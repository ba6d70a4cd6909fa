//! 궁합 조회기
//!
//! 점수표 모드와 벡터 유사도 모드는 적재 시점에 하나만 선택된다.
//! 조회 인터페이스는 두 모드가 같다.

use crate::error::Result;
use crate::source::PairingSource;
use crate::table::PairingTable;
use crate::types::{PairingResult, ScoreScale};
use crate::vector::VectorPairing;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 점수 계산 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairingMode {
    /// 미리 계산된 점수표
    #[default]
    Table,
    /// 영양/맛 벡터 거리
    Vector,
}

impl std::str::FromStr for PairingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "score" | "점수표" => Ok(PairingMode::Table),
            "vector" | "벡터" => Ok(PairingMode::Vector),
            _ => Err(format!("Unknown mode: {}. Use table or vector", s)),
        }
    }
}

impl std::fmt::Display for PairingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairingMode::Table => write!(f, "table"),
            PairingMode::Vector => write!(f, "vector"),
        }
    }
}

/// 적재가 끝난 조회기
#[derive(Debug, Clone)]
pub enum PairingResolver {
    Table(Arc<PairingTable>),
    Vector(VectorPairing),
}

impl PairingResolver {
    pub fn mode(&self) -> PairingMode {
        match self {
            PairingResolver::Table(_) => PairingMode::Table,
            PairingResolver::Vector(_) => PairingMode::Vector,
        }
    }

    /// 이 조회기가 내는 점수의 스케일
    pub fn scale(&self) -> ScoreScale {
        match self {
            PairingResolver::Table(table) => table.scale(),
            PairingResolver::Vector(_) => ScoreScale::hundred_point(),
        }
    }

    pub fn as_table(&self) -> Option<&PairingTable> {
        match self {
            PairingResolver::Table(table) => Some(table.as_ref()),
            PairingResolver::Vector(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<&VectorPairing> {
        match self {
            PairingResolver::Table(_) => None,
            PairingResolver::Vector(vector) => Some(vector),
        }
    }
}

impl From<PairingTable> for PairingResolver {
    fn from(table: PairingTable) -> Self {
        PairingResolver::Table(Arc::new(table))
    }
}

impl From<Arc<PairingTable>> for PairingResolver {
    fn from(table: Arc<PairingTable>) -> Self {
        PairingResolver::Table(table)
    }
}

impl From<VectorPairing> for PairingResolver {
    fn from(vector: VectorPairing) -> Self {
        PairingResolver::Vector(vector)
    }
}

impl PairingSource for PairingResolver {
    fn row_foods(&self) -> &[String] {
        match self {
            PairingResolver::Table(table) => table.row_foods(),
            PairingResolver::Vector(vector) => vector.row_foods(),
        }
    }

    fn rank_row(&self, row: usize) -> Result<PairingResult> {
        match self {
            PairingResolver::Table(table) => table.rank_row(row),
            PairingResolver::Vector(vector) => vector.rank_row(row),
        }
    }
}
