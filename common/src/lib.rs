//! Food Pairing Common Library
//!
//! 음식-술 궁합 점수 계산의 핵심 로직 (파일 I/O 없음)

pub mod types;
pub mod error;
pub mod text;
pub mod schema;
pub mod scale;
pub mod source;
pub mod table;
pub mod vector;
pub mod resolver;

pub use types::{CellValue, PairingResult, RankedPair, RawTable, ScoreScale, ScoreUnit};
pub use error::{Error, Result};
pub use schema::{infer_schema, InferenceStrategy, SchemaInference};
pub use source::PairingSource;
pub use table::PairingTable;
pub use vector::{pairing_score, DrinkProfile, FoodProfile, VectorPairing};
pub use resolver::{PairingMode, PairingResolver};
