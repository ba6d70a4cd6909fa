use crate::error::{PairingAppError, Result};
use pairing_common::PairingMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 점수표 경로 환경 변수
pub const DATASET_ENV: &str = "FOOD_PAIRING_DATASET";
/// 음료 프로필 경로 환경 변수 (벡터 모드)
pub const DRINKS_ENV: &str = "FOOD_PAIRING_DRINKS";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 점수표 (벡터 모드에서는 음식 영양표)
    pub dataset: Option<PathBuf>,
    /// 음료 맛 프로필 (벡터 모드 전용)
    pub drink_dataset: Option<PathBuf>,
    pub mode: PairingMode,
    pub top_n: usize,
    pub use_cache: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: None,
            drink_dataset: None,
            mode: PairingMode::Table,
            top_n: 10,
            use_cache: true,
        }
    }
}

impl Config {
    /// 기본 경로의 설정을 읽는다 (파일이 없으면 기본값)
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 설정을 읽되, 손상된 파일은 경고 후 기본값으로 대신한다
    pub fn load_or_default() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from_or_default(&path),
            Err(e) => {
                tracing::warn!(error = %e, "설정 경로를 알 수 없어 기본값을 사용합니다");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_from_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "설정 파일을 읽을 수 없어 기본값을 사용합니다");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PairingAppError::Config("홈 디렉터리를 찾을 수 없습니다".into()))?;
        Ok(home.join(".config").join("food-pairing").join("config.json"))
    }

    /// 점수표 경로 (환경 변수 우선)
    pub fn dataset_path(&self) -> Result<PathBuf> {
        if let Ok(path) = std::env::var(DATASET_ENV) {
            return Ok(PathBuf::from(path));
        }

        self.dataset.clone().ok_or(PairingAppError::MissingDataset)
    }

    /// 음료 프로필 경로 (환경 변수 우선)
    pub fn drink_dataset_path(&self) -> Result<PathBuf> {
        if let Ok(path) = std::env::var(DRINKS_ENV) {
            return Ok(PathBuf::from(path));
        }

        self.drink_dataset.clone().ok_or_else(|| {
            PairingAppError::Config(
                "벡터 모드에는 음료 프로필이 필요합니다 (--drinks 또는 `pairing config --set-drinks`)".into(),
            )
        })
    }

    pub fn set_dataset(&mut self, path: PathBuf) -> Result<()> {
        self.dataset = Some(path);
        self.save()
    }

    pub fn set_drink_dataset(&mut self, path: PathBuf) -> Result<()> {
        self.drink_dataset = Some(path);
        self.save()
    }

    pub fn set_mode(&mut self, mode: PairingMode) -> Result<()> {
        self.mode = mode;
        self.save()
    }
}
