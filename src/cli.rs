use clap::{Parser, Subcommand};
use pairing_common::PairingMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pairing")]
#[command(about = "음식-술 궁합 점수 조회 도구", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 상세 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 점수 계산 모드 (table/vector), 생략 시 설정값
    #[arg(long, global = true)]
    pub mode: Option<PairingMode>,

    /// 점수표 파일 (벡터 모드에서는 음식 영양표)
    #[arg(short, long, global = true)]
    pub dataset: Option<PathBuf>,

    /// 음료 맛 프로필 파일 (벡터 모드)
    #[arg(long, global = true)]
    pub drinks: Option<PathBuf>,

    /// 캐시 사용 안 함
    #[arg(long, global = true)]
    pub no_cache: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 음식 목록 출력
    Foods,

    /// 음식의 음료 궁합 순위 조회
    Query {
        /// 음식명 (생략 시 --random 필요)
        food: Option<String>,

        /// 무작위 음식
        #[arg(short, long)]
        random: bool,

        /// 상위 N개 (생략 시 설정값)
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// JSON으로 출력
        #[arg(long)]
        json: bool,
    },

    /// 목록에서 음식을 골라 조회
    Pick {
        /// 상위 N개 (생략 시 설정값)
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },

    /// 무작위 음식-술 조합 하나
    RandomPair,

    /// 조회 결과를 JSON/Excel로 출력
    Export {
        /// 음식명
        food: Option<String>,

        /// 무작위 음식
        #[arg(short, long)]
        random: bool,

        /// 출력 형식 (json/excel/both)
        #[arg(short, long, default_value = "both")]
        format: ExportFormat,

        /// 출력 파일/디렉터리
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// 폴더 안의 데이터 파일과 추론 결과 표시
    Datasets {
        /// 대상 폴더 (생략 시 현재 폴더)
        folder: Option<PathBuf>,
    },

    /// 캐시 관리
    Cache {
        /// 캐시 삭제
        #[arg(long)]
        clear: bool,

        /// 대상 폴더 (생략 시 데이터 파일 폴더 또는 현재 폴더)
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// 캐시 정보 표시
        #[arg(long)]
        info: bool,
    },

    /// 설정 표시/편집
    Config {
        /// 기본 점수표 설정
        #[arg(long)]
        set_dataset: Option<PathBuf>,

        /// 기본 음료 프로필 설정
        #[arg(long)]
        set_drinks: Option<PathBuf>,

        /// 기본 모드 설정 (table/vector)
        #[arg(long)]
        set_mode: Option<PairingMode>,

        /// 설정 표시
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Excel,
    #[default]
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use json, excel, or both", s)),
        }
    }
}
