use thiserror::Error;

#[derive(Error, Debug)]
pub enum PairingAppError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("데이터 파일이 지정되지 않았습니다. `pairing config --set-dataset PATH` 또는 --dataset 으로 지정하세요")]
    MissingDataset,

    #[error("음식명을 지정하거나 --random 을 사용하세요")]
    MissingFood,

    #[error("파일을 찾을 수 없습니다: {0}")]
    FileNotFound(String),

    #[error("폴더를 찾을 수 없습니다: {0}")]
    FolderNotFound(String),

    #[error("지원하지 않는 파일 형식입니다: {0} (csv/xlsx/xls/ods)")]
    UnsupportedFormat(String),

    #[error("데이터 파일이 없습니다: {0}")]
    NoDatasetsFound(String),

    #[error("CSV 읽기 오류: {0}")]
    Csv(#[from] csv::Error),

    #[error("스프레드시트 읽기 오류: {0}")]
    Spreadsheet(String),

    #[error("Excel 생성 오류: {0}")]
    ExcelGeneration(String),

    #[error("입력 오류: {0}")]
    Interactive(String),

    #[error("JSON 해석 오류: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] pairing_common::Error),
}

impl From<calamine::Error> for PairingAppError {
    fn from(e: calamine::Error) -> Self {
        PairingAppError::Spreadsheet(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for PairingAppError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        PairingAppError::ExcelGeneration(e.to_string())
    }
}

impl From<dialoguer::Error> for PairingAppError {
    fn from(e: dialoguer::Error) -> Self {
        PairingAppError::Interactive(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PairingAppError>;
