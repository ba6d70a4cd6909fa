//! JSON 출력

use crate::error::Result;
use pairing_common::{PairingMode, PairingResult};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    generated_at: String,
    mode: PairingMode,
    #[serde(flatten)]
    result: &'a PairingResult,
}

pub fn write_json(result: &PairingResult, mode: PairingMode, output_path: &Path) -> Result<()> {
    let document = ExportDocument {
        generated_at: chrono::Local::now().to_rfc3339(),
        mode,
        result,
    };

    let writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(writer, &document)?;
    Ok(())
}
