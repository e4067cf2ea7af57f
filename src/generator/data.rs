use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub(super) struct PageData {
    pub input_path: PathBuf,
    pub file_slug: String,
    pub date: Option<NaiveDate>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ManifestEntry {
    pub input_path: PathBuf,
    pub file_slug: String,
    pub date: Option<NaiveDate>,
    pub permalink: String,
    pub output_path: PathBuf,
}

#[derive(Serialize, Debug, Default)]
pub(crate) struct Manifest {
    pub pages: Vec<ManifestEntry>,
}
