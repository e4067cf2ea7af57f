use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    path::Path,
};

use log::info;

use crate::generator::data::Manifest;

pub(super) fn write_manifest<W: Write>(writer: W, manifest: &Manifest) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, manifest)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub(super) fn save_manifest(manifest_path: &Path, manifest: &Manifest) -> anyhow::Result<()> {
    if let Some(parent) = manifest_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let fd = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(manifest_path)?;
    write_manifest(fd, manifest)?;
    info!("Wrote manifest to {manifest_path:?}.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::Value;

    use super::*;
    use crate::generator::data::ManifestEntry;

    #[test]
    fn manifest_uses_camel_case_keys() {
        let manifest = Manifest {
            pages: vec![ManifestEntry {
                input_path: PathBuf::from("2025-11-01-why-i-joined-ema.md"),
                file_slug: "2025-11-01-why-i-joined-ema".to_string(),
                date: chrono::NaiveDate::from_ymd_opt(2025, 11, 1),
                permalink: "/blog/why-i-joined-ema/".to_string(),
                output_path: PathBuf::from("out/blog/why-i-joined-ema/index.html"),
            }],
        };
        let mut buf = Vec::new();
        write_manifest(&mut buf, &manifest).unwrap();

        let value: Value = serde_json::from_slice(&buf).unwrap();
        let page = &value["pages"][0];
        assert_eq!(page["fileSlug"], "2025-11-01-why-i-joined-ema");
        assert_eq!(page["permalink"], "/blog/why-i-joined-ema/");
        assert_eq!(page["date"], "2025-11-01");
        assert_eq!(page["outputPath"], "out/blog/why-i-joined-ema/index.html");
    }

    #[test]
    fn save_overwrites_previous_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("manifest.json");

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "x".repeat(4096)).unwrap();
        save_manifest(&path, &Manifest::default()).unwrap();

        let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["pages"], Value::Array(vec![]));
    }

    #[test]
    fn save_creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("manifest.json");
        save_manifest(&path, &Manifest::default()).unwrap();
        assert!(path.is_file());
    }
}
