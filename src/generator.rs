use std::{
    collections::{HashMap, VecDeque},
    ffi::OsStr,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use log::{debug, info, warn};
use serde_json::{json, Value};

use crate::{
    cascade::{posts_directory_data, DataCascade},
    permalink::file_date,
    state::State,
};

use self::{
    data::{Manifest, ManifestEntry, PageData},
    utils::{default_permalink, output_path},
};

pub(crate) mod data;
mod utils;

fn preprocess_file(
    dir: &Path,
    file_name: &OsStr,
    out_dir: &Path,
    cascade: &DataCascade,
) -> anyhow::Result<ManifestEntry> {
    let input_path = dir.join(file_name);
    // no lossy slugs
    let Some(file_slug) = Path::new(file_name)
        .file_stem()
        .unwrap_or(file_name)
        .to_str()
        .map(str::to_string)
    else {
        bail!("file name {:?} is not valid UTF-8", input_path);
    };

    let page = PageData {
        input_path: input_path.clone(),
        file_slug: file_slug.clone(),
        date: file_date(&file_slug),
    };
    let mut data = json!({ "page": serde_json::to_value(&page)? });
    cascade.evaluate(dir, &mut data)?;

    let permalink = match data.get("permalink") {
        Some(Value::String(p)) => p.clone(),
        Some(other) => bail!("permalink must be a string, got {}", other),
        None => default_permalink(dir, &file_slug),
    };
    debug!("{:?} -> {}", input_path, permalink);

    Ok(ManifestEntry {
        output_path: output_path(out_dir, &permalink),
        input_path,
        file_slug,
        date: page.date,
        permalink,
    })
}

pub(super) fn collect_pages(
    article_dir: &Path,
    out_dir: &Path,
    cascade: &DataCascade,
) -> anyhow::Result<Manifest> {
    let mut manifest = Manifest::default();
    // output path -> (input path, permalink) that claimed it
    let mut claimed: HashMap<PathBuf, (PathBuf, String)> = HashMap::new();

    let mut q = VecDeque::new();
    q.push_back(PathBuf::new());
    while let Some(path) = q.pop_front() {
        let current_searching_directory_path = article_dir.join(&path);

        for entry in std::fs::read_dir(&current_searching_directory_path)
            .with_context(|| format!("while reading {:?}", current_searching_directory_path))?
        {
            let entry = entry?;
            let meta = entry.metadata()?;
            let file_name = entry.file_name();

            if file_name.to_string_lossy().starts_with('.') {
                debug!("skipping hidden entry {:?}", path.join(&file_name));
                continue;
            }

            if meta.is_dir() {
                q.push_back(path.join(&file_name));
            } else if meta.is_file() {
                let page = preprocess_file(&path, &file_name, out_dir, cascade)
                    .with_context(|| format!("while preprocessing {:?}", path.join(&file_name)))?;
                if let Some((other, other_permalink)) = claimed.insert(
                    page.output_path.clone(),
                    (page.input_path.clone(), page.permalink.clone()),
                ) {
                    bail!(
                        "Output conflict: {:?} ({}) and {:?} ({}) both write to {:?}",
                        other,
                        other_permalink,
                        page.input_path,
                        page.permalink,
                        page.output_path
                    );
                }
                manifest.pages.push(page);
            } else {
                warn!(
                    "skipping {:?}: neither a regular file nor a directory",
                    path.join(&file_name)
                );
            }
        }
    }

    manifest
        .pages
        .sort_by(|a, b| a.input_path.cmp(&b.input_path));
    Ok(manifest)
}

pub(crate) fn posts_cascade(blog_dir: &Path) -> DataCascade {
    let posts = posts_directory_data();
    info!(
        "Registering {:?} on {:?}",
        posts.keys().collect::<Vec<_>>(),
        blog_dir
    );
    DataCascade::new().register(blog_dir, posts)
}

pub(crate) fn generate() -> anyhow::Result<Manifest> {
    let s = State::instance();
    let cascade = posts_cascade(&s.blog_dir);

    let manifest = collect_pages(&s.article_dir, &s.out_dir, &cascade)?;
    info!("Resolved {} permalinks.", manifest.pages.len());
    Ok(manifest)
}
