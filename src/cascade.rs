use std::{
    collections::BTreeMap,
    fmt,
    path::{Component, Path, PathBuf},
};

use log::debug;
use serde_json::Value;

use crate::permalink::derive_permalink;

#[derive(Debug, thiserror::Error)]
pub(crate) enum DataError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub(crate) type ComputedField = Box<dyn Fn(&Value) -> Result<Value, DataError> + Send + Sync>;

#[derive(Default)]
pub(crate) struct DirectoryData {
    computed: BTreeMap<String, ComputedField>,
}

impl fmt::Debug for DirectoryData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryData")
            .field("computed", &self.computed.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl DirectoryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn computed<F>(mut self, key: &str, field: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, DataError> + Send + Sync + 'static,
    {
        self.computed.insert(key.to_string(), Box::new(field));
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.computed.keys().map(String::as_str)
    }
}

pub(crate) fn posts_directory_data() -> DirectoryData {
    DirectoryData::new().computed("permalink", |data| {
        let file_slug = match data.pointer("/page/fileSlug") {
            Some(Value::String(s)) => s,
            Some(other) => {
                return Err(DataError::InvalidInput(format!(
                    "page.fileSlug must be a string, got {other}"
                )))
            }
            None => {
                return Err(DataError::InvalidInput(
                    "page.fileSlug is missing".to_string(),
                ))
            }
        };
        Ok(Value::String(derive_permalink(file_slug)))
    })
}

#[derive(Debug, Default)]
pub(crate) struct DataCascade {
    directories: BTreeMap<PathBuf, DirectoryData>,
}

fn normalize(dir: &Path) -> PathBuf {
    dir.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

impl DataCascade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, dir: &Path, data: DirectoryData) -> Self {
        self.directories.insert(normalize(dir), data);
        self
    }

    // deeper directories override their ancestors
    pub fn resolve(&self, dir: &Path) -> BTreeMap<&str, &ComputedField> {
        let dir = normalize(dir);
        let mut ancestors: Vec<&Path> = dir.ancestors().collect();
        ancestors.reverse();

        let mut fields = BTreeMap::new();
        for ancestor in ancestors {
            if let Some(data) = self.directories.get(ancestor) {
                for (key, field) in data.computed.iter() {
                    fields.insert(key.as_str(), field);
                }
            }
        }
        fields
    }

    pub fn evaluate(&self, dir: &Path, data: &mut Value) -> Result<(), DataError> {
        let fields = self.resolve(dir);
        // evaluate against the data as it was before any field was written
        let snapshot = data.clone();
        let Some(object) = data.as_object_mut() else {
            return Err(DataError::InvalidInput(format!(
                "data context must be an object, got {snapshot}"
            )));
        };
        for (key, field) in fields {
            let value = field(&snapshot)?;
            debug!("computed {key} = {value}");
            object.insert(key.to_string(), value);
        }
        Ok(())
    }
}
