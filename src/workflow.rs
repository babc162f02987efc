//! What happens when the user uploads, deletes or picks a dataset.
//!
//! Each event is a single call that takes the shared registry and returns
//! everything the presentation needs to update itself.

use std::fmt;

use serde::Serialize;

use crate::{
    DatasetRegistry, FileParser, FrequencyTable, RawUpload, RegistryError,
};

/// Chart title shown when there's no dataset to plot.
pub const PLACEHOLDER_TITLE: &str = "Please select a database";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum UploadOutcome {
    /// Parsed and stored under the file name.
    Registered { name: String, table: FrequencyTable },
    /// A dataset with the same name exists, nothing was parsed or stored.
    Duplicate { name: String },
    /// The file couldn't be parsed, nothing was stored.
    Rejected { name: String, error: String },
}

impl UploadOutcome {
    /// Table to display for the upload, empty unless it was registered.
    pub fn table(&self) -> FrequencyTable {
        match self {
            UploadOutcome::Registered { table, .. } => table.clone(),
            _ => Default::default(),
        }
    }
}

impl fmt::Display for UploadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadOutcome::Registered { name, .. } => {
                write!(f, "Database has been uploaded: {name}")
            }
            UploadOutcome::Duplicate { name } => {
                write!(f, "{}", duplicate_notice(name))
            }
            UploadOutcome::Rejected { name, error } => {
                write!(f, "Can not read this file: {name} ({error})")
            }
        }
    }
}

fn duplicate_notice(name: &str) -> String {
    format!("This database has been uploaded already: {name}")
}

/// Warning to show as soon as a file is picked for upload if its name is
/// already taken.
pub fn check_duplicate(
    registry: &DatasetRegistry,
    filename: &str,
) -> Option<String> {
    registry.contains(filename).then(|| duplicate_notice(filename))
}

/// Parse an upload and register it under its file name.
///
/// Names that are already registered are turned away before parsing, a
/// dataset must be deleted before the name can be reused.
pub fn upload(
    registry: &DatasetRegistry,
    parser: &FileParser,
    upload: RawUpload,
) -> UploadOutcome {
    let RawUpload { filename, bytes } = upload;

    if registry.contains(&filename) {
        log::info!("upload: {filename:?} is already registered");
        return UploadOutcome::Duplicate { name: filename };
    }

    let table = match parser.parse(&bytes, &filename) {
        Ok(table) => table,
        Err(e) => {
            log::warn!("upload: rejected {filename:?}: {e}");
            return UploadOutcome::Rejected {
                name: filename,
                error: e.to_string(),
            };
        }
    };

    // Someone else may have registered the name while we were parsing.
    if !registry.put(filename.clone(), table.clone()) {
        return UploadOutcome::Duplicate { name: filename };
    }

    UploadOutcome::Registered {
        name: filename,
        table,
    }
}

/// Result of a delete request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    /// Name of the deleted dataset or why nothing was deleted.
    pub status: Result<String, RegistryError>,
    /// Whether the typed name and the picked upload file should be reset.
    pub clear_input: bool,
    /// Dataset names after the request.
    pub names: Vec<String>,
}

impl DeleteOutcome {
    pub fn message(&self) -> String {
        match &self.status {
            Ok(name) => format!("Database has been deleted: {name}"),
            Err(e) => e.to_string(),
        }
    }
}

/// Delete the dataset with a name typed in by the user.
pub fn delete(registry: &DatasetRegistry, typed_name: &str) -> DeleteOutcome {
    let mut entries = registry.write();

    let status = if typed_name.is_empty() {
        if entries.is_empty() {
            Err(RegistryError::Empty)
        } else {
            Err(RegistryError::InvalidRequest)
        }
    } else if entries.shift_remove(typed_name).is_some() {
        log::info!("delete: deleted {typed_name:?}");
        Ok(typed_name.to_owned())
    } else {
        Err(RegistryError::NotFound(typed_name.to_owned()))
    };

    let names = entries.keys().cloned().collect();

    DeleteOutcome {
        clear_input: status.is_ok(),
        status,
        names,
    }
}

/// Bar chart data for one dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Chart {
    pub title: String,
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
}

impl Chart {
    pub fn placeholder() -> Self {
        Chart {
            title: PLACEHOLDER_TITLE.to_owned(),
            labels: Vec::new(),
            counts: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.title == PLACEHOLDER_TITLE && self.labels.is_empty()
    }
}

/// Chart for the picked dataset, or the empty placeholder chart if nothing
/// or an unknown name is picked.
pub fn select(registry: &DatasetRegistry, selected: Option<&str>) -> Chart {
    let Some(name) = selected.filter(|s| !s.is_empty()) else {
        return Chart::placeholder();
    };

    match registry.get(name) {
        Ok(table) => Chart {
            title: name.to_owned(),
            labels: table.labels(),
            counts: table.counts(),
        },
        Err(e) => {
            log::debug!("select: {e}");
            Chart::placeholder()
        }
    }
}
