use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path};

use json_comments::StripComments;

use crate::error::{Error, Result};

/// Reads a JSON document that may contain `//` and `/* */` comments.
pub fn read_jsonc<P: AsRef<Path>>(path: P) -> Result<serde_json::Value> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = StripComments::new(BufReader::new(file));
    serde_json::from_reader(reader).map_err(|e| Error::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Name of the last component of `dir`, or an empty string for roots.
pub fn dir_name<P: AsRef<Path>>(dir: P) -> String {
    dir.as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Joins the normal components of a relative path with `/`, the separator
/// glob patterns are written against.
pub fn to_slash_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
