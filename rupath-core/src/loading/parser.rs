use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::warn;
use serde::de::DeserializeOwned;

use crate::Error;

/// Deserialize a whole JSON file into `T`
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not valid JSON for `T`
pub fn read_json_file<T>(path: &Path) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Like [`read_json_file`], but a missing or malformed file yields an empty
/// dataset so the service still starts
pub(crate) fn read_json_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    match read_json_file(path) {
        Ok(data) => data,
        Err(err) => {
            warn!(
                "Could not load {}, continuing with empty data: {err}",
                path.display()
            );
            T::default()
        }
    }
}
