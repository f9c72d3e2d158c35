use bincode::{deserialize_from, serialize_into};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use log::{debug, info};
use std::fs::{File, create_dir_all};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::record::PrescriptionStore;

/// Write a snapshot. The data goes to a temp file beside `path` first and is
/// renamed over it once complete, so the previous snapshot survives a failure.
pub fn save_store(store: &PrescriptionStore, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    create_dir_all(dir)?;

    let temp = NamedTempFile::new_in(dir)?;
    let encoder = GzEncoder::new(temp, Compression::default());
    let mut writer = BufWriter::new(encoder);

    serialize_into(&mut writer, store)?;
    let encoder = writer.into_inner().map_err(|e| e.into_error())?;
    let mut temp = encoder.finish()?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    info!("saved {} prescriptions to {}", store.len(), path.display());
    Ok(())
}

pub fn load_store(path: impl AsRef<Path>) -> Result<PrescriptionStore> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let decoder = GzDecoder::new(file);
    let mut reader = BufReader::new(decoder);

    let store: PrescriptionStore = deserialize_from(&mut reader)?;

    info!("loaded {} prescriptions from {}", store.len(), path.display());
    Ok(store)
}

/// Load the store, or start empty when no snapshot exists yet.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<PrescriptionStore> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("no snapshot at {}, starting empty", path.display());
        return Ok(PrescriptionStore::new());
    }
    load_store(path)
}

pub fn to_json(store: &PrescriptionStore) -> Result<String> {
    Ok(serde_json::to_string_pretty(store)?)
}

pub fn from_json(json: &str) -> Result<PrescriptionStore> {
    Ok(serde_json::from_str(json)?)
}
