//! Text wrappers for sharing replays: plain base64, or gzip then base64.

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::codec::{decode, encode};
use crate::error::ReplayError;
use crate::record::ReplayRecord;

pub fn to_base64(record: &ReplayRecord) -> String {
    STANDARD.encode(encode(record))
}

pub fn from_base64(text: &str) -> Result<ReplayRecord, ReplayError> {
    let bytes = STANDARD.decode(text.trim())?;
    decode(&bytes)
}

pub fn to_base64_gzip(record: &ReplayRecord) -> Result<String, ReplayError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&encode(record))?;
    let compressed = encoder.finish()?;
    Ok(STANDARD.encode(compressed))
}

pub fn from_base64_gzip(text: &str) -> Result<ReplayRecord, ReplayError> {
    let compressed = STANDARD.decode(text.trim())?;
    let mut bytes = Vec::new();
    GzDecoder::new(compressed.as_slice()).read_to_end(&mut bytes)?;
    decode(&bytes)
}
