/// MyAnimeList export import.
///
/// Reads a `.xml.gz` (or plain `.xml`) export, turns every `<anime>` record
/// into a [`NewItem`], and creates it in the rating store.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use animelo_core::{NewItem, RatingError, RatingStore, Result};
use anyhow::Context;
use flate2::bufread::GzDecoder;
use serde::Deserialize;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Deserialize)]
struct MyAnimeList {
    #[serde(rename = "anime", default)]
    anime: Vec<AnimeRecord>,
}

#[derive(Deserialize)]
struct AnimeRecord {
    series_animedb_id: i64,
    series_title: String,
    my_status: String,
}

/// What to do when a record's ID is already in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Count it and move on. Re-importing the same list is a no-op.
    Skip,
    /// Abort with `DuplicateIdentity`.
    Reject,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub parsed: usize,
    pub inserted: usize,
    pub duplicates: usize,
    /// Inserted items whose status made them eligible for rating.
    pub eligible: usize,
}

/// Open, decompress if needed, and parse an export file.
pub fn read_catalog(path: &Path) -> anyhow::Result<Vec<NewItem>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let is_gzip = reader
        .fill_buf()
        .with_context(|| format!("Failed to read {}", path.display()))?
        .starts_with(&GZIP_MAGIC);

    let items = if is_gzip {
        tracing::info!(path = %path.display(), "decompressing gzip export");
        parse_catalog(BufReader::new(GzDecoder::new(reader)))?
    } else {
        parse_catalog(reader)?
    };
    Ok(items)
}

/// Parse an uncompressed MyAnimeList XML document.
pub fn parse_catalog<R: BufRead>(reader: R) -> Result<Vec<NewItem>> {
    let list: MyAnimeList = quick_xml::de::from_reader(reader)
        .map_err(|e| RatingError::ImportFormat(e.to_string()))?;

    Ok(list
        .anime
        .into_iter()
        .map(|a| NewItem::new(a.series_animedb_id, a.series_title.trim(), a.my_status.trim()))
        .collect())
}

/// Create every item in the store, one durable `put` per record.
pub fn import_items<S: RatingStore + ?Sized>(
    store: &mut S,
    items: Vec<NewItem>,
    policy: DuplicatePolicy,
) -> Result<ImportSummary> {
    let mut summary = ImportSummary {
        parsed: items.len(),
        ..ImportSummary::default()
    };

    for item in items {
        let id = item.id;
        match store.put(item) {
            Ok(created) => {
                summary.inserted += 1;
                if created.eligible {
                    summary.eligible += 1;
                }
            }
            Err(RatingError::DuplicateIdentity(_)) if policy == DuplicatePolicy::Skip => {
                tracing::warn!(id, "skipping item already in the rating store");
                summary.duplicates += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        parsed = summary.parsed,
        inserted = summary.inserted,
        duplicates = summary.duplicates,
        eligible = summary.eligible,
        "import finished"
    );
    Ok(summary)
}
