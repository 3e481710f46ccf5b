use crate::models::{ListingIdentifier, ZoneRecord, FIELD_NAMES};
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}

/// One `house_id` column, harvest order
pub fn write_ids_to<W: io::Write>(writer: W, ids: &[ListingIdentifier]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["house_id"])?;
    for id in ids {
        csv.write_record([id.to_string()])?;
    }
    csv.flush()?;
    Ok(())
}

/// `id` first, then the record fields in their fixed order
pub fn write_records_to<W: io::Write>(writer: W, records: &[ZoneRecord]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["id"];
    header.extend(FIELD_NAMES);
    csv.write_record(&header)?;

    for zone_record in records {
        let mut row = vec![zone_record.id.to_string()];
        row.extend(
            zone_record
                .record
                .fields()
                .into_iter()
                .map(|(_, value)| value.to_cell()),
        );
        csv.write_record(&row)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_ids(path: &Path, ids: &[ListingIdentifier]) -> Result<()> {
    ensure_parent(path)?;
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_ids_to(file, ids)?;
    info!("💾 Saved {} ids to {}", ids.len(), path.display());
    Ok(())
}

/// Rewrites the whole file; used for both checkpoints and the final save.
pub fn write_records(path: &Path, records: &[ZoneRecord]) -> Result<()> {
    ensure_parent(path)?;
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_records_to(file, records)?;
    info!("💾 Saved {} listings to {}", records.len(), path.display());
    Ok(())
}
