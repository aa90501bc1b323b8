use crate::error::{Error, Result};
use crate::menu::RESERVED_KEYS;
use crate::model::{FileRecord, Grouping, Role};
use std::collections::btree_map::Entry;
use std::path::Path;
use walkdir::WalkDir;

const AUDIO_MARKER: &str = "_audio";

/// Raw traversal result: every classified file in walk order.
#[derive(Debug)]
pub struct Walk {
    pub records: Vec<FileRecord>,
    pub files_seen: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug)]
pub struct ScanOutcome {
    pub grouping: Grouping,
    pub files_seen: usize,
    pub classified: usize,
    pub ignored: usize,
    pub warnings: Vec<String>,
}

/// Derive `(category, base id, role)` for a single file, or `None` when the
/// extension is not one we play or the names are not valid UTF-8.
pub fn classify(path: &Path) -> Option<FileRecord> {
    let filename = path.file_name()?.to_str()?.to_string();
    let ext = path.extension()?.to_str()?.to_lowercase();
    let stem = path.file_stem()?.to_str()?;

    let role = match ext.as_str() {
        "mp4" if stem.ends_with(AUDIO_MARKER) => Role::Audio,
        "mp4" => Role::Video,
        "vtt" => Role::Subtitles,
        _ => return None,
    };

    let base_id = stem.strip_suffix(AUDIO_MARKER).unwrap_or(stem);
    if base_id.is_empty() {
        return None;
    }
    let category = path.parent()?.file_name()?.to_str()?.to_string();

    Some(FileRecord {
        category,
        base_id: base_id.to_string(),
        role,
        filename,
    })
}

/// Media extension whose file (or parent directory) name cannot be carried
/// into the menu verbatim.
fn is_unnamed_media(path: &Path) -> bool {
    let media = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| ext == "mp4" || ext == "vtt");
    let utf8 = path.file_name().map_or(true, |n| n.to_str().is_some())
        && path
            .parent()
            .and_then(Path::file_name)
            .map_or(true, |n| n.to_str().is_some());
    media && !utf8
}

/// Walk `root` (sorted by file name, so the order is stable) and classify
/// every regular file. The first walk error aborts the whole scan.
pub fn walk(root: &Path) -> Result<Walk> {
    let root = std::fs::canonicalize(root).map_err(|e| Error::io(root, e))?;
    let mut records = vec![];
    let mut files_seen = 0usize;
    let mut warnings = vec![];

    for entry in WalkDir::new(&root).follow_links(true).sort_by_file_name() {
        let e = entry.map_err(|source| {
            let path = source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.clone());
            Error::Traversal { path, source }
        })?;
        if !e.file_type().is_file() {
            continue;
        }
        files_seen += 1;
        match classify(e.path()) {
            Some(rec) => records.push(rec),
            None if is_unnamed_media(e.path()) => warnings.push(format!(
                "skipping {}: name is not valid UTF-8",
                e.path().display()
            )),
            None => {}
        }
    }

    Ok(Walk {
        records,
        files_seen,
        warnings,
    })
}

/// Reduce traversal records into the grouping. The first file to claim a
/// `(category, base id, role)` slot keeps it; later ones become warnings.
pub fn fold<I>(records: I) -> (Grouping, Vec<String>)
where
    I: IntoIterator<Item = FileRecord>,
{
    records.into_iter().fold(
        (Grouping::new(), Vec::new()),
        |(mut grouping, mut warnings), rec| {
            if RESERVED_KEYS.contains(&rec.category.as_str()) {
                warnings.push(format!(
                    "skipping {}: category `{}` is a reserved screen key",
                    display_path(&rec),
                    rec.category
                ));
                return (grouping, warnings);
            }

            let slots = grouping
                .entry(rec.category.clone())
                .or_default()
                .entry(rec.base_id.clone())
                .or_default();
            match slots.entry(rec.role) {
                Entry::Vacant(slot) => {
                    slot.insert(rec.filename);
                }
                Entry::Occupied(slot) => {
                    warnings.push(format!(
                        "skipping {}: {} of `{}` already taken by {}",
                        display_path(&rec),
                        rec.role.as_str(),
                        rec.base_id,
                        slot.get()
                    ));
                }
            }
            (grouping, warnings)
        },
    )
}

pub fn scan(root: &Path) -> Result<ScanOutcome> {
    let Walk {
        records,
        files_seen,
        mut warnings,
    } = walk(root)?;
    let classified = records.len();
    let (grouping, fold_warnings) = fold(records);
    warnings.extend(fold_warnings);

    Ok(ScanOutcome {
        grouping,
        files_seen,
        classified,
        ignored: files_seen - classified,
        warnings,
    })
}

fn display_path(rec: &FileRecord) -> String {
    format!("{}/{}", rec.category, rec.filename)
}
