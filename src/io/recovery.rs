use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// The log is trimmed so an append never leaves it larger than this (1 MB).
const MAX_LOG_SIZE: u64 = 1_048_576;

/// Entries older than this are dropped when the log is trimmed or pruned.
pub const PRUNE_AGE_DAYS: i64 = 30;

/// Header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- camo recovery log: append-only diagnostics
     Progress that could not be saved, files that could not be parsed,
     and toggles that matched nothing end up here.
     View with: camo recovery
     Prune old entries: camo recovery prune
     Safe to delete. -->

---
";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// A state or seed file could not be parsed
    Parser,
    /// The state file could not be written
    Write,
    /// A toggle named an entry that does not exist
    Lookup,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Parser => write!(f, "parser"),
            RecoveryCategory::Write => write!(f, "write"),
            RecoveryCategory::Lookup => write!(f, "lookup"),
        }
    }
}

impl RecoveryCategory {
    pub fn parse_category(s: &str) -> Option<Self> {
        match s {
            "parser" => Some(RecoveryCategory::Parser),
            "write" => Some(RecoveryCategory::Write),
            "lookup" => Some(RecoveryCategory::Lookup),
            _ => None,
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

impl RecoveryEntry {
    /// New entry stamped with the current time
    pub fn now(category: RecoveryCategory, description: impl Into<String>) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            description: description.into(),
            fields: Vec::new(),
            body: String::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.fields.push((key.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

/// Return the path to the recovery log file.
pub fn recovery_log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(".recovery.log")
}

// ---------------------------------------------------------------------------
// Atomic file write
// ---------------------------------------------------------------------------

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry formatting
// ---------------------------------------------------------------------------

impl RecoveryEntry {
    /// Format this entry as a markdown block for the recovery log.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "## {} [{}] {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        out.push('\n');

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            out.push('\n');
            out.push_str("```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }

        out.push('\n');
        out.push_str("---\n");
        out
    }

    /// Serialize to a JSON value for `camo recovery --json`.
    pub fn to_json(&self) -> serde_json::Value {
        let fields: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();

        serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            "category": self.category.to_string(),
            "description": self.description,
            "fields": fields,
            "body": self.body,
        })
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Append a recovery entry to the log. Nothing is printed on failure; the
/// caller decides how to surface the error.
///
/// When the append would push the log past [`MAX_LOG_SIZE`], entries older
/// than [`PRUNE_AGE_DAYS`] are dropped first, then the oldest of the rest.
pub fn log_recovery(data_dir: &Path, entry: RecoveryEntry) -> io::Result<()> {
    let path = recovery_log_path(data_dir);
    let block = entry.to_markdown();

    if let Ok(meta) = std::fs::metadata(&path)
        && meta.len() + block.len() as u64 > MAX_LOG_SIZE
    {
        let content = std::fs::read_to_string(&path)?;
        let budget = (MAX_LOG_SIZE as usize).saturating_sub(block.len());
        atomic_write(&path, trim_to(&content, budget).as_bytes())?;
    }

    let needs_header = std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(block.as_bytes())?;

    Ok(())
}

/// Shrink the log to at most `budget` bytes: stale entries go first, then
/// the oldest remaining ones. The file header is always kept.
fn trim_to(content: &str, budget: usize) -> String {
    let (header, chunks) = split_log(content);
    let cutoff = default_cutoff();
    let recent: Vec<&str> = chunks
        .into_iter()
        .filter(|chunk| parse_entry(chunk).is_none_or(|e| e.timestamp >= cutoff))
        .collect();

    let mut size = header.len() + recent.iter().map(|c| c.len()).sum::<usize>();
    let mut first = 0;
    while size > budget && first < recent.len() {
        size -= recent[first].len();
        first += 1;
    }

    let mut kept = header.to_string();
    for chunk in &recent[first..] {
        kept.push_str(chunk);
    }
    kept
}

fn default_cutoff() -> DateTime<Utc> {
    Utc::now() - chrono::Duration::days(PRUNE_AGE_DAYS)
}

// ---------------------------------------------------------------------------
// Reading entries
// ---------------------------------------------------------------------------

/// Read recovery entries, most recent first.
pub fn read_recovery_entries(data_dir: &Path, limit: Option<usize>) -> Vec<RecoveryEntry> {
    let Ok(content) = std::fs::read_to_string(recovery_log_path(data_dir)) else {
        return Vec::new();
    };
    let (_, chunks) = split_log(&content);
    chunks
        .into_iter()
        .rev()
        .filter_map(parse_entry)
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Split raw log content into the file header and one chunk per entry. A
/// chunk runs from its `## ` header line up to the next one; header-like
/// lines inside a fenced body do not start a chunk.
fn split_log(content: &str) -> (&str, Vec<&str>) {
    let mut starts = Vec::new();
    let mut in_code_block = false;
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let bare = line.trim_end_matches(['\n', '\r']);
        if bare.starts_with("```") {
            in_code_block = !in_code_block;
        } else if !in_code_block
            && let Some(header) = bare.strip_prefix("## ")
            && parse_entry_header(header).is_some()
        {
            starts.push(offset);
        }
        offset += line.len();
    }

    let header_end = starts.first().copied().unwrap_or(content.len());
    let chunks = starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(content.len());
            &content[start..end]
        })
        .collect();
    (&content[..header_end], chunks)
}

/// Parse one chunk produced by [`split_log`].
fn parse_entry(chunk: &str) -> Option<RecoveryEntry> {
    let mut lines = chunk.lines();
    let header = lines.next()?.strip_prefix("## ")?;
    let (timestamp, category, description) = parse_entry_header(header)?;

    let mut fields = Vec::new();
    let mut body: Vec<&str> = Vec::new();
    let mut in_code_block = false;
    for line in lines {
        if in_code_block {
            if line == "```" {
                in_code_block = false;
            } else {
                body.push(line);
            }
        } else if line.starts_with("```") {
            in_code_block = true;
        } else if line == "---" {
            break;
        } else if let Some((key, value)) = line.trim().split_once(": ") {
            fields.push((key.to_string(), value.to_string()));
        }
    }

    Some(RecoveryEntry {
        timestamp,
        category,
        description,
        fields,
        body: body.join("\n"),
    })
}

/// Parse an entry header: `<timestamp> [<category>] <description>`
fn parse_entry_header(header: &str) -> Option<(DateTime<Utc>, RecoveryCategory, String)> {
    let (timestamp, rest) = header.split_once(" [")?;
    let (category, description) = rest.split_once("] ")?;
    let timestamp = DateTime::parse_from_rfc3339(timestamp)
        .ok()?
        .with_timezone(&Utc);
    let category = RecoveryCategory::parse_category(category)?;
    Some((timestamp, category, description.to_string()))
}

// ---------------------------------------------------------------------------
// Pruning
// ---------------------------------------------------------------------------

/// Prune entries older than `before` (default: 30 days ago), or all of them.
/// Returns the number of entries removed.
pub fn prune_recovery(
    data_dir: &Path,
    before: Option<DateTime<Utc>>,
    all: bool,
) -> io::Result<usize> {
    let path = recovery_log_path(data_dir);
    if !path.exists() {
        return Ok(0);
    }
    let content = std::fs::read_to_string(&path)?;

    if all {
        let (_, chunks) = split_log(&content);
        atomic_write(&path, FILE_HEADER.as_bytes())?;
        return Ok(chunks.len());
    }

    let (kept, removed) = retain_since(&content, before.unwrap_or_else(default_cutoff));
    if removed > 0 {
        atomic_write(&path, kept.as_bytes())?;
    }
    Ok(removed)
}

/// The log with entries older than `cutoff` dropped, and how many were dropped.
fn retain_since(content: &str, cutoff: DateTime<Utc>) -> (String, usize) {
    let (header, chunks) = split_log(content);
    let mut kept = header.to_string();
    let mut removed = 0;
    for chunk in chunks {
        match parse_entry(chunk) {
            Some(entry) if entry.timestamp < cutoff => removed += 1,
            _ => kept.push_str(chunk),
        }
    }
    (kept, removed)
}
