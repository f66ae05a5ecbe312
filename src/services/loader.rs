//! Document loading service
//!
//! Reads tables from JSON/YAML documents or CSV files and measures every cell
//! once with the supplied `TextMeasure`.

use crate::error::LoadError;
use crate::model::{Cell, Document, Table};
use crate::services::measure::TextMeasure;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Built-in document shown when no path is given
const SAMPLE_DOCUMENT: &str = include_str!("../../demos/clinical_trials.yaml");

/// Serialized form of a document
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentSource {
    #[serde(default)]
    pub title: Option<String>,
    /// Container markers; `None` means the page frame provides the default one
    #[serde(default)]
    pub containers: Option<Vec<String>>,
    #[serde(default)]
    pub tables: Vec<TableSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<CellSource>>,
}

/// A cell is plain text, a number, or a list rendered one item per line
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CellSource {
    Text(String),
    Number(serde_json::Number),
    Lines(Vec<String>),
}

impl CellSource {
    pub fn into_text(self) -> String {
        match self {
            CellSource::Text(text) => text,
            CellSource::Number(n) => n.to_string(),
            CellSource::Lines(lines) => lines
                .iter()
                .map(|line| format!("• {}", line))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Load every path into one document; the built-in sample if `paths` is empty
pub fn load_document(
    paths: &[PathBuf],
    default_container: &str,
    measure: &dyn TextMeasure,
) -> Result<Document, LoadError> {
    if paths.is_empty() {
        return sample_document(default_container, measure);
    }

    let mut doc = Document::default();
    for path in paths {
        let source = read_source(path)?;
        merge_source(&mut doc, source, default_container, measure, &file_stem(path));
    }
    Ok(doc)
}

/// The clinical-trial phases page
pub fn sample_document(
    default_container: &str,
    measure: &dyn TextMeasure,
) -> Result<Document, LoadError> {
    let source: DocumentSource = serde_yaml::from_str(SAMPLE_DOCUMENT)
        .map_err(|e| LoadError::parse("<sample>", e))?;
    let mut doc = Document::default();
    merge_source(&mut doc, source, default_container, measure, "sample");
    Ok(doc)
}

fn read_source(path: &Path) -> Result<DocumentSource, LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    if !matches!(extension.as_deref(), Some("json" | "yaml" | "yml" | "csv")) {
        return Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match extension.as_deref() {
        Some("json") => serde_json::from_str(&contents).map_err(|e| LoadError::parse(path, e)),
        Some("csv") => parse_csv(&contents, path),
        _ => serde_yaml::from_str(&contents).map_err(|e| LoadError::parse(path, e)),
    }
}

/// Parse CSV text: the first record is the header row
pub fn parse_csv(contents: &str, path: &Path) -> Result<DocumentSource, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(contents.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::parse(path, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| LoadError::parse(path, e))?;
        rows.push(
            record
                .iter()
                .map(|field| CellSource::Text(field.trim().to_string()))
                .collect(),
        );
    }

    Ok(DocumentSource {
        title: None,
        containers: None,
        tables: vec![TableSource {
            id: Some(file_stem(path)),
            caption: Some(file_stem(path)),
            headers,
            rows,
        }],
    })
}

fn merge_source(
    doc: &mut Document,
    source: DocumentSource,
    default_container: &str,
    measure: &dyn TextMeasure,
    fallback_id: &str,
) {
    if doc.title.is_none() {
        doc.title = source.title;
    }

    let containers = source
        .containers
        .unwrap_or_else(|| vec![default_container.to_string()]);
    for marker in containers {
        if !doc.has_container(&marker) {
            doc.containers.push(marker);
        }
    }

    let single = source.tables.len() == 1;
    for (idx, table) in source.tables.into_iter().enumerate() {
        let id = table.id.unwrap_or_else(|| {
            if single {
                fallback_id.to_string()
            } else {
                format!("{}-{}", fallback_id, idx + 1)
            }
        });
        doc.tables.push(build_table(id, table.caption, table.headers, table.rows, measure));
    }
}

fn build_table(
    id: String,
    caption: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<CellSource>>,
    measure: &dyn TextMeasure,
) -> Table {
    let measured = |text: String| {
        let width = measure.measure(&text);
        Cell::new(text, width)
    };

    let headers = headers.into_iter().map(measured).collect();
    let rows = rows
        .into_iter()
        .map(|row| row.into_iter().map(|c| measured(c.into_text())).collect())
        .collect();

    let table = Table::new(id, headers, rows);
    match caption {
        Some(caption) => table.with_caption(caption),
        None => table,
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "table".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::measure::CellMeasure;

    const MARKER: &str = "table-sizer-controls";

    #[test]
    fn test_sample_document_parses() {
        let doc = sample_document(MARKER, &CellMeasure::new(8)).expect("sample should parse");

        assert_eq!(doc.title.as_deref(), Some("Clinical Trial Phases"));
        assert_eq!(doc.tables.len(), 1);
        let table = &doc.tables[0];
        assert_eq!(table.id, "phases");
        assert_eq!(table.column_count(), 5);
        assert_eq!(table.rows.len(), 5);
        assert!(table.mismatched_rows().next().is_none());
        assert!(doc.has_container(MARKER));
        // Objectives render as bullet lines
        assert!(table.rows[0][4].text.starts_with("• Expedite"));
        assert_eq!(table.headers[0].cell.content_width, 5 * 8);
    }

    #[test]
    fn test_json_document_without_containers_gets_default() {
        let source: DocumentSource = serde_json::from_str(
            r#"{ "tables": [ { "headers": ["a", "b"], "rows": [["x", 1.5], ["y", ["p", "q"]]] } ] }"#,
        )
        .expect("json should parse");

        let mut doc = Document::default();
        merge_source(&mut doc, source, MARKER, &CellMeasure::new(1), "doc");

        assert!(doc.has_container(MARKER));
        assert_eq!(doc.tables[0].id, "doc");
        assert_eq!(doc.tables[0].rows[0][1].text, "1.5");
        assert_eq!(doc.tables[0].rows[1][1].text, "• p\n• q");
        assert_eq!(doc.tables[0].rows[1][1].content_width, 3);
    }

    #[test]
    fn test_explicit_empty_containers_are_kept_empty() {
        let source: DocumentSource = serde_yaml::from_str(
            "containers: []\ntables:\n  - headers: [a]\n  - headers: [b]\n",
        )
        .expect("yaml should parse");

        let mut doc = Document::default();
        merge_source(&mut doc, source, MARKER, &CellMeasure::new(1), "page");

        assert!(doc.containers.is_empty());
        assert_eq!(doc.tables[0].id, "page-1");
        assert_eq!(doc.tables[1].id, "page-2");
    }

    #[test]
    fn test_parse_csv_keeps_ragged_rows() {
        let source = parse_csv("id,name\n1,Alice\n2\n", Path::new("people.csv"))
            .expect("csv should parse");

        let table = &source.tables[0];
        assert_eq!(table.id.as_deref(), Some("people"));
        assert_eq!(table.headers, vec!["id", "name"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].len(), 1);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = read_source(Path::new("notes.txt")).expect_err("txt is not a document");
        assert!(matches!(err, LoadError::UnsupportedFormat { .. }));

        let err = read_source(Path::new("missing.json")).expect_err("file does not exist");
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_load_demo_csv() {
        let path = PathBuf::from("demos/trial_sites.csv");
        if !path.exists() {
            return;
        }

        let doc = load_document(&[path], MARKER, &CellMeasure::new(8)).expect("demo csv loads");
        assert_eq!(doc.tables[0].id, "trial_sites");
        assert_eq!(doc.tables[0].column_count(), 5);
        assert!(doc.has_container(MARKER));
    }
}
