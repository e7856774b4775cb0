//! Link list input
//!
//! The input is a CSV export whose third column holds the question page URL.
//! The first row is always treated as a header.

use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};
use url::Url;

/// Zero-based column holding the page link
pub const LINK_COLUMN: usize = 2;

/// Read the eligible page links from a CSV file
pub fn read_links(path: impl AsRef<Path>) -> Result<Vec<Url>, csv::Error> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    Ok(collect_links(reader))
}

/// Read the eligible page links from any CSV source
pub fn links_from_reader<R: Read>(source: R) -> Vec<Url> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);
    collect_links(reader)
}

fn collect_links<R: Read>(mut reader: csv::Reader<R>) -> Vec<Url> {
    let mut links = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(row = row + 1, "Skipping undecodable row: {}", e);
                continue;
            }
        };
        match record.get(LINK_COLUMN).and_then(parse_link) {
            Some(url) => links.push(url),
            None => debug!(row = row + 1, "Row has no usable link"),
        }
    }
    links
}

/// An absolute http(s) URL, or nothing
fn parse_link(field: &str) -> Option<Url> {
    let url = Url::parse(field.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LINKS_CSV: &str = "\
Topic,Question,Link
1,1,https://www.examtopics.com/discussions/google/view/1-exam/
1,2,not a link
1,3
1,4,/relative/path
1,5,\"https://www.examtopics.com/discussions/google/view/5-exam/\"
1,6,ftp://files.example.com/q6
";

    #[test]
    fn test_links_from_reader_filters_rows() {
        let links = links_from_reader(LINKS_CSV.as_bytes());
        let links: Vec<&str> = links.iter().map(Url::as_str).collect();
        assert_eq!(
            links,
            vec![
                "https://www.examtopics.com/discussions/google/view/1-exam/",
                "https://www.examtopics.com/discussions/google/view/5-exam/",
            ]
        );
    }

    #[test]
    fn test_header_row_is_always_skipped() {
        let csv = "a,b,https://example.com/header-looks-like-a-link\nx,y,https://example.com/q\n";
        let links = links_from_reader(csv.as_bytes());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].as_str(), "https://example.com/q");
    }

    #[test]
    fn test_read_links_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LINKS_CSV.as_bytes()).unwrap();

        let links = read_links(file.path()).unwrap();
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_read_links_missing_file() {
        assert!(read_links("/definitely/not/here.csv").is_err());
    }
}
