//! Directory CSV: every FOI-subject body, filtered down to universities.

use thiserror::Error;

/// Substring of a body's code that marks it as a university.
pub const UNIVERSITY_MARKER: &str = "university";

const NAME_COLUMN: usize = 0;
const CODE_COLUMN: usize = 2;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: expected at least 3 columns, found {columns}")]
    ShortRow { line: u64, columns: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Organisation {
    pub name: String,
    /// Opaque WDTK identifier (the body's URL name).
    pub code: String,
}

impl Organisation {
    /// Case-sensitive, as the directory's codes are lower-case.
    pub fn is_university(&self) -> bool {
        self.code.contains(UNIVERSITY_MARKER)
    }
}

/// Parse every row of the directory. No header row is assumed; rows may have
/// differing widths but need at least the name and code columns. A blank line
/// is a row with no columns and ends the walk with `ShortRow`.
pub fn organisations(
    csv_text: &str,
) -> impl Iterator<Item = Result<Organisation, DirectoryError>> + '_ {
    let records = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(csv_text.as_bytes())
        .into_records();
    Organisations {
        records,
        blank_line: first_blank_line(csv_text),
        done: false,
    }
}

/// The csv reader drops empty lines, so they are located up front and
/// reported in order with the records around them.
struct Organisations<'a> {
    records: csv::StringRecordsIntoIter<&'a [u8]>,
    blank_line: Option<u64>,
    done: bool,
}

impl Iterator for Organisations<'_> {
    type Item = Result<Organisation, DirectoryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = match self.records.next() {
            Some(Ok(record)) => {
                let line = record.position().map_or(0, |pos| pos.line());
                match self.blank_line {
                    Some(blank) if blank < line => Err(short_row(blank, 0)),
                    _ => organisation(&record, line),
                }
            }
            Some(Err(e)) => Err(e.into()),
            None => Err(short_row(self.blank_line.take()?, 0)),
        };
        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }
}

fn organisation(record: &csv::StringRecord, line: u64) -> Result<Organisation, DirectoryError> {
    match (record.get(NAME_COLUMN), record.get(CODE_COLUMN)) {
        (Some(name), Some(code)) => Ok(Organisation {
            name: name.to_string(),
            code: code.to_string(),
        }),
        _ => Err(short_row(line, record.len())),
    }
}

fn short_row(line: u64, columns: usize) -> DirectoryError {
    DirectoryError::ShortRow { line, columns }
}

/// 1-based line of the first empty line outside a quoted field.
fn first_blank_line(text: &str) -> Option<u64> {
    let mut line = 1u64;
    let mut in_quotes = false;
    let mut at_line_start = true;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => in_quotes = !in_quotes,
            '\n' if !in_quotes && at_line_start => return Some(line),
            '\r' if !in_quotes && at_line_start && chars.peek() == Some(&'\n') => {
                return Some(line);
            }
            '\n' => {
                line += 1;
                at_line_start = true;
                continue;
            }
            _ => {}
        }
        at_line_start = false;
    }
    None
}

/// Lazily yield the universities in the directory. Errors pass through so the
/// caller stops at the first bad row.
pub fn universities(
    csv_text: &str,
) -> impl Iterator<Item = Result<Organisation, DirectoryError>> + '_ {
    organisations(csv_text).filter(|row| match row {
        Ok(org) => org.is_university(),
        Err(_) => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<Organisation> {
        universities(text).collect::<Result<_, _>>().unwrap()
    }

    #[test]
    fn keeps_only_university_codes() {
        let text = "Example Uni,1,university-of-example\nExample Council,2,local-council\n";
        let orgs = collect(text);
        assert_eq!(
            orgs,
            vec![Organisation {
                name: "Example Uni".into(),
                code: "university-of-example".into(),
            }]
        );
    }

    #[test]
    fn first_row_is_data() {
        let text = "Name Uni,x,university_a\nOther,y,university_b\n";
        assert_eq!(collect(text).len(), 2);
    }

    #[test]
    fn directory_header_row_is_dropped_by_filter() {
        let text = "Name,Short name,URL name,Tags\n\
                    University of Example,UoE,university_of_example,university\n";
        let orgs = collect(text);
        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs[0].code, "university_of_example");
    }

    #[test]
    fn match_is_case_sensitive() {
        let text = "Loud Uni,,UNIVERSITY_OF_CAPS\n";
        assert!(collect(text).is_empty());
    }

    #[test]
    fn substring_anywhere_in_code() {
        let text = "Bath,,bath_university\nOpen,,open_university_scotland\n";
        assert_eq!(collect(text).len(), 2);
    }

    #[test]
    fn name_column_does_not_matter() {
        let text = "University of Nowhere,,nowhere_college\n";
        assert!(collect(text).is_empty());
    }

    #[test]
    fn quoted_fields_with_commas() {
        let text = "\"University of London, Birkbeck\",BBK,university_of_london_birkbeck,\"a,b\"\n";
        let orgs = collect(text);
        assert_eq!(orgs[0].name, "University of London, Birkbeck");
        assert_eq!(orgs[0].code, "university_of_london_birkbeck");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let text = "Uni,u,university_u,tag1 tag2,https://example.org,more\n";
        assert_eq!(collect(text)[0].code, "university_u");
    }

    #[test]
    fn short_row_is_fatal() {
        let text = "Fine,,university_fine\nBroken,only-two\nLater,,university_later\n";
        let results: Vec<_> = universities(text).collect();
        assert!(results[0].is_ok());
        match &results[1] {
            Err(DirectoryError::ShortRow { line, columns }) => {
                assert_eq!(*line, 2);
                assert_eq!(*columns, 2);
            }
            other => panic!("expected short row, got {other:?}"),
        }
    }

    #[test]
    fn short_row_fails_even_when_not_a_university() {
        let text = "Only one column\n";
        let first = universities(text).next();
        assert!(matches!(first, Some(Err(DirectoryError::ShortRow { .. }))));
    }

    #[test]
    fn empty_directory_yields_nothing() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn organisations_returns_every_row() {
        let text = "A,,university_a\nB,,council_b\n";
        let all: Vec<_> = organisations(text).collect::<Result<_, _>>().unwrap();
        assert_eq!(all.len(), 2);
        assert!(!all[1].is_university());
    }

    #[test]
    fn blank_line_is_a_short_row() {
        let text = "A,,university_a\n\nB,,university_b\n";
        let results: Vec<_> = universities(text).collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().code, "university_a");
        match &results[1] {
            Err(DirectoryError::ShortRow { line, columns }) => {
                assert_eq!(*line, 2);
                assert_eq!(*columns, 0);
            }
            other => panic!("expected short row, got {other:?}"),
        }
    }

    #[test]
    fn blank_crlf_line_is_a_short_row() {
        let text = "A,,university_a\r\n\r\nB,,university_b\r\n";
        let results: Vec<_> = universities(text).collect();
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(DirectoryError::ShortRow { line: 2, columns: 0 })
        ));
    }

    #[test]
    fn trailing_blank_line_is_a_short_row() {
        let text = "A,,university_a\n\n";
        let results: Vec<_> = universities(text).collect();
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(DirectoryError::ShortRow { line: 2, columns: 0 })
        ));
    }

    #[test]
    fn blank_line_inside_quotes_is_data() {
        let text = "\"Multi\n\nline\",,university_m\nB,,university_b\n";
        let orgs = collect(text);
        assert_eq!(orgs.len(), 2);
        assert_eq!(orgs[0].name, "Multi\n\nline");
    }

    #[test]
    fn final_newline_is_not_blank() {
        assert_eq!(first_blank_line("A,,university_a\n"), None);
        assert_eq!(first_blank_line("A,,university_a\r\n"), None);
        assert_eq!(first_blank_line("\n"), Some(1));
    }

    #[test]
    fn error_ends_the_walk() {
        let text = "Broken\nLater,,university_later\n";
        let results: Vec<_> = organisations(text).collect();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
