//! Loader - the two-stage dump import
//!
//! Stage order is fixed: every author line is parsed and saved before the
//! first work line is read, so work author names resolve against a complete
//! author table.
//!
//! Error tiers:
//! - record-local (bad JSON, missing work key, bad date): logged, line skipped
//! - stage-fatal (dump cannot be opened or read): logged, stage abandoned,
//!   the other stage still runs
//! - storage failures: propagated out of the loader

use std::fmt;
use std::path::{Path, PathBuf};
use serde::Serialize;
use crate::dump::DumpReader;
use crate::parser::{parse_author, parse_work};
use crate::repository::{AuthorRepository, BookRepository};
use crate::resolver::AuthorResolver;
use crate::{Error, Result};

/// One pass over one dump file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Authors,
    Works,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Authors => "authors",
            Stage::Works => "works",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Counters for a completed stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub path: PathBuf,
    /// Lines read, blank ones included
    pub lines: usize,
    pub saved: usize,
    pub skipped: usize,
}

impl StageReport {
    fn new(stage: Stage, path: &Path) -> Self {
        Self {
            stage,
            path: path.to_path_buf(),
            lines: 0,
            saved: 0,
            skipped: 0,
        }
    }
}

/// How a stage ended
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StageOutcome {
    Completed(StageReport),
    Failed { stage: Stage, path: PathBuf, error: String },
}

impl StageOutcome {
    pub fn stage(&self) -> Stage {
        match self {
            StageOutcome::Completed(report) => report.stage,
            StageOutcome::Failed { stage, .. } => *stage,
        }
    }

    pub fn report(&self) -> Option<&StageReport> {
        match self {
            StageOutcome::Completed(report) => Some(report),
            StageOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StageOutcome::Failed { .. })
    }
}

/// Outcome of a full load
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub authors: StageOutcome,
    pub works: StageOutcome,
}

/// Two-stage dump loader over an author and a book repository.
pub struct Loader<A: AuthorRepository, B: BookRepository> {
    authors: A,
    books: B,
}

impl<A: AuthorRepository, B: BookRepository> Loader<A, B> {
    pub fn new(authors: A, books: B) -> Self {
        Self { authors, books }
    }

    /// Load authors, then works.
    ///
    /// A dump that cannot be read only fails its own stage. Storage errors
    /// abort the load.
    pub fn run(&self, author_dump: &Path, work_dump: &Path) -> Result<LoadReport> {
        let authors = self.run_stage(Stage::Authors, author_dump)?;
        let works = self.run_stage(Stage::Works, work_dump)?;
        Ok(LoadReport { authors, works })
    }

    /// Run one stage, turning a stage-fatal I/O error into a failed outcome.
    pub fn run_stage(&self, stage: Stage, path: &Path) -> Result<StageOutcome> {
        let result = match stage {
            Stage::Authors => self.load_authors(path),
            Stage::Works => self.load_works(path),
        };

        match result {
            Ok(report) => {
                tracing::info!(
                    stage = %stage,
                    lines = report.lines,
                    saved = report.saved,
                    skipped = report.skipped,
                    "stage complete"
                );
                Ok(StageOutcome::Completed(report))
            }
            Err(Error::Io(e)) => {
                tracing::error!(stage = %stage, path = %path.display(), error = %e, "stage aborted");
                Ok(StageOutcome::Failed {
                    stage,
                    path: path.to_path_buf(),
                    error: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Parse and save every line of an author dump
    pub fn load_authors(&self, path: &Path) -> Result<StageReport> {
        self.drive(Stage::Authors, path, parse_author, |author| self.authors.save(&author))
    }

    /// Parse, resolve and save every line of a work dump
    pub fn load_works(&self, path: &Path) -> Result<StageReport> {
        let resolver = AuthorResolver::new(&self.authors);
        self.drive(Stage::Works, path, parse_work, |work| {
            let book = resolver.resolve(work)?;
            self.books.save(&book)
        })
    }

    /// Stage loop: per-line parse results are logged and skipped on error,
    /// persist and read errors end the stage.
    fn drive<T, P, S>(&self, stage: Stage, path: &Path, parse: P, mut persist: S) -> Result<StageReport>
    where
        P: Fn(&str) -> Result<T>,
        S: FnMut(T) -> Result<()>,
    {
        let reader = DumpReader::open(path)?;
        tracing::info!(stage = %stage, path = %reader.path().display(), "loading dump");

        let mut report = StageReport::new(stage, path);
        for (line_no, line) in reader.lines() {
            let line = line?;
            report.lines += 1;

            if line.trim().is_empty() {
                tracing::debug!(stage = %stage, line = line_no, "skipping blank line");
                continue;
            }

            match parse(&line) {
                Ok(record) => {
                    persist(record)?;
                    report.saved += 1;
                }
                Err(e) if e.is_record_local() => {
                    tracing::warn!(stage = %stage, line = line_no, error = %e, "skipping unparsable line");
                    report.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Author, UNKNOWN_AUTHOR};
    use crate::storage::SqliteStore;
    use chrono::NaiveDate;
    use std::io::Write;

    const AUTHOR_DUMP: &str = concat!(
        "/type/author\t/authors/OL1A\t1\t2008-04-01T03:28:50.625462\t{\"key\": \"/authors/OL1A\", \"name\": \"Mark Twain\"}\n",
        "/type/author\t/authors/OL2A\t2\t2008-04-01T03:28:50.625462\t{\"key\": \"/authors/OL2A\", \"name\": \"Jane Austen\", \"personal_name\": \"Austen, Jane\"}\n",
        "garbage line without payload\n",
        "/type/author\t/authors/OL3A\t1\t2008-04-01T03:28:50.625462\t{\"key\": \"/authors/OL3A\", \n",
        "\n",
        "/type/author\t/authors/OL4A\t1\t2008-04-01T03:28:50.625462\t{\"key\": \"/authors/OL4A\", \"name\": \"Leo Tolstoy\"}\n",
    );

    const WORK_DUMP: &str = concat!(
        "/type/work\t/works/OL1W\t2\t2009-12-11T01:57:19.964652\t{\"key\": \"/works/OL1W\", \"title\": \"Roughing It\", \"authors\": [{\"author\": {\"key\": \"/authors/OL1A\"}}], \"created\": {\"type\": \"/type/datetime\", \"value\": \"2006-07-19T00:00:00.000000\"}}\n",
        "/type/work\t/works/OL2W\t1\t2009-12-11T01:57:19.964652\t{\"key\": \"/works/OL2W\", \"title\": \"Collected Letters\", \"authors\": [{\"author\": {\"key\": \"/authors/OL2A\"}}, {\"author\": {\"key\": \"/authors/OL99A\"}}]}\n",
        "/type/work\t/works/OL3W\t1\t2009-12-11T01:57:19.964652\t{\"title\": \"No Key\"}\n",
        "/type/work\t/works/OL4W\t1\t2009-12-11T01:57:19.964652\t{\"key\": \"/works/OL4W\", \"created\": {\"value\": \"19 July 2006\"}}\n",
        "/type/work\t/works/OL5W\t1\t2009-12-11T01:57:19.964652\t{\"key\": \"/works/OL5W\", \"title\": \"Untitled Notes\", \"covers\": [8739161]}\n",
    );

    fn dump_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_authors_skips_bad_lines() {
        let store = SqliteStore::open_in_memory().unwrap();
        let loader = Loader::new(&store, &store);
        let dump = dump_file(AUTHOR_DUMP);

        let report = loader.load_authors(dump.path()).unwrap();

        assert_eq!(report.lines, 6);
        assert_eq!(report.saved, 3);
        assert_eq!(report.skipped, 2);
        assert_eq!(
            store.get_author("OL1A").unwrap(),
            Some(Author::new("OL1A", "Mark Twain", ""))
        );
        assert_eq!(store.get_author("OL2A").unwrap().unwrap().personal_name, "Austen, Jane");
        assert!(store.get_author("OL3A").unwrap().is_none());
        assert!(store.get_author("OL4A").unwrap().is_some());
    }

    #[test]
    fn test_full_load_resolves_authors() {
        let store = SqliteStore::open_in_memory().unwrap();
        let loader = Loader::new(&store, &store);
        let authors = dump_file(AUTHOR_DUMP);
        let works = dump_file(WORK_DUMP);

        let report = loader.run(authors.path(), works.path()).unwrap();
        let works_report = report.works.report().unwrap();
        assert_eq!(works_report.saved, 3);
        assert_eq!(works_report.skipped, 2);

        let roughing_it = store.get_book("OL1W").unwrap().unwrap();
        assert_eq!(roughing_it.name, "Roughing It");
        assert_eq!(roughing_it.author_ids, Some(vec!["OL1A".to_string()]));
        assert_eq!(roughing_it.author_names, Some(vec!["Mark Twain".to_string()]));
        assert_eq!(roughing_it.published_date, NaiveDate::from_ymd_opt(2006, 7, 19));

        let letters = store.get_book("OL2W").unwrap().unwrap();
        assert_eq!(
            letters.author_names,
            Some(vec!["Jane Austen".to_string(), UNKNOWN_AUTHOR.to_string()])
        );

        let notes = store.get_book("OL5W").unwrap().unwrap();
        assert!(notes.author_ids.is_none());
        assert!(notes.author_names.is_none());
        assert_eq!(notes.cover_ids, Some(vec!["8739161".to_string()]));

        assert!(store.get_book("OL4W").unwrap().is_none());
        assert_eq!(store.count_books().unwrap(), 3);
    }

    #[test]
    fn test_missing_author_dump_still_loads_works() {
        let store = SqliteStore::open_in_memory().unwrap();
        let loader = Loader::new(&store, &store);
        let dir = tempfile::tempdir().unwrap();
        let works = dump_file(WORK_DUMP);

        let report = loader.run(&dir.path().join("missing_authors.txt"), works.path()).unwrap();

        assert!(report.authors.is_failed());
        assert_eq!(report.authors.stage(), Stage::Authors);
        assert!(!report.works.is_failed());

        let roughing_it = store.get_book("OL1W").unwrap().unwrap();
        assert_eq!(roughing_it.author_names, Some(vec![UNKNOWN_AUTHOR.to_string()]));
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let store = SqliteStore::open_in_memory().unwrap();
        let loader = Loader::new(&store, &store);
        let authors = dump_file(AUTHOR_DUMP);
        let works = dump_file(WORK_DUMP);

        loader.run(authors.path(), works.path()).unwrap();
        let first_stats = (store.count_authors().unwrap(), store.count_books().unwrap());
        let first_book = store.get_book("OL2W").unwrap();

        loader.run(authors.path(), works.path()).unwrap();
        assert_eq!((store.count_authors().unwrap(), store.count_books().unwrap()), first_stats);
        assert_eq!(store.get_book("OL2W").unwrap(), first_book);
    }

    #[test]
    fn test_later_lines_overwrite_earlier() {
        let store = SqliteStore::open_in_memory().unwrap();
        let loader = Loader::new(&store, &store);
        let dump = dump_file(concat!(
            "a\t{\"key\": \"/authors/OL1A\", \"name\": \"S. Clemens\"}\n",
            "a\t{\"key\": \"/authors/OL1A\", \"name\": \"Mark Twain\"}\n",
        ));

        let report = loader.load_authors(dump.path()).unwrap();
        assert_eq!(report.saved, 2);
        assert_eq!(store.count_authors().unwrap(), 1);
        assert_eq!(store.get_author("OL1A").unwrap().unwrap().name, "Mark Twain");
    }

    #[test]
    fn test_load_missing_dump_is_io_error() {
        let store = SqliteStore::open_in_memory().unwrap();
        let loader = Loader::new(&store, &store);
        let dir = tempfile::tempdir().unwrap();

        let result = loader.load_works(&dir.path().join("nope.txt"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_invalid_utf8_aborts_only_its_stage() {
        let store = SqliteStore::open_in_memory().unwrap();
        let loader = Loader::new(&store, &store);

        let mut authors = tempfile::NamedTempFile::new().unwrap();
        authors
            .write_all(b"a\t{\"key\": \"/authors/OL1A\", \"name\": \"Mark Twain\"}\n")
            .unwrap();
        authors.write_all(b"a\t{\"key\": \"/authors/OL2A\", \"name\": \"\xff\xfe\"}\n").unwrap();
        authors
            .write_all(b"a\t{\"key\": \"/authors/OL3A\", \"name\": \"Leo Tolstoy\"}\n")
            .unwrap();
        let works = dump_file(WORK_DUMP);

        let report = loader.run(authors.path(), works.path()).unwrap();

        assert!(report.authors.is_failed());
        assert!(store.get_author("OL1A").unwrap().is_some());
        assert!(store.get_author("OL3A").unwrap().is_none());

        assert!(!report.works.is_failed());
        assert_eq!(report.works.report().unwrap().saved, 3);
        let roughing_it = store.get_book("OL1W").unwrap().unwrap();
        assert_eq!(roughing_it.author_names, Some(vec!["Mark Twain".to_string()]));
    }

    struct BrokenAuthors;

    impl AuthorRepository for BrokenAuthors {
        fn save(&self, _author: &Author) -> Result<()> {
            Err(Error::Storage(rusqlite::Error::InvalidQuery))
        }

        fn find_by_id(&self, _id: &str) -> Result<Option<Author>> {
            Ok(None)
        }
    }

    #[test]
    fn test_storage_error_aborts_load() {
        let store = SqliteStore::open_in_memory().unwrap();
        let loader = Loader::new(BrokenAuthors, &store);
        let authors = dump_file(AUTHOR_DUMP);
        let works = dump_file(WORK_DUMP);

        let result = loader.run(authors.path(), works.path());

        assert!(matches!(result, Err(Error::Storage(_))));
        assert_eq!(store.count_books().unwrap(), 0);
    }
}
