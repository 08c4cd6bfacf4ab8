use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Terminator, Trim};
use log::debug;
use std::{cell::RefCell, fs::File, io::Read, path::Path};

use crate::{
    core::item::{ItemReader, ItemReaderResult},
    error::BatchError,
    item::row::Row,
};

/// A CSV item reader that turns every record into a [`Row`] keyed by the header.
///
/// The first record of the source is always the header. Records may have a
/// different number of fields than the header:
/// - a shorter record yields a row without the trailing columns
/// - fields beyond the header are dropped
///
/// # Implementation Details
///
/// - Uses a `RefCell` to provide interior mutability for the CSV record iterator
/// - Reads one record per call, so the whole file is never held in memory
/// - Parsing and UTF-8 errors are returned as `BatchError::ItemReader`
///
/// # Examples
///
/// ```
/// use csv_email_hash::item::csv::csv_reader::CsvItemReaderBuilder;
/// use csv_email_hash::core::item::ItemReader;
///
/// let data = "\
/// name,email
/// Alice,alice@example.com
/// Bob
/// ";
///
/// let reader = CsvItemReaderBuilder::new()
///     .from_reader(data.as_bytes())
///     .unwrap();
///
/// let alice = reader.read().unwrap().unwrap();
/// assert_eq!(alice.get("email"), Some("alice@example.com"));
///
/// let bob = reader.read().unwrap().unwrap();
/// assert_eq!(bob.get("name"), Some("Bob"));
/// assert_eq!(bob.get("email"), None);
///
/// assert!(reader.read().unwrap().is_none());
/// ```
pub struct CsvItemReader<R> {
    /// Column names taken from the first record
    headers: StringRecord,
    /// Iterator over the data records
    records: RefCell<StringRecordsIntoIter<R>>,
}

impl<R> CsvItemReader<R> {
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    fn to_row(&self, record: &StringRecord) -> Row {
        if record.len() > self.headers.len() {
            debug!(
                "Ignoring {} extra field(s) on line {}",
                record.len() - self.headers.len(),
                record.position().map_or(0, |position| position.line())
            );
        }

        self.headers.iter().zip(record.iter()).collect()
    }
}

impl<R: Read> ItemReader<Row> for CsvItemReader<R> {
    /// Reads the next record from the CSV source.
    ///
    /// # Returns
    /// - `Ok(Some(row))` if a record is successfully read
    /// - `Ok(None)` if there are no more records to read
    /// - `Err(BatchError::ItemReader(error))` if the record cannot be parsed or decoded
    fn read(&self) -> ItemReaderResult<Row> {
        match self.records.borrow_mut().next() {
            Some(Ok(record)) => Ok(Some(self.to_row(&record))),
            Some(Err(error)) => Err(BatchError::ItemReader(error.to_string())),
            None => Ok(None),
        }
    }
}

/// A builder for configuring CSV item reading.
///
/// # Default Configuration
///
/// - Delimiter: comma (,)
/// - Terminator: CRLF, which accepts `\r`, `\n` and `\r\n`
/// - Trimming: none, values are read as they are
///
/// # Examples
///
/// ```
/// use csv_email_hash::item::csv::csv_reader::CsvItemReaderBuilder;
/// use csv::Terminator;
///
/// let reader = CsvItemReaderBuilder::new()
///     .delimiter(b';')
///     .terminator(Terminator::Any(b'\n'))
///     .from_reader("name;email\nAlice;a@b.com".as_bytes())
///     .unwrap();
///
/// assert_eq!(reader.headers().collect::<Vec<_>>(), vec!["name", "email"]);
/// ```
pub struct CsvItemReaderBuilder {
    /// The delimiter character (default: comma ',')
    delimiter: u8,
    /// The line terminator (default: CRLF)
    terminator: Terminator,
    /// Whitespace trimming applied to headers and fields (default: none)
    trim: Trim,
}

impl Default for CsvItemReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvItemReaderBuilder {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            terminator: Terminator::CRLF,
            trim: Trim::None,
        }
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn trim(mut self, trim: Trim) -> Self {
        self.trim = trim;
        self
    }

    fn csv_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .trim(self.trim)
            .delimiter(self.delimiter)
            .terminator(self.terminator)
            .has_headers(true)
            .flexible(true); // Rows of any width are mapped against the header
        builder
    }

    /// Creates a `CsvItemReader` from any source implementing `Read`.
    ///
    /// The header record is read immediately, so an undecodable header is
    /// reported here rather than on the first `read`. An empty source has an
    /// empty header and no rows.
    pub fn from_reader<R: Read>(self, rdr: R) -> Result<CsvItemReader<R>, BatchError> {
        Self::wrap_reader(self.csv_builder().from_reader(rdr))
    }

    /// Creates a `CsvItemReader` from a file path.
    ///
    /// # Errors
    /// Returns `BatchError::ItemReader` naming the path if the file cannot be
    /// opened or its header cannot be read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csv_email_hash::item::csv::csv_reader::CsvItemReaderBuilder;
    /// use csv_email_hash::core::item::ItemReader;
    ///
    /// let reader = CsvItemReaderBuilder::new().from_path("attendees.csv")?;
    ///
    /// while let Some(row) = reader.read()? {
    ///     println!("{}", row);
    /// }
    /// # Ok::<(), csv_email_hash::BatchError>(())
    /// ```
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<CsvItemReader<File>, BatchError> {
        let path = path.as_ref();
        let rdr = self.csv_builder().from_path(path).map_err(|error| {
            BatchError::ItemReader(format!("cannot open {}: {}", path.display(), error))
        })?;

        Self::wrap_reader(rdr).map_err(|error| match error {
            BatchError::ItemReader(message) => {
                BatchError::ItemReader(format!("{}: {}", path.display(), message))
            }
            other => other,
        })
    }

    fn wrap_reader<R: Read>(mut rdr: csv::Reader<R>) -> Result<CsvItemReader<R>, BatchError> {
        let headers = rdr
            .headers()
            .map_err(|error| BatchError::ItemReader(error.to_string()))?
            .clone();

        debug!("CSV header: {:?}", headers);

        Ok(CsvItemReader {
            headers,
            records: RefCell::new(rdr.into_records()),
        })
    }
}
