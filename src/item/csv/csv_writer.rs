use std::{
    cell::RefCell,
    fs::File,
    io::{self, Write},
    path::Path,
    result,
};

use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};
use log::debug;
use serde::Serialize;

use crate::{
    BatchError,
    core::item::{ItemWriter, ItemWriterResult},
};

/// A CSV item writer with a fixed header.
///
/// The header is written when the writer is opened, before any record, so a
/// step that processes no item still produces a file holding the header.
/// Records are serialized with Serde; fields containing the delimiter, a quote
/// or a line break are quoted.
pub struct CsvItemWriter<T: Write> {
    headers: Vec<String>,
    wrapper: RefCell<Writer<T>>,
}

impl<T: Write, O: Serialize> ItemWriter<O> for CsvItemWriter<T> {
    fn write(&self, items: &[O]) -> ItemWriterResult {
        let mut wtr = self.wrapper.borrow_mut();
        for item in items {
            wtr.serialize(item)
                .map_err(|error| BatchError::ItemWriter(error.to_string()))?;
        }
        Ok(())
    }

    /// Flush the contents of the internal buffer to the underlying writer.
    ///
    /// Note that this also flushes the underlying writer.
    fn flush(&self) -> ItemWriterResult {
        self.wrapper
            .borrow_mut()
            .flush()
            .map_err(|error| BatchError::ItemWriter(error.to_string()))
    }

    fn open(&self) -> ItemWriterResult {
        if self.headers.is_empty() {
            return Ok(());
        }

        debug!("Writing CSV header: {:?}", self.headers);
        self.wrapper
            .borrow_mut()
            .write_record(&self.headers)
            .map_err(|error| BatchError::ItemWriter(error.to_string()))
    }

    fn close(&self) -> ItemWriterResult {
        ItemWriter::<O>::flush(self)
    }
}

impl<T: Write> CsvItemWriter<T> {
    pub fn into_inner(self) -> result::Result<T, BatchError> {
        self.wrapper
            .into_inner()
            .into_inner()
            .map_err(|error| BatchError::ItemWriter(error.to_string()))
    }
}

pub struct CsvItemWriterBuilder {
    delimiter: u8,
    terminator: Terminator,
    headers: Vec<String>,
}

impl Default for CsvItemWriterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvItemWriterBuilder {
    pub fn new() -> CsvItemWriterBuilder {
        CsvItemWriterBuilder {
            delimiter: b',',
            terminator: Terminator::CRLF,
            headers: Vec::new(),
        }
    }

    pub fn delimiter(mut self, delimiter: u8) -> CsvItemWriterBuilder {
        self.delimiter = delimiter;
        self
    }

    /// Record terminator, `\r\n` unless set.
    pub fn terminator(mut self, terminator: Terminator) -> CsvItemWriterBuilder {
        self.terminator = terminator;
        self
    }

    /// Column names written as the first record. No header is written when empty.
    pub fn headers<S: Into<String>>(
        mut self,
        headers: impl IntoIterator<Item = S>,
    ) -> CsvItemWriterBuilder {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    fn csv_builder(&self) -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder
            .delimiter(self.delimiter)
            .terminator(self.terminator)
            .quote_style(QuoteStyle::Necessary)
            .has_headers(false) // The header comes from the builder, not from the serialized type
            .flexible(false);
        builder
    }

    /// Creates (or truncates) the file at `path` and writes to it.
    ///
    /// # Errors
    /// Returns `BatchError::ItemWriter` naming the path if the file cannot be created.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<CsvItemWriter<File>, BatchError> {
        let path = path.as_ref();
        let wtr = self.csv_builder().from_path(path).map_err(|error| {
            BatchError::ItemWriter(format!("cannot create {}: {}", path.display(), error))
        })?;

        Ok(CsvItemWriter {
            headers: self.headers,
            wrapper: RefCell::new(wtr),
        })
    }

    /// Writes to any sink implementing `Write`.
    ///
    /// ```
    /// # use std::error::Error;
    /// # use csv_email_hash::{item::csv::csv_writer::CsvItemWriterBuilder, core::item::ItemWriter};
    /// # use csv_email_hash::item::row::ProjectedRow;
    /// # fn main() { example().unwrap(); }
    /// fn example() -> Result<(), Box<dyn Error>> {
    ///     let wtr = CsvItemWriterBuilder::new()
    ///         .headers(["city", "email"])
    ///         .from_writer(vec![]);
    ///
    ///     let rows = vec![
    ///         ProjectedRow::new(vec![Some("Boston".to_string()), Some("abc".to_string())]),
    ///         ProjectedRow::new(vec![None, Some("def".to_string())]),
    ///     ];
    ///
    ///     ItemWriter::<ProjectedRow>::open(&wtr)?;
    ///     wtr.write(&rows)?;
    ///     ItemWriter::<ProjectedRow>::close(&wtr)?;
    ///
    ///     let data = String::from_utf8(wtr.into_inner()?)?;
    ///     assert_eq!(data, "city,email\r\nBoston,abc\r\n,def\r\n");
    ///     Ok(())
    /// }
    /// ```
    pub fn from_writer<W: io::Write>(self, wtr: W) -> CsvItemWriter<W> {
        let wtr = self.csv_builder().from_writer(wtr);

        CsvItemWriter {
            headers: self.headers,
            wrapper: RefCell::new(wtr),
        }
    }
}
