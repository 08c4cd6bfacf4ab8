//! CSV support for reading and writing header-keyed rows.
//!
//! # Module Architecture
//!
//! 1. **CsvItemReader**: reads the header once, then yields one [`Row`](crate::item::row::Row)
//!    per record, keyed by column name. Records shorter than the header are accepted.
//!
//! 2. **CsvItemWriter**: writes a fixed header when opened, then serializes
//!    each item with Serde. Quoting follows the usual CSV rules.
//!
//! Both components follow the builder pattern for configuration and implement
//! the `ItemReader` / `ItemWriter` traits, so they plug into a step.
//!
//! # Ownership and Borrowing Considerations
//!
//! Writers borrow their destination and hold that borrow until dropped. To
//! read back a buffer after writing to it, call `into_inner` or let the writer
//! go out of scope first.
//!
//! # Example
//!
//! ```
//! use csv_email_hash::core::item::{ItemProcessor, ItemReader, ItemWriter, ProcessorOutcome};
//! use csv_email_hash::item::csv::{csv_reader::CsvItemReaderBuilder, csv_writer::CsvItemWriterBuilder};
//! use csv_email_hash::item::email::email_processor::EmailHashProcessor;
//! use csv_email_hash::item::row::ProjectedRow;
//!
//! let input = "name,email,city\nAlice,A@Test.COM ,NYC\n";
//!
//! let reader = CsvItemReaderBuilder::new().from_reader(input.as_bytes()).unwrap();
//! let processor = EmailHashProcessor::new("email", &["email".to_string(), "city".to_string()]);
//! let writer = CsvItemWriterBuilder::new()
//!     .headers(processor.output_fields().to_vec())
//!     .from_writer(vec![]);
//!
//! ItemWriter::<ProjectedRow>::open(&writer).unwrap();
//! while let Some(row) = reader.read().unwrap() {
//!     if let ProcessorOutcome::Retain(projected) = processor.process(&row).unwrap() {
//!         writer.write(&[projected]).unwrap();
//!     }
//! }
//!
//! let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
//! assert!(output.starts_with("city,email\r\nNYC,"));
//! ```

/// A module providing facilities for reading CSV data records.
pub mod csv_reader;

/// A module providing facilities for writing CSV data records.
pub mod csv_writer;
