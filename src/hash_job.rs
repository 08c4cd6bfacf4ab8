use log::warn;

use crate::{
    BatchError,
    config::HashJobConfig,
    core::{
        job::{Job, JobBuilder, JobExecution},
        step::{SKIP_LOG_TARGET, StepBuilder, StepInstance},
    },
    item::{
        csv::{csv_reader::CsvItemReaderBuilder, csv_writer::CsvItemWriterBuilder},
        email::email_processor::EmailHashProcessor,
        row::{ProjectedRow, Row},
    },
};

/// Hashes the email column of `config.input_path` into `config.output_path`.
///
/// The input is opened before the output is created, so a missing input
/// leaves no output file behind. Both files are closed when this returns.
pub fn run_hash_job(config: &HashJobConfig) -> Result<JobExecution, BatchError> {
    config.validate()?;

    let processor = EmailHashProcessor::new(config.email_column.as_str(), &config.keep_columns);

    let reader = CsvItemReaderBuilder::new().from_path(&config.input_path)?;

    if !reader.headers().any(|header| header == config.email_column) {
        warn!(
            target: SKIP_LOG_TARGET,
            "Column '{}' is not in the header of {}, every row will be skipped",
            config.email_column,
            config.input_path.display()
        );
    }

    let writer = CsvItemWriterBuilder::new()
        .headers(processor.output_fields().to_vec())
        .from_path(&config.output_path)?;

    let step: StepInstance<Row, ProjectedRow> = StepBuilder::new()
        .name("hash-emails")
        .reader(&reader)
        .processor(&processor)
        .writer(&writer)
        .build_with_processor()?;

    let job = JobBuilder::new().name("email-hash").start(&step).build();

    job.run()
}
