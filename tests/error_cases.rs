mod common;

use std::{fs, io};

use common::{cleanup, mocks::MockSink, temp_csv_path, write_input};

use csv_email_hash::{
    BatchError,
    config::HashJobConfig,
    core::step::{Step, StepBuilder, StepInstance},
    hash_job::run_hash_job,
    item::{
        csv::{csv_reader::CsvItemReaderBuilder, csv_writer::CsvItemWriterBuilder},
        email::email_processor::EmailHashProcessor,
        row::{ProjectedRow, Row},
    },
};

#[test]
fn failing_output_sink_should_abort_the_step() {
    let csv = "name,email
Alice,alice@example.com
Bob,bob@example.com";

    let reader = CsvItemReaderBuilder::new()
        .from_reader(csv.as_bytes())
        .expect("header should be readable");

    let processor = EmailHashProcessor::new("email", &["name".to_string()]);

    let mut sink = MockSink::default();
    sink.expect_write()
        .returning(|_| Err(io::Error::other("disk full")));
    sink.expect_flush().returning(|| Ok(()));

    let writer = CsvItemWriterBuilder::new()
        .headers(processor.output_fields().to_vec())
        .from_writer(sink);

    let step: StepInstance<Row, ProjectedRow> = StepBuilder::new()
        .reader(&reader)
        .processor(&processor)
        .writer(&writer)
        .build_with_processor()
        .expect("step should build");

    let result = step.execute();

    match result {
        Err(BatchError::ItemWriter(message)) => assert!(message.contains("disk full")),
        other => panic!("expected a writer error, got {:?}", other.map(|e| e.read_count)),
    }
}

#[test]
fn missing_input_file_should_be_fatal() {
    let input = temp_csv_path("missing");
    let output = temp_csv_path("output");

    let config = HashJobConfig::new(&input, &output, "email", "name").expect("valid config");
    let result = run_hash_job(&config);

    match result {
        Err(BatchError::ItemReader(message)) => {
            assert!(message.contains(&input.display().to_string()))
        }
        other => panic!("expected a reader error, got {:?}", other.map(|e| e.duration)),
    }
    assert!(!output.exists());
}

#[test]
fn invalid_utf8_row_should_abort_the_job() {
    let input = temp_csv_path("input");
    fs::write(
        &input,
        b"name,email\nAlice,alice@example.com\nBob,\xff\xfe@example.com\nCarol,carol@example.com\n",
    )
    .expect("Failed to write CSV file");
    let output = temp_csv_path("output");

    let config = HashJobConfig::new(&input, &output, "email", "name").expect("valid config");
    let result = run_hash_job(&config);

    assert!(matches!(result, Err(BatchError::Step(_))));

    // Rows flushed before the failure stay in the output.
    let csv_content = fs::read_to_string(&output).expect("output should exist");
    assert!(csv_content.starts_with("name,email\r\nAlice,"));
    assert!(!csv_content.contains("Carol"));

    cleanup(&[&input, &output]);
}

#[test]
fn unwritable_output_should_be_fatal() {
    let input = write_input("name,email\nAlice,alice@example.com\n");
    let output = std::env::temp_dir()
        .join("csv-email-hash-no-such-dir")
        .join("out.csv");

    let config = HashJobConfig::new(&input, &output, "email", "name").expect("valid config");
    let result = run_hash_job(&config);

    assert!(matches!(result, Err(BatchError::ItemWriter(_))));

    cleanup(&[&input]);
}

#[test]
fn output_path_equal_to_input_path_should_be_rejected() {
    let input = write_input("name,email\nAlice,alice@example.com\n");

    let result = HashJobConfig::new(&input, &input, "email", "name");

    assert!(matches!(result, Err(BatchError::Configuration(_))));
    assert_eq!(
        fs::read_to_string(&input).expect("input should be untouched"),
        "name,email\nAlice,alice@example.com\n"
    );

    cleanup(&[&input]);
}
