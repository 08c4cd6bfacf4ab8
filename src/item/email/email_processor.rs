use crate::{
    core::item::{ItemProcessor, ItemProcessorResult, ProcessorOutcome},
    item::row::{ProjectedRow, Row},
};

use super::email_hasher::hash_email;

/// Computes the output columns: the keep-columns in their given order with the
/// email column removed, then the email column last.
///
/// ```
/// use csv_email_hash::item::email::email_processor::output_field_order;
///
/// let keep = vec!["email".to_string(), "city".to_string()];
/// assert_eq!(output_field_order("email", &keep), vec!["city", "email"]);
/// ```
pub fn output_field_order(email_column: &str, keep_columns: &[String]) -> Vec<String> {
    keep_columns
        .iter()
        .filter(|column| column.as_str() != email_column)
        .cloned()
        .chain(std::iter::once(email_column.to_owned()))
        .collect()
}

/// Replaces the email value of each row by its hash and keeps the configured columns.
///
/// Rows without the email column are skipped, not failed.
#[derive(Debug, Clone)]
pub struct EmailHashProcessor {
    email_column: String,
    output_fields: Vec<String>,
}

impl EmailHashProcessor {
    pub fn new(email_column: impl Into<String>, keep_columns: &[String]) -> Self {
        let email_column = email_column.into();
        let output_fields = output_field_order(&email_column, keep_columns);
        Self {
            email_column,
            output_fields,
        }
    }

    /// Header of the output file; every processed row has one value per field.
    pub fn output_fields(&self) -> &[String] {
        &self.output_fields
    }
}

impl ItemProcessor<Row, ProjectedRow> for EmailHashProcessor {
    fn process(&self, item: &Row) -> ItemProcessorResult<ProjectedRow> {
        let Some(raw_email) = item.get(&self.email_column) else {
            return Ok(ProcessorOutcome::Skip(format!(
                "Missing email column '{}' in row: {}",
                self.email_column, item
            )));
        };

        let mut hashed = Some(hash_email(raw_email));

        let values = self
            .output_fields
            .iter()
            .map(|field| {
                if *field == self.email_column {
                    hashed.take()
                } else {
                    item.get(field).map(str::to_owned)
                }
            })
            .collect();

        Ok(ProcessorOutcome::Retain(ProjectedRow::new(values)))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        core::item::{ItemProcessor, ProcessorOutcome},
        item::{email::email_hasher::hash_email, row::Row},
    };

    use super::{EmailHashProcessor, output_field_order};

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn email_column_should_always_come_last() {
        assert_eq!(
            output_field_order("email", &columns(&["email", "start date", "end date"])),
            columns(&["start date", "end date", "email"])
        );
        assert_eq!(
            output_field_order("email", &columns(&["city", "email", "name"])),
            columns(&["city", "name", "email"])
        );
        assert_eq!(
            output_field_order("email", &columns(&["city"])),
            columns(&["city", "email"])
        );
        assert_eq!(output_field_order("email", &[]), columns(&["email"]));
    }

    #[test]
    fn repeated_email_column_should_appear_once() {
        assert_eq!(
            output_field_order("email", &columns(&["email", "city", "email"])),
            columns(&["city", "email"])
        );
    }

    #[test]
    fn row_should_be_hashed_and_projected() {
        let processor = EmailHashProcessor::new("email", &columns(&["email", "city"]));
        let row: Row = [("name", "Alice"), ("email", "A@Test.COM "), ("city", "NYC")]
            .into_iter()
            .collect();

        let outcome = processor.process(&row).unwrap();

        let ProcessorOutcome::Retain(projected) = outcome else {
            panic!("row should be retained");
        };
        assert_eq!(processor.output_fields(), columns(&["city", "email"]).as_slice());
        assert_eq!(projected.get(0), Some("NYC"));
        assert_eq!(projected.get(1), Some(hash_email("a@test.com").as_str()));
        assert_eq!(projected.values().len(), 2);
    }

    #[test]
    fn row_without_email_should_be_skipped_with_its_contents() {
        let processor = EmailHashProcessor::new("email", &columns(&["city"]));
        let row: Row = [("name", "Bob"), ("city", "LA")].into_iter().collect();

        let outcome = processor.process(&row).unwrap();

        assert_eq!(
            outcome,
            ProcessorOutcome::Skip(
                r#"Missing email column 'email' in row: {"name": "Bob", "city": "LA"}"#.to_owned()
            )
        );
    }

    #[test]
    fn empty_email_should_still_be_hashed() {
        let processor = EmailHashProcessor::new("email", &[]);
        let row: Row = [("email", "")].into_iter().collect();

        let outcome = processor.process(&row).unwrap();

        let ProcessorOutcome::Retain(projected) = outcome else {
            panic!("row should be retained");
        };
        assert_eq!(projected.get(0), Some(hash_email("").as_str()));
    }

    #[test]
    fn absent_keep_column_should_be_left_empty() {
        let processor = EmailHashProcessor::new("email", &columns(&["name", "city"]));
        let row: Row = [("name", "Carol"), ("email", "c@example.com")]
            .into_iter()
            .collect();

        let outcome = processor.process(&row).unwrap();

        let ProcessorOutcome::Retain(projected) = outcome else {
            panic!("row should be retained");
        };
        assert_eq!(projected.get(0), Some("Carol"));
        assert_eq!(projected.values()[1], None);
        assert_eq!(projected.get(2), Some(hash_email("c@example.com").as_str()));
    }
}
