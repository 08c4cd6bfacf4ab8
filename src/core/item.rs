use crate::error::BatchError;

/// Result of a single read: `Ok(None)` once the source is exhausted.
pub type ItemReaderResult<I> = Result<Option<I>, BatchError>;

/// Result of processing a single item.
pub type ItemProcessorResult<O> = Result<ProcessorOutcome<O>, BatchError>;

/// Result of writing a chunk of items.
pub type ItemWriterResult = Result<(), BatchError>;

/// What a processor decided to do with one item.
///
/// A `Skip` is not an error: the step logs the reason, counts the item as
/// skipped and moves on to the next one. Fatal problems are reported through
/// the `Err` side of [`ItemProcessorResult`] instead.
#[derive(Debug, PartialEq)]
pub enum ProcessorOutcome<O> {
    /// The item was transformed and must be handed to the writer.
    Retain(O),
    /// The item is dropped; the string explains why.
    Skip(String),
}

pub trait ItemReader<I> {
    fn read(&self) -> ItemReaderResult<I>;
}

pub trait ItemProcessor<I, O> {
    fn process(&self, item: &I) -> ItemProcessorResult<O>;
}

pub trait ItemWriter<O> {
    fn write(&self, items: &[O]) -> ItemWriterResult;

    fn flush(&self) -> ItemWriterResult {
        Ok(())
    }

    /// Called once before the first chunk is written.
    fn open(&self) -> ItemWriterResult {
        Ok(())
    }

    /// Called once when the step ends, whether it succeeded or not.
    fn close(&self) -> ItemWriterResult {
        Ok(())
    }
}

#[derive(Default)]
pub struct PassThroughProcessor;

impl<I: Clone> ItemProcessor<I, I> for PassThroughProcessor {
    fn process(&self, item: &I) -> ItemProcessorResult<I> {
        Ok(ProcessorOutcome::Retain(item.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemProcessor, PassThroughProcessor, ProcessorOutcome};

    #[test]
    fn pass_through_processor_should_retain_items_unchanged() {
        let processor = PassThroughProcessor;

        let outcome = processor.process(&"alice".to_string()).unwrap();

        assert_eq!(outcome, ProcessorOutcome::Retain("alice".to_string()));
    }
}
