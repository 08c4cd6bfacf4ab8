use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::BatchError;

use super::{
    build_name,
    item::{ItemProcessor, ItemReader, ItemWriter, PassThroughProcessor, ProcessorOutcome},
};

/// Log target of the per-item skip warnings.
pub const SKIP_LOG_TARGET: &str = "csv_email_hash::skip";

#[derive(Debug, PartialEq)]
pub enum ChunkStatus {
    /// The chunk reached its configured size; more items may follow.
    Full,
    /// The reader is exhausted; this is the last chunk.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Started,
    Success,
    Error,
}

/// Statistics of one step run.
#[derive(Debug)]
pub struct StepExecution {
    /// Unique identifier of the step instance that produced this execution
    pub id: Uuid,
    /// Human-readable name of the step
    pub name: String,
    pub status: StepStatus,
    pub start: Instant,
    pub end: Instant,
    pub duration: Duration,
    /// Number of items successfully read
    pub read_count: usize,
    /// Number of items handed to the writer
    pub write_count: usize,
    /// Number of items the processor chose to skip
    pub skip_count: usize,
}

impl StepExecution {
    fn new(id: Uuid, name: &str) -> Self {
        let now = Instant::now();
        Self {
            id,
            name: name.to_owned(),
            status: StepStatus::Started,
            start: now,
            end: now,
            duration: Duration::ZERO,
            read_count: 0,
            write_count: 0,
            skip_count: 0,
        }
    }
}

/// A phase of a job: read items, process them and write them, chunk by chunk.
pub trait Step {
    fn get_name(&self) -> &str;

    /// Runs the step to completion.
    ///
    /// # Returns
    /// - `Ok(StepExecution)` when every item was read, processed and written
    /// - `Err(BatchError)` on the first fatal reader, processor or writer error
    fn execute(&self) -> Result<StepExecution, BatchError>;
}

pub struct StepInstance<'a, I, O> {
    id: Uuid,
    name: String,
    reader: &'a dyn ItemReader<I>,
    processor: &'a dyn ItemProcessor<I, O>,
    writer: &'a dyn ItemWriter<O>,
    chunk_size: usize,
}

impl<I, O> Step for StepInstance<'_, I, O> {
    fn get_name(&self) -> &str {
        &self.name
    }

    fn execute(&self) -> Result<StepExecution, BatchError> {
        let mut execution = StepExecution::new(self.id, &self.name);

        debug!("Start of step: {}, id: {}", self.name, self.id);

        // The writer is closed on every path so buffered rows reach the sink
        // before the error is reported.
        let result = self
            .writer
            .open()
            .and_then(|()| self.run_chunks(&mut execution));
        let close_result = self.writer.close();

        execution.end = Instant::now();
        execution.duration = execution.start.elapsed();

        match result.and(close_result) {
            Ok(()) => {
                execution.status = StepStatus::Success;
                info!(
                    "End of step: {}, read: {}, written: {}, skipped: {}",
                    self.name, execution.read_count, execution.write_count, execution.skip_count
                );
                Ok(execution)
            }
            Err(err) => {
                execution.status = StepStatus::Error;
                error!(
                    "Step {} aborted after {} items read: {}",
                    self.name, execution.read_count, err
                );
                Err(err)
            }
        }
    }
}

impl<I, O> StepInstance<'_, I, O> {
    fn run_chunks(&self, execution: &mut StepExecution) -> Result<(), BatchError> {
        let mut read_items: Vec<I> = Vec::with_capacity(self.chunk_size);

        loop {
            let chunk_status = self.read_chunk(&mut read_items, execution)?;

            let processed_items = self.process_chunk(&read_items, execution)?;

            self.write_chunk(&processed_items, execution)?;

            if chunk_status == ChunkStatus::Finished {
                return Ok(());
            }
        }
    }

    fn read_chunk(
        &self,
        read_items: &mut Vec<I>,
        execution: &mut StepExecution,
    ) -> Result<ChunkStatus, BatchError> {
        debug!("Start reading chunk");
        read_items.clear();

        while let Some(item) = self.reader.read()? {
            read_items.push(item);
            execution.read_count += 1;

            if read_items.len() == self.chunk_size {
                debug!("End reading chunk: FULL");
                return Ok(ChunkStatus::Full);
            }
        }

        debug!("End reading chunk: FINISHED");
        Ok(ChunkStatus::Finished)
    }

    fn process_chunk(
        &self,
        read_items: &[I],
        execution: &mut StepExecution,
    ) -> Result<Vec<O>, BatchError> {
        let mut processed_items = Vec::with_capacity(read_items.len());

        debug!("Start processing chunk");
        for item in read_items {
            match self.processor.process(item)? {
                ProcessorOutcome::Retain(processed) => processed_items.push(processed),
                ProcessorOutcome::Skip(reason) => {
                    execution.skip_count += 1;
                    warn!(target: SKIP_LOG_TARGET, "{}", reason);
                }
            }
        }
        debug!("End processing chunk");

        Ok(processed_items)
    }

    fn write_chunk(
        &self,
        processed_items: &[O],
        execution: &mut StepExecution,
    ) -> Result<(), BatchError> {
        if processed_items.is_empty() {
            return Ok(());
        }

        debug!("Start writing chunk");
        self.writer.write(processed_items)?;
        self.writer.flush()?;
        execution.write_count += processed_items.len();
        debug!("End writing chunk");

        Ok(())
    }
}

pub struct StepBuilder<'a, I, O> {
    name: Option<String>,
    reader: Option<&'a dyn ItemReader<I>>,
    processor: Option<&'a dyn ItemProcessor<I, O>>,
    writer: Option<&'a dyn ItemWriter<O>>,
    chunk_size: usize,
}

impl<I, O> Default for StepBuilder<'_, I, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, I, O> StepBuilder<'a, I, O> {
    pub fn new() -> StepBuilder<'a, I, O> {
        Self {
            name: None,
            reader: None,
            processor: None,
            writer: None,
            chunk_size: 1,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> StepBuilder<'a, I, O> {
        self.name = Some(name.into());
        self
    }

    pub fn reader(mut self, reader: &'a impl ItemReader<I>) -> StepBuilder<'a, I, O> {
        self.reader = Some(reader);
        self
    }

    pub fn processor(mut self, processor: &'a impl ItemProcessor<I, O>) -> StepBuilder<'a, I, O> {
        self.processor = Some(processor);
        self
    }

    pub fn writer(mut self, writer: &'a impl ItemWriter<O>) -> StepBuilder<'a, I, O> {
        self.writer = Some(writer);
        self
    }

    /// Number of items read before the chunk is processed and written. Zero is treated as one.
    pub fn chunk(mut self, chunk_size: usize) -> StepBuilder<'a, I, O> {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn build(self) -> Result<StepInstance<'a, I, O>, BatchError>
    where
        PassThroughProcessor: ItemProcessor<I, O>,
    {
        self.build_with_default(&PassThroughProcessor)
    }

    /// Same as [`StepBuilder::build`] for steps whose input and output types differ,
    /// where a processor is mandatory.
    pub fn build_with_processor(self) -> Result<StepInstance<'a, I, O>, BatchError> {
        let processor = self
            .processor
            .ok_or_else(|| BatchError::Configuration("step processor is required".to_owned()))?;
        self.build_with_default(processor)
    }

    fn build_with_default(
        self,
        default_processor: &'a dyn ItemProcessor<I, O>,
    ) -> Result<StepInstance<'a, I, O>, BatchError> {
        let reader = self
            .reader
            .ok_or_else(|| BatchError::Configuration("step reader is required".to_owned()))?;
        let writer = self
            .writer
            .ok_or_else(|| BatchError::Configuration("step writer is required".to_owned()))?;

        Ok(StepInstance {
            id: Uuid::new_v4(),
            name: self.name.unwrap_or_else(build_name),
            reader,
            processor: self.processor.unwrap_or(default_processor),
            writer,
            chunk_size: self.chunk_size,
        })
    }
}
