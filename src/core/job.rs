use std::time::{Duration, Instant};

use log::{error, info};
use uuid::Uuid;

use crate::BatchError;

use super::{
    build_name,
    step::{Step, StepExecution},
};

/// Type alias for job execution results.
type JobResult<T> = Result<T, BatchError>;

/// Represents a job that can be executed.
///
/// A job is a container for a sequence of steps that are executed in order.
/// The first failing step stops the job.
pub trait Job {
    /// Runs the job and returns the result of the job execution.
    ///
    /// # Returns
    /// - `Ok(JobExecution)` when every step succeeded
    /// - `Err(BatchError::Step)` naming the failed step and its cause
    fn run(&self) -> JobResult<JobExecution>;
}

/// Represents the execution of a job.
#[derive(Debug)]
pub struct JobExecution {
    /// The time when the job started executing
    pub start: Instant,
    /// The time when the job finished executing
    pub end: Instant,
    /// The total duration of the job execution
    pub duration: Duration,
    /// One entry per step, in execution order
    pub steps: Vec<StepExecution>,
}

pub struct JobInstance<'a> {
    /// Unique identifier for this job instance
    id: Uuid,
    /// Human-readable name for the job
    name: String,
    /// Collection of steps that make up this job, in execution order
    steps: Vec<&'a dyn Step>,
}

impl Job for JobInstance<'_> {
    fn run(&self) -> JobResult<JobExecution> {
        let start = Instant::now();

        info!("Start of job: {}, id: {}", self.name, self.id);

        let mut step_executions = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            match step.execute() {
                Ok(step_execution) => step_executions.push(step_execution),
                Err(err) => {
                    error!("Job {} failed at step {}", self.name, step.get_name());
                    return Err(BatchError::Step(format!("{}: {}", step.get_name(), err)));
                }
            }
        }

        info!("End of job: {}, id: {}", self.name, self.id);

        Ok(JobExecution {
            start,
            end: Instant::now(),
            duration: start.elapsed(),
            steps: step_executions,
        })
    }
}

/// Builder for creating a job instance.
///
/// ```
/// use csv_email_hash::core::job::{Job, JobBuilder};
///
/// let job = JobBuilder::new().name("nothing-to-do").build();
/// let execution = job.run().unwrap();
///
/// assert!(execution.steps.is_empty());
/// ```
#[derive(Default)]
pub struct JobBuilder<'a> {
    /// Optional name for the job (generated randomly if not specified)
    name: Option<String>,
    /// Collection of steps to be executed, in order
    steps: Vec<&'a dyn Step>,
}

impl<'a> JobBuilder<'a> {
    pub fn new() -> Self {
        Self {
            name: None,
            steps: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> JobBuilder<'a> {
        self.name = Some(name.into());
        self
    }

    /// Sets the first step of the job. Same as [`JobBuilder::next`], reads better at the head of a chain.
    pub fn start(mut self, step: &'a dyn Step) -> JobBuilder<'a> {
        self.steps.push(step);
        self
    }

    pub fn next(mut self, step: &'a dyn Step) -> JobBuilder<'a> {
        self.steps.push(step);
        self
    }

    pub fn build(self) -> JobInstance<'a> {
        JobInstance {
            id: Uuid::new_v4(),
            name: self.name.unwrap_or_else(build_name),
            steps: self.steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::{
        BatchError,
        core::step::{Step, StepExecution},
    };

    use super::{Job, JobBuilder};

    struct FailingStep {
        name: &'static str,
        runs: Cell<usize>,
    }

    impl FailingStep {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                runs: Cell::new(0),
            }
        }
    }

    impl Step for FailingStep {
        fn get_name(&self) -> &str {
            self.name
        }

        fn execute(&self) -> Result<StepExecution, BatchError> {
            self.runs.set(self.runs.get() + 1);
            Err(BatchError::ItemWriter("disk full".to_owned()))
        }
    }

    #[test]
    fn failing_step_should_stop_the_job() {
        let first = FailingStep::new("first");
        let second = FailingStep::new("second");

        let job = JobBuilder::new().start(&first).next(&second).build();
        let result = job.run();

        match result {
            Err(BatchError::Step(message)) => {
                assert_eq!(message, "first: ItemWriter from: disk full")
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(first.runs.get(), 1);
        assert_eq!(second.runs.get(), 0);
    }
}
