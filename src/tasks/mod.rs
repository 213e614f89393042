//! units of work that consume a [`LinkedContainer`]
//!
//! the container stores tasks by shared reference, so completion state
//! lives in `Cell`s. tasks that inspect or mutate the queue receive it as
//! an `execute` argument instead of keeping a reference to it, which keeps
//! a queue free to store the very tasks that operate on it.

use std::cell::Cell;
use std::fmt;

use crate::collections::LinkedContainer;

/// a divisor this close to zero fails the division task
const DIVISOR_EPSILON: f64 = 1e-5;

pub type TaskResult<T> = Result<T, TaskError>;

/// failures surfaced by [`Task::execute`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskError {
    DivisionByZero,
    AlreadyCompleted,
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::DivisionByZero => write!(f, "division by zero"),
            TaskError::AlreadyCompleted => write!(f, "task has already been executed"),
        }
    }
}

impl std::error::Error for TaskError {}

/// the queue of pending work tasks inspect and mutate while executing
pub type TaskQueue<'a> = LinkedContainer<'a, Task<'a>>;

/// operand and result state shared by the arithmetic task variants
#[derive(Debug)]
pub struct Arithmetic {
    op1: f64,
    op2: f64,
    output: Cell<f64>,
    completed: Cell<bool>,
}

impl Arithmetic {
    fn new(op1: f64, op2: f64) -> Self {
        Self {
            op1,
            op2,
            output: Cell::new(0.0),
            completed: Cell::new(false),
        }
    }

    fn complete(&self, output: f64) {
        self.output.set(output);
        self.completed.set(true);
    }
}

/// single-shot recorded count for the container-inspection variants
#[derive(Debug, Default)]
pub struct Counter {
    output: Cell<usize>,
    completed: Cell<bool>,
}

impl Counter {
    fn record(&self, value: usize) -> TaskResult<()> {
        if self.completed.get() {
            return Err(TaskError::AlreadyCompleted);
        }
        self.output.set(value);
        self.completed.set(true);
        Ok(())
    }
}

/// a unit of work
///
/// the closed set of task kinds, each answering the same capability
/// questions: can it be executed, does it produce an output, has it
/// completed, and how does it describe itself.
#[derive(Debug)]
pub enum Task<'a> {
    Addition(Arithmetic),
    Subtraction(Arithmetic),
    Multiplication(Arithmetic),
    Division(Arithmetic),
    /// records the queue's element count
    CountTasks(Counter),
    /// records how many queued tasks produce an output
    CountResults(Counter),
    /// appends another task to the queue
    Enqueue {
        task: &'a Task<'a>,
        completed: Cell<bool>,
    },
    /// empties the queue
    Clear { completed: Cell<bool> },
}

impl<'a> Task<'a> {
    pub fn addition(op1: f64, op2: f64) -> Self {
        Task::Addition(Arithmetic::new(op1, op2))
    }

    pub fn subtraction(op1: f64, op2: f64) -> Self {
        Task::Subtraction(Arithmetic::new(op1, op2))
    }

    pub fn multiplication(op1: f64, op2: f64) -> Self {
        Task::Multiplication(Arithmetic::new(op1, op2))
    }

    pub fn division(op1: f64, op2: f64) -> Self {
        Task::Division(Arithmetic::new(op1, op2))
    }

    pub fn count_tasks() -> Self {
        Task::CountTasks(Counter::default())
    }

    pub fn count_results() -> Self {
        Task::CountResults(Counter::default())
    }

    pub fn enqueue(task: &'a Task<'a>) -> Self {
        Task::Enqueue {
            task,
            completed: Cell::new(false),
        }
    }

    pub fn clear() -> Self {
        Task::Clear {
            completed: Cell::new(false),
        }
    }

    /// runs the task against `queue`
    ///
    /// arithmetic tasks recompute on re-execution; every other kind is
    /// single-shot and reports [`TaskError::AlreadyCompleted`] afterwards.
    pub fn execute(&self, queue: &mut TaskQueue<'a>) -> TaskResult<()> {
        match self {
            Task::Addition(a) => {
                a.complete(a.op1 + a.op2);
                Ok(())
            }
            Task::Subtraction(a) => {
                a.complete(a.op1 - a.op2);
                Ok(())
            }
            Task::Multiplication(a) => {
                a.complete(a.op1 * a.op2);
                Ok(())
            }
            Task::Division(a) => {
                if a.op2.abs() <= DIVISOR_EPSILON {
                    return Err(TaskError::DivisionByZero);
                }
                a.complete(a.op1 / a.op2);
                Ok(())
            }
            Task::CountTasks(counter) => counter.record(queue.size()),
            Task::CountResults(counter) => {
                if counter.completed.get() {
                    return Err(TaskError::AlreadyCompleted);
                }
                let mut results = 0;
                let mut cursor = queue.begin();
                while cursor != queue.end() {
                    if queue.value(cursor).has_output() {
                        results += 1;
                    }
                    cursor = queue.advance(cursor);
                }
                counter.record(results)
            }
            Task::Enqueue { task, completed } => {
                if completed.get() {
                    return Err(TaskError::AlreadyCompleted);
                }
                queue.push_back(*task);
                completed.set(true);
                Ok(())
            }
            Task::Clear { completed } => {
                if completed.get() {
                    return Err(TaskError::AlreadyCompleted);
                }
                queue.clear();
                completed.set(true);
                Ok(())
            }
        }
    }

    /// whether executing this task produces an inspectable output
    pub fn has_output(&self) -> bool {
        match self {
            Task::Addition(_)
            | Task::Subtraction(_)
            | Task::Multiplication(_)
            | Task::Division(_)
            | Task::CountTasks(_)
            | Task::CountResults(_) => true,
            Task::Enqueue { .. } | Task::Clear { .. } => false,
        }
    }

    pub fn is_completed(&self) -> bool {
        match self {
            Task::Addition(a)
            | Task::Subtraction(a)
            | Task::Multiplication(a)
            | Task::Division(a) => a.completed.get(),
            Task::CountTasks(counter) | Task::CountResults(counter) => counter.completed.get(),
            Task::Enqueue { completed, .. } | Task::Clear { completed } => completed.get(),
        }
    }

    /// the computed value of a completed arithmetic task
    pub fn output(&self) -> Option<f64> {
        match self {
            Task::Addition(a)
            | Task::Subtraction(a)
            | Task::Multiplication(a)
            | Task::Division(a) => a.completed.get().then(|| a.output.get()),
            _ => None,
        }
    }

    /// the recorded value of a completed counting task
    pub fn count(&self) -> Option<usize> {
        match self {
            Task::CountTasks(counter) | Task::CountResults(counter) => {
                counter.completed.get().then(|| counter.output.get())
            }
            _ => None,
        }
    }

    /// a human-readable account of the work: its result when completed,
    /// the pending computation otherwise
    pub fn describe(&self) -> String {
        match self {
            Task::Addition(a) => {
                if a.completed.get() {
                    format!("addition task: {} + {} = {}", a.op1, a.op2, a.output.get())
                } else {
                    format!("addition task: waiting to add {} and {}", a.op1, a.op2)
                }
            }
            Task::Subtraction(a) => {
                if a.completed.get() {
                    format!(
                        "subtraction task: {} - {} = {}",
                        a.op1,
                        a.op2,
                        a.output.get()
                    )
                } else {
                    format!(
                        "subtraction task: waiting to subtract {} from {}",
                        a.op2, a.op1
                    )
                }
            }
            Task::Multiplication(a) => {
                if a.completed.get() {
                    format!(
                        "multiplication task: {} * {} = {}",
                        a.op1,
                        a.op2,
                        a.output.get()
                    )
                } else {
                    format!(
                        "multiplication task: waiting to multiply {} by {}",
                        a.op1, a.op2
                    )
                }
            }
            Task::Division(a) => {
                if a.completed.get() {
                    format!("division task: {} / {} = {}", a.op1, a.op2, a.output.get())
                } else {
                    format!("division task: waiting to divide {} by {}", a.op1, a.op2)
                }
            }
            Task::CountTasks(counter) => {
                if counter.completed.get() {
                    format!("{} tasks in the container", counter.output.get())
                } else {
                    "counts the tasks in the container".to_string()
                }
            }
            Task::CountResults(counter) => {
                if counter.completed.get() {
                    format!(
                        "{} tasks with an output in the container",
                        counter.output.get()
                    )
                } else {
                    "counts the tasks with an output in the container".to_string()
                }
            }
            Task::Enqueue { completed, .. } => {
                if completed.get() {
                    "task appended to the container".to_string()
                } else {
                    "appends another task to the container".to_string()
                }
            }
            Task::Clear { completed } => {
                if completed.get() {
                    "container cleared".to_string()
                } else {
                    "clears the container".to_string()
                }
            }
        }
    }
}
