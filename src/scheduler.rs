//! Periodic scheduling.
//!
//! Trails don't own a clock. They register a task with a [`TaskScheduler`]
//! (usually the host's tick loop) and keep the returned [`TaskHandle`] to
//! cancel it later.
//!
//! [`TickScheduler`] is a small cooperative implementation for hosts that
//! have no scheduler of their own, and for tests: call [`TickScheduler::tick`]
//! once per game tick.
//!
//! # Example
//!
//! ```
//! use trailgen::scheduler::{TaskHandle, TaskScheduler, TickScheduler};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let runs = Rc::new(Cell::new(0));
//! let counter = runs.clone();
//!
//! let mut scheduler = TickScheduler::new();
//! let handle = scheduler.run_timer(0, 2, Box::new(move || {
//!     counter.set(counter.get() + 1);
//!     Ok(())
//! }));
//!
//! for _ in 0..6 {
//!     scheduler.tick().unwrap();
//! }
//! assert_eq!(runs.get(), 3); // ticks 0, 2 and 4
//!
//! handle.cancel();
//! scheduler.tick().unwrap();
//! assert_eq!(scheduler.task_count(), 0);
//! ```

use crate::error::TrailError;
use crate::Tick;
use std::cell::Cell;
use std::rc::Rc;

/// A periodic callback.
pub type Task = Box<dyn FnMut() -> Result<(), TrailError>>;

/// Handle to a registered task.
pub trait TaskHandle {
    /// Stop the task. It will not run again, even if it is currently running.
    fn cancel(&self);

    fn is_cancelled(&self) -> bool;
}

/// A source of periodic callbacks.
pub trait TaskScheduler {
    type Handle: TaskHandle + 'static;

    /// Run `task` every `period` ticks, the first time `delay` ticks from now.
    fn run_timer(&mut self, delay: Tick, period: Tick, task: Task) -> Self::Handle;
}

/// Handle returned by [`TickScheduler::run_timer`].
#[derive(Debug, Clone)]
pub struct TimerHandle {
    id: u64,
    cancelled: Rc<Cell<bool>>,
}

impl TimerHandle {
    /// Identifier of the task, unique within its scheduler.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl TaskHandle for TimerHandle {
    fn cancel(&self) {
        self.cancelled.set(true);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

struct ScheduledTask {
    id: u64,
    next_run: Tick,
    period: Tick,
    task: Task,
    cancelled: Rc<Cell<bool>>,
}

/// Cooperative, single-threaded tick scheduler.
///
/// Tasks run in registration order. Periods of `0` are treated as `1`.
#[derive(Default)]
pub struct TickScheduler {
    current: Tick,
    next_id: u64,
    tasks: Vec<ScheduledTask>,
    paused: bool,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tick the next call to [`tick`](Self::tick) will run.
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.current
    }

    /// Number of tasks still registered. Cancelled tasks are dropped on the
    /// next tick.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze the clock. While paused, [`tick`](Self::tick) does nothing.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Run every task due at the current tick, then advance the clock.
    ///
    /// All due tasks run even if one of them fails. The first error is
    /// returned; later ones are logged.
    pub fn tick(&mut self) -> Result<(), TrailError> {
        if self.paused {
            return Ok(());
        }

        let now = self.current;
        let mut first_error = None;

        for scheduled in &mut self.tasks {
            if scheduled.cancelled.get() || scheduled.next_run != now {
                continue;
            }
            scheduled.next_run = now.wrapping_add(scheduled.period);
            if let Err(e) = (scheduled.task)() {
                if first_error.is_none() {
                    first_error = Some(e);
                } else {
                    log::warn!("task {} failed at tick {now}: {e}", scheduled.id);
                }
            }
        }

        self.tasks.retain(|t| !t.cancelled.get());
        self.current = now.wrapping_add(1);

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl TaskScheduler for TickScheduler {
    type Handle = TimerHandle;

    fn run_timer(&mut self, delay: Tick, period: Tick, task: Task) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        let cancelled = Rc::new(Cell::new(false));

        self.tasks.push(ScheduledTask {
            id,
            next_run: self.current.wrapping_add(delay),
            period: period.max(1),
            task,
            cancelled: cancelled.clone(),
        });

        TimerHandle { id, cancelled }
    }
}
