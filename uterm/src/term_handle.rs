//! The interface commands see (spec.md §6, "term_handle"). `Terminal` is the only
//! implementation, but keeping it a trait — rather than a concrete struct reference —
//! means the scheduler access `top`/`pkill` need is injected the same way `print` is,
//! with no unsafe context pointer (SPEC_FULL.md §6).

/// Outcome of a command's `run`/`init`/`exit` call (spec.md §4.2/§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetCode {
    Ok,
    Error,
    Alive,
    Killed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Running,
    Stopped,
    Paused,
    Delayed,
    Invalid,
}

/// Per-task snapshot handed to `top` by [`TermHandle::scheduler_for_each_task`].
#[derive(Debug, Clone, Copy)]
pub struct TaskStats<'a> {
    pub name: &'a str,
    pub period_us: u64,
    pub mean_us: u64,
    pub min_us: u64,
    pub max_us: u64,
    pub state: TaskState,
}

pub trait TermHandle {
    /// Emits raw bytes, including ANSI escapes, to the sink (spec.md §6).
    fn print(&mut self, bytes: &[u8]);

    /// Iterates the command registry in registration order (used by the built-in
    /// `help`).
    fn for_each_command(&self, f: &mut dyn FnMut(&str, &str));

    /// Registers a periodic scheduler task. Returns `false` if the scheduler rejects
    /// it (out of slots, duplicate name).
    fn scheduler_add(&mut self, name: &str, period_us: u64, task: fn(&mut dyn TermHandle) -> bool) -> bool;

    /// Asks the scheduler to terminate the task named `name`. Returns `true` if a task
    /// was found and killed.
    fn scheduler_pkill(&mut self, name: &[u8]) -> bool;

    /// Asks the scheduler to terminate every running task.
    fn scheduler_pkill_all(&mut self) -> usize;

    fn scheduler_reset_stats(&mut self);

    fn scheduler_for_each_task(&self, f: &mut dyn FnMut(TaskStats));

    /// Convenience over [`TermHandle::print`] for `&str` callers.
    fn print_str(&mut self, s: &str) {
        self.print(s.as_bytes());
    }
}
