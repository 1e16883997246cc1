//! Shared test double for the command test modules. Not part of the public API.

#![cfg(test)]

use uterm::{ByteSink, TaskState, TaskStats, TermHandle};

#[derive(Default)]
pub(crate) struct RecordingSink {
    pub bytes: Vec<u8>,
}

impl RecordingSink {
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes).expect("test output must be utf8")
    }
}

impl ByteSink for RecordingSink {
    fn write(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }
}

pub(crate) struct FakeTask {
    pub name: String,
    pub period_us: u64,
    pub mean_us: u64,
    pub min_us: u64,
    pub max_us: u64,
    pub state: TaskState,
}

impl FakeTask {
    pub fn running(name: &str) -> Self {
        Self {
            name: name.to_string(),
            period_us: 1_000_000,
            mean_us: 10,
            min_us: 5,
            max_us: 20,
            state: TaskState::Running,
        }
    }
}

/// A `TermHandle` double that records everything a command does instead of talking to
/// a real [`uterm::Terminal`]/scheduler, so each built-in can be unit-tested in
/// isolation.
#[derive(Default)]
pub(crate) struct MockHandle {
    pub sink: RecordingSink,
    pub commands: Vec<(String, String)>,
    pub tasks: Vec<FakeTask>,
    pub added: Vec<(String, u64)>,
    pub killed: Vec<String>,
    pub reset_called: bool,
}

impl MockHandle {
    pub fn output(&self) -> &str {
        self.sink.as_str()
    }
}

impl TermHandle for MockHandle {
    fn print(&mut self, bytes: &[u8]) {
        self.sink.write(bytes);
    }

    fn for_each_command(&self, f: &mut dyn FnMut(&str, &str)) {
        for (name, description) in &self.commands {
            f(name, description);
        }
    }

    fn scheduler_add(&mut self, name: &str, period_us: u64, _task: fn(&mut dyn TermHandle) -> bool) -> bool {
        self.added.push((name.to_string(), period_us));
        true
    }

    fn scheduler_pkill(&mut self, name: &[u8]) -> bool {
        let name = core::str::from_utf8(name).unwrap_or("");
        match self.tasks.iter().position(|t| t.name == name) {
            Some(pos) => {
                let task = self.tasks.remove(pos);
                self.killed.push(task.name);
                true
            }
            None => false,
        }
    }

    fn scheduler_pkill_all(&mut self) -> usize {
        let count = self.tasks.len();
        for task in self.tasks.drain(..) {
            self.killed.push(task.name);
        }
        count
    }

    fn scheduler_reset_stats(&mut self) {
        self.reset_called = true;
    }

    fn scheduler_for_each_task(&self, f: &mut dyn FnMut(TaskStats)) {
        for t in &self.tasks {
            f(TaskStats {
                name: &t.name,
                period_us: t.period_us,
                mean_us: t.mean_us,
                min_us: t.min_us,
                max_us: t.max_us,
                state: t.state,
            });
        }
    }
}
