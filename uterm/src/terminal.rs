//! The top-level dispatcher (spec.md §4.2): a state machine driven by periodic
//! `tick()` calls, transitioning between Idle and Live exactly as the original
//! `cgx::term::term_t::run()` does, translated into this crate's table-driven registry
//! and typed return codes in place of `std::function` closures and a raw context
//! pointer (SPEC_FULL.md §6).

use crate::command::{Command, CommandRegistry};
use crate::config::{Config, HISTORY_DEPTH, HISTORY_ENTRY_CAPACITY, LINE_CAPACITY, RING_CAPACITY};
use crate::editor::{DrainOutcome, LineEditor};
use crate::line::LineBuffer;
use crate::logger::{log, LogLevel};
use crate::ring::ByteRing;
use crate::scheduler::Scheduler;
use crate::sink::ByteSink;
use crate::term_handle::{RetCode, TaskStats, TermHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Live { cmd_index: usize },
}

/// Owns every collaborator named in spec.md §2 and drives the dispatch state machine.
/// `S` is the byte sink, `SCH` the scheduler; `MAX_COMMANDS` bounds the command table,
/// the rest default to the sizes in [`crate::config`].
pub struct Terminal<
    S,
    SCH,
    const MAX_COMMANDS: usize,
    const RING: usize = RING_CAPACITY,
    const LINE: usize = LINE_CAPACITY,
    const HIST_N: usize = HISTORY_DEPTH,
    const HIST_L: usize = HISTORY_ENTRY_CAPACITY,
> where
    S: ByteSink,
    SCH: Scheduler,
{
    sink: S,
    scheduler: SCH,
    ring: ByteRing<RING>,
    editor: LineEditor<LINE, HIST_N, HIST_L>,
    registry: CommandRegistry<MAX_COMMANDS>,
    state: State,
    config: Config,
}

impl<S, SCH, const MAX_COMMANDS: usize, const RING: usize, const LINE: usize, const HIST_N: usize, const HIST_L: usize>
    Terminal<S, SCH, MAX_COMMANDS, RING, LINE, HIST_N, HIST_L>
where
    S: ByteSink,
    SCH: Scheduler,
{
    pub fn new(sink: S, scheduler: SCH) -> Self {
        Self::with_config(sink, scheduler, Config::default())
    }

    pub fn with_config(sink: S, scheduler: SCH, config: Config) -> Self {
        Self {
            sink,
            scheduler,
            ring: ByteRing::new(),
            editor: LineEditor::new(),
            registry: CommandRegistry::new(),
            state: State::Idle,
            config,
        }
    }

    /// Registers a command. Returns `false` if the registry is already full.
    pub fn register(&mut self, command: Command) -> bool {
        let ok = self.registry.add(command);
        if !ok {
            log(LogLevel::Warn, "command registry full, registration rejected");
        }
        ok
    }

    /// Byte producer contract (spec.md §6): safe to call from an interrupt handler.
    pub fn input(&mut self, byte: u8) {
        let dropped_before = self.ring.dropped();
        self.ring.push(byte);
        if self.ring.dropped() != dropped_before {
            log(LogLevel::Warn, "byte ring overflow, oldest unread byte discarded");
        }
    }

    pub fn input_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.input(b);
        }
    }

    /// Number of input bytes silently dropped to ring overflow so far.
    pub fn dropped_input_bytes(&self) -> usize {
        self.ring.dropped()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::Idle)
    }

    /// One cooperative dispatch step (spec.md §4.2). Never blocks.
    pub fn tick(&mut self) {
        let outcome = {
            let ring = &self.ring;
            let sink = &mut self.sink;
            self.editor.drain(ring, sink)
        };
        match self.state {
            State::Idle => self.tick_idle(outcome),
            State::Live { cmd_index } => self.tick_live(cmd_index, outcome),
        }
    }

    fn tick_idle(&mut self, outcome: DrainOutcome) {
        match outcome {
            DrainOutcome::NoChange | DrainOutcome::PartialEdit => {}
            DrainOutcome::CtrlC => {
                self.editor.clear_line();
                self.prompt();
            }
            DrainOutcome::LineCommitted => {
                let line = self.editor.take_line();
                self.dispatch_committed(line);
            }
        }
    }

    fn tick_live(&mut self, cmd_index: usize, outcome: DrainOutcome) {
        match outcome {
            DrainOutcome::NoChange | DrainOutcome::PartialEdit => {}
            DrainOutcome::CtrlC => {
                self.editor.clear_line();
                self.run_exit(cmd_index, b"");
                self.print_error(b"Killed by user");
                self.state = State::Idle;
                self.prompt();
            }
            DrainOutcome::LineCommitted => {
                let line = self.editor.take_line();
                let run = match self.registry.get(cmd_index) {
                    Some(cmd) => cmd.run,
                    None => {
                        self.state = State::Idle;
                        self.prompt();
                        return;
                    }
                };
                let ret = run(self, line.as_bytes());
                self.finish(cmd_index, ret);
            }
        }
    }

    fn dispatch_committed(&mut self, line: LineBuffer<LINE>) {
        let bytes = line.as_bytes();
        if bytes.is_empty() {
            self.prompt();
            return;
        }
        let split_at = bytes.iter().position(|&b| b == b' ');
        let (name, args) = match split_at {
            Some(idx) => (&bytes[..idx], &bytes[idx + 1..]),
            None => (bytes, &bytes[0..0]),
        };
        match self.registry.find_prefix(name) {
            None => {
                self.print(b"\n");
                self.print_error(b"Command not found");
                self.prompt();
            }
            Some(idx) => {
                self.print(b"\n");
                let cmd = *self.registry.get(idx).expect("index from find_prefix is valid");
                if let Some(init) = cmd.init {
                    if !init(self, args) {
                        self.print_error(b"Error calling command");
                        self.prompt();
                        return;
                    }
                }
                let ret = (cmd.run)(self, args);
                self.finish(idx, ret);
            }
        }
    }

    fn finish(&mut self, cmd_index: usize, ret: RetCode) {
        match ret {
            RetCode::Alive => {
                self.state = State::Live { cmd_index };
            }
            RetCode::Ok => {
                self.run_exit(cmd_index, b"");
                self.state = State::Idle;
                self.prompt();
            }
            RetCode::Error => {
                self.run_exit(cmd_index, b"");
                self.print_error(b"Exit with error");
                self.state = State::Idle;
                self.prompt();
            }
            RetCode::Killed => {
                self.run_exit(cmd_index, b"");
                self.state = State::Idle;
                self.prompt();
            }
        }
    }

    fn run_exit(&mut self, cmd_index: usize, args: &[u8]) {
        let exit = self.registry.get(cmd_index).and_then(|cmd| cmd.exit);
        if let Some(exit) = exit {
            let _ = exit(self, args);
        }
    }

    fn prompt(&mut self) {
        let prompt = self.config.prompt;
        self.sink.write(prompt.as_bytes());
    }

    fn print_error(&mut self, message: &[u8]) {
        self.sink.write(b"\x1b[31m");
        self.sink.write(message);
        self.sink.write(b"\x1b[0m");
    }
}

impl<S, SCH, const MAX_COMMANDS: usize, const RING: usize, const LINE: usize, const HIST_N: usize, const HIST_L: usize>
    TermHandle for Terminal<S, SCH, MAX_COMMANDS, RING, LINE, HIST_N, HIST_L>
where
    S: ByteSink,
    SCH: Scheduler,
{
    fn print(&mut self, bytes: &[u8]) {
        self.sink.write(bytes);
    }

    fn for_each_command(&self, f: &mut dyn FnMut(&str, &str)) {
        for cmd in self.registry.iter() {
            f(cmd.name, cmd.description);
        }
    }

    fn scheduler_add(&mut self, name: &str, period_us: u64, task: fn(&mut dyn TermHandle) -> bool) -> bool {
        let ok = self.scheduler.add(name, period_us, task);
        if !ok {
            log(LogLevel::Warn, "scheduler: task registration rejected");
        }
        ok
    }

    fn scheduler_pkill(&mut self, name: &[u8]) -> bool {
        self.scheduler.pkill(name)
    }

    fn scheduler_pkill_all(&mut self) -> usize {
        self.scheduler.pkill_all()
    }

    fn scheduler_reset_stats(&mut self) {
        self.scheduler.reset_stats();
    }

    fn scheduler_for_each_task(&self, f: &mut dyn FnMut(TaskStats)) {
        self.scheduler.for_each_task(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::NullScheduler;
    use crate::sink::test_support::RecordingSink;

    fn echo_run(term: &mut dyn TermHandle, args: &[u8]) -> RetCode {
        term.print_str("echo:");
        term.print(args);
        RetCode::Ok
    }

    fn failing_run(term: &mut dyn TermHandle, _args: &[u8]) -> RetCode {
        term.print_str("boom");
        RetCode::Error
    }

    fn alive_run(_term: &mut dyn TermHandle, _args: &[u8]) -> RetCode {
        RetCode::Alive
    }

    fn counted_exit(term: &mut dyn TermHandle, _args: &[u8]) -> bool {
        term.print_str("[exited]");
        true
    }

    fn demo_terminal() -> Terminal<RecordingSink, NullScheduler, 4, 64, 64, 4, 32> {
        let mut term = Terminal::new(RecordingSink::default(), NullScheduler);
        term.register(Command::new("echo", "echo arguments back", echo_run));
        term.register(Command::new("fail", "always errors", failing_run));
        term.register(Command::new("live", "stays alive until killed", alive_run).with_exit(counted_exit));
        term
    }

    fn output(term: &Terminal<RecordingSink, NullScheduler, 4, 64, 64, 4, 32>) -> &str {
        term.sink.as_str()
    }

    #[test]
    fn unknown_command_reports_not_found() {
        let mut term = demo_terminal();
        term.input_bytes(b"zzz\n");
        term.tick();
        assert!(output(&term).contains("Command not found"));
        assert!(term.is_idle());
    }

    #[test]
    fn known_command_runs_and_returns_to_idle() {
        let mut term = demo_terminal();
        term.input_bytes(b"echo hello\n");
        term.tick();
        assert!(output(&term).contains("echo:hello"));
        assert!(term.is_idle());
    }

    #[test]
    fn prefix_match_dispatches_to_full_name() {
        let mut term = demo_terminal();
        term.input_bytes(b"ec hi\n");
        term.tick();
        assert!(output(&term).contains("echo:hi"));
    }

    #[test]
    fn error_return_code_is_reported_and_returns_to_idle() {
        let mut term = demo_terminal();
        term.input_bytes(b"fail\n");
        term.tick();
        assert!(output(&term).contains("boom"));
        assert!(output(&term).contains("Exit with error"));
        assert!(term.is_idle());
    }

    #[test]
    fn alive_command_stays_live_until_killed_by_ctrl_c() {
        let mut term = demo_terminal();
        term.input_bytes(b"live\n");
        term.tick();
        assert!(!term.is_idle());

        term.input(0x03);
        term.tick();
        assert!(term.is_idle());
        assert!(output(&term).contains("[exited]"));
        assert!(output(&term).contains("Killed by user"));
    }

    #[test]
    fn empty_line_just_reprompts() {
        let mut term = demo_terminal();
        term.input(b'\n');
        term.tick();
        assert!(term.is_idle());
    }

    #[test]
    fn ctrl_c_while_idle_only_clears_the_line() {
        let mut term = demo_terminal();
        term.input_bytes(b"ec");
        term.tick();
        term.input(0x03);
        term.tick();
        assert!(term.is_idle());
        assert!(!output(&term).contains("Killed by user"));
    }
}
