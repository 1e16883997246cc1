//! `top`: a live-updating task table, registered as a periodic scheduler task while
//! alive. Grounded in `examples/original_source/apps/top/app.cpp`'s `stats_screen`:
//! ANSI-colored rows per task state and a pad-to-erase redraw (`last_lines - lines`
//! blank lines) so a shorter frame doesn't leave stale rows on screen.

use core::fmt::Write as _;
use core::sync::atomic::{AtomicUsize, Ordering};

use heapless::String as HString;

use uterm::{Command, RetCode, TaskState, TermHandle};

const HEADER: &str = "TOP (q)uit (r)eset_stats (n)ow";
const HEADER_WIDTH: usize = 93;

/// Lines drawn by the previous frame, so the next frame can blank out anything it no
/// longer needs (mirrors the original's function-static `last_lines`). `top` is a
/// singleton built-in, so one process-wide counter is the direct Rust analogue of a
/// C++ function-static local.
static LAST_LINES: AtomicUsize = AtomicUsize::new(0);

fn state_color(state: TaskState) -> &'static str {
    match state {
        TaskState::Running => "\x1b[1;32m",
        TaskState::Stopped => "\x1b[1;91m",
        TaskState::Delayed => "\x1b[31m",
        TaskState::Paused | TaskState::Invalid => "",
    }
}

fn state_label(state: TaskState) -> &'static str {
    match state {
        TaskState::Running => "O ",
        TaskState::Stopped => " S",
        TaskState::Delayed => "d ",
        TaskState::Paused => " p",
        TaskState::Invalid => " -",
    }
}

fn stats_screen(term: &mut dyn TermHandle) {
    // `scheduler_for_each_task` only hands the closure `&self`-level access, so the
    // frame is built into a local buffer first and printed once `term` is free again.
    let mut out: HString<2048> = HString::new();
    let _ = out.push_str("\x1b[2K\x1b[1m");
    for _ in HEADER.len()..HEADER_WIDTH {
        let _ = out.push(' ');
    }
    let _ = out.push_str(HEADER);
    let _ = out.push_str("\x1b[0m\n");

    let mut lines = 1usize;
    term.scheduler_for_each_task(&mut |task| {
        let _ = out.push_str("\x1b[2K");
        let _ = out.push_str(state_color(task.state));
        let _ = out.push_str(state_label(task.state));
        let _ = out.push_str(" [");
        let _ = out.push_str(task.name);
        let _ = out.push_str("] every=");
        let _ = write!(out, "{}", task.period_us);
        let _ = out.push_str("us mean=");
        let _ = write!(out, "{}", task.mean_us);
        let _ = out.push_str("us min=");
        let _ = write!(out, "{}", task.min_us);
        let _ = out.push_str("us max=");
        let _ = write!(out, "{}", task.max_us);
        let _ = out.push_str("us\x1b[0m\n");
        lines += 1;
    });

    let previous = LAST_LINES.swap(lines, Ordering::Relaxed);
    for _ in lines..previous {
        let _ = out.push_str("\x1b[2K\n");
    }
    let _ = out.push_str("\x1b[H");

    term.print(out.as_bytes());
}

fn top_tick(term: &mut dyn TermHandle) -> bool {
    stats_screen(term);
    true
}

fn init(term: &mut dyn TermHandle, _args: &[u8]) -> bool {
    term.print(b"\x1b[2J\x1b[H");
    term.scheduler_add("top", 1_000_000, top_tick)
}

fn run(term: &mut dyn TermHandle, args: &[u8]) -> RetCode {
    match args {
        b"q" => RetCode::Ok,
        b"r" => {
            term.scheduler_reset_stats();
            stats_screen(term);
            RetCode::Alive
        }
        b"n" => {
            stats_screen(term);
            RetCode::Alive
        }
        _ => RetCode::Alive,
    }
}

fn exit(term: &mut dyn TermHandle, _args: &[u8]) -> bool {
    term.scheduler_pkill(b"top");
    term.print(b"\x1b[2J\x1b[H");
    true
}

pub const COMMAND: Command = Command::new("top", "show current scheduler tasks", run)
    .with_init(init)
    .with_exit(exit);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeTask, MockHandle};

    #[test]
    fn init_registers_a_periodic_redraw_task() {
        let mut term = MockHandle::default();
        assert!(init(&mut term, b""));
        assert_eq!(term.added, vec![("top".to_string(), 1_000_000)]);
        assert!(term.output().contains("\x1b[2J"));
    }

    #[test]
    fn quit_returns_ok_without_redrawing() {
        let mut term = MockHandle::default();
        assert_eq!(run(&mut term, b"q"), RetCode::Ok);
        assert!(term.output().is_empty());
    }

    #[test]
    fn now_redraws_and_stays_alive() {
        let mut term = MockHandle::default();
        term.tasks.push(FakeTask::running("worker"));
        assert_eq!(run(&mut term, b"n"), RetCode::Alive);
        assert!(term.output().contains("worker"));
        assert!(term.output().contains(HEADER));
    }

    #[test]
    fn reset_clears_stats_before_redrawing() {
        let mut term = MockHandle::default();
        assert_eq!(run(&mut term, b"r"), RetCode::Alive);
        assert!(term.reset_called);
    }

    #[test]
    fn exit_kills_the_redraw_task_and_clears_screen() {
        let mut term = MockHandle::default();
        term.tasks.push(FakeTask::running("top"));
        assert!(exit(&mut term, b""));
        assert_eq!(term.killed, vec!["top".to_string()]);
        assert!(term.output().contains("\x1b[2J"));
    }
}
