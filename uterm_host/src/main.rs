//! Hosted demo: drives a [`uterm::Terminal`] off real stdin/stdout, one byte per read,
//! the way a UART ISR would feed `Terminal::input` on a target. No real preemptive
//! scheduler is wired up here — `top`'s periodic redraw is a Non-goal of this demo, not
//! of the shell core itself, which only needs a [`uterm::Scheduler`] implementation.

mod raw_mode;

use std::io::{self, Read, Write};

use raw_mode::RawMode;
use uterm::{ByteSink, NullScheduler, Terminal};

struct StdoutSink;

impl ByteSink for StdoutSink {
    fn write(&mut self, bytes: &[u8]) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(bytes);
        let _ = stdout.flush();
    }
}

fn main() {
    let _raw = RawMode::new(0);

    let mut term: Terminal<StdoutSink, NullScheduler, 8> = Terminal::new(StdoutSink, NullScheduler);
    uterm_cmds::register_all(&mut term);

    io::stdout().write_all(b"\r\n\x1b[2K> ").ok();
    io::stdout().flush().ok();

    let stdin = io::stdin();
    let mut handle = stdin.lock();
    let mut byte = [0u8; 1];
    loop {
        match handle.read(&mut byte) {
            Ok(0) => break,
            Ok(_) => {
                term.input(byte[0]);
                term.tick();
            }
            Err(_) => break,
        }
    }
}
