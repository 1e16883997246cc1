//! `clear`: erases the screen and homes the cursor. Grounded in
//! `examples/original_source/apps/clear/app.cpp`.

use uterm::{Command, RetCode, TermHandle};

fn run(term: &mut dyn TermHandle, _args: &[u8]) -> RetCode {
    term.print(b"\x1b[2J");
    term.print(b"\x1b[H");
    RetCode::Ok
}

pub const COMMAND: Command = Command::new("clear", "clear the screen", run);
