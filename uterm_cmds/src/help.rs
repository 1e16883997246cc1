//! `help`: lists every registered command with a fixed-width, right-aligned name
//! column. Grounded in `examples/original_source/apps/help/app.cpp`'s
//! `"  % 8s: %s"` format string.

use heapless::String as HString;

use uterm::{Command, RetCode, TermHandle};

const NAME_COLUMN: usize = 8;

fn run(term: &mut dyn TermHandle, _args: &[u8]) -> RetCode {
    // `for_each_command` only hands out `&self`; building the whole listing into a
    // local buffer first (rather than calling `term.print` from inside the iteration
    // closure) avoids borrowing `term` both shared and mutably at once.
    let mut output: HString<1024> = HString::new();
    term.for_each_command(&mut |name, description| {
        let _ = output.push_str("  ");
        for _ in name.len()..NAME_COLUMN {
            let _ = output.push(' ');
        }
        let _ = output.push_str(name);
        let _ = output.push_str(": ");
        let _ = output.push_str(description);
        let _ = output.push('\n');
    });
    term.print(output.as_bytes());
    RetCode::Ok
}

pub const COMMAND: Command = Command::new("help", "list commands and descriptions", run);
