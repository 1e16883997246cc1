//! Raw-mode guard for `uterm_host`'s blocking stdin reader. `main.rs`'s loop reads one
//! byte at a time and feeds it straight to `Terminal::input`, so all this needs to do
//! is turn off the terminal's own line buffering and echo for the lifetime of that loop
//! and restore them on drop. Unix-only: this binary is a demo harness built around one
//! blocking read loop, not a portable terminal app, so a Windows console-mode path
//! would be unexercised code with nothing in `uterm` to ground it against.

use termios::*;

pub struct RawMode {
    fd: i32,
    original: Termios,
}

impl RawMode {
    /// `fd` is the file descriptor to read terminal settings from (0 for stdin).
    pub fn new(fd: i32) -> Self {
        let original = Termios::from_fd(fd).expect("stdin must be a terminal");
        let mut raw = original;
        raw.c_lflag &= !(ICANON | ECHO);
        tcsetattr(fd, TCSANOW, &raw).expect("failed to enable raw mode");
        RawMode { fd, original }
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = tcsetattr(self.fd, TCSANOW, &self.original);
    }
}
