#![cfg_attr(not(test), no_std)]

//! Built-in commands for the `uterm` shell core: `clear`, `help`, `pkill`, `top`.
//! Each is grounded in the matching app under `examples/original_source/apps/` and
//! exposed as a `uterm::Command` constant plus, where useful, its raw `run`/`init`/
//! `exit` functions for direct testing.

mod clear;
mod help;
mod pkill;
mod top;

#[cfg(test)]
mod test_support;

pub use clear::COMMAND as CLEAR;
pub use help::COMMAND as HELP;
pub use pkill::COMMAND as PKILL;
pub use top::COMMAND as TOP;

use uterm::{ByteSink, Scheduler, Terminal};

/// Registers every built-in command on `term`, in the order `help` lists them.
/// Returns `false` if any registration failed (the registry ran out of slots).
pub fn register_all<
    S,
    SCH,
    const MAX_COMMANDS: usize,
    const RING: usize,
    const LINE: usize,
    const HIST_N: usize,
    const HIST_L: usize,
>(
    term: &mut Terminal<S, SCH, MAX_COMMANDS, RING, LINE, HIST_N, HIST_L>,
) -> bool
where
    S: ByteSink,
    SCH: Scheduler,
{
    // `&`, not `&&`: every command gets a registration attempt regardless of earlier
    // failures, so a too-small `MAX_COMMANDS` doesn't silently drop the later ones.
    term.register(CLEAR) & term.register(HELP) & term.register(PKILL) & term.register(TOP)
}
