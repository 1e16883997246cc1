//! Command table (spec.md §3/§4.4): an append-only, registration-ordered list of
//! built-ins, matched against typed input with a first-match-wins prefix scan.

use heapless::Vec as HVec;

use crate::term_handle::{RetCode, TermHandle};

/// One registered command. `init`/`exit` are optional; `run` is required. Plain
/// function items, not boxed closures — no captured context, per SPEC_FULL.md §6's
/// resolution of the command ABI's "context pointer" design note.
#[derive(Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    pub init: Option<fn(&mut dyn TermHandle, &[u8]) -> bool>,
    pub run: fn(&mut dyn TermHandle, &[u8]) -> RetCode,
    pub exit: Option<fn(&mut dyn TermHandle, &[u8]) -> bool>,
}

impl Command {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        run: fn(&mut dyn TermHandle, &[u8]) -> RetCode,
    ) -> Self {
        debug_assert!(name.len() <= 8, "command name must fit the original 8-byte field");
        debug_assert!(description.len() <= 63, "command description must fit the original 63-byte field");
        Self {
            name,
            description,
            init: None,
            run,
            exit: None,
        }
    }

    pub const fn with_init(mut self, init: fn(&mut dyn TermHandle, &[u8]) -> bool) -> Self {
        self.init = Some(init);
        self
    }

    pub const fn with_exit(mut self, exit: fn(&mut dyn TermHandle, &[u8]) -> bool) -> Self {
        self.exit = Some(exit);
        self
    }
}

/// Fixed-capacity, registration-ordered command table.
pub struct CommandRegistry<const N: usize> {
    commands: HVec<Command, N>,
}

impl<const N: usize> CommandRegistry<N> {
    pub const fn new() -> Self {
        Self { commands: HVec::new() }
    }

    /// Registers a command. Returns `false` if the registry is already full.
    pub fn add(&mut self, command: Command) -> bool {
        self.commands.push(command).is_ok()
    }

    pub fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// First-match-wins prefix scan (spec.md §4.2): a command matches if `typed` is a
    /// byte-for-byte prefix of its stored name, scanned in registration order. An empty
    /// `typed` matches the first registered command, matching `strncmp(name, typed, 0)
    /// == 0` (spec.md §9 Open Question, resolved).
    pub fn find_prefix(&self, typed: &[u8]) -> Option<usize> {
        self.commands.iter().position(|cmd| {
            let name = cmd.name.as_bytes();
            typed.len() <= name.len() && name[..typed.len()] == *typed
        })
    }
}

impl<const N: usize> Default for CommandRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}
