#![cfg_attr(not(test), no_std)]

//! `no_std` core of a byte-oriented, line-editing embedded terminal: the line editor /
//! input pump, the command dispatcher, and the typed argument parser. Concrete
//! commands (`clear`, `help`, `pkill`, `top`) live in the sibling `uterm_cmds` crate;
//! this crate only defines the contracts they run against.

pub mod command;
pub mod config;
pub mod editor;
pub mod history;
pub mod line;
pub mod logger;
pub mod parser;
pub mod ring;
pub mod scheduler;
pub mod sink;
pub mod term_handle;
pub mod terminal;

pub use command::{Command, CommandRegistry};
pub use config::Config;
pub use editor::{DrainOutcome, LineEditor};
pub use history::History;
pub use line::LineBuffer;
pub use parser::{Param, ParamKind};
pub use ring::ByteRing;
pub use scheduler::{NullScheduler, Scheduler};
pub use sink::ByteSink;
pub use term_handle::{RetCode, TaskState, TaskStats, TermHandle};
pub use terminal::Terminal;
