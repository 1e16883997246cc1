//! Declarative, type-directed argument parser (spec.md §4.3): scans the raw argument
//! byte string for `-<id>=<value>`/`-<id>` tokens, or the first bare positional token.
//! Tagged-variant kinds per SPEC_FULL.md §4.3: `{Bool, Int, UInt, Float, Str,
//! Positional}`.

use crate::term_handle::TermHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Bool,
    Int,
    UInt,
    Float,
    Str,
    Positional,
}

#[derive(Debug, Clone, Copy)]
enum ParamValue<'a> {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(&'a [u8]),
    Positional(Option<&'a [u8]>),
}

/// One parsed parameter. Constructing a `Param` immediately scans `args`; `valid()`
/// reports whether the corresponding token was present and well-formed.
#[derive(Debug, Clone, Copy)]
pub struct Param<'a> {
    id: char,
    description: &'static str,
    value: ParamValue<'a>,
    valid: bool,
}

fn token_end(args: &[u8], start: usize) -> usize {
    args[start..]
        .iter()
        .position(|&b| b == b' ')
        .map_or(args.len(), |i| start + i)
}

fn find_flag(args: &[u8], id: char, with_equals: bool) -> Option<usize> {
    let id_byte = id as u8;
    let mut i = 0;
    while i + 1 < args.len() {
        if args[i] == b'-' && args[i + 1] == id_byte {
            if with_equals {
                if i + 2 < args.len() && args[i + 2] == b'=' {
                    return Some(i);
                }
            } else {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

impl<'a> Param<'a> {
    /// `-<id>` boolean flag.
    pub fn bool(id: char, description: &'static str, args: &'a [u8]) -> Self {
        let present = find_flag(args, id, false).is_some();
        Self {
            id,
            description,
            value: ParamValue::Bool(present),
            valid: present,
        }
    }

    /// `-<id>=<decimal>` signed integer.
    pub fn int(id: char, description: &'static str, args: &'a [u8]) -> Self {
        Self::numeric(id, description, args, ParamValue::Int(0), |s| {
            s.parse::<i64>().ok().map(ParamValue::Int)
        })
    }

    /// `-<id>=<decimal>` unsigned integer.
    pub fn uint(id: char, description: &'static str, args: &'a [u8]) -> Self {
        Self::numeric(id, description, args, ParamValue::UInt(0), |s| {
            s.parse::<u64>().ok().map(ParamValue::UInt)
        })
    }

    /// `-<id>=<float>`.
    pub fn float(id: char, description: &'static str, args: &'a [u8]) -> Self {
        Self::numeric(id, description, args, ParamValue::Float(0.0), |s| {
            s.parse::<f64>().ok().map(ParamValue::Float)
        })
    }

    fn numeric(
        id: char,
        description: &'static str,
        args: &'a [u8],
        default: ParamValue<'a>,
        parse: impl FnOnce(&str) -> Option<ParamValue<'a>>,
    ) -> Self {
        match Self::typed_tail(args, id) {
            Some(tail) => match core::str::from_utf8(tail).ok().and_then(parse) {
                Some(value) => Self { id, description, value, valid: true },
                None => Self { id, description, value: default, valid: false },
            },
            None => Self { id, description, value: default, valid: false },
        }
    }

    /// `-<id>=<token>`, the raw bytes up to the next whitespace or end of string.
    pub fn string(id: char, description: &'static str, args: &'a [u8]) -> Self {
        match Self::typed_tail(args, id) {
            Some(tail) => Self { id, description, value: ParamValue::Str(tail), valid: true },
            None => Self { id, description, value: ParamValue::Str(&[]), valid: false },
        }
    }

    /// The sentinel positional parameter (id `' '`): the first token not introduced by
    /// `-`.
    pub fn positional(description: &'static str, args: &'a [u8]) -> Self {
        let mut i = 0;
        while i < args.len() {
            while i < args.len() && args[i] == b' ' {
                i += 1;
            }
            if i >= args.len() {
                break;
            }
            let end = token_end(args, i);
            if args[i] != b'-' {
                return Self {
                    id: ' ',
                    description,
                    value: ParamValue::Positional(Some(&args[i..end])),
                    valid: true,
                };
            }
            i = end;
        }
        Self {
            id: ' ',
            description,
            value: ParamValue::Positional(None),
            valid: false,
        }
    }

    fn typed_tail(args: &'a [u8], id: char) -> Option<&'a [u8]> {
        let start = find_flag(args, id, true)? + 3;
        let end = token_end(args, start);
        Some(&args[start..end])
    }

    pub fn id(&self) -> char {
        self.id
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Whether the token was present (for `Bool`) or present and well-formed
    /// (everything else).
    pub fn valid(&self) -> bool {
        self.valid
    }

    pub fn kind(&self) -> ParamKind {
        match self.value {
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::UInt(_) => ParamKind::UInt,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Str(_) => ParamKind::Str,
            ParamValue::Positional(_) => ParamKind::Positional,
        }
    }

    pub fn as_bool(&self) -> bool {
        matches!(self.value, ParamValue::Bool(true))
    }

    pub fn as_int(&self) -> i64 {
        match self.value {
            ParamValue::Int(v) => v,
            _ => 0,
        }
    }

    pub fn as_uint(&self) -> u64 {
        match self.value {
            ParamValue::UInt(v) => v,
            _ => 0,
        }
    }

    pub fn as_float(&self) -> f64 {
        match self.value {
            ParamValue::Float(v) => v,
            _ => 0.0,
        }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        match self.value {
            ParamValue::Str(v) => v,
            ParamValue::Positional(Some(v)) => v,
            _ => &[],
        }
    }
}

/// Checks for `-h` and, if present, prints a usage line plus one description line per
/// parameter (spec.md §4.3's help generator). Returns `true` if the caller should stop
/// without executing its body.
pub fn param_help(term: &mut dyn TermHandle, cmd_name: &str, args: &[u8], params: &[Param]) -> bool {
    let help = Param::bool('h', "show this help", args);
    if !help.valid() {
        return false;
    }
    term.print_str("Usage: ");
    term.print_str(cmd_name);
    for p in params {
        term.print_str(" ");
        match p.kind() {
            ParamKind::Bool => term.print(&[b'-', p.id() as u8]),
            ParamKind::Positional => term.print_str("INPUT"),
            _ => {
                term.print(&[b'-', p.id() as u8]);
                term.print_str("=X");
            }
        }
    }
    term.print_str("\n");
    for p in params {
        term.print_str("  -");
        term.print(&[p.id() as u8]);
        term.print_str(": ");
        term.print_str(p.description());
        term.print_str("\n");
    }
    true
}
