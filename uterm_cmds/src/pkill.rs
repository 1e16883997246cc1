//! `pkill`: terminates a scheduler task by name. Grounded in
//! `examples/original_source/apps/pkill/app.cpp`: a `-a` flag switches to "kill every
//! task with this name"; any other `-`-prefixed token is left as part of the name
//! rather than rejected; only a flag token longer than 31 bytes is reported as
//! `"invalid flag"`, mirroring the original's fixed 32-byte scratch buffer.

use uterm::{Command, RetCode, TermHandle};

const MAX_FLAG_LEN: usize = 31;

fn run(term: &mut dyn TermHandle, args: &[u8]) -> RetCode {
    match args.iter().position(|&b| b == b'-') {
        Some(dash) => {
            let mut flag_len = 0usize;
            let mut idx = dash;
            while idx < args.len() && args[idx] != b' ' {
                if flag_len >= MAX_FLAG_LEN {
                    term.print_str("invalid flag\n");
                    return RetCode::Error;
                }
                flag_len += 1;
                idx += 1;
            }
            let flag = &args[dash..dash + flag_len];
            if flag == b"-a" {
                let name_start = (dash + flag_len + 1).min(args.len());
                kill_all(term, &args[name_start..])
            } else {
                kill_one(term, args)
            }
        }
        None => kill_one(term, args),
    }
}

fn kill_all(term: &mut dyn TermHandle, name: &[u8]) -> RetCode {
    let mut killed_any = false;
    while term.scheduler_pkill(name) {
        term.print(name);
        term.print_str(" killed\n");
        killed_any = true;
    }
    if killed_any {
        RetCode::Ok
    } else {
        term.print(name);
        term.print_str(" not found\n");
        RetCode::Error
    }
}

fn kill_one(term: &mut dyn TermHandle, name: &[u8]) -> RetCode {
    if term.scheduler_pkill(name) {
        term.print(name);
        term.print_str(" killed\n");
        RetCode::Ok
    } else {
        term.print(name);
        term.print_str(" not found\n");
        RetCode::Error
    }
}

pub const COMMAND: Command = Command::new("pkill", "kill a scheduler task by name", run);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeTask, MockHandle};

    #[test]
    fn kills_a_single_named_task() {
        let mut term = MockHandle::default();
        term.tasks.push(FakeTask::running("worker"));
        assert_eq!(run(&mut term, b"worker"), RetCode::Ok);
        assert_eq!(term.killed, vec!["worker".to_string()]);
        assert!(term.output().contains("worker killed"));
    }

    #[test]
    fn reports_not_found_for_unknown_task() {
        let mut term = MockHandle::default();
        assert_eq!(run(&mut term, b"ghost"), RetCode::Error);
        assert!(term.output().contains("ghost not found"));
    }

    #[test]
    fn dash_a_flag_kills_every_task_with_that_name() {
        let mut term = MockHandle::default();
        term.tasks.push(FakeTask::running("worker"));
        term.tasks.push(FakeTask::running("worker"));
        term.tasks.push(FakeTask::running("other"));
        assert_eq!(run(&mut term, b"-a worker"), RetCode::Ok);
        assert_eq!(term.killed.len(), 2);
        assert_eq!(term.tasks.len(), 1);
        assert_eq!(term.tasks[0].name, "other");
    }

    #[test]
    fn unrecognized_flag_is_kept_as_part_of_the_name() {
        let mut term = MockHandle::default();
        term.tasks.push(FakeTask::running("-x"));
        assert_eq!(run(&mut term, b"-x"), RetCode::Ok);
        assert_eq!(term.killed, vec!["-x".to_string()]);
    }

    #[test]
    fn overlong_flag_token_is_rejected() {
        let mut term = MockHandle::default();
        let long_flag = "-".to_string() + &"z".repeat(40);
        assert_eq!(run(&mut term, long_flag.as_bytes()), RetCode::Error);
        assert!(term.output().contains("invalid flag"));
    }
}
