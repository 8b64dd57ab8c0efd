//! `skillcheck` binary entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    skillcheck::exit_code(skillcheck::execute_from_env())
}
