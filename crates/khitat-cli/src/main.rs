// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use std::process::ExitCode as ProcessExitCode;

fn main() -> ProcessExitCode {
    khitat_cli::main_entry()
}
