//! Running external commands.
//!
//! Everything goes through the [`Shell`][shell] trait so that the query
//! logic can be tested without `svn` or `git`.
//!
//! [shell]: trait.Shell.html (Shell trait)

use std::fmt;
use std::process::{Command, Stdio};

use crate::common::*;

/// A command: a program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    /// Program to run.
    pub program: String,
    /// Arguments.
    pub args: Vec<String>,
}
impl Cmd {
    /// Constructor.
    pub fn new<S, Args, A>(program: S, args: Args) -> Self
    where
        S: Into<String>,
        Args: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Cmd {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}
impl fmt::Display for Cmd {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.program)?;
        for arg in &self.args {
            write!(fmt, " {}", arg)?
        }
        Ok(())
    }
}

/// Response of a command that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Exit code, `None` if the process did not exit normally.
    pub code: Option<i32>,
    /// Standard output followed by standard error.
    pub output: String,
}
impl Response {
    /// Response of a process that exited normally.
    pub fn exited<S: Into<String>>(code: i32, output: S) -> Self {
        Response {
            code: Some(code),
            output: output.into(),
        }
    }

    /// True if the process exited normally with code `0`.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs commands.
pub trait Shell {
    /// Runs a command and waits for it to terminate.
    ///
    /// Fails if the command cannot be spawned or its output cannot be read.
    fn exec(&mut self, cmd: &Cmd) -> IoRes<Response>;
}

/// Exit code of a shell for commands that do not exist.
const NOT_FOUND_CODE: i32 = 127;

/// Runs commands on the actual system.
///
/// Commands run with `LC_ALL=C` so that their output is not localized.
#[derive(Debug, Default, Clone, Copy)]
pub struct System;
impl Shell for System {
    fn exec(&mut self, cmd: &Cmd) -> IoRes<Response> {
        let out = Command::new(&cmd.program)
            .args(&cmd.args)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .output()?;
        let mut output = String::from_utf8_lossy(&out.stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(&out.stderr));
        Ok(Response {
            code: out.status.code(),
            output,
        })
    }
}

/// Runs a command, yields its output if it exited normally with code `0`.
///
/// Failures are not errors, they are only reported in verbose mode.
pub fn run<S: Shell>(shell: &mut S, conf: &Config, cmd: &Cmd) -> Option<String> {
    log! { conf, @debug "\nSending query: \"{}\"", cmd }

    let res = match shell.exec(cmd) {
        Ok(res) => res,
        Err(e) => {
            log! { conf, @debug "-> Cannot run `{}`: {}", cmd, e }
            if e.kind() == ::std::io::ErrorKind::NotFound {
                not_installed_hint(conf, cmd)
            }
            return None;
        }
    };

    if_debug! { conf =>
        println!("Got response:\n[{}]", res.output);
        match res.code {
            Some(code) => println!("exit code: {}", code),
            None => println!("process did not exit normally"),
        }
    }

    if res.success() {
        Some(res.output)
    } else {
        if res.code == Some(NOT_FOUND_CODE) {
            not_installed_hint(conf, cmd)
        }
        None
    }
}

/// Tells the user the program of a command is probably not installed.
fn not_installed_hint(conf: &Config, cmd: &Cmd) {
    log! { conf, @verb "\n{} is probably not installed.", conf.emph(&cmd.program) }
}

#[cfg(all(test, not(windows)))]
mod test {
    use super::*;

    #[test]
    fn system_runs_in_the_c_locale() {
        let cmd = Cmd::new(
            "sh",
            vec!["-c", "printf %s \"$LC_ALL\"; printf e >&2; exit 3"],
        );
        let res = System.exec(&cmd).unwrap();
        assert_eq!(res.output, "Ce");
        assert_eq!(res.code, Some(3));
        assert!(!res.success())
    }

    #[test]
    fn system_output_on_success() {
        let cmd = Cmd::new("sh", vec!["-c", "echo out; echo err >&2"]);
        let res = System.exec(&cmd).unwrap();
        assert!(res.success());
        assert_eq!(res.output, "out\nerr\n");

        let conf = Config::new(".");
        assert_eq!(run(&mut System, &conf, &cmd).as_deref(), Some("out\nerr\n"))
    }

    #[test]
    fn system_missing_program() {
        let cmd = Cmd::new("autorevision-no-such-program", vec!["--version"]);
        match System.exec(&cmd) {
            Err(e) => assert_eq!(e.kind(), ::std::io::ErrorKind::NotFound),
            Ok(res) => panic!("expected an error, got {:?}", res),
        }
    }

    #[test]
    fn run_fails_quietly() {
        let conf = Config::new(".");
        let failing = Cmd::new("sh", vec!["-c", "echo nope; exit 1"]);
        assert_eq!(run(&mut System, &conf, &failing), None);
        let missing = Cmd::new("autorevision-no-such-program", Vec::<String>::new());
        assert_eq!(run(&mut System, &conf, &missing), None)
    }
}
