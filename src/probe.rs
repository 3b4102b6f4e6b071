//! Checks which version-control tools are available.

use crate::cmd::{self, Cmd, Shell};
use crate::common::*;

/// A version-control tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Subversion.
    Svn,
    /// Git, used through `git svn`.
    Git,
}
impl Tool {
    /// Name of the executable.
    pub fn program(self) -> &'static str {
        match self {
            Tool::Svn => "svn",
            Tool::Git => "git",
        }
    }

    /// Name for messages.
    pub fn name(self) -> &'static str {
        match self {
            Tool::Svn => "Svn",
            Tool::Git => "Git",
        }
    }
}

/// True if `<tool> --version` exits normally with code `0`.
pub fn probe<S: Shell>(shell: &mut S, conf: &Config, tool: Tool) -> bool {
    log! { conf, @verb_inline "Checking if {} exists... ", tool.program() }
    let cmd = Cmd::new(tool.program(), ["--version"]);
    let found = cmd::run(shell, conf, &cmd).is_some();
    if found {
        log! { conf, @verb "{}", conf.happy("Found") }
    } else {
        log! { conf, @verb "{}", conf.sad("Not found") }
    }
    found
}

/// Availability of the tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tools {
    /// Svn is available.
    pub svn: bool,
    /// Git is available.
    pub git: bool,
}
impl Tools {
    /// Probes svn, then git. Warns about the ones missing.
    pub fn probe<S: Shell>(shell: &mut S, conf: &Config) -> Self {
        let svn = probe(shell, conf, Tool::Svn);
        let git = probe(shell, conf, Tool::Git);
        for (tool, found) in [(Tool::Svn, svn), (Tool::Git, git)] {
            if !found {
                log! { conf, @warn
                    "{} not found, skipping querying {}...", tool.name(), tool.program()
                }
            }
        }
        Tools { svn, git }
    }

    /// True if a tool is available.
    pub fn has(&self, tool: Tool) -> bool {
        match tool {
            Tool::Svn => self.svn,
            Tool::Git => self.git,
        }
    }
}
