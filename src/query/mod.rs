//! Revision query strategies.
//!
//! Three strategies, tried in this order until one succeeds:
//!
//! - [`SvnXml`][xml]: `svn info --xml --non-interactive <dir>` ;
//! - [`SvnText`][text]: `svn info --non-interactive <dir>`, for old svn
//!   versions ;
//! - [`GitSvn`][git]: `git svn info <dir>`, for git mirrors of svn
//!   repositories.
//!
//! The last two share the same plain-text parser.
//!
//! [xml]: enum.Strategy.html#variant.SvnXml (SvnXml variant)
//! [text]: enum.Strategy.html#variant.SvnText (SvnText variant)
//! [git]: enum.Strategy.html#variant.GitSvn (GitSvn variant)

use crate::cmd::{self, Cmd, Shell};
use crate::common::*;
use crate::probe::{Tool, Tools};

pub mod text;
pub mod xml;


pub use self::text::parse_text;
pub use self::xml::parse_xml;

/// A way to query the revision of a working directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `svn info` in XML mode.
    SvnXml,
    /// `svn info` in plain-text mode.
    SvnText,
    /// `git svn info`.
    GitSvn,
}
impl Strategy {
    /// All strategies, in the order they are tried.
    pub const ALL: [Strategy; 3] = [Strategy::SvnXml, Strategy::SvnText, Strategy::GitSvn];

    /// Tool the strategy relies on.
    pub fn tool(self) -> Tool {
        match self {
            Strategy::SvnXml | Strategy::SvnText => Tool::Svn,
            Strategy::GitSvn => Tool::Git,
        }
    }

    /// Short description.
    pub fn desc(self) -> &'static str {
        match self {
            Strategy::SvnXml => "svn",
            Strategy::SvnText => "svn (old style)",
            Strategy::GitSvn => "git-svn",
        }
    }

    /// Command querying some working directory.
    pub fn cmd(self, dir: &str) -> Cmd {
        match self {
            Strategy::SvnXml => Cmd::new("svn", ["info", "--xml", "--non-interactive", dir]),
            Strategy::SvnText => Cmd::new("svn", ["info", "--non-interactive", dir]),
            Strategy::GitSvn => Cmd::new("git", ["svn", "info", dir]),
        }
    }

    /// Parses the output of the command.
    pub fn parse(self, output: &str) -> Res<Revision> {
        match self {
            Strategy::SvnXml => parse_xml(output),
            Strategy::SvnText | Strategy::GitSvn => parse_text(output),
        }
    }

    /// True if the strategy should run.
    pub fn is_active(self, conf: &Config, tools: &Tools) -> bool {
        tools.has(self.tool()) && !(self == Strategy::GitSvn && conf.skip_git_svn)
    }

    /// Runs the strategy on a working directory.
    pub fn query<S: Shell>(self, shell: &mut S, conf: &Config, dir: &str) -> Option<Revision> {
        log! { conf, @verb_inline "Querying {} for revision info... ", self.desc() }

        let output = match cmd::run(shell, conf, &self.cmd(dir)) {
            Some(output) => output,
            None => {
                log! { conf, @verb "{}", conf.sad("Unsuccessful") }
                log! { conf, @debug "-> {} did not exit successfully.", self.tool().name() }
                return None;
            }
        };

        match self.parse(&output) {
            Ok(revision) => {
                log! { conf, @verb "{}", conf.happy("Success") }
                log! { conf, @verb "    Found revision: {}", conf.emph(&revision.rev) }
                log! { conf, @verb "    Found date:     {}", conf.emph(&revision.date) }
                Some(revision)
            }
            Err(e) => {
                log! { conf, @verb "{}", conf.sad("Unsuccessful") }
                log! { conf, @verb "-> {} response: {}", self.desc(), e }
                None
            }
        }
    }
}

/// Probes the tools and runs the active strategies in order, stops at the
/// first success.
pub fn work<S: Shell>(shell: &mut S, conf: &Config, dir: &str) -> Option<(Strategy, Revision)> {
    let tools = Tools::probe(shell, conf);
    Strategy::ALL
        .iter()
        .filter(|strategy| strategy.is_active(conf, &tools))
        .find_map(|strategy| {
            strategy
                .query(shell, conf, dir)
                .map(|revision| (*strategy, revision))
        })
}
