//! Autorevision queries the revision of an [svn] working copy and writes it
//! to a C++ header, as constants the build can use.
//!
//! The revision is obtained by trying, in order, `svn info --xml`, plain
//! `svn info`, and `git svn info` for git mirrors of svn repositories. The
//! header is only rewritten when its content actually changes, so that the
//! build does not recompile whatever includes it for nothing.
//!
//! [svn]: https://subversion.apache.org/ (Subversion website)

#![doc(test(attr(deny(warnings))))]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate clap;

pub mod errors;
#[macro_use]
pub mod common;
pub mod cmd;
pub mod header;
pub mod probe;
pub mod query;

use crate::cmd::{Shell, System};
use crate::common::*;
use crate::header::Status;

/// Queries the revision of the working directory and writes the header.
pub fn work(conf: &Config) -> Res<Status> {
    work_with(&mut System, conf)
}

/// Same as [`work`][work], running commands through some shell.
///
/// [work]: fn.work.html (work function)
pub fn work_with<S: Shell>(shell: &mut S, conf: &Config) -> Res<Status> {
    if conf.debug() {
        conf.dump()
    }

    if !conf.output.any() {
        bail!(ErrorKind::NoRepresentation)
    }

    let revision = revision(shell, conf);
    header::write(conf, &conf.out_file, &revision)
}

/// The revision to write: the queried one, with the override from the
/// configuration if any.
///
/// Never fails, falls back on [`Revision::unknown`][unknown].
///
/// [unknown]: common/struct.Revision.html#method.unknown
/// (unknown constructor of Revision)
pub fn revision<S: Shell>(shell: &mut S, conf: &Config) -> Revision {
    let mut revision = match query::work(shell, conf, &conf.dir) {
        Some((strategy, revision)) => {
            log! { conf, @debug "-> revision obtained through {}", strategy.desc() }
            revision
        }
        None => {
            log! { conf, @warn "Could not get revision info from svn or git-svn." }
            Revision::unknown()
        }
    };

    if let Some(rev) = conf.revision.as_ref() {
        log! { conf, @verb "Overriding revision number with {}", conf.emph(rev) }
        revision.rev = rev.clone()
    }

    revision
}
