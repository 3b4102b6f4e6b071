//! Generates the revision header.
//!
//! The first line of the header is a tag summarizing everything the header
//! depends on. When an existing header starts with the same tag it is left
//! untouched, so that its modification time does not change and the build
//! does not recompile everything that includes it.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};

use tempfile::NamedTempFile;

use crate::common::*;

/// Include guard of the header.
const GUARD: &str = "AUTOREVISION_H";

/// Namespace of the constants.
const NAMESPACE: &str = "autorevision";

/// Outcome of a [`write`][write].
///
/// [write]: fn.write.html (write function)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The header was already up to date.
    Unchanged,
    /// The header was (re)written.
    Written,
}

/// The tag identifying the content of a header.
///
/// Encodes the revision, the date, and the output flags. The tag is a
/// single-line C comment whatever the revision and date contain.
pub fn tag(revision: &Revision, output: &OutputConf) -> String {
    format!(
        "/* revision:{};date:{};do_int:{};do_std:{};do_translate:{};do_wx:{} */",
        in_comment(&revision.rev),
        in_comment(&revision.date),
        output.int,
        output.std,
        output.translate,
        output.wx,
    )
}

/// Escapes line breaks and comment terminators, backslashes too so that
/// different values give different tags.
fn in_comment(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    let mut prev = None;
    for c in s.chars() {
        match c {
            '\\' => res.push_str("\\\\"),
            '\n' => res.push_str("\\n"),
            '\r' => res.push_str("\\r"),
            '/' if prev == Some('*') => res.push_str("\\/"),
            _ => res.push(c),
        }
        prev = Some(c)
    }
    res
}

/// A C++ string literal, wrapped in `_T(...)` if asked to.
fn literal(s: &str, output: &OutputConf) -> String {
    let mut lit = String::with_capacity(s.len() + 2);
    lit.push('"');
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                lit.push('\\');
                lit.push(c)
            }
            '\n' => lit.push_str("\\n"),
            '\r' => lit.push_str("\\r"),
            '\t' => lit.push_str("\\t"),
            _ => lit.push(c),
        }
    }
    lit.push('"');
    if output.translate {
        format!("_T({})", lit)
    } else {
        lit
    }
}

/// Content of the header, tag included.
pub fn render(revision: &Revision, output: &OutputConf) -> String {
    let mut s = tag(revision, output);
    s.push('\n');
    s.push_str("// Generated by autorevision, do not edit.\n");
    s.push_str(&format!("#ifndef {}\n#define {}\n\n", GUARD, GUARD));

    if output.std {
        s.push_str("#include <string>\n")
    }
    if output.wx {
        s.push_str("#include <wx/string.h>\n")
    }

    if output.any() {
        s.push_str(&format!("\nnamespace {}\n{{\n", NAMESPACE));

        if output.int {
            s.push_str(&format!(
                "\tconst unsigned int svn_revision = {};\n",
                revision.rev
            ))
        }

        let rev = literal(&revision.rev, output);
        let date = literal(&revision.date, output);
        if output.std {
            s.push_str(&format!("\tconst std::string svn_revision_s({});\n", rev))
        }
        if output.wx {
            s.push_str(&format!("\tconst wxString svnRevision({});\n", rev))
        }
        if output.std {
            s.push_str(&format!("\tconst std::string svn_date_s({});\n", date))
        }
        if output.wx {
            s.push_str(&format!("\tconst wxString svnDate({});\n", date))
        }

        s.push_str("}\n")
    }

    s.push_str(&format!("\n#endif // {}\n", GUARD));
    s
}

/// First line of a file, `None` if it cannot be read.
fn first_line(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut line = String::new();
    BufReader::new(file).read_line(&mut line).ok()?;
    let len = line.trim_end_matches(&['\n', '\r'][..]).len();
    line.truncate(len);
    Some(line)
}

/// Writes the header for some revision, unless it is already up to date.
pub fn write<P: AsRef<Path>>(conf: &Config, path: P, revision: &Revision) -> Res<Status> {
    let path = path.as_ref();
    let tag = tag(revision, &conf.output);

    if first_line(path).as_deref() == Some(tag.as_str()) {
        log! { conf, @verb
            "Revision unchanged - {}. Nothing to do here...", conf.emph(&revision.rev)
        }
        return Ok(Status::Unchanged);
    }

    if conf.output.int && !revision.is_numeric() {
        log! { conf, @warn
            "revision `{}` is not a number, `svn_revision` will not compile", revision.rev
        }
    }

    replace(path, &render(revision, &conf.output))
        .chain_err(|| ErrorKind::Write(path.to_string_lossy().into_owned()))?;

    log! { conf, @verb "Done" }
    Ok(Status::Written)
}

/// Replaces the content of a file.
///
/// The content goes to a temporary file in the same directory, which is then
/// renamed. A failure leaves the old file as it was, never a truncated one.
fn replace(path: &Path, content: &str) -> IoRes<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;

    let permissions = match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => fresh_permissions(),
    };
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions)?
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Permissions of a new header, the temporary file is only readable by its
/// owner.
#[cfg(unix)]
fn fresh_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}
#[cfg(not(unix))]
fn fresh_permissions() -> Option<fs::Permissions> {
    None
}
