//! Error types.
//!
//! Most failures in this crate are not fatal. A strategy that cannot parse
//! the response of its command just fails and the next strategy takes over,
//! so query errors mostly end up in verbose logs. Only two events actually
//! stop a run:
//!
//! - [`ErrorKind::NoRepresentation`][norep], no output representation was
//!   requested on the command line ;
//! - [`ErrorKind::Write`][write], the header file could not be written.
//!
//! [norep]: enum.ErrorKind.html#variant.NoRepresentation
//! (NoRepresentation variant of the ErrorKind enum)
//! [write]: enum.ErrorKind.html#variant.Write
//! (Write variant of the ErrorKind enum)

use crate::common::{stdout_styles, ColorExt};

error_chain! {
    types {
        Error, ErrorKind, ResultExt, Res;
    }

    foreign_links {
        Io(::std::io::Error) #[doc = "IO error."];
        Clap(::clap::Error) #[doc = "Command-line error."];
    }

    errors {
        #[doc = "The output of `svn info --xml` is not valid XML."]
        Xml(msg: String) {
            description("illegal XML")
            display("unable to parse XML: {}", msg)
        }
        #[doc = "An element is missing from an XML document."]
        MissingElement(path: String) {
            description("missing XML element")
            display("no element `{}` in XML document", path)
        }
        #[doc = "No revision number after some label."]
        NoRevision(label: String) {
            description("cannot parse revision number")
            display("cannot parse revision number after `{}`", label.trim())
        }
        #[doc = "No date after some label."]
        NoDate(label: String) {
            description("cannot parse date")
            display("cannot parse date after `{}`", label.trim())
        }
        #[doc = "None of `+int`, `+std` or `+wx` was given."]
        NoRepresentation {
            description("no output representation")
            display(
                "you seem to have forgotten to specify how to output the revision number, \
                 use `--help` for command line options"
            )
        }
        #[doc = "Could not write the header file."]
        Write(path: String) {
            description("could not write header file")
            display("could not output revision number to header file `{}`", path)
        }
    }
}

impl Error {
    /// True if the kind of the error is [`ErrorKind::Write`][write].
    ///
    /// [write]: enum.ErrorKind.html#variant.Write
    /// (ErrorKind's Write variant)
    pub fn is_write(&self) -> bool {
        matches!(*self.kind(), ErrorKind::Write(_))
    }

    /// True if the kind of the error is
    /// [`ErrorKind::NoRepresentation`][norep].
    ///
    /// [norep]: enum.ErrorKind.html#variant.NoRepresentation
    /// (ErrorKind's NoRepresentation variant)
    pub fn is_no_representation(&self) -> bool {
        matches!(*self.kind(), ErrorKind::NoRepresentation)
    }
}

/// Prints an error.
///
/// Used before the configuration exists, so colors depend on stdout only.
pub fn print_err(errs: &Error) {
    let styles = stdout_styles();
    let mut pref = format!("{}: ", styles.bad("Error"));
    for err in errs.iter() {
        for line in format!("{}", err).lines() {
            println!("{}{}", pref, line);
            pref = "  ".into()
        }
    }
}
