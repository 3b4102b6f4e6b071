//! Autorevision's configuration.
//!
//! The configuration is built once from the command line and never changes
//! afterwards. Everything that needs it takes a `&Config`.
//!
//! The command line is a bit unusual: output representations are selected
//! with `+` tokens (`+int`, `+std`, ...), and unknown options only produce a
//! warning. So tokens are sorted before `clap` sees them: unknown flag-like
//! tokens are reported and dropped, the rest goes through `clap`, and `+`
//! tokens come back as positional values.

use ansi_term::{Colour, Style};
use clap::{Arg, Command};

use crate::errors::*;

/// Default output file.
pub const DEFAULT_OUT_FILE: &str = "autorevision.h";

/// Flags `clap` knows about, except `--revision` which takes a value.
const FLAGS: [&str; 6] = [
    "-h",
    "--help",
    "-v",
    "--verbose",
    "--debug",
    "--skip-git-svn",
];

/// Option taking a value.
const REVISION_FLAG: &str = "--revision";

/// Help for the `+` tokens, `clap` does not know about them.
const REPR_HELP: &str = "\
REPRESENTATIONS:
    +int    assign const unsigned int
    +std    assign const std::string
    +wx     assign const wxString
    +t      add Unicode translation macros to strings

At least one of +int, +std and +wx is required.";

/// True if a token looks like an option.
///
/// Windows-style `/opt` and `\opt` count too.
fn is_flag_like(token: &str) -> bool {
    matches!(token.chars().next(), Some('+' | '-' | '/' | '\\'))
}

/// Output representations of the revision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConf {
    /// Revision as a `const unsigned int`.
    pub int: bool,
    /// Revision and date as `const std::string`s.
    pub std: bool,
    /// Revision and date as `const wxString`s.
    pub wx: bool,
    /// Wrap string literals in `_T(...)`.
    pub translate: bool,
}
impl OutputConf {
    /// True if at least one representation is active.
    ///
    /// `translate` is not a representation.
    pub fn any(&self) -> bool {
        self.int || self.std || self.wx
    }

    /// True if a token is a representation token.
    pub fn is_token(token: &str) -> bool {
        matches!(token, "+int" | "+std" | "+wx" | "+t")
    }

    /// Activates whatever a token stands for, false if it is not a
    /// representation token.
    pub fn activate(&mut self, token: &str) -> bool {
        match token {
            "+int" => self.int = true,
            "+std" => self.std = true,
            "+wx" => self.wx = true,
            "+t" => self.translate = true,
            _ => return false,
        }
        true
    }
}

/// What the command line asks for.
pub enum Action {
    /// Generate the header.
    Run(Config),
    /// Print the help and leave.
    Help,
}

/// Global configuration.
pub struct Config {
    /// Working directory to query.
    pub dir: String,
    /// Header file to generate.
    pub out_file: String,
    /// Output representations.
    pub output: OutputConf,
    /// Verbosity: `0` quiet, `1` verbose, `2` debug.
    pub verb: usize,
    /// Do not fall back on `git svn`.
    pub skip_git_svn: bool,
    /// Revision overriding whatever the query yields.
    pub revision: Option<String>,
    /// Styles, for coloring.
    styles: Styles,
}
impl ColorExt for Config {
    fn styles(&self) -> &Styles {
        &self.styles
    }
}
impl Config {
    /// Quiet configuration for some working directory, no representation
    /// active.
    pub fn new<S: Into<String>>(dir: S) -> Self {
        Config {
            dir: dir.into(),
            out_file: DEFAULT_OUT_FILE.into(),
            output: OutputConf::default(),
            verb: 0,
            skip_git_svn: false,
            revision: None,
            styles: stdout_styles(),
        }
    }

    /// True in verbose and debug mode.
    #[inline]
    pub fn verbose(&self) -> bool {
        self.verb > 0
    }
    /// True in debug mode.
    #[inline]
    pub fn debug(&self) -> bool {
        self.verb > 1
    }

    /// The clap command, also used to print the help.
    pub fn command() -> Command<'static> {
        let mut order = 0;
        let mut order = || {
            order += 1;
            order
        };

        Command::new(crate_name!())
            .version(crate_version!())
            .about("Generates a header holding the svn revision of a working copy.")
            .override_usage("autorevision [options] <directory> [autorevision.h]")
            .after_help(REPR_HELP)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("be verbose")
                    .multiple_occurrences(true)
                    .display_order(order()),
            )
            .arg(
                Arg::new("debug")
                    .long("debug")
                    .help("so you want even more information?")
                    .multiple_occurrences(true)
                    .display_order(order()),
            )
            .arg(
                Arg::new("show_help")
                    .short('h')
                    .long("help")
                    .help("display help (this screen) and exit")
                    .multiple_occurrences(true)
                    .display_order(order()),
            )
            .arg(
                Arg::new("skip_git_svn")
                    .long("skip-git-svn")
                    .help("do not query git-svn if svn fails")
                    .multiple_occurrences(true)
                    .display_order(order()),
            )
            .arg(
                Arg::new("revision")
                    .long("revision")
                    .help("set custom revision number")
                    .value_name("NUMBER")
                    .takes_value(true)
                    .number_of_values(1)
                    .allow_hyphen_values(true)
                    .multiple_occurrences(true)
                    .display_order(order()),
            )
            .arg(
                Arg::new("inputs")
                    .help("working directory, output file and representations")
                    .value_name("ARGS")
                    .takes_value(true)
                    .multiple_values(true),
            )
    }

    /// Parses the process' command-line arguments.
    pub fn clap() -> Res<Action> {
        Self::of_args(
            ::std::env::args_os().map(|arg| arg.to_string_lossy().into_owned()),
        )
    }

    /// Parses some command-line arguments, the first one being the program
    /// name.
    pub fn of_args<I, T>(args: I) -> Res<Action>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let styles = stdout_styles();
        let mut args = args.into_iter().map(Into::<String>::into);

        // Flags first, then positional values, so that `clap` sees the
        // positional values as a single occurrence.
        let mut kept: Vec<String> = vec![args.next().unwrap_or_else(|| crate_name!().into())];
        let mut inputs = vec![];
        while let Some(arg) = args.next() {
            if FLAGS.contains(&arg.as_str()) {
                kept.push(arg)
            } else if arg == REVISION_FLAG {
                match args.next() {
                    Some(rev) => kept.extend([arg, rev]),
                    None => println!(
                        "{}: Option {} expects a value, ignoring it.",
                        styles.sad("Warning"),
                        styles.emph(&arg)
                    ),
                }
            } else if OutputConf::is_token(&arg) || !is_flag_like(&arg) {
                inputs.push(arg)
            } else {
                println!(
                    "{}: Unknown command line option {}. Didn't you misspell it?\n\
                     Use --help to see available options.",
                    styles.sad("Warning"),
                    styles.emph(&arg)
                )
            }
        }
        kept.extend(inputs);

        let matches = Self::command().try_get_matches_from(kept)?;

        if matches.is_present("show_help") {
            return Ok(Action::Help);
        }

        let mut output = OutputConf::default();
        let mut dir = None;
        let mut out_file = None;
        for input in matches.values_of("inputs").into_iter().flatten() {
            if output.activate(input) {
                continue;
            }
            if dir.is_none() {
                dir = Some(input.to_string())
            } else if out_file.is_none() {
                out_file = Some(input.to_string())
            } else {
                println!(
                    "{}: Ignoring unknown command line option {}.",
                    styles.sad("Warning"),
                    styles.emph(input)
                )
            }
        }

        let dir = match dir {
            Some(dir) => dir,
            None => return Ok(Action::Help),
        };
        let out_file = out_file.unwrap_or_else(|| DEFAULT_OUT_FILE.into());

        let verb = if matches.is_present("debug") {
            2
        } else if matches.is_present("verbose") {
            1
        } else {
            0
        };

        let skip_git_svn = matches.is_present("skip_git_svn");

        let revision = matches
            .values_of("revision")
            .and_then(|vals| vals.last())
            .filter(|rev| !rev.is_empty())
            .map(String::from);

        Ok(Action::Run(Config {
            dir,
            out_file,
            output,
            verb,
            skip_git_svn,
            revision,
            styles,
        }))
    }

    /// Prints the configuration, used in debug mode.
    pub fn dump(&self) {
        let yes_no = |b: bool| if b { "yes" } else { "no" };
        println!("You may notice I'm a little bit more verbose than usual, you asked for it.");
        println!("I should output Revision number (and date) as:");
        println!("        const unsigned int    {}", yes_no(self.output.int));
        println!("        std::string           {}", yes_no(self.output.std));
        println!("        wxString              {}", yes_no(self.output.wx));
        println!("Will use Unicode translation macros for strings:");
        println!("                              {}", yes_no(self.output.translate));
        println!("Should I skip git-svn?");
        println!("                              {}", yes_no(self.skip_git_svn));
        println!("Do You want to override revision number?");
        println!("                              {}", yes_no(self.revision.is_some()));
        if let Some(rev) = self.revision.as_ref() {
            println!("             Revision number: {}", self.emph(rev))
        }
        println!();
        println!("Working directory:    {}", self.emph(&self.dir));
        println!("Output file:          {}", self.emph(&self.out_file));
        println!()
    }
}

/// Styles depending on whether stdout is a tty.
pub fn stdout_styles() -> Styles {
    Styles::new(atty::is(atty::Stream::Stdout))
}

/// Contains some styles for coloring.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Emphasis style.
    emph: Style,
    /// Happy style.
    hap: Style,
    /// Sad style.
    sad: Style,
    /// Bad style.
    bad: Style,
}
impl Default for Styles {
    fn default() -> Self {
        Styles::new(true)
    }
}
impl ColorExt for Styles {
    fn styles(&self) -> &Styles {
        self
    }
}
impl Styles {
    /// Creates some styles.
    pub fn new(colored: bool) -> Self {
        if colored {
            Styles {
                emph: Style::new().bold(),
                hap: Colour::Green.normal().bold(),
                sad: Colour::Yellow.normal().bold(),
                bad: Colour::Red.normal().bold(),
            }
        } else {
            Styles {
                emph: Style::new(),
                hap: Style::new(),
                sad: Style::new(),
                bad: Style::new(),
            }
        }
    }
}

/// Can color things.
pub trait ColorExt {
    /// The styles in the colorizer: emph, happy, sad, and bad.
    fn styles(&self) -> &Styles;
    /// String emphasis.
    #[inline]
    fn emph<S: AsRef<str>>(&self, s: S) -> String {
        format!("{}", self.styles().emph.paint(s.as_ref()))
    }
    /// Happy string.
    #[inline]
    fn happy<S: AsRef<str>>(&self, s: S) -> String {
        format!("{}", self.styles().hap.paint(s.as_ref()))
    }
    /// Sad string.
    #[inline]
    fn sad<S: AsRef<str>>(&self, s: S) -> String {
        format!("{}", self.styles().sad.paint(s.as_ref()))
    }
    /// Bad string.
    #[inline]
    fn bad<S: AsRef<str>>(&self, s: S) -> String {
        format!("{}", self.styles().bad.paint(s.as_ref()))
    }
}
