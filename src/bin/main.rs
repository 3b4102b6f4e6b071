//! Entry point for the binary.

#[macro_use]
extern crate autorevision;

use autorevision::common::*;

fn main() {
    let conf = match Config::clap() {
        Ok(Action::Run(conf)) => conf,
        Ok(Action::Help) => {
            if let Err(e) = Config::command().print_help() {
                print_err(&e.into())
            }
            println!();
            ::std::process::exit(1)
        }
        Err(errs) => {
            print_err(&errs);
            ::std::process::exit(2)
        }
    };

    // Work and report error if any.
    if let Err(errs) = autorevision::work(&conf) {
        print_err(&errs);
        if errs.is_write() {
            println!(
                "If you depend on this file, your build will probably fail.\n\
                 Try adding {} or {} to the command line options to get verbose output.",
                conf.emph("-v"),
                conf.emph("--debug")
            )
        }
        ::std::process::exit(2)
    }

    log! { conf, @verb "Finished..." }
    ::std::process::exit(0)
}
