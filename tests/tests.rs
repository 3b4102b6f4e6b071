//! Top-level tests running the whole pipeline on scripted commands.
#![allow(non_upper_case_globals)]

extern crate autorevision;
extern crate tempfile;

use std::collections::HashMap;
use std::fs;

use autorevision::cmd::{Cmd, Response, Shell};
use autorevision::common::*;
use autorevision::header::Status;
use autorevision::work_with;

static svn_xml: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<info>
<entry kind="dir" path="wc" revision="1240">
<commit revision="1234">
<author>someone</author>
<date>2024-01-02T03:04:05.678901Z</date>
</commit>
</entry>
</info>
"#;

/// Shell answering from a table, records the commands it runs.
#[derive(Default)]
struct Scripted {
    answers: HashMap<String, Response>,
    log: Vec<String>,
}
impl Scripted {
    /// Svn is installed and `wc` is a working copy.
    fn svn() -> Self {
        let mut shell = Self::default();
        shell.answer("svn --version", 0, "svn, version 1.14.2");
        shell.answer("svn info --xml --non-interactive wc", 0, svn_xml);
        shell
    }

    fn answer(&mut self, cmd: &str, code: i32, output: &str) {
        self.answers
            .insert(cmd.into(), Response::exited(code, output));
    }
}
impl Shell for Scripted {
    fn exec(&mut self, cmd: &Cmd) -> IoRes<Response> {
        let cmd = cmd.to_string();
        self.log.push(cmd.clone());
        self.answers.get(&cmd).cloned().ok_or_else(|| {
            ::std::io::Error::new(::std::io::ErrorKind::NotFound, "command not found")
        })
    }
}

fn conf_in(dir: &Path, output: OutputConf) -> Config {
    let mut conf = Config::new("wc");
    conf.out_file = dir.join("autorevision.h").to_string_lossy().into_owned();
    conf.output = output;
    conf
}

fn int() -> OutputConf {
    OutputConf {
        int: true,
        ..OutputConf::default()
    }
}

fn std_and_wx() -> OutputConf {
    OutputConf {
        std: true,
        wx: true,
        ..OutputConf::default()
    }
}

#[test]
fn writes_int_revision() {
    let tmp = tempfile::tempdir().unwrap();
    let conf = conf_in(tmp.path(), int());
    let status = work_with(&mut Scripted::svn(), &conf).unwrap();
    assert_eq!(status, Status::Written);

    let header = fs::read_to_string(&conf.out_file).unwrap();
    assert!(header.starts_with("/* revision:1234;date:2024-01-02 03:04:05;do_int:true;"));
    assert!(header.contains("const unsigned int svn_revision = 1234;"))
}

#[test]
fn second_run_is_a_noop() {
    let tmp = tempfile::tempdir().unwrap();
    let conf = conf_in(tmp.path(), std_and_wx());

    assert_eq!(
        work_with(&mut Scripted::svn(), &conf).unwrap(),
        Status::Written
    );
    let before = fs::read_to_string(&conf.out_file).unwrap();
    let modified = fs::metadata(&conf.out_file).unwrap().modified().unwrap();

    assert_eq!(
        work_with(&mut Scripted::svn(), &conf).unwrap(),
        Status::Unchanged
    );
    assert_eq!(fs::read_to_string(&conf.out_file).unwrap(), before);
    assert_eq!(
        fs::metadata(&conf.out_file).unwrap().modified().unwrap(),
        modified
    )
}

#[test]
fn new_options_rewrite_the_header() {
    let tmp = tempfile::tempdir().unwrap();
    let mut conf = conf_in(tmp.path(), std_and_wx());
    work_with(&mut Scripted::svn(), &conf).unwrap();

    conf.output.translate = true;
    assert_eq!(
        work_with(&mut Scripted::svn(), &conf).unwrap(),
        Status::Written
    );
    let header = fs::read_to_string(&conf.out_file).unwrap();
    assert!(header.contains("const std::string svn_date_s(_T(\"2024-01-02 03:04:05\"));"))
}

#[test]
fn override_keeps_the_date() {
    let tmp = tempfile::tempdir().unwrap();
    let mut conf = conf_in(tmp.path(), int());
    conf.revision = Some("777".into());
    work_with(&mut Scripted::svn(), &conf).unwrap();

    let header = fs::read_to_string(&conf.out_file).unwrap();
    assert!(header.starts_with("/* revision:777;date:2024-01-02 03:04:05;"));
    assert!(header.contains("svn_revision = 777;"))
}

#[test]
fn override_without_vcs() {
    let tmp = tempfile::tempdir().unwrap();
    let mut conf = conf_in(tmp.path(), int());
    conf.revision = Some("777".into());
    let mut shell = Scripted::default();
    work_with(&mut shell, &conf).unwrap();

    let header = fs::read_to_string(&conf.out_file).unwrap();
    assert!(header.starts_with("/* revision:777;date:unknown date;"))
}

#[test]
fn placeholder_when_everything_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let conf = conf_in(tmp.path(), int());
    let mut shell = Scripted::default();
    shell.answer("svn --version", 0, "svn, version 1.14.2");
    shell.answer("git --version", 0, "git version 2.43.0");
    shell.answer("svn info --xml --non-interactive wc", 1, "svn: E155007");
    shell.answer("svn info --non-interactive wc", 1, "svn: E155007");
    shell.answer("git svn info wc", 128, "fatal: not a git repository");

    work_with(&mut shell, &conf).unwrap();
    assert_eq!(
        shell.log,
        vec![
            "svn --version",
            "git --version",
            "svn info --xml --non-interactive wc",
            "svn info --non-interactive wc",
            "git svn info wc",
        ]
    );
    let header = fs::read_to_string(&conf.out_file).unwrap();
    assert!(header.starts_with("/* revision:0;date:unknown date;"));
    assert!(header.contains("svn_revision = 0;"))
}

#[test]
fn git_svn_mirror() {
    let tmp = tempfile::tempdir().unwrap();
    let conf = conf_in(tmp.path(), std_and_wx());
    let mut shell = Scripted::default();
    shell.answer("git --version", 0, "git version 2.43.0");
    shell.answer(
        "git svn info wc",
        0,
        "Path: wc\n\
         Last Changed Rev: 99\n\
         Last Changed Date: 2022-03-04 05:06:07 +0000 (Fri, 04 Mar 2022)\n",
    );

    work_with(&mut shell, &conf).unwrap();
    let header = fs::read_to_string(&conf.out_file).unwrap();
    assert!(header.contains("const wxString svnRevision(\"99\");"));
    assert!(header.contains("const wxString svnDate(\"2022-03-04 05:06:07\");"))
}

#[test]
fn no_representation() {
    let tmp = tempfile::tempdir().unwrap();
    let conf = conf_in(tmp.path(), OutputConf::default());
    let mut shell = Scripted::svn();

    match work_with(&mut shell, &conf) {
        Err(e) => assert!(e.is_no_representation()),
        Ok(status) => panic!("expected an error, got {:?}", status),
    }
    assert!(!Path::new(&conf.out_file).exists());
    assert!(shell.log.is_empty())
}

#[test]
fn translate_alone_is_not_a_representation() {
    let tmp = tempfile::tempdir().unwrap();
    let output = OutputConf {
        translate: true,
        ..OutputConf::default()
    };
    let conf = conf_in(tmp.path(), output);
    assert!(work_with(&mut Scripted::svn(), &conf).is_err());
    assert!(!Path::new(&conf.out_file).exists())
}

#[test]
fn unwritable_header() {
    let tmp = tempfile::tempdir().unwrap();
    let mut conf = conf_in(tmp.path(), int());
    conf.out_file = tmp
        .path()
        .join("no")
        .join("such")
        .join("dir.h")
        .to_string_lossy()
        .into_owned();

    match work_with(&mut Scripted::svn(), &conf) {
        Err(e) => assert!(e.is_write()),
        Ok(status) => panic!("expected an error, got {:?}", status),
    }
}

#[test]
fn rewrites_leave_only_the_header() {
    let tmp = tempfile::tempdir().unwrap();
    let mut conf = conf_in(tmp.path(), int());
    work_with(&mut Scripted::svn(), &conf).unwrap();
    conf.output.std = true;
    assert_eq!(
        work_with(&mut Scripted::svn(), &conf).unwrap(),
        Status::Written
    );

    let files: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files, vec!["autorevision.h"]);
    let header = fs::read_to_string(&conf.out_file).unwrap();
    assert!(header.contains("do_std:true;"));
    assert!(header.ends_with("#endif // AUTOREVISION_H\n"))
}

#[cfg(unix)]
#[test]
fn header_is_readable_by_everyone() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let conf = conf_in(tmp.path(), int());
    work_with(&mut Scripted::svn(), &conf).unwrap();
    let mode = fs::metadata(&conf.out_file).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644)
}
