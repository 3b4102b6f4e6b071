//! Parses the plain-text output of `svn info` and `git svn info`.

use crate::common::*;

/// Label preceding the revision number.
pub const REV_LABEL: &str = "Last Changed Rev: ";
/// Label preceding the date.
pub const DATE_LABEL: &str = "Last Changed Date: ";

/// Text following the first occurrence of a label.
fn after<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    text.find(label).map(|pos| &text[pos + label.len()..])
}

/// The digits right after the revision label.
pub fn parse_rev(text: &str) -> Res<&str> {
    let tail = after(text, REV_LABEL).unwrap_or("");
    let len = tail.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        bail!(ErrorKind::NoRevision(REV_LABEL.into()))
    }
    Ok(&tail[..len])
}

/// The date after the date label, up to the second space.
///
/// Dates look like `2022-03-04 05:06:07 +0000 (Fri, 04 Mar 2022)`, the
/// second space ends the time of day.
pub fn parse_date(text: &str) -> Res<&str> {
    let tail = after(text, DATE_LABEL).unwrap_or("");
    let end = tail
        .find(' ')
        .and_then(|first| tail[first + 1..].find(' ').map(|second| first + 1 + second));
    match end {
        Some(end) => Ok(&tail[..end]),
        None => bail!(ErrorKind::NoDate(DATE_LABEL.into())),
    }
}

/// Extracts the revision and date from the plain-text output of `svn info`.
pub fn parse_text(text: &str) -> Res<Revision> {
    let rev = parse_rev(text)?;
    let date = parse_date(text)?;
    Ok(Revision::new(rev, date))
}
