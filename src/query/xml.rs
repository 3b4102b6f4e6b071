//! Parses the output of `svn info --xml`.
//!
//! The document is loaded in a tiny element tree, navigation only needs the
//! first child with a given name.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::common::*;

/// Path to the commit element.
const COMMIT_PATH: [&str; 3] = ["info", "entry", "commit"];

/// An XML node.
#[derive(Debug, Clone)]
enum Node {
    /// An element.
    Elem(Element),
    /// Some text.
    Text(String),
}

/// An XML element.
#[derive(Debug, Clone, Default)]
struct Element {
    /// Name of the element.
    name: String,
    /// Attributes, in order.
    attributes: Vec<(String, String)>,
    /// Children.
    children: Vec<Node>,
}
impl Element {
    /// First child element with some name.
    fn first_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find_map(|node| match node {
            Node::Elem(elem) if elem.name == name => Some(elem),
            _ => None,
        })
    }

    /// Value of an attribute.
    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First text child.
    fn text(&self) -> Option<&str> {
        self.children.iter().find_map(|node| match node {
            Node::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Extracts the name and attributes of an opening tag.
fn open(tag: &BytesStart) -> Res<Element> {
    let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in tag.attributes() {
        let attr = attr.map_err(|e| ErrorKind::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| ErrorKind::Xml(e.to_string()))?
            .into_owned();
        attributes.push((key, value))
    }
    Ok(Element {
        name,
        attributes,
        children: vec![],
    })
}

/// Parses a whole document, yields a pseudo-element holding the top-level
/// nodes.
fn parse_document(text: &str) -> Res<Element> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    // Stack of open elements, the bottom one is the document.
    let mut stack = vec![Element::default()];

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => bail!(ErrorKind::Xml(format!(
                "at byte {}: {}",
                reader.buffer_position(),
                e
            ))),
        };
        match event {
            Event::Start(tag) => stack.push(open(&tag)?),
            Event::Empty(tag) => {
                let elem = open(&tag)?;
                push(&mut stack, Node::Elem(elem))
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    bail!(ErrorKind::Xml("unexpected closing tag".into()))
                }
                if let Some(elem) = stack.pop() {
                    push(&mut stack, Node::Elem(elem))
                }
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| ErrorKind::Xml(e.to_string()))?
                    .into_owned();
                push(&mut stack, Node::Text(text))
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data).into_owned();
                push(&mut stack, Node::Text(text))
            }
            Event::Eof => break,
            // Declaration, comments, doctype, processing instructions.
            _ => (),
        }
    }

    if stack.len() != 1 {
        let name = stack.last().map(|elem| elem.name.clone()).unwrap_or_default();
        bail!(ErrorKind::Xml(format!("element `{}` is never closed", name)))
    }
    Ok(stack.pop().unwrap_or_default())
}

/// Adds a node to the element at the top of the stack.
fn push(stack: &mut [Element], node: Node) {
    if let Some(elem) = stack.last_mut() {
        elem.children.push(node)
    }
}

/// Normalizes an svn date: `2023-05-06T07:08:09.123456Z` becomes
/// `2023-05-06 07:08:09`.
///
/// Only the first `T` is replaced, and everything from the last `.` is
/// dropped.
pub fn normalize_date(date: &str) -> String {
    let mut date = date.replacen('T', " ", 1);
    if let Some(pos) = date.rfind('.') {
        date.truncate(pos)
    }
    date
}

/// Extracts the revision and date of the last commit from the output of
/// `svn info --xml`.
pub fn parse_xml(text: &str) -> Res<Revision> {
    let doc = parse_document(text)?;

    let mut commit = &doc;
    for (idx, name) in COMMIT_PATH.iter().enumerate() {
        commit = commit
            .first_child(name)
            .ok_or_else(|| ErrorKind::MissingElement(COMMIT_PATH[0..=idx].join("/")))?
    }

    let rev = commit.attribute("revision").unwrap_or("").to_string();
    if rev.is_empty() {
        bail!(ErrorKind::NoRevision("revision=".into()))
    }

    let date = commit
        .first_child("date")
        .and_then(Element::text)
        .map(normalize_date)
        .unwrap_or_default();
    if date.is_empty() {
        bail!(ErrorKind::NoDate("<date>".into()))
    }

    Ok(Revision { rev, date })
}
