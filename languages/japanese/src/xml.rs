use std::fmt::Display;

use kanjistat_core::LoadError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// A fully materialized XML element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// First child with the given tag name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Trimmed text of the first child with the given tag name
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.trim())
    }
}

fn malformed(position: u64, err: impl Display) -> LoadError {
    LoadError::MalformedSource(format!("at byte {position}: {err}"))
}

/// Byte offset just past the document prolog: the XML declaration, comments,
/// processing instructions and a DOCTYPE with its internal subset.
///
/// quick-xml's DTD scanner stops at the first `>` inside a subset comment, so
/// the DOCTYPE is skipped here and never reaches the reader.
fn prolog_end(source: &str) -> Result<usize, LoadError> {
    let mut pos = 0;

    loop {
        let rest = &source[pos..];
        let skipped = rest.len() - rest.trim_start().len();
        pos += skipped;
        let rest = &source[pos..];

        let close = if rest.starts_with("<?") {
            "?>"
        } else if rest.starts_with("<!--") {
            "-->"
        } else if rest.starts_with("<!DOCTYPE") {
            return doctype_end(source, pos);
        } else {
            return Ok(pos);
        };

        let end = rest
            .find(close)
            .ok_or_else(|| malformed(pos as u64, format!("unterminated markup, expected `{close}`")))?;
        pos += end + close.len();
    }
}

fn doctype_end(source: &str, start: usize) -> Result<usize, LoadError> {
    let bytes = source.as_bytes();
    let mut pos = start + "<!DOCTYPE".len();
    let mut in_subset = false;

    while pos < bytes.len() {
        if bytes[pos..].starts_with(b"<!--") {
            let end = source[pos..]
                .find("-->")
                .ok_or_else(|| malformed(pos as u64, "unterminated comment in DOCTYPE"))?;
            pos += end + "-->".len();
            continue;
        }

        match bytes[pos] {
            quote @ (b'"' | b'\'') => {
                let end = source[pos + 1..]
                    .find(quote as char)
                    .ok_or_else(|| malformed(pos as u64, "unterminated literal in DOCTYPE"))?;
                pos += end + 2;
                continue;
            }
            b'[' if !in_subset => in_subset = true,
            b']' if in_subset => in_subset = false,
            b'>' if !in_subset => return Ok(pos + 1),
            _ => {}
        }
        pos += 1;
    }

    Err(malformed(start as u64, "unterminated DOCTYPE"))
}

fn read_start(start: &BytesStart, position: u64) -> Result<Element, LoadError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| malformed(position, e))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| malformed(position, e))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}

/// Stream `source` and hand every element named `tag` to `visit`, one at a
/// time, with its whole subtree built.
///
/// Elements outside `tag` are only checked for well-formedness. Returns the
/// number of elements visited.
pub fn for_each_element<F>(source: &str, tag: &str, mut visit: F) -> Result<usize, LoadError>
where
    F: FnMut(Element) -> Result<(), LoadError>,
{
    let offset = prolog_end(source)?;
    let mut reader = Reader::from_str(&source[offset..]);
    reader.config_mut().trim_text(true);

    // Open elements inside the current `tag` subtree
    let mut stack: Vec<Element> = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut visited = 0usize;

    loop {
        let position = (offset as u64) + reader.buffer_position() as u64;
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                depth += 1;
                saw_root = true;
                if !stack.is_empty() || start.name().as_ref() == tag.as_bytes() {
                    stack.push(read_start(&start, position)?);
                }
            }
            Ok(Event::Empty(start)) => {
                saw_root = true;
                if !stack.is_empty() || start.name().as_ref() == tag.as_bytes() {
                    let element = read_start(&start, position)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => {
                            visit(element)?;
                            visited += 1;
                        }
                    }
                }
            }
            Ok(Event::End(_)) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| malformed(position, "unmatched closing tag"))?;
                if let Some(element) = stack.pop() {
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => {
                            visit(element)?;
                            visited += 1;
                        }
                    }
                }
            }
            Ok(Event::Text(text)) => {
                if let Some(current) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| malformed(position, e))?;
                    current.text.push_str(&text);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(malformed(position, e)),
        }
    }

    if !saw_root {
        return Err(LoadError::MalformedSource(
            "document has no root element".to_string(),
        ));
    }
    if depth != 0 {
        return Err(LoadError::MalformedSource(format!(
            "document ended with {depth} unclosed element(s)"
        )));
    }

    Ok(visited)
}
