use super::Element;

use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

/// Result of parsing a complete element tree.
pub(super) struct Tree {
    pub(super) root: Element,

    /// Offset of the root's closing tag, `None` for a self-closing root
    pub(super) root_close: Option<usize>,
}

/// Parses `src` into an element tree. Errors are returned as plain messages
/// so callers can pick the error kind (document vs. generated fragment).
pub(super) fn parse(src: &str) -> Result<Tree, String> {
    let mut reader = Reader::from_str(src);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = vec![];
    let mut root = None;
    let mut root_close = None;

    loop {
        let start = reader.buffer_position() as usize;
        let event = reader
            .read_event()
            .map_err(|err| format!("{err} (at byte {})", reader.buffer_position()))?;
        let end = reader.buffer_position() as usize;

        match event {
            Event::Start(tag) => {
                let element = open(&tag, start)?;
                if stack.is_empty() && root.is_some() {
                    return Err(format!(
                        "element <{}> found after the root element",
                        element.name
                    ));
                }
                stack.push(element);
            }
            Event::Empty(tag) => {
                let mut element = open(&tag, start)?;
                element.span.end = end;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(tag) => {
                let Some(mut element) = stack.pop() else {
                    let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
                    return Err(format!("unexpected closing tag </{name}>"));
                };
                element.span.end = end;
                if stack.is_empty() {
                    root_close = Some(start);
                }
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|err| err.to_string())?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(data) => {
                let text = std::str::from_utf8(&data).map_err(|err| err.to_string())?;
                push_text(&mut stack, text)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry nothing the merge needs. They stay in the source text.
            _ => {}
        }
    }

    if let Some(element) = stack.last() {
        return Err(format!("unclosed element <{}>", element.name));
    }

    let Some(root) = root else {
        return Err("document has no root element".to_string());
    };

    Ok(Tree { root, root_close })
}

fn open(tag: &BytesStart<'_>, start: usize) -> Result<Element, String> {
    let name = std::str::from_utf8(tag.name().as_ref())
        .map_err(|err| err.to_string())?
        .to_string();

    let mut attributes = vec![];
    for attr in tag.attributes() {
        let attr = attr.map_err(|err| format!("in <{name}>: {err}"))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| err.to_string())?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| format!("in <{name}>: {err}"))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        attributes,
        children: vec![],
        text: String::new(),
        span: start..start,
    })
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), String> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_some() {
        return Err(format!(
            "element <{}> found after the root element",
            element.name
        ));
    } else {
        *root = Some(element);
    }

    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<(), String> {
    match stack.last_mut() {
        Some(element) => element.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => return Err("text found outside of the root element".to_string()),
    }

    Ok(())
}
