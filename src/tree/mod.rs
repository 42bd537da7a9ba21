// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A minimal element tree.
//!
//! Both XML readers produce the same [`Element`] records, so the rest
//! of the crate never depends on a particular XML parser.
//!
//! [`Element`]: struct.Element.html

use std::slice;

use crate::error::{Error, Result};
use crate::XmlReader;

mod roxml;
mod stream;
mod writer;

pub(crate) const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub(crate) const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
pub(crate) const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";
pub(crate) const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";
pub(crate) const SODIPODI_NS: &str = "http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd";

/// Returns a canonical prefix for a well-known namespace.
///
/// Names from the SVG namespace are never prefixed.
fn known_prefix(uri: &str) -> Option<&'static str> {
    match uri {
        SVG_NS => Some(""),
        XLINK_NS => Some("xlink"),
        XML_NS => Some("xml"),
        INKSCAPE_NS => Some("inkscape"),
        SODIPODI_NS => Some("sodipodi"),
        _ => None,
    }
}

fn qualify(prefix: &str, local: &str) -> String {
    if prefix.is_empty() {
        local.to_string()
    } else {
        format!("{}:{}", prefix, local)
    }
}

/// An XML element record.
///
/// Names from foreign namespaces are prefix-qualified, like `xlink:href`
/// or `inkscape:label`.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Element {
    /// A tag name.
    pub name: String,
    attributes: Vec<(String, String)>,
    /// Concatenated text and CDATA children.
    pub text: String,
    /// Child elements.
    pub children: Vec<Element>,
}

impl Element {
    /// Constructs a new element.
    pub fn new<S: Into<String>>(name: S) -> Element {
        Element {
            name: name.into(),
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Checks that the element has a specified tag name.
    #[inline]
    pub fn has_name(&self, name: &str) -> bool {
        self.name == name
    }

    /// Returns an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Checks that the element has a specified attribute.
    #[inline]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Returns an iterator over attributes in insertion order.
    pub fn attributes(&self) -> Attributes {
        Attributes(self.attributes.iter())
    }

    /// Inserts an attribute.
    ///
    /// An existing attribute is replaced in place, preserving its position.
    pub fn set_attribute<N, V>(&mut self, name: N, value: V)
        where N: Into<String>, V: Into<String>
    {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(attr) => attr.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Removes an attribute.
    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|(n, _)| n != name);
    }

    /// Returns the element's id.
    ///
    /// An empty id is treated as no id.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    /// Appends a child element.
    #[inline]
    pub fn append(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Returns an iterator over this element and all its descendants, in document order.
    pub fn descendants(&self) -> Descendants {
        Descendants { stack: vec![self] }
    }

    /// Returns the text of this element and all its descendants.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for e in self.descendants() {
            text.push_str(&e.text);
        }

        text
    }
}

/// An iterator over element attributes.
pub struct Attributes<'a>(slice::Iter<'a, (String, String)>);

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// A pre-order iterator over element descendants.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let elem = self.stack.pop()?;
        self.stack.extend(elem.children.iter().rev());
        Some(elem)
    }
}

/// Reads an element tree from a text.
///
/// Returns an error when the text is not a well-formed XML
/// or the root element is not `svg`.
pub fn read(text: &str, reader: XmlReader) -> Result<Element> {
    if text.trim().is_empty() {
        return Err(Error::EmptyDocument);
    }

    let root = match reader {
        XmlReader::Tree => roxml::parse(text)?,
        XmlReader::Stream => stream::parse(text)?,
    };

    if !root.has_name("svg") {
        return Err(Error::NoSvgElement);
    }

    Ok(root)
}
