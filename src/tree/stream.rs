// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::borrow::Cow;

use log::debug;
use xmlparser::{ElementEnd, Token, Tokenizer};

use super::{known_prefix, qualify, Element, XML_NS};
use crate::error::{Error, Result};

// A start tag with not yet resolved names.
struct PendingTag<'a> {
    prefix: &'a str,
    local: &'a str,
    attributes: Vec<(&'a str, &'a str, &'a str)>,
}

struct Builder<'a> {
    stack: Vec<Element>,
    // Tag names of open elements, as written.
    names: Vec<(&'a str, &'a str)>,
    // Namespace declarations of each open element.
    scopes: Vec<Vec<(&'a str, &'a str)>>,
    root: Option<Element>,
}

/// Builds element records directly from the token stream,
/// without an intermediate document.
pub(super) fn parse(text: &str) -> Result<Element> {
    let mut b = Builder {
        stack: Vec::new(),
        names: Vec::new(),
        scopes: Vec::new(),
        root: None,
    };

    let mut pending: Option<PendingTag> = None;

    for token in Tokenizer::from(text) {
        match token? {
            Token::ElementStart { prefix, local, .. } => {
                pending = Some(PendingTag {
                    prefix: prefix.as_str(),
                    local: local.as_str(),
                    attributes: Vec::new(),
                });
            }
            Token::Attribute { prefix, local, value, .. } => {
                if let Some(ref mut tag) = pending {
                    tag.attributes.push((prefix.as_str(), local.as_str(), value.as_str()));
                }
            }
            Token::ElementEnd { end, .. } => {
                match end {
                    ElementEnd::Open => {
                        if let Some(tag) = pending.take() {
                            b.open(tag);
                        }
                    }
                    ElementEnd::Empty => {
                        if let Some(tag) = pending.take() {
                            b.open(tag);
                            b.close();
                        }
                    }
                    ElementEnd::Close(prefix, local) => {
                        b.close_tag(prefix.as_str(), local.as_str())?;
                    }
                }
            }
            Token::Text { text } => {
                if let Some(elem) = b.stack.last_mut() {
                    elem.text.push_str(&unescape(text.as_str()));
                }
            }
            Token::Cdata { text, .. } => {
                if let Some(elem) = b.stack.last_mut() {
                    elem.text.push_str(text.as_str());
                }
            }
            _ => {}
        }
    }

    if !b.stack.is_empty() {
        return Err(Error::UnclosedElement);
    }

    b.root.ok_or(Error::NoSvgElement)
}

impl<'a> Builder<'a> {
    fn lookup_namespace(&self, prefix: &str) -> Option<&'a str> {
        if prefix == "xml" {
            return Some(XML_NS);
        }

        for scope in self.scopes.iter().rev() {
            for &(p, uri) in scope {
                if p == prefix {
                    return Some(uri);
                }
            }
        }

        None
    }

    fn resolve_name(&self, prefix: &str, local: &str, is_attribute: bool) -> String {
        // Unprefixed attributes never belong to the default namespace.
        if prefix.is_empty() && is_attribute {
            return local.to_string();
        }

        match self.lookup_namespace(prefix) {
            Some(uri) => match known_prefix(uri) {
                Some(known) => qualify(known, local),
                None => qualify(prefix, local),
            },
            None => {
                if !prefix.is_empty() {
                    debug!("Namespace prefix '{}' is not declared.", prefix);
                }

                qualify(prefix, local)
            }
        }
    }

    fn open(&mut self, tag: PendingTag<'a>) {
        let mut scope = Vec::new();
        for &(prefix, local, value) in &tag.attributes {
            if prefix.is_empty() && local == "xmlns" {
                scope.push(("", value));
            } else if prefix == "xmlns" {
                scope.push((local, value));
            }
        }
        self.scopes.push(scope);

        let mut elem = Element::new(self.resolve_name(tag.prefix, tag.local, false));
        for &(prefix, local, value) in &tag.attributes {
            if prefix == "xmlns" || (prefix.is_empty() && local == "xmlns") {
                continue;
            }

            let name = self.resolve_name(prefix, local, true);
            elem.set_attribute(name, unescape(value));
        }

        self.stack.push(elem);
        self.names.push((tag.prefix, tag.local));
    }

    fn close_tag(&mut self, prefix: &str, local: &str) -> Result<()> {
        match self.names.last() {
            Some(&(p, l)) if p == prefix && l == local => {
                self.close();
                Ok(())
            }
            _ => {
                let name = if prefix.is_empty() {
                    local.to_string()
                } else {
                    format!("{}:{}", prefix, local)
                };

                Err(Error::UnexpectedCloseTag(name))
            }
        }
    }

    fn close(&mut self) {
        self.scopes.pop();
        self.names.pop();

        let elem = match self.stack.pop() {
            Some(elem) => elem,
            None => return,
        };

        if let Some(parent) = self.stack.last_mut() {
            parent.append(elem);
        } else if self.root.is_none() {
            self.root = Some(elem);
        }
    }
}

/// Replaces predefined and character entity references.
///
/// Unknown references are kept as is.
fn unescape(text: &str) -> Cow<str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        let resolved = rest.find(';').and_then(|end| {
            let c = match &rest[1..end] {
                "lt" => '<',
                "gt" => '>',
                "amp" => '&',
                "quot" => '"',
                "apos" => '\'',
                name => {
                    let code = if let Some(hex) = name.strip_prefix("#x") {
                        u32::from_str_radix(hex, 16).ok()?
                    } else if let Some(dec) = name.strip_prefix('#') {
                        dec.parse::<u32>().ok()?
                    } else {
                        return None;
                    };

                    std::char::from_u32(code)?
                }
            };

            Some((c, end))
        });

        match resolved {
            Some((c, end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    Cow::Owned(out)
}
