// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use log::debug;

use super::{known_prefix, qualify, Element};
use crate::error::Result;

pub(super) fn parse(text: &str) -> Result<Element> {
    let opt = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };

    let doc = roxmltree::Document::parse_with_options(text, opt)?;
    Ok(convert(doc.root_element()))
}

fn convert(node: roxmltree::Node) -> Element {
    let tag = node.tag_name();
    let mut elem = Element::new(resolve_name(&node, tag.namespace(), tag.name()));

    for attr in node.attributes() {
        let name = resolve_name(&node, attr.namespace(), attr.name());
        elem.set_attribute(name, attr.value());
    }

    for child in node.children() {
        if child.is_element() {
            elem.append(convert(child));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                elem.text.push_str(text);
            }
        }
    }

    elem
}

fn resolve_name(node: &roxmltree::Node, ns: Option<&str>, local: &str) -> String {
    let uri = match ns {
        Some(uri) => uri,
        None => return local.to_string(),
    };

    if let Some(prefix) = known_prefix(uri) {
        return qualify(prefix, local);
    }

    match node.lookup_prefix(uri) {
        Some(prefix) => qualify(prefix, local),
        None => {
            debug!("Namespace '{}' has no prefix.", uri);
            local.to_string()
        }
    }
}
