// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use xmlwriter::XmlWriter;

use super::Element;
use crate::{WriteBuffer, WriteOptions};

impl WriteBuffer for Element {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        let xml_opt = xmlwriter::Options {
            use_single_quote: opt.use_single_quote,
            indent: opt.indent.into(),
            attributes_indent: opt.attributes_indent.into(),
        };

        let mut xml = XmlWriter::new(xml_opt);
        if opt.write_declaration {
            xml.write_declaration();
        }

        write_element(self, &mut xml);
        buf.extend_from_slice(xml.end_document().as_bytes());
    }
}

fn write_element(elem: &Element, xml: &mut XmlWriter) {
    xml.start_element(&elem.name);

    for (name, value) in elem.attributes() {
        xml.write_attribute(name, value);
    }

    // Whitespace-only text is an indention artifact.
    if !elem.text.trim().is_empty() {
        xml.write_text(&elem.text);
    }

    for child in &elem.children {
        write_element(child, xml);
    }

    xml.end_element();
}

impl_display!(Element);
