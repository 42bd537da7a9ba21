// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgtypes::{NumberListParser, Stream};

/// Splits an inline `style` attribute into `(name, value)` pairs.
///
/// Invalid declarations are skipped by the CSS tokenizer.
pub(crate) fn parse_declarations(text: &str) -> Vec<(&str, &str)> {
    simplecss::DeclarationTokenizer::from(text)
        .map(|d| (d.name, d.value.trim()))
        .filter(|&(name, _)| !name.is_empty())
        .collect()
}

/// Parses a `url(#id)` reference.
///
/// Returns the id and a trimmed remainder.
pub(crate) fn parse_func_iri(text: &str) -> Option<(&str, &str)> {
    let mut s = Stream::from(text);
    let id = s.parse_func_iri().ok()?;
    if id.is_empty() {
        return None;
    }

    Some((id, s.slice_tail().trim()))
}

/// Parses an `#id` reference, used by `href`.
pub(crate) fn parse_iri(text: &str) -> Option<&str> {
    let mut s = Stream::from(text);
    match s.parse_iri() {
        Ok(id) if !id.is_empty() => Some(id),
        _ => None,
    }
}

/// Parses a list of numbers, like `stroke-dasharray`.
///
/// Stops on the first invalid number.
pub(crate) fn parse_number_list(text: &str) -> Vec<f64> {
    NumberListParser::from(text).map_while(Result::ok).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declarations_1() {
        assert_eq!(parse_declarations("fill:red; stroke: #000; opacity:0.5"),
                   vec![("fill", "red"), ("stroke", "#000"), ("opacity", "0.5")]);
    }

    #[test]
    fn declarations_2() {
        assert_eq!(parse_declarations(""), Vec::<(&str, &str)>::new());
    }

    #[test]
    fn func_iri_1() {
        assert_eq!(parse_func_iri("url(#lg1)"), Some(("lg1", "")));
        assert_eq!(parse_func_iri("url(#lg1) none"), Some(("lg1", "none")));
        assert_eq!(parse_func_iri("url(lg1)"), None);
        assert_eq!(parse_func_iri("red"), None);
    }

    #[test]
    fn iri_1() {
        assert_eq!(parse_iri("#rect1"), Some("rect1"));
        assert_eq!(parse_iri("rect1"), None);
        assert_eq!(parse_iri("#"), None);
    }

    #[test]
    fn number_list_1() {
        assert_eq!(parse_number_list("5, 3 2"), vec![5.0, 3.0, 2.0]);
        assert_eq!(parse_number_list("5 qwe 2"), vec![5.0]);
    }
}
