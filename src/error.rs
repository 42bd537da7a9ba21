// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::error;
use std::fmt;
use std::io;

/// Import and export errors.
///
/// Only document-level problems are reported as errors.
/// Invalid attribute values are never an error: they fall back
/// to a default value and a warning is logged.
#[derive(Debug)]
pub enum Error {
    /// The input text is empty or contains only whitespaces.
    EmptyDocument,

    /// The root element is not an `svg` element.
    NoSvgElement,

    /// An element was opened but never closed.
    ///
    /// Reported only by the streaming reader.
    UnclosedElement,

    /// A close tag does not match the open element.
    ///
    /// Reported only by the streaming reader.
    UnexpectedCloseTag(String),

    /// A `roxmltree` error.
    Xml(roxmltree::Error),

    /// An `xmlparser` error.
    Stream(xmlparser::Error),

    /// An I/O error.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::EmptyDocument => {
                write!(f, "the document does not have any nodes")
            }
            Error::NoSvgElement => {
                write!(f, "the document does not have an SVG element")
            }
            Error::UnclosedElement => {
                write!(f, "the document has an unclosed element")
            }
            Error::UnexpectedCloseTag(ref name) => {
                write!(f, "the document has an unexpected close tag '{}'", name)
            }
            Error::Xml(ref e) => {
                write!(f, "{}", e)
            }
            Error::Stream(ref e) => {
                write!(f, "{}", e)
            }
            Error::Io(ref e) => {
                write!(f, "{}", e)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Xml(ref e) => Some(e),
            Error::Stream(ref e) => Some(e),
            Error::Io(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<roxmltree::Error> for Error {
    fn from(value: roxmltree::Error) -> Self {
        Error::Xml(value)
    }
}

impl From<xmlparser::Error> for Error {
    fn from(value: xmlparser::Error) -> Self {
        Error::Stream(value)
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::Io(value)
    }
}

/// A specialized `Result` type for import and export operations.
pub type Result<T> = ::std::result::Result<T, Error>;
