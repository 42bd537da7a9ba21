// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// An XML reader used to build the element tree.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum XmlReader {
    /// Parse the whole document with `roxmltree` first.
    Tree,
    /// Build element records directly from an `xmlparser` token stream.
    ///
    /// Never holds more than one copy of the document in memory.
    Stream,
}

/// Options that defines SVG import.
#[derive(Clone, Debug)]
pub struct ImportOptions {
    /// An XML reader.
    ///
    /// Both readers produce the same element records.
    ///
    /// Default: `XmlReader::Tree`
    pub reader: XmlReader,

    /// Map the document coordinates into scene coordinates
    /// using the `viewBox`, `width`, `height` and `preserveAspectRatio` attributes.
    ///
    /// Default: enabled
    pub apply_root_transform: bool,

    /// Skip layers and groups marked with `display="none"` or `visibility="hidden"`.
    ///
    /// Hidden layers are still imported, but marked as invisible, when disabled.
    ///
    /// Default: disabled
    pub skip_hidden: bool,
}

impl Default for ImportOptions {
    fn default() -> ImportOptions {
        ImportOptions {
            reader: XmlReader::Tree,
            apply_root_transform: true,
            skip_hidden: false,
        }
    }
}

/// XML nodes indention.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Indent {
    /// Disable indention and new lines.
    None,
    /// Indent with spaces. Preferred range is 0..4.
    Spaces(u8),
    /// Indent with tabs.
    Tabs,
}

impl From<Indent> for xmlwriter::Indent {
    fn from(indent: Indent) -> Self {
        match indent {
            Indent::None => xmlwriter::Indent::None,
            Indent::Spaces(n) => xmlwriter::Indent::Spaces(n),
            Indent::Tabs => xmlwriter::Indent::Tabs,
        }
    }
}

/// Options used during writing.
#[derive(Clone, Debug)]
pub struct WriteOptions {
    /// Set XML nodes indention.
    ///
    /// # Examples
    ///
    /// `Indent::Spaces(2)`:
    ///
    /// ```text
    /// <svg>
    ///   <rect fill="red"/>
    /// </svg>
    /// ```
    ///
    /// Default: 4 spaces
    pub indent: Indent,

    /// Set XML attributes indention.
    ///
    /// Default: `None`
    pub attributes_indent: Indent,

    /// Use single quote marks instead of double quote.
    ///
    /// Default: disabled
    pub use_single_quote: bool,

    /// Write the `<?xml ...?>` declaration.
    ///
    /// Default: enabled
    pub write_declaration: bool,

    /// Use #RGB color notation when possible.
    ///
    /// By default all colors written using #RRGGBB notation.
    ///
    /// `#ff0000` -> `#f00`, `#000000` -> `#000`, `#00aa00` -> `#0a0`
    ///
    /// Default: disabled
    pub trim_hex_colors: bool,

    /// Set numeric precision for coordinates: x, y, width, height, path data, etc.
    ///
    /// Range: 1..8. Out of range values are clamped.
    ///
    /// Default: 8
    pub precision_coordinates: u8,

    /// Set numeric precision for transform values: a, b, c, d.
    ///
    /// Range: 1..8. Out of range values are clamped.
    ///
    /// Default: 8
    pub precision_transforms: u8,

    /// Remove leading zero from numbers.
    ///
    /// `0.1` -> `.1`, `-0.1` -> `-.1`
    ///
    /// Default: disabled
    pub remove_leading_zero: bool,

    /// Simplify transform matrices into short equivalent when possible.
    ///
    /// If not set - all transform will be saved as 'matrix'.
    ///
    /// ```text
    /// matrix(1 0 0 1 10 20) -> translate(10 20)
    /// matrix(1 0 0 1 10 0)  -> translate(10)
    /// matrix(2 0 0 3 0 0)   -> scale(2 3)
    /// matrix(2 0 0 2 0 0)   -> scale(2)
    /// ```
    ///
    /// Default: disabled
    pub simplify_transform_matrices: bool,

    /// Remove duplicated path commands.
    ///
    /// If segment has same type as previous - we can skip command specifier.
    ///
    /// `M 10 10 L 20 20 L 30 30 L 40 40` -> `M 10 10 L 20 20 30 30 40 40`
    ///
    /// Default: disabled
    pub remove_duplicated_path_commands: bool,

    /// A margin added around the content bounds
    /// when the scene has no canvas size.
    ///
    /// Default: 20
    pub content_margin: f64,
}

impl Default for WriteOptions {
    fn default() -> WriteOptions {
        WriteOptions {
            indent: Indent::Spaces(4),
            attributes_indent: Indent::None,
            use_single_quote: false,
            write_declaration: true,
            trim_hex_colors: false,
            precision_coordinates: 8,
            precision_transforms: 8,
            remove_leading_zero: false,
            simplify_transform_matrices: false,
            remove_duplicated_path_commands: false,
            content_margin: 20.0,
        }
    }
}
