// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgtypes::Stream;

use crate::{WriteBuffer, WriteOptions};

/// Representation of the [`<color>`] type.
///
/// A `None` returned by the parser is the "unset" sentinel:
/// `none`, `currentColor` and any unrecognized text end up there.
///
/// [`<color>`]: https://www.w3.org/TR/css-color-3/
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[allow(missing_docs)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    /// Constructs a new opaque color from RGB values.
    #[inline]
    pub fn new_rgb(red: u8, green: u8, blue: u8) -> Color {
        Color { red, green, blue, alpha: 255 }
    }

    /// Constructs a new color from RGBA values.
    #[inline]
    pub fn new_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Color {
        Color { red, green, blue, alpha }
    }

    /// Constructs a new black color.
    #[inline]
    pub fn black() -> Color {
        Color::new_rgb(0, 0, 0)
    }

    /// Constructs a new white color.
    #[inline]
    pub fn white() -> Color {
        Color::new_rgb(255, 255, 255)
    }

    /// Returns `true` if the color is fully opaque.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.alpha == 255
    }

    /// Parses a color from a string.
    ///
    /// Supports hex notation, `rgb()`, `rgba()`, `hsl()`, `hsla()`
    /// and named colors. Case-insensitive.
    ///
    /// Returns `None` for `none`, `currentColor` and invalid colors.
    ///
    /// # Examples
    ///
    /// ```
    /// use svgscene::Color;
    ///
    /// assert_eq!(Color::parse("#fff"), Some(Color::white()));
    /// assert_eq!(Color::parse("rgba(0, 0, 0, 0.5)"), Some(Color::new_rgba(0, 0, 0, 128)));
    /// assert_eq!(Color::parse("none"), None);
    /// ```
    pub fn parse(text: &str) -> Option<Color> {
        let text = text.trim().to_ascii_lowercase();

        match text.as_str() {
            "" | "none" | "currentcolor" => return None,
            "transparent" => return Some(Color::new_rgba(0, 0, 0, 0)),
            _ => {}
        }

        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex);
        }

        if let Some(open) = text.find('(') {
            let name = text[..open].trim_end();
            let args = text[open + 1..].strip_suffix(')')?;
            return parse_func(name, args);
        }

        from_name(&text)
    }
}

impl Default for Color {
    fn default() -> Color {
        Color::black()
    }
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let mut digits = [0u8; 8];
    if hex.len() > digits.len() {
        return None;
    }

    for (i, c) in hex.bytes().enumerate() {
        digits[i] = hex_value(c)?;
    }

    let short = |n: u8| n * 17;
    let long = |hi: u8, lo: u8| hi * 16 + lo;

    let d = &digits;
    match hex.len() {
        3 => Some(Color::new_rgb(short(d[0]), short(d[1]), short(d[2]))),
        4 => Some(Color::new_rgba(short(d[0]), short(d[1]), short(d[2]), short(d[3]))),
        6 => Some(Color::new_rgb(long(d[0], d[1]), long(d[2], d[3]), long(d[4], d[5]))),
        8 => Some(Color::new_rgba(long(d[0], d[1]), long(d[2], d[3]),
                                  long(d[4], d[5]), long(d[6], d[7]))),
        _ => None,
    }
}

// A numeric function argument with an optional `%` or `deg` suffix.
#[derive(Clone, Copy)]
struct Arg {
    num: f64,
    percent: bool,
}

fn split_args(args: &str) -> Option<Vec<Arg>> {
    let mut list = Vec::with_capacity(4);
    let mut s = Stream::from(args);
    s.skip_spaces();
    while !s.at_end() {
        let num = s.parse_number().ok()?;
        let percent = s.is_curr_byte_eq(b'%');
        if percent {
            s.advance(1);
        } else if s.starts_with(b"deg") {
            s.advance(3);
        } else if s.curr_byte().map(|c| c.is_ascii_alphabetic()).unwrap_or(false) {
            return None;
        }

        list.push(Arg { num, percent });

        s.skip_spaces();
        if s.is_curr_byte_eq(b',') || s.is_curr_byte_eq(b'/') {
            s.advance(1);
        }
        s.skip_spaces();
    }

    Some(list)
}

fn bound(min: f64, val: f64, max: f64) -> f64 {
    debug_assert!(min <= max);
    val.max(min).min(max)
}

fn to_channel(arg: Arg) -> u8 {
    let n = if arg.percent { arg.num * 255.0 / 100.0 } else { arg.num };
    bound(0.0, n.round(), 255.0) as u8
}

fn to_alpha(arg: Arg) -> u8 {
    let n = if arg.percent { arg.num / 100.0 } else { arg.num };
    (bound(0.0, n, 1.0) * 255.0).round() as u8
}

fn parse_func(name: &str, args: &str) -> Option<Color> {
    let args = split_args(args)?;

    match name {
        "rgb" | "rgba" => {
            if args.len() != 3 && args.len() != 4 {
                return None;
            }

            let mut c = Color::new_rgb(to_channel(args[0]), to_channel(args[1]),
                                       to_channel(args[2]));
            if let Some(a) = args.get(3) {
                c.alpha = to_alpha(*a);
            }

            Some(c)
        }
        "hsl" | "hsla" => {
            if args.len() != 3 && args.len() != 4 {
                return None;
            }

            let hue = args[0].num.rem_euclid(360.0);
            let saturation = bound(0.0, args[1].num, 100.0) / 100.0;
            let lightness = bound(0.0, args[2].num, 100.0) / 100.0;

            let mut c = hsl_to_rgb(hue, saturation, lightness);
            if let Some(a) = args.get(3) {
                c.alpha = to_alpha(*a);
            }

            Some(c)
        }
        _ => None,
    }
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Color {
    let t2 = if lightness <= 0.5 {
        lightness * (saturation + 1.0)
    } else {
        lightness + saturation - (lightness * saturation)
    };

    let t1 = lightness * 2.0 - t2;
    let hue = hue / 60.0;

    let red = hue_to_rgb(t1, t2, hue + 2.0);
    let green = hue_to_rgb(t1, t2, hue);
    let blue = hue_to_rgb(t1, t2, hue - 2.0);

    let channel = |n: f64| bound(0.0, (n * 255.0).round(), 255.0) as u8;
    Color::new_rgb(channel(red), channel(green), channel(blue))
}

fn hue_to_rgb(t1: f64, t2: f64, mut hue: f64) -> f64 {
    if hue < 0.0 {
        hue += 6.0;
    }

    if hue >= 6.0 {
        hue -= 6.0;
    }

    if hue < 1.0 {
        (t2 - t1) * hue + t1
    } else if hue < 3.0 {
        t2
    } else if hue < 4.0 {
        (t2 - t1) * (4.0 - hue) + t1
    } else {
        t1
    }
}

fn from_name(name: &str) -> Option<Color> {
    NAMED_COLORS
        .binary_search_by(|&(n, _, _, _)| n.cmp(name))
        .ok()
        .map(|idx| {
            let (_, r, g, b) = NAMED_COLORS[idx];
            Color::new_rgb(r, g, b)
        })
}

impl WriteBuffer for Color {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        static CHARS: &[u8] = b"0123456789abcdef";

        let mut channels = vec![self.red, self.green, self.blue];
        if !self.is_opaque() {
            channels.push(self.alpha);
        }

        let is_trimmable = channels.iter().all(|c| c >> 4 == c & 0x0F);

        buf.push(b'#');
        for c in channels {
            if opt.trim_hex_colors && is_trimmable {
                buf.push(CHARS[(c & 0x0F) as usize]);
            } else {
                buf.push(CHARS[(c >> 4) as usize]);
                buf.push(CHARS[(c & 0x0F) as usize]);
            }
        }
    }
}

impl_display!(Color);

// Sorted by name.
static NAMED_COLORS: &[(&str, u8, u8, u8)] = &[
    ("aliceblue", 240, 248, 255),
    ("antiquewhite", 250, 235, 215),
    ("aqua", 0, 255, 255),
    ("aquamarine", 127, 255, 212),
    ("azure", 240, 255, 255),
    ("beige", 245, 245, 220),
    ("bisque", 255, 228, 196),
    ("black", 0, 0, 0),
    ("blanchedalmond", 255, 235, 205),
    ("blue", 0, 0, 255),
    ("blueviolet", 138, 43, 226),
    ("brown", 165, 42, 42),
    ("burlywood", 222, 184, 135),
    ("cadetblue", 95, 158, 160),
    ("chartreuse", 127, 255, 0),
    ("chocolate", 210, 105, 30),
    ("coral", 255, 127, 80),
    ("cornflowerblue", 100, 149, 237),
    ("cornsilk", 255, 248, 220),
    ("crimson", 220, 20, 60),
    ("cyan", 0, 255, 255),
    ("darkblue", 0, 0, 139),
    ("darkcyan", 0, 139, 139),
    ("darkgoldenrod", 184, 134, 11),
    ("darkgray", 169, 169, 169),
    ("darkgreen", 0, 100, 0),
    ("darkgrey", 169, 169, 169),
    ("darkkhaki", 189, 183, 107),
    ("darkmagenta", 139, 0, 139),
    ("darkolivegreen", 85, 107, 47),
    ("darkorange", 255, 140, 0),
    ("darkorchid", 153, 50, 204),
    ("darkred", 139, 0, 0),
    ("darksalmon", 233, 150, 122),
    ("darkseagreen", 143, 188, 143),
    ("darkslateblue", 72, 61, 139),
    ("darkslategray", 47, 79, 79),
    ("darkslategrey", 47, 79, 79),
    ("darkturquoise", 0, 206, 209),
    ("darkviolet", 148, 0, 211),
    ("deeppink", 255, 20, 147),
    ("deepskyblue", 0, 191, 255),
    ("dimgray", 105, 105, 105),
    ("dimgrey", 105, 105, 105),
    ("dodgerblue", 30, 144, 255),
    ("firebrick", 178, 34, 34),
    ("floralwhite", 255, 250, 240),
    ("forestgreen", 34, 139, 34),
    ("fuchsia", 255, 0, 255),
    ("gainsboro", 220, 220, 220),
    ("ghostwhite", 248, 248, 255),
    ("gold", 255, 215, 0),
    ("goldenrod", 218, 165, 32),
    ("gray", 128, 128, 128),
    ("green", 0, 128, 0),
    ("greenyellow", 173, 255, 47),
    ("grey", 128, 128, 128),
    ("honeydew", 240, 255, 240),
    ("hotpink", 255, 105, 180),
    ("indianred", 205, 92, 92),
    ("indigo", 75, 0, 130),
    ("ivory", 255, 255, 240),
    ("khaki", 240, 230, 140),
    ("lavender", 230, 230, 250),
    ("lavenderblush", 255, 240, 245),
    ("lawngreen", 124, 252, 0),
    ("lemonchiffon", 255, 250, 205),
    ("lightblue", 173, 216, 230),
    ("lightcoral", 240, 128, 128),
    ("lightcyan", 224, 255, 255),
    ("lightgoldenrodyellow", 250, 250, 210),
    ("lightgray", 211, 211, 211),
    ("lightgreen", 144, 238, 144),
    ("lightgrey", 211, 211, 211),
    ("lightpink", 255, 182, 193),
    ("lightsalmon", 255, 160, 122),
    ("lightseagreen", 32, 178, 170),
    ("lightskyblue", 135, 206, 250),
    ("lightslategray", 119, 136, 153),
    ("lightslategrey", 119, 136, 153),
    ("lightsteelblue", 176, 196, 222),
    ("lightyellow", 255, 255, 224),
    ("lime", 0, 255, 0),
    ("limegreen", 50, 205, 50),
    ("linen", 250, 240, 230),
    ("magenta", 255, 0, 255),
    ("maroon", 128, 0, 0),
    ("mediumaquamarine", 102, 205, 170),
    ("mediumblue", 0, 0, 205),
    ("mediumorchid", 186, 85, 211),
    ("mediumpurple", 147, 112, 219),
    ("mediumseagreen", 60, 179, 113),
    ("mediumslateblue", 123, 104, 238),
    ("mediumspringgreen", 0, 250, 154),
    ("mediumturquoise", 72, 209, 204),
    ("mediumvioletred", 199, 21, 133),
    ("midnightblue", 25, 25, 112),
    ("mintcream", 245, 255, 250),
    ("mistyrose", 255, 228, 225),
    ("moccasin", 255, 228, 181),
    ("navajowhite", 255, 222, 173),
    ("navy", 0, 0, 128),
    ("oldlace", 253, 245, 230),
    ("olive", 128, 128, 0),
    ("olivedrab", 107, 142, 35),
    ("orange", 255, 165, 0),
    ("orangered", 255, 69, 0),
    ("orchid", 218, 112, 214),
    ("palegoldenrod", 238, 232, 170),
    ("palegreen", 152, 251, 152),
    ("paleturquoise", 175, 238, 238),
    ("palevioletred", 219, 112, 147),
    ("papayawhip", 255, 239, 213),
    ("peachpuff", 255, 218, 185),
    ("peru", 205, 133, 63),
    ("pink", 255, 192, 203),
    ("plum", 221, 160, 221),
    ("powderblue", 176, 224, 230),
    ("purple", 128, 0, 128),
    ("red", 255, 0, 0),
    ("rosybrown", 188, 143, 143),
    ("royalblue", 65, 105, 225),
    ("saddlebrown", 139, 69, 19),
    ("salmon", 250, 128, 114),
    ("sandybrown", 244, 164, 96),
    ("seagreen", 46, 139, 87),
    ("seashell", 255, 245, 238),
    ("sienna", 160, 82, 45),
    ("silver", 192, 192, 192),
    ("skyblue", 135, 206, 235),
    ("slateblue", 106, 90, 205),
    ("slategray", 112, 128, 144),
    ("slategrey", 112, 128, 144),
    ("snow", 255, 250, 250),
    ("springgreen", 0, 255, 127),
    ("steelblue", 70, 130, 180),
    ("tan", 210, 180, 140),
    ("teal", 0, 128, 128),
    ("thistle", 216, 191, 216),
    ("tomato", 255, 99, 71),
    ("turquoise", 64, 224, 208),
    ("violet", 238, 130, 238),
    ("wheat", 245, 222, 179),
    ("white", 255, 255, 255),
    ("whitesmoke", 245, 245, 245),
    ("yellow", 255, 255, 0),
    ("yellowgreen", 154, 205, 50),
];
