//! Folding of decorative Unicode glyphs to plain ASCII
//!
//! Providers dress channel names up with superscript quality tags (`ᴴᴰ`),
//! small caps or full-width letters. Folding maps each such glyph to its
//! ASCII counterpart so that tag matching sees ordinary text.

use std::collections::HashMap;
use std::sync::OnceLock;

const SUPERSCRIPT_DIGITS: [(char, char); 10] = [
    ('⁰', '0'),
    ('¹', '1'),
    ('²', '2'),
    ('³', '3'),
    ('⁴', '4'),
    ('⁵', '5'),
    ('⁶', '6'),
    ('⁷', '7'),
    ('⁸', '8'),
    ('⁹', '9'),
];

const SUBSCRIPT_DIGITS: [(char, char); 10] = [
    ('₀', '0'),
    ('₁', '1'),
    ('₂', '2'),
    ('₃', '3'),
    ('₄', '4'),
    ('₅', '5'),
    ('₆', '6'),
    ('₇', '7'),
    ('₈', '8'),
    ('₉', '9'),
];

const SUPERSCRIPT_LETTERS: [(char, char); 45] = [
    ('ᴬ', 'A'),
    ('ᴮ', 'B'),
    ('ᴰ', 'D'),
    ('ᴱ', 'E'),
    ('ᴳ', 'G'),
    ('ᴴ', 'H'),
    ('ᴵ', 'I'),
    ('ᴶ', 'J'),
    ('ᴷ', 'K'),
    ('ᴸ', 'L'),
    ('ᴹ', 'M'),
    ('ᴺ', 'N'),
    ('ᴼ', 'O'),
    ('ᴾ', 'P'),
    ('ᴿ', 'R'),
    ('ᵀ', 'T'),
    ('ᵁ', 'U'),
    ('ⱽ', 'V'),
    ('ᵂ', 'W'),
    ('ᵃ', 'a'),
    ('ᵇ', 'b'),
    ('ᶜ', 'c'),
    ('ᵈ', 'd'),
    ('ᵉ', 'e'),
    ('ᶠ', 'f'),
    ('ᵍ', 'g'),
    ('ʰ', 'h'),
    ('ⁱ', 'i'),
    ('ʲ', 'j'),
    ('ᵏ', 'k'),
    ('ˡ', 'l'),
    ('ᵐ', 'm'),
    ('ⁿ', 'n'),
    ('ᵒ', 'o'),
    ('ᵖ', 'p'),
    ('ʳ', 'r'),
    ('ˢ', 's'),
    ('ᵗ', 't'),
    ('ᵘ', 'u'),
    ('ᵛ', 'v'),
    ('ʷ', 'w'),
    ('ˣ', 'x'),
    ('ʸ', 'y'),
    ('ᶻ', 'z'),
    ('⁺', '+'),
];

const SMALL_CAPS: [(char, char); 24] = [
    ('ᴀ', 'A'),
    ('ʙ', 'B'),
    ('ᴄ', 'C'),
    ('ᴅ', 'D'),
    ('ᴇ', 'E'),
    ('ꜰ', 'F'),
    ('ɢ', 'G'),
    ('ʜ', 'H'),
    ('ɪ', 'I'),
    ('ᴊ', 'J'),
    ('ᴋ', 'K'),
    ('ʟ', 'L'),
    ('ᴍ', 'M'),
    ('ɴ', 'N'),
    ('ᴏ', 'O'),
    ('ᴘ', 'P'),
    ('ʀ', 'R'),
    ('ꜱ', 'S'),
    ('ᴛ', 'T'),
    ('ᴜ', 'U'),
    ('ᴠ', 'V'),
    ('ᴡ', 'W'),
    ('ʏ', 'Y'),
    ('ᴢ', 'Z'),
];

/// Character-for-character lookup folder
#[derive(Debug, Clone)]
pub struct UnicodeFolder {
    map: HashMap<char, char>,
}

impl Default for UnicodeFolder {
    fn default() -> Self {
        Self::new(Self::default_table())
    }
}

impl UnicodeFolder {
    /// Build a folder from `(glyph, replacement)` pairs.
    ///
    /// Chains (`a -> b`, `b -> c`) are resolved up front so every glyph maps
    /// straight to a character that is not itself folded; this keeps
    /// `fold(fold(s)) == fold(s)` for any table.
    pub fn new<I>(table: I) -> Self
    where
        I: IntoIterator<Item = (char, char)>,
    {
        let raw: HashMap<char, char> = table.into_iter().filter(|(k, v)| k != v).collect();
        let limit = raw.len();
        let map = raw
            .iter()
            .filter_map(|(&from, &to)| {
                let mut target = to;
                let mut steps = 0;
                while let Some(&next) = raw.get(&target) {
                    if steps >= limit {
                        // cycle, leave the glyph alone
                        return None;
                    }
                    target = next;
                    steps += 1;
                }
                Some((from, target))
            })
            .collect();
        Self { map }
    }

    /// The built-in table: superscript/subscript digits, superscript letters,
    /// small caps, full-width Latin letters, digits and space.
    pub fn default_table() -> Vec<(char, char)> {
        let mut table = Vec::with_capacity(200);
        table.extend_from_slice(&SUPERSCRIPT_DIGITS);
        table.extend_from_slice(&SUBSCRIPT_DIGITS);
        table.extend_from_slice(&SUPERSCRIPT_LETTERS);
        table.extend_from_slice(&SMALL_CAPS);
        table.extend(full_width_range('Ａ', 'Z', 26));
        table.extend(full_width_range('ａ', 'z', 26));
        table.extend(full_width_range('０', '9', 10));
        table.push(('\u{3000}', ' '));
        table
    }

    /// Process-wide folder built from the default table
    pub fn global() -> &'static Self {
        static FOLDER: OnceLock<UnicodeFolder> = OnceLock::new();
        FOLDER.get_or_init(UnicodeFolder::default)
    }

    pub fn fold(&self, input: &str) -> String {
        input
            .chars()
            .map(|c| self.map.get(&c).copied().unwrap_or(c))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// `count` consecutive full-width glyphs starting at `first`, mapped onto the
/// ASCII range that ends at `last_ascii`.
fn full_width_range(first: char, last_ascii: char, count: u32) -> Vec<(char, char)> {
    let ascii_start = last_ascii as u32 + 1 - count;
    (0..count)
        .filter_map(|i| {
            let wide = char::from_u32(first as u32 + i)?;
            let narrow = char::from_u32(ascii_start + i)?;
            Some((wide, narrow))
        })
        .collect()
}

/// Fold `input` with the default table
pub fn fold(input: &str) -> String {
    UnicodeFolder::global().fold(input)
}
