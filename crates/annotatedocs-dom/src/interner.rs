//! String Interner - Deduplicate tag and attribute names
//!
//! Tag names ("div", "p") and attribute names ("class", "data-annotations")
//! repeat on almost every element of a rendered documentation page, so they
//! are stored once and referenced by ID.

use std::collections::HashMap;

/// Interned string ID - just 4 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub u32);

impl InternedString {
    /// Empty string
    pub const EMPTY: InternedString = InternedString(0);
}

/// String entry storing offset and length
#[derive(Debug, Clone, Copy)]
struct StringEntry {
    offset: u32,
    len: u32,
}

/// String interner for deduplicating strings
///
/// All strings live in a single contiguous buffer; lengths are stored
/// separately, so interned strings may contain any character.
#[derive(Debug)]
pub struct StringInterner {
    buffer: String,
    map: HashMap<Box<str>, u32>,
    entries: Vec<StringEntry>,
}

impl StringInterner {
    /// Create a new string interner with the names the renderer touches
    /// pre-interned
    pub fn new() -> Self {
        let mut interner = Self {
            buffer: String::with_capacity(2048),
            map: HashMap::with_capacity(128),
            entries: Vec::with_capacity(128),
        };

        // Index 0 is always the empty string
        interner.intern("");

        const COMMON_TAGS: &[&str] = &[
            "html", "head", "body", "div", "span", "p", "a", "section",
            "main", "dl", "dt", "dd", "pre", "code", "ul", "ol", "li",
            "h1", "h2", "h3", "h4", "h5", "h6", "title", "script", "style",
        ];

        const COMMON_ATTRS: &[&str] = &[
            "id", "class", "title", "role", "href", "data-toggle",
            "data-annotations", "data-document-annotations",
            "data-global-annotations",
        ];

        for tag in COMMON_TAGS {
            interner.intern(tag);
        }
        for attr in COMMON_ATTRS {
            interner.intern(attr);
        }

        interner
    }

    /// Intern a string, returning its ID
    pub fn intern(&mut self, s: &str) -> InternedString {
        if let Some(&index) = self.map.get(s) {
            return InternedString(index);
        }

        let index = self.entries.len() as u32;
        let offset = self.buffer.len() as u32;
        self.buffer.push_str(s);
        self.entries.push(StringEntry {
            offset,
            len: s.len() as u32,
        });
        self.map.insert(s.into(), index);

        InternedString(index)
    }

    /// Look up a string without interning it
    pub fn lookup(&self, s: &str) -> Option<InternedString> {
        self.map.get(s).map(|&index| InternedString(index))
    }

    /// Get the string for an interned ID
    #[inline]
    pub fn get(&self, id: InternedString) -> &str {
        match self.entries.get(id.0 as usize) {
            Some(entry) => {
                let start = entry.offset as usize;
                &self.buffer[start..start + entry.len as usize]
            }
            None => "",
        }
    }

    /// Number of interned strings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
