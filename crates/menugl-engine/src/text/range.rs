/// Inclusive range of Unicode code points to bake.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GlyphRange {
    pub first: u32,
    pub last: u32,
}

impl GlyphRange {
    #[inline]
    pub const fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.first <= self.last
    }
}

/// Basic Latin + Latin-1 Supplement.
pub const DEFAULT_RANGES: &[GlyphRange] = &[GlyphRange::new(0x0020, 0x00FF)];

/// Latin-1 plus Cyrillic, Cyrillic Supplement and the Cyrillic extended blocks.
pub const CYRILLIC_RANGES: &[GlyphRange] = &[
    GlyphRange::new(0x0020, 0x00FF),
    GlyphRange::new(0x0400, 0x052F),
    GlyphRange::new(0x2DE0, 0x2DFF),
    GlyphRange::new(0xA640, 0xA69F),
];

/// Sorted, de-duplicated characters covered by `ranges`.
///
/// Values that are not Unicode scalar values (surrogates) are skipped.
pub(crate) fn collect_codepoints(ranges: &[GlyphRange]) -> Vec<char> {
    let mut chars: Vec<char> = ranges
        .iter()
        .filter(|r| r.is_valid())
        .flat_map(|r| r.first..=r.last)
        .filter_map(char::from_u32)
        .collect();
    chars.sort_unstable();
    chars.dedup();
    chars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_covers_latin1() {
        let chars = collect_codepoints(DEFAULT_RANGES);
        assert_eq!(chars.len(), 0xFF - 0x20 + 1);
        assert_eq!(chars.first(), Some(&' '));
        assert_eq!(chars.last(), Some(&'\u{FF}'));
    }

    #[test]
    fn overlapping_ranges_are_deduplicated() {
        let chars = collect_codepoints(&[GlyphRange::new(0x41, 0x45), GlyphRange::new(0x43, 0x47)]);
        assert_eq!(chars, vec!['A', 'B', 'C', 'D', 'E', 'F', 'G']);
    }

    #[test]
    fn surrogates_are_skipped() {
        let chars = collect_codepoints(&[GlyphRange::new(0xD7FF, 0xE000)]);
        assert_eq!(chars, vec!['\u{D7FF}', '\u{E000}']);
    }
}
