// Fixed-width text slots for the flat table

pub const CHUNK_SIZE: usize = 30_000;
pub const CHUNK_COUNT: usize = 10;

/// Split `text` into exactly `count` consecutive slices of at most `size` chars.
/// Missing slots are `""`; anything past `count * size` chars is dropped.
pub fn chunk_text(text: &str, size: usize, count: usize) -> Vec<String> {
    let size = size.max(1);
    let mut out: Vec<String> = Vec::with_capacity(count);

    let mut chars = text.chars().peekable();
    while chars.peek().is_some() && out.len() < count {
        out.push(chars.by_ref().take(size).collect());
    }
    out.resize(count, String::new());
    out
}

pub fn chunk_full_text(text: &str) -> Vec<String> {
    chunk_text(text, CHUNK_SIZE, CHUNK_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_text_gives_empty_slots() {
        let got = chunk_text("", 5, 4);
        assert_eq!(got, vec!["", "", "", ""]);
        assert_eq!(chunk_full_text("").len(), CHUNK_COUNT);
    }

    #[test]
    fn pads_short_text() {
        assert_eq!(chunk_text("abcdefg", 3, 4), vec!["abc", "def", "g", ""]);
    }

    #[test]
    fn truncates_past_capacity() {
        assert_eq!(chunk_text("abcdefghij", 3, 2), vec!["abc", "def"]);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(chunk_text("привет", 4, 2), vec!["прив", "ет"]);
    }

    proptest! {
        #[test]
        fn slices_rebuild_prefix(text in "\\PC{0,200}", size in 1usize..20, count in 0usize..12) {
            let got = chunk_text(&text, size, count);
            prop_assert_eq!(got.len(), count);
            prop_assert!(got.iter().all(|s| s.chars().count() <= size));
            let prefix: String = text.chars().take(size * count).collect();
            prop_assert_eq!(got.concat(), prefix);
        }
    }
}
