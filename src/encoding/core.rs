use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::error::{EncodeError, Result};
use crate::palette::{Palette, Rgb};

use super::pattern::{PATTERN_COUNT, Pattern};

/// One motif from the input sequence.
pub type Token = String;

/// Colour and pattern assigned to a distinct token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Encoding {
    pub rank: usize,
    pub color: Rgb,
    pub pattern_index: usize,
}

impl Encoding {
    pub fn pattern(&self) -> Pattern {
        Pattern::from_index(self.pattern_index)
    }
}

/// Distinct token together with its encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    pub token: Token,
    pub encoding: Encoding,
}

/// Order in which legend entries are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendOrder {
    /// Ascending rank, so each palette cycle stays together.
    #[default]
    Rank,
    /// Grouped by palette slot, then by pattern.
    Color,
}

/// Reported when there are more distinct tokens than colour/pattern pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityWarning {
    pub distinct: usize,
    pub capacity: usize,
}

impl CapacityWarning {
    /// Tokens whose pattern index has no decoration.
    pub fn overflowing(&self) -> usize {
        self.distinct.saturating_sub(self.capacity)
    }
}

/// Token to encoding assignment for one input sequence.
#[derive(Debug, Clone, Serialize)]
pub struct Mapping {
    palette_len: usize,
    /// Entries in rank order (ascending token order).
    entries: Vec<MappingEntry>,
    longest_token_width: usize,
    #[serde(skip)]
    index: HashMap<Token, usize>,
}

/// Build the mapping for a token sequence.
///
/// Only the set of distinct tokens matters: ranks follow ascending byte-wise
/// string order, colour is `rank % palette.len()` and pattern index is
/// `rank / palette.len()`.
pub fn build_mapping<T: AsRef<str>>(tokens: &[T], palette: &Palette) -> Result<Mapping> {
    if tokens.is_empty() {
        return Err(EncodeError::EmptyInput);
    }

    let distinct: BTreeSet<&str> = tokens.iter().map(|t| t.as_ref()).collect();
    let palette_len = palette.len();

    let entries: Vec<MappingEntry> = distinct
        .into_iter()
        .enumerate()
        .map(|(rank, token)| MappingEntry {
            token: token.to_string(),
            encoding: Encoding {
                rank,
                color: palette.color_for(rank),
                pattern_index: rank / palette_len,
            },
        })
        .collect();

    let longest_token_width = entries
        .iter()
        .map(|entry| entry.token.width())
        .max()
        .unwrap_or(0);

    let index = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| (entry.token.clone(), idx))
        .collect();

    Ok(Mapping {
        palette_len,
        entries,
        longest_token_width,
        index,
    })
}

impl Mapping {
    pub fn get(&self, token: &str) -> Option<&Encoding> {
        self.index.get(token).map(|&idx| &self.entries[idx].encoding)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in rank order.
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Display width (terminal columns) of the widest token.
    pub fn longest_token_width(&self) -> usize {
        self.longest_token_width
    }

    pub fn palette_len(&self) -> usize {
        self.palette_len
    }

    /// Number of tokens that can be encoded without collisions.
    pub fn capacity(&self) -> usize {
        self.palette_len.saturating_mul(PATTERN_COUNT)
    }

    pub fn capacity_warning(&self) -> Option<CapacityWarning> {
        (self.entries.len() > self.capacity()).then(|| CapacityWarning {
            distinct: self.entries.len(),
            capacity: self.capacity(),
        })
    }

    /// Entries in the order the legend draws them.
    ///
    /// This is a separate sort over the assigned encodings, not over the
    /// token strings, even though `Rank` currently yields the same sequence.
    pub fn legend_order(&self, order: LegendOrder) -> Vec<&MappingEntry> {
        let mut ordered: Vec<&MappingEntry> = self.entries.iter().collect();
        match order {
            LegendOrder::Rank => ordered.sort_by_key(|entry| entry.encoding.rank),
            LegendOrder::Color => ordered.sort_by_key(|entry| {
                (
                    entry.encoding.rank % self.palette_len,
                    entry.encoding.pattern_index,
                )
            }),
        }
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn tokens(raw: &[&str]) -> Vec<Token> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sample_sequence_gets_three_colors() {
        let mapping =
            build_mapping(&tokens(&["AAT", "AAT", "CCG", "AAT", "GGC"]), &Palette::default())
                .unwrap();

        let order: Vec<&str> = mapping.entries().iter().map(|e| e.token.as_str()).collect();
        assert_eq!(order, vec!["AAT", "CCG", "GGC"]);

        let aat = mapping.get("AAT").unwrap();
        let ccg = mapping.get("CCG").unwrap();
        let ggc = mapping.get("GGC").unwrap();
        assert_eq!((aat.rank, ccg.rank, ggc.rank), (0, 1, 2));
        assert_eq!(aat.pattern_index, 0);
        assert_eq!(ccg.pattern_index, 0);
        assert_eq!(ggc.pattern_index, 0);
        assert_ne!(aat.color, ccg.color);
        assert_ne!(ccg.color, ggc.color);
        assert_ne!(aat.color, ggc.color);
        assert!(mapping.capacity_warning().is_none());
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let empty: Vec<Token> = Vec::new();
        assert!(matches!(
            build_mapping(&empty, &Palette::default()),
            Err(EncodeError::EmptyInput)
        ));
    }

    #[test]
    fn empty_string_is_a_valid_token() {
        let mapping = build_mapping(&tokens(&[""]), &Palette::default()).unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("").unwrap().rank, 0);
        assert_eq!(mapping.longest_token_width(), 0);
    }

    #[test]
    fn mapping_ignores_input_order() {
        let forward = tokens(&["GGC", "AAT", "CCG", "AAT", "TTA", "GGC"]);
        let mut backward = forward.clone();
        backward.reverse();
        let shuffled = tokens(&["TTA", "CCG", "AAT", "GGC"]);

        let palette = Palette::default();
        let a = build_mapping(&forward, &palette).unwrap();
        let b = build_mapping(&backward, &palette).unwrap();
        let c = build_mapping(&shuffled, &palette).unwrap();
        assert_eq!(a.entries(), b.entries());
        assert_eq!(a.entries(), c.entries());
    }

    #[test]
    fn ranks_are_stable_when_rebuilt_from_sorted_tokens() {
        let raw = tokens(&["b", "a", "c", "a", "ab", "B"]);
        let palette = Palette::default();
        let first = build_mapping(&raw, &palette).unwrap();

        let sorted: Vec<Token> = first.entries().iter().map(|e| e.token.clone()).collect();
        let second = build_mapping(&sorted, &palette).unwrap();

        for entry in first.entries() {
            assert_eq!(second.get(&entry.token).unwrap().rank, entry.encoding.rank);
        }
        // byte order: uppercase before lowercase, prefixes first
        let order: Vec<&str> = first.entries().iter().map(|e| e.token.as_str()).collect();
        assert_eq!(order, vec!["B", "a", "ab", "b", "c"]);
    }

    #[test]
    fn pairs_are_unique_up_to_capacity() {
        let palette = Palette::default();
        let capacity = palette.len() * PATTERN_COUNT;
        let raw: Vec<Token> = (0..capacity).map(|i| format!("m{i:04}")).collect();
        let mapping = build_mapping(&raw, &palette).unwrap();

        let pairs: HashSet<(Rgb, usize)> = mapping
            .entries()
            .iter()
            .map(|e| (e.encoding.color, e.encoding.pattern_index))
            .collect();
        assert_eq!(pairs.len(), capacity);
        assert!(mapping.capacity_warning().is_none());
        assert!(
            mapping
                .entries()
                .iter()
                .all(|e| e.encoding.pattern() != Pattern::Overflow)
        );
    }

    #[test]
    fn overflow_is_reported_not_fatal() {
        let palette = Palette::new(vec![Rgb(1, 2, 3), Rgb(4, 5, 6)]).unwrap();
        let raw: Vec<Token> = (0..15).map(|i| format!("t{i:02}")).collect();
        let mapping = build_mapping(&raw, &palette).unwrap();

        let warning = mapping.capacity_warning().unwrap();
        assert_eq!(warning.capacity, 12);
        assert_eq!(warning.distinct, 15);
        assert_eq!(warning.overflowing(), 3);
        assert_eq!(mapping.get("t14").unwrap().pattern_index, 7);
        assert_eq!(mapping.get("t14").unwrap().pattern(), Pattern::Overflow);
    }

    #[test]
    fn legend_order_by_color_groups_palette_slots() {
        let palette = Palette::new(vec![Rgb(1, 0, 0), Rgb(0, 1, 0)]).unwrap();
        let mapping = build_mapping(&tokens(&["a", "b", "c", "d", "e"]), &palette).unwrap();

        let by_rank: Vec<&str> = mapping
            .legend_order(LegendOrder::Rank)
            .iter()
            .map(|e| e.token.as_str())
            .collect();
        assert_eq!(by_rank, vec!["a", "b", "c", "d", "e"]);

        let by_color: Vec<&str> = mapping
            .legend_order(LegendOrder::Color)
            .iter()
            .map(|e| e.token.as_str())
            .collect();
        assert_eq!(by_color, vec!["a", "c", "e", "b", "d"]);
    }

    #[test]
    fn longest_width_counts_display_columns() {
        let mapping = build_mapping(&tokens(&["AT", "漢字漢"]), &Palette::default()).unwrap();
        assert_eq!(mapping.longest_token_width(), 6);
    }
}
