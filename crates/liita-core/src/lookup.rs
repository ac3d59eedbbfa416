//! Static URI → label tables and the filter categories that use them.
//!
//! The tables are compile-time [`phf`] maps: immutable, allocation-free and
//! safe to read from any thread. Values missing from a table fall back to the
//! last path segment of the URI (see [`uri_to_label`]) so new entries in the
//! knowledge base still get a readable label.

use crate::vocab;
use phf::phf_map;
use serde::{Deserialize, Serialize};

/// A static URI → display label table.
pub type LookupTable = phf::Map<&'static str, &'static str>;

pub static GENDER_LABELS: LookupTable = phf_map! {
    "http://lila-erc.eu/ontologies/lila/feminine" => "Feminine",
    "http://lila-erc.eu/ontologies/lila/masculine" => "Masculine",
    "http://lila-erc.eu/ontologies/lila/neuter" => "Neuter",
};

pub static INFLECTION_TYPE_LABELS: LookupTable = phf_map! {
    "http://liita.it/ontologies/liita/c1" => "1st Conjugation",
    "http://liita.it/ontologies/liita/c1i" => "1st Conj. Irregular",
    "http://liita.it/ontologies/liita/c1p" => "1st Conj. Procomplementary",
    "http://liita.it/ontologies/liita/c1r" => "1st Conj. Pronominal",
    "http://liita.it/ontologies/liita/c2" => "2nd Conjugation",
    "http://liita.it/ontologies/liita/c2i" => "2nd Conj. Irregular",
    "http://liita.it/ontologies/liita/c2p" => "2nd Conj. Procomplementary",
    "http://liita.it/ontologies/liita/c2r" => "2nd Conj. Pronominal",
    "http://liita.it/ontologies/liita/c3" => "3rd Conjugation",
    "http://liita.it/ontologies/liita/c3i" => "3rd Conj. Irregular",
    "http://liita.it/ontologies/liita/c3p" => "3rd Conj. Procomplementary",
    "http://liita.it/ontologies/liita/c3r" => "3rd Conj. Pronominal",
};

pub static POS_LABELS: LookupTable = phf_map! {
    "http://lila-erc.eu/ontologies/lila/adjective" => "Adjective",
    "http://lila-erc.eu/ontologies/lila/adposition" => "Adposition",
    "http://lila-erc.eu/ontologies/lila/adverb" => "Adverb",
    "http://lila-erc.eu/ontologies/lila/coordinating_conjunction" => "Coordinating Conjunction",
    "http://lila-erc.eu/ontologies/lila/determiner" => "Determiner",
    "http://lila-erc.eu/ontologies/lila/interjection" => "Interjection",
    "http://lila-erc.eu/ontologies/lila/noun" => "Noun",
    "http://lila-erc.eu/ontologies/lila/numeral" => "Numeral",
    "http://lila-erc.eu/ontologies/lila/other" => "Other",
    "http://lila-erc.eu/ontologies/lila/particle" => "Particle",
    "http://lila-erc.eu/ontologies/lila/pronoun" => "Pronoun",
    "http://lila-erc.eu/ontologies/lila/proper_noun" => "Proper Noun",
    "http://lila-erc.eu/ontologies/lila/subordinating_conjunction" => "Subordinating Conjunction",
    "http://lila-erc.eu/ontologies/lila/verb" => "Verb",
};

/// Universal Dependencies tags for the LiLa part-of-speech URIs.
pub static POS_UPOS: LookupTable = phf_map! {
    "http://lila-erc.eu/ontologies/lila/adjective" => "ADJ",
    "http://lila-erc.eu/ontologies/lila/adposition" => "ADP",
    "http://lila-erc.eu/ontologies/lila/adverb" => "ADV",
    "http://lila-erc.eu/ontologies/lila/coordinating_conjunction" => "CCONJ",
    "http://lila-erc.eu/ontologies/lila/determiner" => "DET",
    "http://lila-erc.eu/ontologies/lila/interjection" => "INTJ",
    "http://lila-erc.eu/ontologies/lila/noun" => "NOUN",
    "http://lila-erc.eu/ontologies/lila/numeral" => "NUM",
    "http://lila-erc.eu/ontologies/lila/other" => "X",
    "http://lila-erc.eu/ontologies/lila/particle" => "PART",
    "http://lila-erc.eu/ontologies/lila/pronoun" => "PRON",
    "http://lila-erc.eu/ontologies/lila/proper_noun" => "PROPN",
    "http://lila-erc.eu/ontologies/lila/subordinating_conjunction" => "SCONJ",
    "http://lila-erc.eu/ontologies/lila/verb" => "VERB",
};

/// Translate `uri` through `table`.
///
/// Falls back to the text after the final `/`, or to `uri` itself when that
/// segment is empty or there is no `/` at all. The result is never empty for
/// a non-empty `uri`.
pub fn uri_to_label<'a>(uri: &'a str, table: &LookupTable) -> &'a str {
    if let Some(label) = table.get(uri) {
        return *label;
    }
    last_segment(uri)
}

/// The text after the final `/`, or `uri` when that would be empty.
pub fn last_segment(uri: &str) -> &str {
    match uri.rsplit_once('/') {
        Some((_, tail)) if !tail.is_empty() => tail,
        _ => uri,
    }
}

/// UPOS tag for a part-of-speech URI.
pub fn uri_to_upos(uri: &str) -> &str {
    uri_to_label(uri, &POS_UPOS)
}

// ---------------------------------------------------------------------------
// Filter categories
// ---------------------------------------------------------------------------

/// One of the selectable filter categories backed by a relation and a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCategory {
    Gender,
    InflectionType,
    PartOfSpeech,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 3] = [
        FilterCategory::InflectionType,
        FilterCategory::PartOfSpeech,
        FilterCategory::Gender,
    ];

    /// The relation linking a lemma to a value of this category.
    pub fn relation(self) -> &'static str {
        match self {
            FilterCategory::Gender => vocab::HAS_GENDER,
            FilterCategory::InflectionType => vocab::HAS_INFLECTION_TYPE,
            FilterCategory::PartOfSpeech => vocab::HAS_POS,
        }
    }

    pub fn table(self) -> &'static LookupTable {
        match self {
            FilterCategory::Gender => &GENDER_LABELS,
            FilterCategory::InflectionType => &INFLECTION_TYPE_LABELS,
            FilterCategory::PartOfSpeech => &POS_LABELS,
        }
    }

    /// Namespace new values of this category are minted in.
    pub fn namespace(self) -> &'static str {
        match self {
            FilterCategory::InflectionType => vocab::LIITA_NS,
            FilterCategory::Gender | FilterCategory::PartOfSpeech => vocab::LILA_NS,
        }
    }

    /// Category for a relation IRI, if it backs one.
    pub fn from_relation(relation: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.relation() == relation)
    }

    pub fn label<'a>(self, uri: &'a str) -> &'a str {
        uri_to_label(uri, self.table())
    }

    /// Human-readable category name, used as a field title.
    pub fn title(self) -> &'static str {
        match self {
            FilterCategory::Gender => "Gender",
            FilterCategory::InflectionType => "Inflection Type",
            FilterCategory::PartOfSpeech => "POS",
        }
    }

    /// Expand shorthand into a full value URI.
    ///
    /// Anything containing `://` is taken verbatim. Otherwise the input is
    /// matched case-insensitively against the table labels and the last path
    /// segment of the table keys; failing both it is appended to the
    /// category namespace.
    pub fn resolve(self, input: &str) -> String {
        let input = input.trim();
        if input.contains("://") {
            return input.to_string();
        }
        let table = self.table();
        let hit = table
            .entries()
            .find(|(uri, label)| {
                label.eq_ignore_ascii_case(input) || last_segment(uri).eq_ignore_ascii_case(input)
            })
            .map(|(uri, _)| uri.to_string());
        hit.unwrap_or_else(|| format!("{}{}", self.namespace(), input))
    }
}

impl std::fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterCategory::Gender => write!(f, "gender"),
            FilterCategory::InflectionType => write!(f, "inflection"),
            FilterCategory::PartOfSpeech => write!(f, "pos"),
        }
    }
}

impl std::str::FromStr for FilterCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gender" => Ok(FilterCategory::Gender),
            "inflection" | "inflection_type" | "inflection-type" | "inflectiontype" => {
                Ok(FilterCategory::InflectionType)
            }
            "pos" | "part_of_speech" | "part-of-speech" => Ok(FilterCategory::PartOfSpeech),
            other => Err(format!("unknown filter category: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    static EMPTY: LookupTable = phf_map! {};

    #[test]
    fn fallback_uses_last_segment() {
        assert_eq!(uri_to_label("http://x/y/z", &EMPTY), "z");
    }

    #[test]
    fn table_hit_wins() {
        assert_eq!(
            uri_to_label("http://lila-erc.eu/ontologies/lila/verb", &POS_LABELS),
            "Verb"
        );
    }

    #[rstest]
    #[case("no-slash-here", "no-slash-here")]
    #[case("http://x/y/", "http://x/y/")]
    #[case("http://lila-erc.eu/ontologies/lila/supine", "supine")]
    fn fallback_edge_cases(#[case] uri: &str, #[case] expected: &str) {
        assert_eq!(uri_to_label(uri, &POS_LABELS), expected);
    }

    #[test]
    fn upos_tags() {
        assert_eq!(uri_to_upos("http://lila-erc.eu/ontologies/lila/noun"), "NOUN");
        assert_eq!(uri_to_upos("http://lila-erc.eu/ontologies/lila/other"), "X");
    }

    #[test]
    fn every_pos_label_has_a_upos_tag() {
        for uri in POS_LABELS.keys() {
            assert!(POS_UPOS.contains_key(uri), "missing UPOS tag for {uri}");
        }
    }

    #[rstest]
    #[case(FilterCategory::PartOfSpeech, "verb", "http://lila-erc.eu/ontologies/lila/verb")]
    #[case(FilterCategory::PartOfSpeech, "Proper Noun", "http://lila-erc.eu/ontologies/lila/proper_noun")]
    #[case(FilterCategory::InflectionType, "C2R", "http://liita.it/ontologies/liita/c2r")]
    #[case(FilterCategory::Gender, "feminine", "http://lila-erc.eu/ontologies/lila/feminine")]
    #[case(FilterCategory::InflectionType, "n1", "http://liita.it/ontologies/liita/n1")]
    #[case(FilterCategory::Gender, "http://example.org/g", "http://example.org/g")]
    fn resolve_shorthand(
        #[case] category: FilterCategory,
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(category.resolve(input), expected);
    }

    #[test]
    fn category_round_trips_through_display() {
        for category in FilterCategory::ALL {
            let parsed: FilterCategory = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn from_relation_matches_each_category() {
        for category in FilterCategory::ALL {
            assert_eq!(FilterCategory::from_relation(category.relation()), Some(category));
        }
        assert_eq!(FilterCategory::from_relation(vocab::WRITTEN_REP), None);
    }
}
