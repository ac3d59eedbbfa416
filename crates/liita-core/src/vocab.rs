//! Relation and graph IRIs used by the LiITA knowledge base.
//!
//! These are fixed by the published ontologies and are not configurable.

pub const LILA_NS: &str = "http://lila-erc.eu/ontologies/lila/";
pub const LIITA_NS: &str = "http://liita.it/ontologies/liita/";

pub const HAS_GENDER: &str = "http://lila-erc.eu/ontologies/lila/hasGender";
pub const HAS_INFLECTION_TYPE: &str = "http://lila-erc.eu/ontologies/lila/hasInflectionType";
pub const HAS_POS: &str = "http://lila-erc.eu/ontologies/lila/hasPOS";

pub const WRITTEN_REP: &str = "http://www.w3.org/ns/lemon/ontolex#writtenRep";
pub const CANONICAL_FORM: &str = "http://www.w3.org/ns/lemon/ontolex#canonicalForm";
pub const LEXICON_ENTRY: &str = "http://www.w3.org/ns/lemon/lime#entry";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

/// Named graph holding the lemma bank.
pub const LEMMA_BANK_GRAPH: &str = "http://liita.it/data";

pub const DEFAULT_ENDPOINT: &str = "https://liita.it/sparql";
pub const DEFAULT_LINK_BASE: &str = "https://liita.it/query-interface/";
