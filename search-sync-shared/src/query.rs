//! Field-level query clause types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The query clause used for a single-field search.
///
/// The variant name becomes the clause key in the request body, e.g.
/// `{"query": {"match_phrase": {"name": "john doe"}}}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    /// Full-text match (analyzed).
    #[default]
    Match,
    /// Phrase match, terms in order.
    MatchPhrase,
    /// Phrase match where the last term is a prefix.
    MatchPhrasePrefix,
    /// Exact term, not analyzed.
    Term,
    /// Term prefix.
    Prefix,
    /// Wildcard pattern (`*`, `?`).
    Wildcard,
    /// Edit-distance match.
    Fuzzy,
}

impl QueryType {
    /// The clause key as it appears in the query body.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Match => "match",
            QueryType::MatchPhrase => "match_phrase",
            QueryType::MatchPhrasePrefix => "match_phrase_prefix",
            QueryType::Term => "term",
            QueryType::Prefix => "prefix",
            QueryType::Wildcard => "wildcard",
            QueryType::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "match" => Ok(QueryType::Match),
            "match_phrase" => Ok(QueryType::MatchPhrase),
            "match_phrase_prefix" => Ok(QueryType::MatchPhrasePrefix),
            "term" => Ok(QueryType::Term),
            "prefix" => Ok(QueryType::Prefix),
            "wildcard" => Ok(QueryType::Wildcard),
            "fuzzy" => Ok(QueryType::Fuzzy),
            other => Err(format!("unknown query type: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_match() {
        assert_eq!(QueryType::default(), QueryType::Match);
        assert_eq!(QueryType::default().as_str(), "match");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("MATCH_PHRASE".parse::<QueryType>(), Ok(QueryType::MatchPhrase));
        assert_eq!("term".parse::<QueryType>(), Ok(QueryType::Term));
        assert!("bool".parse::<QueryType>().is_err());
    }

    #[test]
    fn test_serde_uses_clause_key() {
        let json = serde_json::to_string(&QueryType::MatchPhrasePrefix).unwrap();
        assert_eq!(json, "\"match_phrase_prefix\"");
    }
}
