// Route name normalization
//
// Producers spell the same routing path in different ways ("Direct",
// "T5-Distilled", "gemini-api", ...). Every raw name maps to exactly one
// canonical bucket; unrecognized names keep their own lowercased bucket.

use std::fmt;

/// Canonical routing path used as the aggregation key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalRoute {
    Pattern,
    T5,
    Slm,
    Gemini,
    DirectLlm,
    Fallback,
    /// Unrecognized route, keyed by its lowercased literal name
    Other(String),
}

impl CanonicalRoute {
    /// The named routes, in dashboard order. `Other` is never part of this set.
    pub const NAMED: [CanonicalRoute; 6] = [
        CanonicalRoute::Pattern,
        CanonicalRoute::T5,
        CanonicalRoute::Slm,
        CanonicalRoute::Gemini,
        CanonicalRoute::DirectLlm,
        CanonicalRoute::Fallback,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            CanonicalRoute::Pattern => "pattern",
            CanonicalRoute::T5 => "t5",
            CanonicalRoute::Slm => "slm",
            CanonicalRoute::Gemini => "gemini",
            CanonicalRoute::DirectLlm => "direct_llm",
            CanonicalRoute::Fallback => "fallback",
            CanonicalRoute::Other(name) => name,
        }
    }

    pub fn is_named(&self) -> bool {
        !matches!(self, CanonicalRoute::Other(_))
    }
}

impl fmt::Display for CanonicalRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a raw route name to its canonical bucket (case-insensitive, total)
pub fn normalize(raw: &str) -> CanonicalRoute {
    let lower = raw.to_lowercase();

    match lower.as_str() {
        "pattern" | "direct" => CanonicalRoute::Pattern,
        "t5" | "t5-distilled" => CanonicalRoute::T5,
        "slm" => CanonicalRoute::Slm,
        name if name.contains("gemini") => CanonicalRoute::Gemini,
        "direct_llm" | "direct llm" => CanonicalRoute::DirectLlm,
        "fallback" => CanonicalRoute::Fallback,
        _ => CanonicalRoute::Other(lower),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_routes() {
        assert_eq!(normalize("pattern"), CanonicalRoute::Pattern);
        assert_eq!(normalize("Direct"), CanonicalRoute::Pattern);
        assert_eq!(normalize("t5"), CanonicalRoute::T5);
        assert_eq!(normalize("T5-Distilled"), CanonicalRoute::T5);
        assert_eq!(normalize("SLM"), CanonicalRoute::Slm);
        assert_eq!(normalize("gemini"), CanonicalRoute::Gemini);
        assert_eq!(normalize("direct_llm"), CanonicalRoute::DirectLlm);
        assert_eq!(normalize("DIRECT LLM"), CanonicalRoute::DirectLlm);
        assert_eq!(normalize("Fallback"), CanonicalRoute::Fallback);
    }

    #[test]
    fn test_gemini_substring() {
        assert_eq!(normalize("my-gemini-route"), CanonicalRoute::Gemini);
        assert_eq!(normalize("Gemini-API"), CanonicalRoute::Gemini);
        assert_eq!(normalize("vertex_GEMINI"), CanonicalRoute::Gemini);
    }

    #[test]
    fn test_unknown_routes_keep_literal() {
        assert_eq!(
            normalize("unknown-xyz"),
            CanonicalRoute::Other("unknown-xyz".to_string())
        );
        assert_eq!(
            normalize("Legacy-Cache"),
            CanonicalRoute::Other("legacy-cache".to_string())
        );
        assert_eq!(normalize(""), CanonicalRoute::Other(String::new()));
    }

    #[test]
    fn test_no_partial_matches_outside_gemini() {
        // Only "gemini" matches by substring
        assert_eq!(
            normalize("pattern-v2"),
            CanonicalRoute::Other("pattern-v2".to_string())
        );
        assert_eq!(
            normalize("direct-llm"),
            CanonicalRoute::Other("direct-llm".to_string())
        );
        assert_eq!(normalize(" t5 "), CanonicalRoute::Other(" t5 ".to_string()));
    }

    #[test]
    fn test_display_matches_dashboard_keys() {
        let keys: Vec<String> = CanonicalRoute::NAMED.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            keys,
            vec!["pattern", "t5", "slm", "gemini", "direct_llm", "fallback"]
        );
        assert!(CanonicalRoute::NAMED.iter().all(CanonicalRoute::is_named));
        assert!(!CanonicalRoute::Other("x".into()).is_named());
    }
}
