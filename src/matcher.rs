// Logic for deciding whether an eligibility file mentions an identifier.
//
// Only three segment shapes of the 834 text are looked at:
//
//   NM1*IL*1*...*34*123456789~     subscriber with a tax ID (9 digits)
//   REF*0F*W123456~                member reference (qualifier varies)
//   NM1*IL*1*DOE*JOHN***...        subscriber name, ended by 3+ asterisks
//
// Everything else in the document is ignored. Matching never fails: a
// missing segment is a zero count.

use crate::error::QueryError;
use crate::model::IdentifierQuery;
use once_cell::sync::Lazy;
use regex::Regex;

static TAX_ID_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"NM1\*IL\*1\*.*?\*+34\*([0-9]{9})~").expect("Invalid tax ID segment regex")
});

static MEMBER_NAME_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"NM1\*IL\*1\*(.+?)\*{3,}").expect("Invalid member name segment regex")
});

/// How a company writes its member reference segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberIdRule {
    /// `REF*OF*<id>~` or `REF*ABB*<id>~`, exactly as written.
    Exact,
    /// Case-insensitive qualifier from the list, ended by `*`, `~` or a word
    /// boundary.
    Loose(&'static [&'static str]),
    /// Case-insensitive qualifier from the list, ended strictly by `~`.
    Terminated(&'static [&'static str]),
}

impl MemberIdRule {
    fn pattern(&self, member_id: &str) -> String {
        let id = regex::escape(member_id);
        match self {
            MemberIdRule::Exact => format!(r"REF\*(?:OF|ABB)\*{id}~"),
            MemberIdRule::Loose(quals) => {
                format!(r"(?i)REF\*(?:{})\*{id}(?:\*|~|\b)", quals.join("|"))
            }
            MemberIdRule::Terminated(quals) => {
                format!(r"(?i)REF\*(?:{})\*{id}~", quals.join("|"))
            }
        }
    }
}

/// All 9-digit tax IDs carried by subscriber segments, in document order.
pub fn tax_ids(content: &str) -> impl Iterator<Item = &str> {
    TAX_ID_SEGMENT
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Subscriber names with their `*` separators turned into spaces.
pub fn member_names(content: &str) -> impl Iterator<Item = String> + '_ {
    MEMBER_NAME_SEGMENT
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().replace('*', " ").trim().to_string())
}

/// A query compiled once and then applied to every file of a scan.
#[derive(Debug, Clone)]
pub struct IdentifierMatcher {
    query: IdentifierQuery,
    // Upper-cased name for MemberName, compiled segment regex for MemberId.
    name_key: String,
    member_id: Option<Regex>,
}

impl IdentifierMatcher {
    pub fn new(query: IdentifierQuery, rule: MemberIdRule) -> Result<Self, QueryError> {
        let member_id = match &query {
            IdentifierQuery::MemberId(id) => {
                let re = Regex::new(&rule.pattern(id)).map_err(|e| QueryError::Pattern {
                    value: id.clone(),
                    reason: e.to_string(),
                })?;
                Some(re)
            }
            _ => None,
        };
        let name_key = match &query {
            IdentifierQuery::MemberName(name) => name.trim().to_uppercase(),
            _ => String::new(),
        };
        Ok(Self {
            query,
            name_key,
            member_id,
        })
    }

    pub fn query(&self) -> &IdentifierQuery {
        &self.query
    }

    /// Number of segments in `content` that carry the identifier.
    pub fn match_count(&self, content: &str) -> usize {
        match &self.query {
            IdentifierQuery::TaxId(target) => tax_ids(content)
                .filter(|id| *id == target.as_str())
                .count(),
            IdentifierQuery::MemberId(_) => self
                .member_id
                .as_ref()
                .map(|re| re.find_iter(content).count())
                .unwrap_or(0),
            IdentifierQuery::MemberName(_) => member_names(content)
                .filter(|name| name.to_uppercase() == self.name_key)
                .count(),
        }
    }

    pub fn is_match(&self, content: &str) -> bool {
        self.match_count(content) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOOSE: MemberIdRule = MemberIdRule::Loose(&["0F", "OF", "ABB"]);
    const TILDE: MemberIdRule = MemberIdRule::Terminated(&["0F", "OF", "ABB"]);

    const DOC: &str = "ISA*00*~GS*BE~ST*834*0001~\
        INS*Y*18*030*XN*A*E**FT~REF*0F*W1234~REF*1L*GRP9~\
        NM1*IL*1*DOE*JOHN*Q***34*123456789~DMG*D8*19800101*M~\
        INS*Y*18*030*XN*A*E**FT~REF*ABB*X77*~\
        NM1*IL*1*ROE*JANE****34*987654321~SE*12*0001~";

    fn matcher(query: IdentifierQuery, rule: MemberIdRule) -> IdentifierMatcher {
        IdentifierMatcher::new(query, rule).unwrap()
    }

    #[test]
    fn test_tax_ids_are_harvested_in_order() {
        let ids: Vec<_> = tax_ids(DOC).collect();
        assert_eq!(ids, vec!["123456789", "987654321"]);
    }

    #[test]
    fn test_tax_id_exact_match() {
        let m = matcher(IdentifierQuery::TaxId("987654321".into()), MemberIdRule::Exact);
        assert_eq!(m.match_count(DOC), 1);
        let m = matcher(IdentifierQuery::TaxId("123456780".into()), MemberIdRule::Exact);
        assert!(!m.is_match(DOC));
    }

    #[test]
    fn test_tax_id_repeated_segments_count_each() {
        let seg = "NM1*IL*1*A*B***34*111223333~";
        let doc = format!("{seg}{seg}{seg}");
        let m = matcher(IdentifierQuery::TaxId("111223333".into()), MemberIdRule::Exact);
        assert_eq!(m.match_count(&doc), 3);
        assert_eq!(m.match_count(&doc), 3);
    }

    #[test]
    fn test_tax_id_needs_the_34_qualifier_and_terminator() {
        let m = matcher(IdentifierQuery::TaxId("123456789".into()), MemberIdRule::Exact);
        assert!(!m.is_match("NM1*IL*1*DOE*JOHN***MI*123456789~"));
        assert!(!m.is_match("NM1*IL*1*DOE*JOHN***34*1234567890~"));
        assert!(!m.is_match("NM1*QD*1*DOE*JOHN***34*123456789~"));
    }

    #[test]
    fn test_member_id_exact_rule_is_literal() {
        let m = matcher(IdentifierQuery::MemberId("W1234".into()), MemberIdRule::Exact);
        assert!(m.is_match("REF*OF*W1234~"));
        assert!(m.is_match("REF*ABB*W1234~"));
        // Zero-F qualifier, lower case and loose terminators are not accepted.
        assert!(!m.is_match("REF*0F*W1234~"));
        assert!(!m.is_match("ref*of*w1234~"));
        assert!(!m.is_match("REF*OF*W1234*"));
    }

    #[test]
    fn test_member_id_loose_rule() {
        let m = matcher(IdentifierQuery::MemberId("X77".into()), LOOSE);
        assert_eq!(m.match_count(DOC), 1);
        assert!(m.is_match("ref*abb*x77~"));
        assert!(m.is_match("REF*OF*X77"));
        // Word boundary keeps a longer ID from matching a prefix.
        assert!(!m.is_match("REF*OF*X778~"));
    }

    #[test]
    fn test_member_id_terminated_rule() {
        let m = matcher(IdentifierQuery::MemberId("X77".into()), TILDE);
        assert!(m.is_match("REF*0f*X77~"));
        assert!(!m.is_match(DOC));
    }

    #[test]
    fn test_member_id_is_escaped() {
        let m = matcher(IdentifierQuery::MemberId("A.1+".into()), TILDE);
        assert!(m.is_match("REF*OF*A.1+~"));
        assert!(!m.is_match("REF*OF*AB11~"));
    }

    #[test]
    fn test_member_name_exact_case_insensitive() {
        let m = matcher(IdentifierQuery::MemberName("doe john q".into()), LOOSE);
        assert_eq!(m.match_count(DOC), 1);
        let m = matcher(IdentifierQuery::MemberName("ROE JANE".into()), LOOSE);
        assert!(m.is_match(DOC));
        // Substrings do not count.
        let m = matcher(IdentifierQuery::MemberName("DOE".into()), LOOSE);
        assert!(!m.is_match(DOC));
    }

    #[test]
    fn test_member_names_are_cleaned() {
        let names: Vec<_> = member_names(DOC).collect();
        assert_eq!(names, vec!["DOE JOHN Q", "ROE JANE"]);
    }

    #[test]
    fn test_empty_content_has_no_matches() {
        let m = matcher(IdentifierQuery::TaxId("123456789".into()), MemberIdRule::Exact);
        assert_eq!(m.match_count(""), 0);
    }
}
