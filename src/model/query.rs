// The identifier a search is run for.
use crate::error::QueryError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierQuery {
    TaxId(String),
    MemberId(String),
    MemberName(String),
}

/// Trims surrounding whitespace and any trailing segment terminators
/// (users often paste `123456789~` straight out of a file).
fn normalize_code(raw: &str) -> &str {
    raw.trim().trim_end_matches('~')
}

impl IdentifierQuery {
    pub fn tax_id(raw: &str) -> Result<Self, QueryError> {
        let value = normalize_code(raw);
        if value.is_empty() {
            return Err(QueryError::Empty { kind: "Tax ID" });
        }
        if value.len() != 9 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(QueryError::MalformedTaxId(value.to_string()));
        }
        Ok(Self::TaxId(value.to_string()))
    }

    pub fn member_id(raw: &str) -> Result<Self, QueryError> {
        let value = normalize_code(raw);
        if value.is_empty() {
            return Err(QueryError::Empty { kind: "Member ID" });
        }
        Ok(Self::MemberId(value.to_string()))
    }

    /// Names are only trimmed.
    pub fn member_name(raw: &str) -> Result<Self, QueryError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(QueryError::Empty { kind: "Member Name" });
        }
        Ok(Self::MemberName(value.to_string()))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            IdentifierQuery::TaxId(_) => "Tax ID",
            IdentifierQuery::MemberId(_) => "Member ID",
            IdentifierQuery::MemberName(_) => "Member Name",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            IdentifierQuery::TaxId(v)
            | IdentifierQuery::MemberId(v)
            | IdentifierQuery::MemberName(v) => v,
        }
    }
}

impl fmt::Display for IdentifierQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.value())
    }
}
