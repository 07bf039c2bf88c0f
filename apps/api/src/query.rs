//! Helpers shared by the filtered list queries.

use sqlx::{Postgres, QueryBuilder};

/// Raw list-endpoint query string as ordered `(key, value)` pairs.
///
/// Kept as pairs so repeated keys (`?status=new&status=offer`) survive.
pub type QueryPairs = Vec<(String, String)>;

/// Wraps a keyword into an ILIKE pattern, escaping LIKE metacharacters so the
/// keyword matches as a literal substring.
pub fn like_pattern(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len() + 2);
    escaped.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Appends `AND (col1 ILIKE $n OR col2 ILIKE $n+1 ...)` for a keyword search.
pub fn push_keyword_clause(qb: &mut QueryBuilder<'static, Postgres>, columns: &[&str], keyword: &str) {
    let pattern = like_pattern(keyword);
    qb.push(" AND (");
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            qb.push(" OR ");
        }
        qb.push(*column).push(" ILIKE ").push_bind(pattern.clone());
    }
    qb.push(")");
}

/// Trimmed, non-empty keyword or `None`.
pub fn normalize_keyword(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
