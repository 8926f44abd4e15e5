//! Identifier quoting.
//!
//! Identifiers are the only caller-supplied text ever interpolated into SQL;
//! values always travel as bound parameters.

/// Quote a single identifier with backticks, doubling embedded backticks.
pub fn escape_id(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Quote a possibly database-qualified name (`db.table`) part by part.
pub fn escape_qualified(name: &str) -> String {
    name.split('.').map(escape_id).collect::<Vec<_>>().join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_id() {
        assert_eq!(escape_id("foo"), "`foo`");
        assert_eq!(escape_id("we`ird"), "`we``ird`");
        assert_eq!(escape_id("a.b"), "`a.b`");
        assert_eq!(escape_id("name!like"), "`name!like`");
    }

    #[test]
    fn test_escape_qualified() {
        assert_eq!(escape_qualified("foo"), "`foo`");
        assert_eq!(escape_qualified("testing.foo"), "`testing`.`foo`");
        assert_eq!(escape_qualified("x.`y"), "`x`.```y`");
    }
}
