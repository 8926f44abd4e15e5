//! Query descriptors: ordering, pagination and the select/count/update/delete
//! target they apply to.

use crate::criteria::FilterNode;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// Positive means ascending, anything else descending.
    pub fn from_signed(n: i64) -> Self {
        if n > 0 {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

/// Ordered sort entries. Earlier entries take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec(Vec<(String, Direction)>);

impl SortSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.push(field, direction);
        self
    }

    pub fn push(&mut self, field: impl Into<String>, direction: Direction) {
        self.0.push((field.into(), direction));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Direction)> {
        self.0.iter().map(|(field, dir)| (field.as_str(), *dir))
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for SortSpec {
    fn from_iter<T: IntoIterator<Item = (S, i64)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, n)| (field.into(), Direction::from_signed(n)))
                .collect(),
        )
    }
}

/// Limit/offset window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Pagination {
    /// Limit substituted when only an offset is requested. MySQL rejects
    /// OFFSET without LIMIT.
    pub const OFFSET_ONLY_LIMIT: u64 = 1000;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Build from signed inputs; negative values mean "unset".
    pub fn from_signed(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.and_then(|n| u64::try_from(n).ok()),
            offset: offset.and_then(|n| u64::try_from(n).ok()),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.window().is_none()
    }

    /// The `(limit, offset)` pair to emit, if any.
    ///
    /// An offset of zero is dropped. An offset without a limit gets
    /// [`Self::OFFSET_ONLY_LIMIT`].
    pub fn window(&self) -> Option<(u64, Option<u64>)> {
        let offset = self.offset.filter(|o| *o > 0);
        match (self.limit, offset) {
            (Some(limit), offset) => Some((limit, offset)),
            (None, Some(offset)) => Some((Self::OFFSET_ONLY_LIMIT, Some(offset))),
            (None, None) => None,
        }
    }
}

/// Target of a select, count, update or delete.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub table: String,
    pub criteria: Option<FilterNode>,
    pub sorts: SortSpec,
    pub page: Pagination,
}

impl Query {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    pub fn filter(mut self, criteria: FilterNode) -> Self {
        self.criteria = Some(criteria);
        self
    }

    pub fn criteria(mut self, criteria: Option<FilterNode>) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn sort(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.sorts.push(field, direction);
        self
    }

    pub fn sorts(mut self, sorts: SortSpec) -> Self {
        self.sorts = sorts;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.page.limit = Some(limit);
        self
    }

    pub fn skip(mut self, offset: u64) -> Self {
        self.page.offset = Some(offset);
        self
    }

    pub fn page(mut self, page: Pagination) -> Self {
        self.page = page;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_signed() {
        assert_eq!(Direction::from_signed(1), Direction::Asc);
        assert_eq!(Direction::from_signed(0), Direction::Desc);
        assert_eq!(Direction::from_signed(-1), Direction::Desc);
    }

    #[test]
    fn test_sort_spec_keeps_order() {
        let sorts: SortSpec = vec![("b", 1), ("a", -1)].into_iter().collect();
        let entries: Vec<_> = sorts.iter().collect();
        assert_eq!(entries, vec![("b", Direction::Asc), ("a", Direction::Desc)]);
    }

    #[test]
    fn test_window_offset_only_defaults_limit() {
        let page = Pagination::new().offset(3);
        assert_eq!(page.window(), Some((1000, Some(3))));
    }

    #[test]
    fn test_window_limit_and_offset() {
        assert_eq!(Pagination::new().limit(1).offset(3).window(), Some((1, Some(3))));
        assert_eq!(Pagination::new().limit(5).window(), Some((5, None)));
        assert_eq!(Pagination::new().limit(5).offset(0).window(), Some((5, None)));
    }

    #[test]
    fn test_window_unbounded() {
        assert!(Pagination::new().is_unbounded());
        assert!(Pagination::new().offset(0).is_unbounded());
        assert!(Pagination::from_signed(Some(-1), Some(-5)).is_unbounded());
    }

    #[test]
    fn test_from_signed_negative_limit_with_offset() {
        let page = Pagination::from_signed(Some(-1), Some(3));
        assert_eq!(page.window(), Some((1000, Some(3))));
    }
}
