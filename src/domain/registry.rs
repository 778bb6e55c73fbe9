//! Team registry: internal method id -> group / PI / external id / category.

use std::collections::BTreeMap;

use crate::domain::TeamRecord;

/// In-memory registry, keyed by internal method id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamRegistry {
    records: BTreeMap<String, TeamRecord>,
}

impl TeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `id`. Returns the previous record.
    pub fn insert(&mut self, id: impl Into<String>, record: TeamRecord) -> Option<TeamRecord> {
        self.records.insert(id.into(), record)
    }

    pub fn get(&self, id: &str) -> Option<&TeamRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TeamRecord)> {
        self.records.iter().map(|(id, r)| (id.as_str(), r))
    }
}

impl FromIterator<(String, TeamRecord)> for TeamRegistry {
    fn from_iter<I: IntoIterator<Item = (String, TeamRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    #[test]
    fn insert_replaces_and_returns_previous() {
        let mut reg = TeamRegistry::new();
        let a = TeamRecord {
            group_name: "A".to_string(),
            pi_name: "Pi".to_string(),
            external_id: "T1-1".to_string(),
            category: Category::Qualified,
        };
        let b = TeamRecord {
            group_name: "B".to_string(),
            ..a.clone()
        };
        assert!(reg.insert("M1", a.clone()).is_none());
        assert_eq!(reg.insert("M1", b.clone()), Some(a));
        assert_eq!(reg.get("M1"), Some(&b));
        assert_eq!(reg.len(), 1);
        assert!(reg.get("M2").is_none());
    }
}
