use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    GUEST_USER_KEY, MAX_SEARCH_HISTORY_ITEMS, MOST_FREQUENT_SEARCHES_COUNT,
    MOST_RECENT_SEARCHES_COUNT, SEARCH_HISTORY_STORAGE_KEY_PREFIX,
};
use crate::types::profile::UID;
use crate::types::search_history::{SearchHistoryItem, SearchQuery};

/// Bounded, insertion-ordered search history of one user (or of the guest
/// when no one is logged in). The newest entry sits at the front, the
/// collection never exceeds [`MAX_SEARCH_HISTORY_ITEMS`] and overflow is
/// dropped from the tail. The two derived views do not affect the storage
/// order.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHistoryBucket {
    pub uid: UID,
    pub items: Vec<SearchHistoryItem>,
}

impl SearchHistoryBucket {
    pub fn new(uid: UID, items: Vec<SearchHistoryItem>) -> Self {
        Self { uid, items }
    }
    /// The storage key the bucket persists under,
    /// `search_history_<uid|guest>`.
    pub fn storage_key(&self) -> String {
        format!(
            "{}{}",
            SEARCH_HISTORY_STORAGE_KEY_PREFIX,
            self.uid.as_deref().unwrap_or(GUEST_USER_KEY)
        )
    }
    /// Record a query: an exactly-equal existing entry gets its counter
    /// bumped and timestamp refreshed in place, otherwise a new entry is
    /// prepended and the overflow truncated.
    pub fn add(&mut self, query: SearchQuery, now: DateTime<Utc>) {
        match self.items.iter_mut().find(|item| item.matches(&query)) {
            Some(item) => {
                item.search_count += 1;
                item.last_searched = now;
            }
            None => {
                self.items.insert(0, SearchHistoryItem::new(query, now));
                self.items.truncate(MAX_SEARCH_HISTORY_ITEMS);
            }
        }
    }
    /// Remove the entry with the given id. Returns whether it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        let len_before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != len_before
    }
    /// The `count` most submitted queries, ties kept in storage order.
    pub fn most_frequent(&self, count: usize) -> Vec<&SearchHistoryItem> {
        let mut items = self.items.iter().collect::<Vec<_>>();
        items.sort_by(|a, b| b.search_count.cmp(&a.search_count));
        items.truncate(count);
        items
    }
    /// The `count` most recently submitted queries, ties kept in storage
    /// order.
    pub fn most_recent(&self, count: usize) -> Vec<&SearchHistoryItem> {
        let mut items = self.items.iter().collect::<Vec<_>>();
        items.sort_by(|a, b| b.last_searched.cmp(&a.last_searched));
        items.truncate(count);
        items
    }
    /// The frequent-searches shortlist shown on the search screen.
    pub fn frequent_shortlist(&self) -> Vec<&SearchHistoryItem> {
        self.most_frequent(MOST_FREQUENT_SEARCHES_COUNT)
    }
    /// The recent-searches shortlist shown on the search screen.
    pub fn recent_shortlist(&self) -> Vec<&SearchHistoryItem> {
        self.most_recent(MOST_RECENT_SEARCHES_COUNT)
    }
}

#[cfg(test)]
mod test {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn query(from: &str, to: &str) -> SearchQuery {
        SearchQuery {
            from_city: from.to_owned(),
            to_city: to.to_owned(),
            departure_date: None,
        }
    }

    #[test]
    fn test_add_deduplicates_identical_queries() {
        let now = Utc.with_ymd_and_hms(2023, 9, 1, 12, 0, 0).unwrap();
        let later = now + Duration::minutes(5);
        let mut bucket = SearchHistoryBucket::default();
        bucket.add(query("Ташкент", "Самарканд"), now);
        bucket.add(query("Ташкент", "Самарканд"), later);
        assert_eq!(bucket.items.len(), 1);
        assert_eq!(bucket.items[0].search_count, 2);
        assert_eq!(bucket.items[0].last_searched, later);
    }

    #[test]
    fn test_add_distinguishes_departure_dates() {
        let now = Utc.with_ymd_and_hms(2023, 9, 1, 12, 0, 0).unwrap();
        let mut bucket = SearchHistoryBucket::default();
        bucket.add(query("Ташкент", "Самарканд"), now);
        bucket.add(
            SearchQuery {
                departure_date: Some("2023-09-02".parse().unwrap()),
                ..query("Ташкент", "Самарканд")
            },
            now,
        );
        assert_eq!(bucket.items.len(), 2);
    }

    #[test]
    fn test_add_evicts_the_earliest_inserted_entry_beyond_the_cap() {
        let now = Utc.with_ymd_and_hms(2023, 9, 1, 12, 0, 0).unwrap();
        let mut bucket = SearchHistoryBucket::default();
        for index in 0..=MAX_SEARCH_HISTORY_ITEMS {
            bucket.add(
                query(&format!("Город {index}"), "Ташкент"),
                now + Duration::seconds(index as i64),
            );
        }
        assert_eq!(bucket.items.len(), MAX_SEARCH_HISTORY_ITEMS);
        assert!(
            !bucket.items.iter().any(|item| item.from_city == "Город 0"),
            "The earliest inserted entry should be evicted"
        );
        assert_eq!(bucket.items[0].from_city, "Город 20");
    }

    #[test]
    fn test_remove_removes_exactly_one_entry() {
        let now = Utc.with_ymd_and_hms(2023, 9, 1, 12, 0, 0).unwrap();
        let mut bucket = SearchHistoryBucket::default();
        bucket.add(query("Ташкент", "Бухара"), now);
        bucket.add(query("Ташкент", "Хива"), now + Duration::seconds(1));
        let id = bucket.items[1].id.to_owned();
        assert!(bucket.remove(&id));
        assert_eq!(bucket.items.len(), 1);
        assert_eq!(bucket.items[0].to_city, "Хива");
        assert!(!bucket.remove(&id));
    }

    #[test]
    fn test_most_frequent_orders_by_search_count() {
        let now = Utc.with_ymd_and_hms(2023, 9, 1, 12, 0, 0).unwrap();
        let mut bucket = SearchHistoryBucket::default();
        for (to_city, count) in [("A", 3), ("B", 1), ("C", 5)] {
            for offset in 0..count {
                bucket.add(query("Ташкент", to_city), now + Duration::seconds(offset));
            }
        }
        let most_frequent = bucket.most_frequent(1);
        assert_eq!(most_frequent.len(), 1);
        assert_eq!(most_frequent[0].to_city, "C");
        // storage order stays insertion-ordered
        assert_eq!(bucket.items[0].to_city, "C");
        assert_eq!(bucket.items[2].to_city, "A");
    }

    #[test]
    fn test_most_recent_orders_by_last_searched() {
        let now = Utc.with_ymd_and_hms(2023, 9, 1, 12, 0, 0).unwrap();
        let mut bucket = SearchHistoryBucket::default();
        bucket.add(query("Ташкент", "A"), now);
        bucket.add(query("Ташкент", "B"), now + Duration::seconds(1));
        bucket.add(query("Ташкент", "A"), now + Duration::seconds(2));
        let most_recent = bucket.most_recent(2);
        assert_eq!(most_recent[0].to_city, "A");
        assert_eq!(most_recent[1].to_city, "B");
    }

    #[test]
    fn test_shortlists_are_bounded() {
        let now = Utc.with_ymd_and_hms(2023, 9, 1, 12, 0, 0).unwrap();
        let mut bucket = SearchHistoryBucket::default();
        for index in 0..MAX_SEARCH_HISTORY_ITEMS {
            bucket.add(
                query("Ташкент", &format!("Город {index}")),
                now + Duration::seconds(index as i64),
            );
        }
        assert_eq!(bucket.frequent_shortlist().len(), 5);
        assert_eq!(bucket.recent_shortlist().len(), 10);
        assert_eq!(bucket.recent_shortlist()[0].to_city, "Город 19");
    }

    #[test]
    fn test_storage_key_is_scoped_to_the_user() {
        let guest = SearchHistoryBucket::default();
        assert_eq!(guest.storage_key(), "search_history_guest");
        let user = SearchHistoryBucket::new(Some("user-1".to_owned()), vec![]);
        assert_eq!(user.storage_key(), "search_history_user-1");
    }
}
