use chrono::Duration;

use crate::constants::MAX_SEARCH_HISTORY_ITEMS;
use crate::models::ctx::Ctx;
use crate::runtime::msg::{Action, ActionCtx};
use crate::runtime::{Effects, Env, Runtime};
use crate::types::search_history::{SearchHistoryBucket, SearchQuery};
use crate::unit_tests::ctx::TestModel;
use crate::unit_tests::{TestEnv, NOW, REQUESTS, STORAGE};

fn query(from_city: &str, to_city: &str) -> SearchQuery {
    SearchQuery {
        from_city: from_city.to_owned(),
        to_city: to_city.to_owned(),
        departure_date: None,
    }
}

#[test]
fn test_add_search_deduplicates_identical_queries() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");

    let (runtime, _rx) = Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: Ctx::default(),
        },
        Effects::none().unchanged(),
        1000,
    );

    TestEnv::run(|| {
        runtime.dispatch(Action::Ctx(ActionCtx::AddSearch(query(
            "Ташкент",
            "Самарканд",
        ))));
        runtime.dispatch(Action::Ctx(ActionCtx::AddSearch(query(
            "Ташкент",
            "Самарканд",
        ))));
    });

    let search_history = runtime.model().unwrap().ctx.search_history.to_owned();
    assert_eq!(search_history.items.len(), 1, "Should have one entry");
    assert_eq!(
        search_history.items[0].search_count, 2,
        "Should have bumped the counter"
    );
    assert!(
        REQUESTS.read().unwrap().is_empty(),
        "Should not have issued any request"
    );
    assert!(
        STORAGE
            .read()
            .unwrap()
            .get("search_history_guest")
            .map_or(false, |data| {
                serde_json::from_str::<SearchHistoryBucket>(data).unwrap().items[0].search_count
                    == 2
            }),
        "Should have persisted the updated history under the guest key"
    );
}

#[test]
fn test_add_search_evicts_the_oldest_entry_beyond_the_cap() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");

    let (runtime, _rx) = Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: Ctx::default(),
        },
        Effects::none().unchanged(),
        1000,
    );

    let base_time = TestEnv::now();
    TestEnv::run(|| {
        for index in 0..=MAX_SEARCH_HISTORY_ITEMS {
            *NOW.write().unwrap() = base_time + Duration::seconds(index as i64);
            runtime.dispatch(Action::Ctx(ActionCtx::AddSearch(query(
                &format!("Город {index}"),
                "Ташкент",
            ))));
        }
    });

    let search_history = runtime.model().unwrap().ctx.search_history.to_owned();
    assert_eq!(
        search_history.items.len(),
        MAX_SEARCH_HISTORY_ITEMS,
        "Should be capped"
    );
    assert!(
        !search_history
            .items
            .iter()
            .any(|item| item.from_city == "Город 0"),
        "Should have evicted the earliest inserted entry"
    );
    assert_eq!(
        serde_json::from_str::<SearchHistoryBucket>(
            STORAGE
                .read()
                .unwrap()
                .get("search_history_guest")
                .expect("Should have stored the history")
        )
        .unwrap()
        .items
        .len(),
        MAX_SEARCH_HISTORY_ITEMS,
        "Should have persisted the capped history"
    );
}
