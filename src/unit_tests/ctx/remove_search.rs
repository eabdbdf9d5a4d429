use chrono::Duration;

use crate::models::ctx::Ctx;
use crate::runtime::msg::{Action, ActionCtx};
use crate::runtime::{Effects, Env, Runtime};
use crate::types::search_history::SearchQuery;
use crate::unit_tests::ctx::TestModel;
use crate::unit_tests::{TestEnv, NOW};

#[test]
fn test_remove_search_removes_exactly_one_entry() {
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
        runtime.dispatch(Action::Ctx(ActionCtx::AddSearch(SearchQuery {
            from_city: "Ташкент".to_owned(),
            to_city: "Бухара".to_owned(),
            departure_date: None,
        })));
        *NOW.write().unwrap() = base_time + Duration::seconds(1);
        runtime.dispatch(Action::Ctx(ActionCtx::AddSearch(SearchQuery {
            from_city: "Ташкент".to_owned(),
            to_city: "Хива".to_owned(),
            departure_date: None,
        })));
    });

    let removed_id = runtime.model().unwrap().ctx.search_history.items[1]
        .id
        .to_owned();
    TestEnv::run(|| {
        runtime.dispatch(Action::Ctx(ActionCtx::RemoveSearch(removed_id.to_owned())));
    });

    let search_history = runtime.model().unwrap().ctx.search_history.to_owned();
    assert_eq!(search_history.items.len(), 1, "Should have one entry left");
    assert_eq!(
        search_history.items[0].to_city, "Хива",
        "Should have left the other entry untouched"
    );

    // removing an unknown id leaves the history as it is
    TestEnv::run(|| {
        runtime.dispatch(Action::Ctx(ActionCtx::RemoveSearch(removed_id)));
    });
    assert_eq!(
        runtime.model().unwrap().ctx.search_history.items.len(),
        1,
        "Should not have removed anything"
    );
}
