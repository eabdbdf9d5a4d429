use crate::models::ctx::Ctx;
use crate::runtime::msg::{Action, ActionCtx};
use crate::runtime::{Effects, Runtime};
use crate::types::search_history::SearchQuery;
use crate::unit_tests::ctx::TestModel;
use crate::unit_tests::{TestEnv, STORAGE};

#[test]
fn test_clear_search_history_empties_the_list_and_the_storage() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");

    let (runtime, _rx) = Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: Ctx::default(),
        },
        Effects::none().unchanged(),
        1000,
    );

    TestEnv::run(|| {
        runtime.dispatch(Action::Ctx(ActionCtx::AddSearch(SearchQuery {
            from_city: "Ташкент".to_owned(),
            to_city: "Фергана".to_owned(),
            departure_date: None,
        })));
    });
    assert!(
        STORAGE
            .read()
            .unwrap()
            .contains_key("search_history_guest"),
        "Should have persisted the history"
    );

    TestEnv::run(|| {
        runtime.dispatch(Action::Ctx(ActionCtx::ClearSearchHistory));
    });

    assert!(
        runtime.model().unwrap().ctx.search_history.items.is_empty(),
        "Should have emptied the history"
    );
    assert!(
        !STORAGE
            .read()
            .unwrap()
            .contains_key("search_history_guest"),
        "Should have removed the persisted key"
    );
}
