use crate::models::ctx::Ctx;
use crate::runtime::msg::Msg;
use crate::runtime::{Effects, Update};
use crate::unit_tests::TestEnv;

mod add_search;
mod authenticate;
mod clear_search_history;
mod logout;
mod preferences;
mod remove_search;

struct TestModel {
    ctx: Ctx,
}

impl Update<TestEnv> for TestModel {
    fn update(&mut self, msg: &Msg) -> Effects {
        Update::<TestEnv>::update(&mut self.ctx, msg)
    }
}
