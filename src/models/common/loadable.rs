use derivative::Derivative;
use serde::Serialize;

#[derive(Derivative, Clone, PartialEq, Serialize, Debug)]
#[derivative(Default)]
#[serde(tag = "type", content = "content")]
pub enum Loadable<R, E> {
    #[derivative(Default)]
    Loading,
    Ready(R),
    Err(E),
}

impl<R, E> Loadable<R, E> {
    pub fn ready(&self) -> Option<&R> {
        match self {
            Loadable::Ready(ready) => Some(ready),
            _ => None,
        }
    }
}
