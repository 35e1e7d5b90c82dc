use crate::{config::Environment, db::SharedStore};

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub environment: Environment,
}
