use std::path::PathBuf;

use once_cell::sync::OnceCell;

#[derive(Debug)]
pub(crate) struct State {
    pub article_dir: PathBuf,
    pub out_dir: PathBuf,
    /// relative to `article_dir`; the posts data is registered here
    pub blog_dir: PathBuf,
}

pub(super) static STATE: OnceCell<State> = OnceCell::new();

impl State {
    pub fn instance() -> &'static State {
        STATE.get().expect("State is initialized in main before generating")
    }
}
