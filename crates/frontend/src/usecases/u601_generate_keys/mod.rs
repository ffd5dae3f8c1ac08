pub mod api;
pub mod fields;
pub mod state;
pub mod storage;
pub mod view;

pub use state::{use_key_form, KeyFormController};
pub use view::KeyGenPage;
