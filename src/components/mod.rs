pub mod chip_list;
pub mod empty_state;
pub mod media_card;
pub mod navbar;
pub mod toast;

pub use empty_state::empty_state;
pub use media_card::media_card;
