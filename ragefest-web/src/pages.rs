pub mod battle;
pub mod home;
pub mod not_found;
pub mod record_voice;
pub mod select_buddy;
