pub mod button;
pub mod health_bar;
pub mod layout;
