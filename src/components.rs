pub mod app;
pub mod entry_list;
pub mod search_bar;
pub mod toasts;
