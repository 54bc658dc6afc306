pub mod debounce;
pub mod format;
pub mod jwt;
pub mod nav;
pub mod poll;
