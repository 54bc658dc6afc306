pub mod video_form;
pub mod video_table;
