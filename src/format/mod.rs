mod text;
mod time;

pub(crate) use text::format_wish_line;
pub(crate) use time::format_display_time;
