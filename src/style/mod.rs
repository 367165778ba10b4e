pub(crate) mod path_style;
pub(crate) mod theme;
