pub(crate) mod filter_list;
pub(crate) mod input_field;
pub(crate) mod item_renderer;
pub(crate) mod loading;
pub(crate) mod modal;
pub(crate) mod text;
