pub mod draft;
pub mod row;
pub mod view;
