pub mod test_locate;
pub mod test_option;
pub mod test_path;
pub mod test_search_path;
