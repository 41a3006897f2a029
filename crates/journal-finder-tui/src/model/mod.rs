pub mod abstract_input;
pub mod sidebar;
