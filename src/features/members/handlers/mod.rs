mod member_handler;

pub use member_handler::{add_member, add_member_form, list_members};
