pub mod constants;
pub mod notice;
pub mod templates;
pub mod types;

#[cfg(test)]
pub mod test_helpers;
