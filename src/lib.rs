pub mod api;
pub mod todoist;

#[cfg(test)]
pub(crate) mod test_utils;
