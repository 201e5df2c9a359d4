pub mod autocomplete;
pub mod diff;
pub mod edit;
pub mod link;
pub mod status;
