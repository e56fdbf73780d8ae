pub mod conversation;
pub mod estimate;
pub mod lead;
pub mod service;
pub mod vehicle;
