// Job description persistence and its HTTP surface.

pub mod handlers;
pub mod store;
