pub mod chat;
pub mod root_route;
pub mod status_route;
