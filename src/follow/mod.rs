pub(crate) mod config;
pub(crate) mod follower;
pub(crate) mod mapper;
