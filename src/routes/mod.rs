//! Routers: common endpoints and the generated resource routes.

pub mod common;
pub mod resource;

pub use common::common_routes;
pub use resource::resource_routes;
