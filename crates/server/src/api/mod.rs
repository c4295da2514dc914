pub mod films;
pub mod handlers;
pub mod middleware;
pub mod recommendations;
pub mod routes;

pub use routes::create_router;
