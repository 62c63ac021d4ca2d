// Outer surfaces: the HTTP service boundary and the terminal client.

#[cfg(feature = "cli")]
pub mod client;
pub mod insight;
#[cfg(feature = "server")]
pub mod routes;
