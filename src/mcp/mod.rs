

pub mod server;

pub use server::{run_server, PortalSearchMcpServer, CONFIG_RESOURCE_URI};
