pub mod handler;

pub use handler::{attach, attach_running, Agent};
