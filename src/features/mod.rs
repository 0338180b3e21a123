pub mod disk;
pub mod email;
pub mod facts;
pub mod gpu;
pub mod network_identity;
pub mod snapshot;
