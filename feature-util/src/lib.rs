pub mod clustering;
pub mod common_io;
pub mod stat;
