pub mod contract;
pub mod msg;
