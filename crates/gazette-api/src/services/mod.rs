pub mod attachment;
pub mod email;
