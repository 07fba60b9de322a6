pub mod cors;
pub mod recovery;
