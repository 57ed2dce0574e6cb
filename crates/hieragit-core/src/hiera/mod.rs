pub mod errors;
pub mod handler;

pub use errors::DataFileError;
pub use handler::Hiera;
