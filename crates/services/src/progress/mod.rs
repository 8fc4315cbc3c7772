mod service;
mod writer;

pub use service::ProgressService;
pub use writer::ProgressWriter;
