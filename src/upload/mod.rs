mod controller;
mod response;
mod transport;

pub use controller::UploadController;
pub use transport::HttpTransport;
