use clap::Parser;

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";
pub const UPLOAD_PATH: &str = "/upload";
pub const DOWNLOAD_PATH: &str = "/download";

/// Desktop client for the certificate generation server
#[derive(Parser, Debug)]
#[command(name = "certificate-uploader")]
#[command(about = "Upload an Excel sheet and a certificate template, then download the results")]
pub struct Args {
    /// Base URL of the certificate server
    #[arg(short, long, default_value = DEFAULT_SERVER)]
    pub server: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: String,
    pub upload_path: String,
    pub download_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER)
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self::new(&args.server)
    }
}

impl Config {
    pub fn new(server: &str) -> Self {
        Self {
            server: server.trim_end_matches('/').to_string(),
            upload_path: UPLOAD_PATH.to_string(),
            download_path: DOWNLOAD_PATH.to_string(),
        }
    }

    pub fn upload_url(&self) -> String {
        format!("{}{}", self.server, self.upload_path)
    }

    pub fn download_url(&self) -> String {
        format!("{}{}", self.server, self.download_path)
    }
}
