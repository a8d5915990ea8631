use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Suffixes tried in order when a request path does not exist as given.
pub const MARKDOWN_SUFFIXES: [&str; 4] = ["", ".markdown", ".mkdn", ".md"];

/// Extensions rendered through the markdown view.
pub const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "mkdn"];

/// Extensions rendered through the image view.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "bmp", "jpg", "jpeg", "gif"];

/// Files at or above this many bytes are not read into memory.
pub const LARGE_FILE_THRESHOLD: u64 = 2_000_000;

/// Entries whose name starts with this character are left out of listings.
pub const HIDDEN_MARKER: char = '.';

// --- Command line ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The document directory to browse
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub root_dir: PathBuf,

    /// The network address to bind to
    #[arg(
        short,
        long,
        value_name = "ADDR",
        env = "MDBROWSE_BIND",
        default_value = "127.0.0.1:3000"
    )]
    pub bind_addr: SocketAddr,

    /// Directory holding the stylesheet and other static assets
    #[arg(long, value_name = "DIR", env = "MDBROWSE_STATIC", default_value = "static")]
    pub static_dir: PathBuf,
}

/// Settings the browser reads on every request. Built once at startup.
#[derive(Debug, Clone)]
pub struct BrowseConfig {
    /// Absolute, normalized document root. Every resolved path stays under it.
    pub root: PathBuf,
    /// Children whose name starts with this are left out of listings.
    pub hidden_marker: char,
    /// Files of at least this many bytes get the large-file page.
    pub large_file_threshold: u64,
}

impl BrowseConfig {
    /// `root` must already be absolute and canonical.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            hidden_marker: HIDDEN_MARKER,
            large_file_threshold: LARGE_FILE_THRESHOLD,
        }
    }
}
