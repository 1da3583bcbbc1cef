//! Output module for crawl results
//!
//! This module handles:
//! - Writing the discovered URL list (one URL per line)
//! - Recording and printing crawl statistics

pub mod stats;

pub use stats::{format_statistics, print_statistics, CrawlStats};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use url::Url;

/// Writes URLs one per line, in result order
pub fn write_url_list<W: Write>(urls: &[Url], writer: &mut W) -> io::Result<()> {
    for url in urls {
        writeln!(writer, "{}", url)?;
    }
    writer.flush()
}

/// Writes the URL list to a file, creating or truncating it
pub fn write_url_list_to_path(urls: &[Url], path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_url_list(urls, &mut writer)
}
