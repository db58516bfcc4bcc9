//! Command-line interface definitions.
//!
//! Every option can also be given through the environment variable named
//! in its help text.

use clap::Parser;
use drudge::config::{DEFAULT_TIMEOUT, DEFAULT_URL};
use drudge::outputs::OutputFormat;
use drudge::{ClientConfig, Section};
use std::time::Duration;
use url::Url;

/// Print headlines from the Drudge Report front page.
///
/// # Examples
///
/// ```sh
/// # Everything, in page order
/// drudge
///
/// # Just the first column, then the top stories, as JSON lines
/// drudge --sec 1,top --format json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Sections to print, in the order given: `top`, `1`, `2` or `3`
    #[arg(
        short,
        long = "sec",
        env = "DRUDGE_SECTIONS",
        value_name = "SECTIONS",
        value_delimiter = ',',
        default_value = "top,1,2,3"
    )]
    pub sections: Vec<Section>,

    /// Page to read headlines from
    #[arg(long, env = "DRUDGE_URL", default_value = DEFAULT_URL)]
    pub url: Url,

    /// Request timeout in seconds
    #[arg(long, env = "DRUDGE_TIMEOUT", value_name = "SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Output format
    #[arg(short, long, env = "DRUDGE_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also print image URLs in text output
    #[arg(short, long, env = "DRUDGE_IMAGES")]
    pub images: bool,
}

impl Cli {
    /// Client settings derived from the arguments.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_url(self.url.clone())
            .with_timeout(Duration::from_secs(self.timeout))
    }
}
