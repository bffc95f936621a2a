use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default device address, the access-point address the sample firmware uses.
pub const DEFAULT_HOST: &str = "192.168.4.1";

/// Default device port.
pub const DEFAULT_PORT: u16 = 80;

/// Configuration for a streamscope session.
///
/// Holds the endpoint, connection bound, and presentation options. Use the
/// builder methods to customize individual fields.
///
/// # Examples
///
/// ## Connecting to the default device
///
/// ```
/// use streamscope::Config;
///
/// let config = Config::default();
/// assert_eq!(config.endpoint(), "192.168.4.1:80");
/// ```
///
/// ## Custom endpoint and timeout
///
/// ```
/// use streamscope::Config;
/// use std::time::Duration;
///
/// let config = Config::new("10.0.0.7".to_string(), 8080)
///     .with_connect_timeout(Duration::from_secs(2))
///     .with_plot(false);
///
/// assert_eq!(config.endpoint(), "10.0.0.7:8080");
/// assert_eq!(config.connect_timeout, Duration::from_secs(2));
/// assert!(!config.plot);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Device address to connect to
    pub host: String,

    /// Device port
    pub port: u16,

    /// Bound on the initial connection attempt
    pub connect_timeout: Duration,

    /// Largest number of bytes requested from the socket per receive call
    pub recv_chunk: usize,

    /// Render the live plot
    pub plot: bool,

    /// Plot width in terminal columns
    pub plot_width: usize,

    /// Plot height in terminal rows
    pub plot_height: usize,

    /// Print the final session summary as JSON
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_secs(5),
            recv_chunk: 4096,
            plot: true,
            plot_width: 72,
            plot_height: 16,
            json: false,
        }
    }
}

impl Config {
    /// Creates a configuration for the given device endpoint.
    ///
    /// All other fields start at their defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use streamscope::Config;
    ///
    /// let config = Config::new("192.168.4.1".to_string(), 80);
    /// assert_eq!(config.port, 80);
    /// ```
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            ..Default::default()
        }
    }

    /// The `host:port` string used for the connection attempt.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Sets the bound on the initial connection attempt.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the largest number of bytes requested per receive call.
    ///
    /// Values are clamped to `1..=PACKET_SIZE` by the reader.
    pub fn with_recv_chunk(mut self, recv_chunk: usize) -> Self {
        self.recv_chunk = recv_chunk;
        self
    }

    /// Enables or disables the live plot.
    ///
    /// With the plot disabled the per-frame report lines are still printed.
    pub fn with_plot(mut self, plot: bool) -> Self {
        self.plot = plot;
        self
    }

    /// Sets the plot dimensions in terminal cells.
    pub fn with_plot_size(mut self, width: usize, height: usize) -> Self {
        self.plot_width = width;
        self.plot_height = height;
        self
    }

    /// Enables or disables the JSON session summary.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}
