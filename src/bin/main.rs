use clap::Parser;
use std::time::Duration;
use streamscope::{report, Config, ScopeClient};

#[derive(Parser)]
#[command(name = "streamscope")]
#[command(about = "Live terminal viewer for fixed-frame TCP sample streams", long_about = None)]
#[command(version)]
struct Cli {
    /// Device address to connect to
    #[arg(default_value = "192.168.4.1")]
    host: String,

    /// Port to connect to
    #[arg(short, long, default_value = "80")]
    port: u16,

    /// Connection timeout in seconds
    #[arg(long, default_value = "5")]
    connect_timeout: u64,

    /// Largest number of bytes requested per receive call
    #[arg(long, default_value = "4096")]
    recv_chunk: usize,

    /// Disable the live plot, keep the per-frame log
    #[arg(long)]
    no_plot: bool,

    /// Plot width in terminal columns
    #[arg(long, default_value = "72")]
    plot_width: usize,

    /// Plot height in terminal rows
    #[arg(long, default_value = "16")]
    plot_height: usize,

    /// Print the final session summary as JSON
    #[arg(short = 'J', long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = Config::new(cli.host, cli.port)
        .with_connect_timeout(Duration::from_secs(cli.connect_timeout))
        .with_recv_chunk(cli.recv_chunk)
        .with_plot(!cli.no_plot)
        .with_plot_size(cli.plot_width, cli.plot_height)
        .with_json(cli.json);
    let json = config.json;

    let client = ScopeClient::new(config);

    let token = client.cancellation_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    client.run().await?;

    let totals = client.get_stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
    } else {
        println!("{}", report::session_summary(&totals));
    }

    Ok(())
}
