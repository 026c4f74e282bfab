//! # Recibo CLI
//!
//! Command-line interface for ESC/POS network receipt printing.
//!
//! ## Usage
//!
//! ```bash
//! # Connect to a printer and remember it
//! recibo connect --host 192.168.1.50 --port 9100
//!
//! # Print an image (uses the remembered printer)
//! recibo print receipt.png
//!
//! # Print from a URL, on 58mm paper, to an explicit printer
//! recibo print https://example.com/logo.png --width 58 --host 192.168.1.50
//!
//! # Preview what the paper would show, without a printer
//! recibo print receipt.png --png preview.png
//!
//! # Show the remembered printer and probe reachability
//! recibo status
//!
//! # Run the HTTP print API
//! recibo serve --listen 0.0.0.0:8080
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use recibo::{
    ReciboError,
    encoder::{self, Bitmap, EncodeOptions},
    preview,
    printer::{PaperWidth, PrinterProfile},
    protocol,
    server::{self, ServerConfig},
    settings::Settings,
    transport::{DEFAULT_PORT, Endpoint, TcpTransport},
};

/// Recibo - ESC/POS network receipt printing utility
#[derive(Parser, Debug)]
#[command(name = "recibo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to ~/.config/recibo/settings.json)
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print an image file or URL to the thermal printer
    Print {
        /// Image file path, or an http(s) URL to fetch
        source: String,

        /// Printer host (defaults to the remembered printer)
        #[arg(long)]
        host: Option<String>,

        /// Printer port
        #[arg(long)]
        port: Option<u16>,

        /// Paper width: 58/80 (mm) or 384/576 (dots)
        #[arg(long)]
        width: Option<String>,

        /// Write the encoded raster to a PNG file instead of printing
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,
    },

    /// Probe a printer and remember it for future prints
    Connect {
        /// Printer host
        #[arg(long)]
        host: String,

        /// Printer port
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Show the remembered printer and whether it is reachable
    Status,

    /// Run the HTTP print API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recibo=info,tower_http=info".into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ReciboError> {
    let cli = Cli::parse();
    let settings_path = cli.settings.clone().unwrap_or_else(Settings::default_path);

    match cli.command {
        Commands::Print {
            source,
            host,
            port,
            width,
            png,
        } => print_command(&settings_path, &source, host, port, width, png).await,

        Commands::Connect { host, port } => {
            let endpoint = Endpoint::new(host, port)?;
            let mut transport = TcpTransport::new();
            transport.connect(endpoint.clone()).await?;
            println!("Connected to {}.", endpoint);

            let mut settings = Settings::load(&settings_path)?;
            settings.endpoint = Some(endpoint);
            settings.save(&settings_path)?;
            println!("Printer remembered for future prints.");
            Ok(())
        }

        Commands::Status => {
            let settings = Settings::load(&settings_path)?;
            println!("Profile: {}", PrinterProfile::for_paper(settings.width).name);
            println!("Paper width: {}", settings.width);
            match settings.endpoint {
                Some(ep) => {
                    println!("Printer: {}", ep);
                    let mut transport =
                        TcpTransport::new().with_connect_timeout(Duration::from_millis(2000));
                    match transport.connect(ep).await {
                        Ok(()) => println!("Reachable: yes"),
                        Err(_) => println!("Reachable: no"),
                    }
                }
                None => println!("Printer: none configured"),
            }
            Ok(())
        }

        Commands::Serve { listen } => {
            server::serve(ServerConfig {
                listen_addr: listen,
                settings_path,
            })
            .await
        }
    }
}

async fn print_command(
    settings_path: &std::path::Path,
    source: &str,
    host: Option<String>,
    port: Option<u16>,
    width: Option<String>,
    png: Option<PathBuf>,
) -> Result<(), ReciboError> {
    let mut settings = Settings::load(settings_path)?;

    let explicit_width = width.is_some();
    let width: PaperWidth = match width {
        Some(w) => w.parse()?,
        None => settings.width,
    };

    let profile = PrinterProfile::for_paper(width);

    let bitmap = load_bitmap(source).await?;
    println!(
        "Encoding {}x{} image for {} paper...",
        bitmap.width(),
        bitmap.height(),
        width
    );
    let raster = encoder::encode(
        bitmap,
        &EncodeOptions::for_width(profile.width_dots() as u32),
    );

    // PNG output needs no printer at all
    if let Some(path) = png {
        preview::save_png(&path, &raster)?;
        println!("Saved preview to {}", path.display());
        return Ok(());
    }

    let job = protocol::print_job_with_stripe_rows(&raster, profile.max_stripe_rows as usize);
    if job.is_empty() {
        println!("Nothing to print: the image is blank.");
        return Ok(());
    }

    // Explicit flags beat the remembered printer
    let explicit_host = host.is_some();
    let endpoint = match (host, settings.endpoint.clone()) {
        (Some(h), _) => Endpoint::new(h, port.unwrap_or(DEFAULT_PORT))?,
        (None, Some(ep)) => ep,
        (None, None) => {
            return Err(ReciboError::Validation(
                "No printer configured. Pass --host, or run `recibo connect` first".to_string(),
            ));
        }
    };

    let mut transport = TcpTransport::new();
    transport.connect(endpoint.clone()).await?;
    transport.send(&job).await?;
    println!("Printed {} bytes to {}.", job.len(), endpoint);

    // Remember what the user chose explicitly, now that it worked
    if explicit_host || explicit_width {
        if explicit_host {
            settings.endpoint = Some(endpoint);
        }
        if explicit_width {
            settings.width = width;
        }
        settings.save(settings_path)?;
    }

    Ok(())
}

/// Load an image from a local path or an http(s) URL and decode it.
async fn load_bitmap(source: &str) -> Result<Bitmap, ReciboError> {
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        println!("Fetching {}...", source);
        let response = reqwest::get(source)
            .await
            .map_err(|e| ReciboError::Image(format!("Failed to fetch {}: {}", source, e)))?;
        if !response.status().is_success() {
            return Err(ReciboError::Image(format!(
                "Failed to fetch {}: HTTP {}",
                source,
                response.status()
            )));
        }
        response
            .bytes()
            .await
            .map_err(|e| ReciboError::Image(format!("Failed to read response body: {}", e)))?
            .to_vec()
    } else {
        std::fs::read(source)?
    };

    Bitmap::decode(&bytes)
}
