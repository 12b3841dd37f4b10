use clap::{Parser, Subcommand};
use og_card::compose::Compositor;
use og_card::export::{self, ExportOutcome, Exporter};
use og_card::imaging::FontdueFace;
use og_card::types::RenderRequest;
use og_card::{config, logo, naming, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "og-card")]
#[command(about = "Deterministic Open Graph image renderer")]
#[command(long_about = "\
Deterministic Open Graph image renderer

Draws a 1200x630 PNG for a post title, themed by a brand file. Rendering is
local and repeatable: the same title and brand always give the same bytes.

Card layers, back to front:

  background   135° gradient, background → background_gradient_end
  grid         1px lines every 48px in the primary color
  rings        two faint decorative circles
  glows        primary glow top-right, secondary glow bottom-left
  logo         optional, 320x320 centered at 40% opacity
  badge        primary dot + brand name, uppercase
  domain       bottom margin, muted color
  title        up to 3 lines, bottom-anchored above the domain

Titles longer than three lines end with \"...\". Empty titles render the
placeholder from brand.toml and save as og-image.png.

Run 'og-card gen-config' to generate a documented brand.toml.")]
#[command(version)]
struct Cli {
    /// Directory holding brand.toml (paths inside it resolve from here)
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Directory rendered cards are saved into
    #[arg(long, default_value = "og-images", global = true)]
    output: PathBuf,

    /// Log every layer and layout decision
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one card and save it
    Render {
        /// Post title
        #[arg(long)]
        title: String,
        /// Image-generation prompt to show alongside the result (not parsed)
        #[arg(long)]
        prompt: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render one card per non-empty line of a file
    Batch {
        /// Text file with one title per line
        file: PathBuf,
    },
    /// Show how a title wraps, without rendering
    Layout {
        /// Post title
        #[arg(long)]
        title: String,
        /// Print the layout as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate brand.toml, resolve fonts, and probe the logo
    Check,
    /// Print a stock brand.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // The logo load is the only await; one thread is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    match cli.command {
        Command::Render {
            title,
            prompt,
            json,
        } => {
            let brand = config::load_config(&cli.config)?;
            let face = FontdueFace::from_config(&brand.fonts)?;
            let exporter = Exporter::new(&cli.output);
            let request = RenderRequest::new(&title, &brand);
            match runtime.block_on(exporter.export(&request, &face))? {
                ExportOutcome::Saved { path, image } if json => {
                    let value = serde_json::json!({
                        "path": path,
                        "digest": image.digest(),
                        "image": image,
                        "prompt": prompt,
                    });
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
                ExportOutcome::Saved { path, image } => {
                    output::print_render_output(&path, &image, prompt.as_deref());
                }
                ExportOutcome::Ignored => {
                    for line in output::format_ignored_output(&title) {
                        println!("{}", line);
                    }
                }
            }
        }
        Command::Batch { file } => {
            let brand = config::load_config(&cli.config)?;
            let face = FontdueFace::from_config(&brand.fonts)?;
            let titles = export::read_titles(&std::fs::read_to_string(&file)?);
            init_thread_pool(&brand.processing);
            let logo = runtime.block_on(logo::load_brand_logo(&brand));

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_batch_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let entries =
                export::export_batch(&titles, &brand, &face, &logo, &cli.output, Some(tx));
            printer
                .join()
                .map_err(|_| "progress printer thread panicked")?;
            output::print_batch_summary(&entries);

            let failed = entries.iter().filter(|e| e.result.is_err()).count();
            if failed > 0 {
                return Err(format!("{failed} of {} cards failed", entries.len()).into());
            }
        }
        Command::Layout { title, json } => {
            let brand = config::load_config(&cli.config)?;
            let face = FontdueFace::from_config(&brand.fonts)?;
            let request = RenderRequest::new(&title, &brand);
            let layout = Compositor::new(&face).layout(&request);
            let file_name = naming::file_name_for(&title);
            if json {
                let value = serde_json::json!({
                    "layout": layout,
                    "file_name": file_name,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                output::print_layout_output(&layout, &file_name);
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let brand = config::load_config(&cli.config)?;
            let config_path = cli.config.join(config::CONFIG_FILE);
            let fonts = FontdueFace::from_config(&brand.fonts)
                .map(|face| face.describe())
                .map_err(|e| e.to_string());
            let logo = runtime.block_on(logo::load_brand_logo(&brand));
            let report = output::CheckReport {
                config_path: config_path.exists().then_some(config_path),
                name: brand.name.clone(),
                domain: brand.domain.clone(),
                fonts,
                logo_path: brand.logo.clone(),
                logo_status: logo.status(),
            };
            output::print_check_output(&report);
            if !report.is_ok() {
                return Err("brand check failed".into());
            }
            println!("==> Brand is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `warn` by default, `debug` with `--verbose`; `RUST_LOG` overrides both.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Never more workers than available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
