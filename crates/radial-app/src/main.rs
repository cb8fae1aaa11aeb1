use clap::{Parser, Subcommand};
use radial::Size;
use radial_app::config::{self, Overrides};
use radial_app::gui::app::AppModel;
use radial_app::gui::window::DEFAULT_WINDOW_SIZE;
use radial_app::snapshot::{self, FocusTarget};
use radial_app::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "radial-app", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Comma separated item labels (overrides the config file)
    #[arg(short, long, value_delimiter = ',')]
    items: Option<Vec<String>>,

    /// Progress units per animation tick; a full animation is 60 units
    #[arg(short, long)]
    step: Option<u32>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Render the fully open menu to a PNG file without opening a window
    Snapshot {
        path: PathBuf,

        /// Width and height of the image in pixels
        #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
        size: i32,

        /// Highlight "center" or a wedge index
        #[arg(long)]
        focus: Option<FocusTarget>,
    },
    /// Write the default config file if there is none, and print its path
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let overrides = Overrides {
        items: cli.items,
        step: cli.step,
    };
    let mut config = config::load_or_default();
    overrides.apply(&mut config);

    match cli.command {
        Some(Commands::Snapshot { path, size, focus }) => {
            snapshot::write_png(config.build_menu()?, Size::new(size, size), focus, &path)
        }
        Some(Commands::InitConfig) => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
        None => {
            let menu = config.build_menu()?;
            let (tx, rx) = async_channel::bounded(32);

            // Start Background Services
            runtime::start_background_services(tx);

            // clap already consumed the arguments
            let app = RelmApp::new("org.radial.menu").with_args(Vec::new());
            app.run::<AppModel>((menu, overrides, rx));
            Ok(())
        }
    }
}
