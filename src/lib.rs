pub mod codec;
pub mod config;
pub mod error;
pub mod fill;
pub mod geometry;
pub mod history;
pub mod input;
pub mod logging;
pub mod script;
pub mod selection;
pub mod session;
pub mod surface;
pub mod tools;
pub mod view;

use std::path::PathBuf;

pub use error::{AppError, AppResult};

const USAGE: &str = "rasterpad [INPUT] OUTPUT SCRIPT.json";

/// Paths for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchArgs {
    pub input: Option<PathBuf>,
    pub output: PathBuf,
    pub script: PathBuf,
}

impl BatchArgs {
    pub fn parse<I, S>(args: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<PathBuf>,
    {
        let mut paths: Vec<PathBuf> = args.into_iter().map(Into::into).collect();
        match paths.len() {
            2 => {
                let script = paths.remove(1);
                let output = paths.remove(0);
                Ok(Self {
                    input: None,
                    output,
                    script,
                })
            }
            3 => {
                let script = paths.remove(2);
                let output = paths.remove(1);
                let input = paths.remove(0);
                Ok(Self {
                    input: Some(input),
                    output,
                    script,
                })
            }
            _ => Err(AppError::Usage(USAGE.to_string())),
        }
    }
}

/// Entrypoint used by the CLI binary: replays a command script against a
/// fresh canvas (or an opened image) and saves the result.
pub fn run(args: &BatchArgs) -> AppResult<()> {
    logging::init();
    tracing::info!("starting rasterpad");

    let config = config::load_editor_config();
    let view = view::HeadlessView::new(config.canvas_size());
    let mut session = session::CanvasSession::new(&config, tools::ToolRegistry::new(), view)?;

    if let Some(input) = &args.input {
        let surface = codec::load_image(input)?;
        session.replace_canvas(surface);
    }

    let script = std::fs::read_to_string(&args.script)?;
    let commands = script::parse_script(&script)?;
    script::replay(&mut session, &commands)?;

    codec::save_image(&args.output, session.main())?;
    tracing::info!(
        output = %args.output.display(),
        undo_depth = session.history().undo_depth(),
        "batch run complete"
    );
    Ok(())
}
