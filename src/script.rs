//! JSON command scripts replayed against a [`CanvasSession`] in batch mode.
//!
//! A script is a JSON array of objects tagged by `"command"`:
//!
//! ```json
//! [
//!   {"command": "select_tool", "tool": "rectangle"},
//!   {"command": "set_primary", "color": {"r": 1.0, "g": 0.0, "b": 0.0, "a": 1.0}},
//!   {"command": "stroke", "points": [[2, 2], [17, 17]]}
//! ]
//! ```
//!
//! Points are canvas pixels; they are mapped to pointer positions at the
//! current zoom before reaching the session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Color;
use crate::session::{CanvasSession, PointerButton};
use crate::surface::SurfaceError;
use crate::tools::FillMode;
use crate::view::CanvasView;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("malformed script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown tool `{name}`")]
    UnknownTool { name: String },
    #[error("stroke at command {index} has no points")]
    EmptyStroke { index: usize },
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

pub type ScriptResult<T> = std::result::Result<T, ScriptError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    SelectTool {
        tool: String,
    },
    SetPrimary {
        color: Color,
    },
    SetSecondary {
        color: Color,
    },
    SwapColors,
    SetStrokeWidth {
        width: f64,
    },
    SetBrushSize {
        size: f64,
    },
    SetEraserSize {
        size: f64,
    },
    SetFillMode {
        mode: FillMode,
    },
    SetAntialiasing {
        enabled: bool,
    },
    Press {
        x: i32,
        y: i32,
        #[serde(default)]
        button: PointerButton,
    },
    Move {
        x: i32,
        y: i32,
    },
    Release {
        x: i32,
        y: i32,
    },
    /// Press on the first point, move through the rest, release on the last.
    Stroke {
        points: Vec<[i32; 2]>,
        #[serde(default)]
        button: PointerButton,
    },
    Undo,
    Redo,
    SelectAll,
    Cut,
    Copy,
    Paste,
    NewCanvas,
    Resize {
        width: i64,
        height: i64,
    },
    ResizeEdge {
        dx: f64,
        dy: f64,
        dir_x: i32,
        dir_y: i32,
    },
}

pub fn parse_script(json: &str) -> ScriptResult<Vec<EditorCommand>> {
    Ok(serde_json::from_str(json)?)
}

/// Applies every command in order and returns how many ran. Stops at the
/// first failing command.
pub fn replay<V: CanvasView>(
    session: &mut CanvasSession<V>,
    commands: &[EditorCommand],
) -> ScriptResult<usize> {
    for (index, command) in commands.iter().enumerate() {
        apply_command(session, index, command)?;
    }
    tracing::info!(commands = commands.len(), "script replayed");
    Ok(commands.len())
}

fn apply_command<V: CanvasView>(
    session: &mut CanvasSession<V>,
    index: usize,
    command: &EditorCommand,
) -> ScriptResult<()> {
    tracing::debug!(index, ?command, "applying script command");
    match command {
        EditorCommand::SelectTool { tool } => {
            let kind = session
                .registry()
                .find_by_name(tool)
                .map(|descriptor| descriptor.kind)
                .ok_or_else(|| ScriptError::UnknownTool { name: tool.clone() })?;
            session.set_tool(kind);
        }
        EditorCommand::SetPrimary { color } => session.set_primary(*color),
        EditorCommand::SetSecondary { color } => session.set_secondary(*color),
        EditorCommand::SwapColors => session.swap_colors(),
        EditorCommand::SetStrokeWidth { width } => session.set_stroke_width(*width),
        EditorCommand::SetBrushSize { size } => session.set_brush_size(*size),
        EditorCommand::SetEraserSize { size } => session.set_eraser_size(*size),
        EditorCommand::SetFillMode { mode } => session.set_fill_mode(*mode),
        EditorCommand::SetAntialiasing { enabled } => session.set_antialiasing(*enabled),
        EditorCommand::Press { x, y, button } => {
            let (px, py) = pointer_for(session, *x, *y);
            session.press(px, py, *button)?;
        }
        EditorCommand::Move { x, y } => {
            let (px, py) = pointer_for(session, *x, *y);
            session.motion(px, py);
        }
        EditorCommand::Release { x, y } => {
            let (px, py) = pointer_for(session, *x, *y);
            session.release(px, py)?;
        }
        EditorCommand::Stroke { points, button } => {
            let (Some(first), Some(last)) = (points.first(), points.last()) else {
                return Err(ScriptError::EmptyStroke { index });
            };
            let (px, py) = pointer_for(session, first[0], first[1]);
            session.press(px, py, *button)?;
            for point in &points[1..] {
                let (px, py) = pointer_for(session, point[0], point[1]);
                session.motion(px, py);
            }
            let (px, py) = pointer_for(session, last[0], last[1]);
            session.release(px, py)?;
        }
        EditorCommand::Undo => {
            session.undo();
        }
        EditorCommand::Redo => {
            session.redo();
        }
        EditorCommand::SelectAll => {
            session.select_all()?;
        }
        EditorCommand::Cut => {
            session.cut_selection();
        }
        EditorCommand::Copy => {
            session.copy_selection();
        }
        EditorCommand::Paste => {
            session.paste_clipboard();
        }
        EditorCommand::NewCanvas => session.new_canvas(),
        EditorCommand::Resize { width, height } => session.resize_canvas(*width, *height)?,
        EditorCommand::ResizeEdge {
            dx,
            dy,
            dir_x,
            dir_y,
        } => session.resize_from_edge(*dx, *dy, *dir_x, *dir_y)?,
    }
    Ok(())
}

/// Center of canvas pixel `(x, y)` in widget coordinates.
fn pointer_for<V: CanvasView>(session: &CanvasSession<V>, x: i32, y: i32) -> (f64, f64) {
    let zoom = session.view().current_zoom();
    (
        (f64::from(x) + 0.5) * zoom,
        (f64::from(y) + 0.5) * zoom,
    )
}
