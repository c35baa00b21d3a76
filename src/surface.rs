//! The minimal drawing capability the renderer depends on.
//!
//! Coordinates are arena units (the same space the game state lives in);
//! each implementation maps them onto whatever it actually draws to.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Yellow,
    Cyan,
    DarkGrey,
}

pub trait Surface {
    /// Wipe the whole drawing area.
    fn clear(&mut self) -> std::io::Result<()>;

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) -> std::io::Result<()>;

    /// Filled circle centred on `(x, y)`.
    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Color) -> std::io::Result<()>;

    /// Text whose left edge starts at `x` on the line containing `y`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color) -> std::io::Result<()>;

    /// Make everything drawn since the last `clear` visible.
    fn present(&mut self) -> std::io::Result<()>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Rect { x: f32, y: f32, w: f32, h: f32, color: Color },
    Circle { x: f32, y: f32, r: f32, color: Color },
    Text { text: String, x: f32, y: f32, color: Color },
}

/// Headless surface that keeps the commands of the current frame.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    pub frames_presented: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) -> std::io::Result<()> {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        Ok(())
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) -> std::io::Result<()> {
        self.commands.push(DrawCommand::Rect { x, y, w, h, color });
        Ok(())
    }

    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Color) -> std::io::Result<()> {
        self.commands.push(DrawCommand::Circle { x, y, r, color });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color) -> std::io::Result<()> {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.frames_presented += 1;
        Ok(())
    }
}
