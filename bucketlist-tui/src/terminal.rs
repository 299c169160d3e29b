//! Terminal setup and teardown with panic safety.

use std::io::{self, Stdout, Write};
use std::panic;

use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::widgets::{Line, Style};

/// Owns stdout while the screen is up and restores it on drop.
pub struct TerminalGuard {
    stdout: Stdout,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

        Ok(Self { stdout })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Paint `lines` from the top-left corner, one per row.
    pub fn draw(&mut self, lines: &[Line]) -> io::Result<()> {
        let (width, _) = self.size()?;
        queue!(self.stdout, Clear(ClearType::All))?;
        for (row, line) in lines.iter().enumerate() {
            let Ok(row) = u16::try_from(row) else {
                break;
            };
            queue!(self.stdout, cursor::MoveTo(0, row))?;
            for span in &line.spans {
                self.apply(span.style)?;
                queue!(self.stdout, Print(&span.text), SetAttribute(Attribute::Reset), ResetColor)?;
            }
            if let Some(fill) = line.fill {
                let rest = (width as usize).saturating_sub(line.width());
                queue!(
                    self.stdout,
                    SetBackgroundColor(fill),
                    Print(" ".repeat(rest)),
                    ResetColor
                )?;
            }
        }
        self.stdout.flush()
    }

    fn apply(&mut self, style: Style) -> io::Result<()> {
        if let Some(fg) = style.fg {
            queue!(self.stdout, SetForegroundColor(fg))?;
        }
        if let Some(bg) = style.bg {
            queue!(self.stdout, SetBackgroundColor(bg))?;
        }
        if style.bold {
            queue!(self.stdout, SetAttribute(Attribute::Bold))?;
        }
        if style.italic {
            queue!(self.stdout, SetAttribute(Attribute::Italic))?;
        }
        if style.dim {
            queue!(self.stdout, SetAttribute(Attribute::Dim))?;
        }
        if style.reverse {
            queue!(self.stdout, SetAttribute(Attribute::Reverse))?;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> io::Result<()> {
    terminal::disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}
