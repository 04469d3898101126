use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

use crate::error::TermError;
use crate::raster::{Framebuffer, Glyph, Rgb};

pub struct TermManager {
    stdout: Stdout,
    // What is currently on screen, so unchanged cells are not re-sent.
    screen: Vec<Option<Glyph>>,
    alternate: bool,
    raw: bool,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), screen: vec![], alternate: false, raw: false }
    }

    pub fn setup(&mut self) -> Result<(), TermError> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), TermError> {
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking)?;
        if self.alternate {
            execute!(self.stdout, LeaveAlternateScreen)?;
            self.alternate = false;
        } else {
            execute!(self.stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        }
        if self.raw {
            terminal::disable_raw_mode()?;
            self.raw = false;
        }
        Ok(())
    }

    /// Switches between the alternate screen and the main screen buffer.
    pub fn set_alternate_screen(&mut self, on: bool) -> Result<(), TermError> {
        if on == self.alternate {
            return Ok(());
        }
        if on {
            execute!(self.stdout, EnterAlternateScreen)?;
        } else {
            execute!(self.stdout, LeaveAlternateScreen)?;
        }
        self.alternate = on;
        self.invalidate()
    }

    /// Forgets what is on screen and clears it; the next present redraws
    /// every cell.
    pub fn invalidate(&mut self) -> Result<(), TermError> {
        self.screen.iter_mut().for_each(|g| *g = None);
        execute!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>, TermError> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> Result<(u16, u16), TermError> {
        Ok(terminal::size()?)
    }

    pub fn present(&mut self, fb: &Framebuffer) -> Result<(), TermError> {
        let (cols, rows) = fb.cells();
        let (cols, rows) = (cols as usize, rows as usize);
        if self.screen.len() != cols * rows {
            self.screen = vec![None; cols * rows];
            execute!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All))?;
        }

        let mut colors: Option<(Rgb, Rgb)> = None;
        let mut cursor_at: Option<(usize, usize)> = None;

        for row in 0..rows {
            for col in 0..cols {
                let glyph = fb.glyph(col, row);
                let slot = &mut self.screen[row * cols + col];
                if *slot == Some(glyph) {
                    continue;
                }
                *slot = Some(glyph);

                if cursor_at != Some((col, row)) {
                    queue!(self.stdout, cursor::MoveTo(col as u16, row as u16))?;
                }
                if colors != Some((glyph.fg, glyph.bg)) {
                    queue!(
                        self.stdout,
                        style::SetForegroundColor(rgb(glyph.fg)),
                        style::SetBackgroundColor(rgb(glyph.bg))
                    )?;
                    colors = Some((glyph.fg, glyph.bg));
                }
                queue!(self.stdout, style::Print(glyph.ch))?;
                cursor_at = Some((col + 1, row));
            }
        }

        queue!(self.stdout, style::ResetColor)?;
        self.flush()
    }

    pub fn flush(&mut self) -> Result<(), TermError> {
        self.stdout.flush()?;
        Ok(())
    }
}

fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}
