use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    execute, queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::{Buffer, Cell};
use crate::document::Document;
use crate::layout::Rect;
use crate::render::render_to_buffer;
use crate::text::char_width;

/// Raw-mode terminal with mouse capture and double-buffered diff output.
pub struct Terminal {
    stdout: io::Stdout,
    current_buffer: Buffer,
    previous_buffer: Buffer,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout,
            current_buffer: Buffer::new(width, height),
            previous_buffer: Buffer::new(width, height),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current_buffer.width(), self.current_buffer.height())
    }

    /// Wait up to `timeout` for input, then drain everything pending.
    pub fn poll(&self, timeout: Duration) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = Vec::new();
        if event::poll(timeout)? {
            events.push(event::read()?);
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }
        Ok(events)
    }

    /// Lay out and draw the document, writing only cells that changed.
    pub fn render(&mut self, document: &mut Document) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        if width != self.current_buffer.width() || height != self.current_buffer.height() {
            self.current_buffer = Buffer::new(width, height);
            self.previous_buffer = Buffer::new(width, height);
            execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }
        document.set_viewport(Rect::from_size(width, height));

        self.current_buffer.clear();
        let layout = document.layout().clone();
        render_to_buffer(document.root(), &layout, &mut self.current_buffer);

        self.flush_diff()?;
        std::mem::swap(&mut self.current_buffer, &mut self.previous_buffer);
        Ok(())
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last: Option<(u16, u16, u16)> = None;
        let mut pen: Option<Cell> = None;

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in self.current_buffer.diff(&self.previous_buffer) {
            if cell.wide_continuation {
                continue;
            }

            let sequential = matches!(last, Some((lx, ly, w)) if ly == y && lx + w == x);
            if !sequential {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            let changed = pen.map_or(true, |p| {
                p.fg != cell.fg || p.bg != cell.bg || p.style != cell.style
            });
            if changed {
                write_pen(&mut self.stdout, cell)?;
                pen = Some(*cell);
            }

            write!(self.stdout, "{}", cell.char)?;
            last = Some((x, y, char_width(cell.char).max(1) as u16));
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

fn write_pen(out: &mut io::Stdout, cell: &Cell) -> io::Result<()> {
    let rgb = |c: crate::types::Rgb| CtColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    };
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(rgb(cell.fg)),
        SetBackgroundColor(rgb(cell.bg))
    )?;
    let style = cell.style;
    let attributes = [
        (style.bold, Attribute::Bold),
        (style.dim, Attribute::Dim),
        (style.italic, Attribute::Italic),
        (style.underline, Attribute::Underlined),
        (style.reverse, Attribute::Reverse),
    ];
    for (on, attribute) in attributes {
        if on {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
