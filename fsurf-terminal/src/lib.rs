//! Terminal render binding for fsurf surfaces.
//!
//! Draws the current mesh as shaded characters and feeds right-button
//! mouse drags into the surface's rotation controller.

use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use fsurf_core::{Capture, FunctionSurface, SurfaceView, Transform, ViewConfig};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

pub mod cli;
pub mod input;
pub mod logging;
pub mod projection;
pub mod renderer;

pub use projection::Camera;
pub use renderer::AsciiRenderer;

/// Errors surfaced by the terminal binary
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] fsurf_core::ConfigError),

    #[error(transparent)]
    Sampler(#[from] fsurf_core::SamplerError),

    #[error("unknown preset '{0}' (use --list to see the available ones)")]
    UnknownPreset(String),

    #[error("no surfaces to show")]
    NoSurfaces,
}

/// Interactive terminal viewer over a list of surfaces
pub struct TerminalApp {
    surfaces: Vec<FunctionSurface>,
    current: usize,
    view: SurfaceView,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    dirty: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(
        surfaces: Vec<FunctionSurface>,
        start: usize,
        config: ViewConfig,
    ) -> Result<Self, AppError> {
        let (width, height) = terminal::size()?;
        Self::with_size(surfaces, start, config, width, height)
    }

    /// Build the viewer for a terminal of `width` x `height` cells.
    pub fn with_size(
        surfaces: Vec<FunctionSurface>,
        start: usize,
        config: ViewConfig,
        width: u16,
        height: u16,
    ) -> Result<Self, AppError> {
        if surfaces.is_empty() {
            return Err(AppError::NoSurfaces);
        }

        let mut app = Self {
            surfaces,
            current: 0,
            view: SurfaceView::new(config),
            camera: Camera::new(width as u32, height as u32),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            dirty: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        };
        app.show(start);
        Ok(app)
    }

    /// Switch to surface `index` (wrapping) and rebuild its mesh
    pub fn show(&mut self, index: usize) {
        self.current = index % self.surfaces.len();
        let surface = &self.surfaces[self.current];
        debug!(title = %surface.title, "showing surface");
        self.view.set_grid(Some(&surface.grid));
        self.dirty = true;
    }

    pub fn view(&self) -> &SurfaceView {
        &self.view
    }

    /// Index of the surface on screen
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        // Stderr logging stays muted until the screen is restored
        let _screen = logging::ScreenGuard::enter();
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> Result<(), AppError> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Drain pending input before drawing
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            if self.dirty {
                self.render()?;
                self.dirty = false;
                self.frame_count += 1;
            }

            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                let Some(pointer) = input::pointer_event(&mouse) else {
                    return;
                };
                let before = self.view.rotation();
                match self.view.handle_pointer(pointer) {
                    // Mouse capture is held for the whole session
                    Some(Capture::Claim) => trace!("pointer capture claimed"),
                    Some(Capture::Release) => trace!("pointer capture released"),
                    None => {}
                }
                if self.view.rotation() != before {
                    self.dirty = true;
                }
            }
            Event::Resize(width, height) => {
                self.camera.resize(width as u32, height as u32);
                self.renderer.resize(width as usize, height as usize);
                self.dirty = true;
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, KeyEvent { code, kind, .. }: KeyEvent) {
        if kind == KeyEventKind::Release {
            return;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('n') | KeyCode::Right => {
                self.show(self.current + 1);
            }
            KeyCode::Char('p') | KeyCode::Left => {
                self.show(self.current + self.surfaces.len() - 1);
            }
            KeyCode::Char('r') => {
                self.view.controller_mut().reset();
                self.dirty = true;
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let model = Transform::to_f32(&self.view.model_matrix());

        self.renderer.clear();
        if let Some(mesh) = self.view.mesh() {
            self.renderer
                .render_mesh(mesh, self.view.material(), &model, &self.camera);
        }

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let surface = &self.surfaces[self.current];
        let rotation = self.view.rotation();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{} | yaw {:.1}° pitch {:.1}° | FPS: {:.1} | Right-drag=Rotate N/P=Surface R=Reset Q=Quit",
                surface.title, rotation.yaw, rotation.pitch, self.fps
            )),
            cursor::MoveTo(0, 1),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::DarkGrey),
            Print(&surface.description),
            ResetColor
        )?;

        stdout.flush()
    }
}
