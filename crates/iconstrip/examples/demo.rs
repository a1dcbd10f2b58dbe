//! Icon Strip Demo
//!
//! Scripts two press sessions against a check/cancel strip with emulated
//! mouse input, printing what the host receives:
//! - press, slide onto the cancel icon, slide off the strip, release
//! - press, slide onto the check icon, release
//!
//! Run with: RUST_LOG=iconstrip=debug cargo run -p iconstrip --example demo

use std::time::{Duration, Instant};

use iconstrip::render::{Color, Rect, Size};
use iconstrip::scene::{SceneTreeDebug, TreeFormatOptions};
use iconstrip::touch::MouseTouchEmulator;
use iconstrip::gesture::TouchPoint;
use iconstrip::{Host, Stage, Surface};
use tracing_subscriber::EnvFilter;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton};

const SCALE_FACTOR: f64 = 2.0;
const FRAME: Duration = Duration::from_millis(16);

/// Scripted input plus the frame clock.
struct Driver {
    stage: Stage,
    host: Host,
    mouse: MouseTouchEmulator,
    now: Instant,
}

impl Driver {
    fn new() -> iconstrip::Result<Self> {
        let mut stage = Stage::new(Size::new(320.0, 480.0));
        let root = stage.root();
        let container = stage.scene_mut().create_node("container");
        stage
            .scene_mut()
            .set_frame(container, Rect::new(0.0, 0.0, 320.0, 480.0))?;
        stage.scene_mut().set_background(container, Some(Color::RED))?;
        stage.scene_mut().add_child(root, container)?;

        let host = Host::with_check_and_cancel(&mut stage, container)?;
        Ok(Self {
            stage,
            host,
            mouse: MouseTouchEmulator::new(),
            now: Instant::now(),
        })
    }

    fn deliver(&mut self, touch: Option<TouchPoint>) -> iconstrip::Result<()> {
        let Some(touch) = touch else {
            return Ok(());
        };
        for event in self.stage.dispatch_touch(&touch) {
            self.host.handle_event(&mut self.stage, &event)?;
        }
        Ok(())
    }

    fn frame(&mut self) -> iconstrip::Result<()> {
        self.now += FRAME;
        for event in self.stage.poll(self.now) {
            self.host.handle_event(&mut self.stage, &event)?;
        }
        self.host.tick(&mut self.stage, self.now)?;
        Ok(())
    }

    fn wait(&mut self, duration: Duration) -> iconstrip::Result<()> {
        let frames = duration.as_millis() / FRAME.as_millis();
        for _ in 0..frames {
            self.frame()?;
        }
        Ok(())
    }

    fn move_to(&mut self, x: f32, y: f32) -> iconstrip::Result<()> {
        let position = PhysicalPosition::new(x as f64 * SCALE_FACTOR, y as f64 * SCALE_FACTOR);
        let touch = self.mouse.cursor_moved(position, SCALE_FACTOR, self.now);
        self.deliver(touch)?;
        self.frame()
    }

    fn button(&mut self, state: ElementState) -> iconstrip::Result<()> {
        let touch = self.mouse.mouse_input(state, MouseButton::Left, self.now);
        self.deliver(touch)
    }

    fn report(&self, title: &str) {
        println!("== {title}");
        match self.host.receiver().last_outcome() {
            Some(outcome) => println!("   outcome:  {outcome:?}"),
            None => println!("   outcome:  (none yet)"),
        }
        println!(
            "   selected: {}",
            self.host
                .receiver()
                .selected_label()
                .unwrap_or_else(|| "-".to_owned())
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("iconstrip=info")),
        )
        .init();

    let mut driver = Driver::new()?;

    // Session 1: hover the cancel icon, then leave the strip sideways.
    driver.move_to(160.0, 240.0)?;
    driver.button(ElementState::Pressed)?;
    driver.wait(Duration::from_millis(600))?;
    driver.move_to(180.0, 240.0)?;

    let tree = SceneTreeDebug::with_options(TreeFormatOptions::detailed());
    println!("{}", tree.format_scene(driver.stage.scene())?);
    println!(
        "display list: {} items",
        driver.stage.display_list()?.len()
    );

    driver.move_to(20.0, 240.0)?;
    driver.button(ElementState::Released)?;
    driver.report("slide off the strip");
    driver.wait(Duration::from_millis(600))?;

    // Session 2: pick the check icon.
    driver.move_to(160.0, 240.0)?;
    driver.button(ElementState::Pressed)?;
    driver.wait(Duration::from_millis(600))?;
    driver.move_to(130.0, 240.0)?;
    driver.button(ElementState::Released)?;
    driver.report("pick check");
    driver.wait(Duration::from_millis(600))?;

    println!("strip renewed {} times", driver.host.renewals());
    Ok(())
}
