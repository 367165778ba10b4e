use std::sync::{Arc, Mutex};

use super::*;
use crate::foundation::core::Rgb8;

type Log = Arc<Mutex<Vec<String>>>;

/// Paints its pixel (0, 0) and records every hook call.
#[derive(Debug)]
struct Recorder {
    tag: &'static str,
    z: i32,
    color: Rgb8,
    log: Log,
    fail_update: bool,
    max_width: u32,
}

impl Recorder {
    fn boxed(tag: &'static str, z: i32, color: Rgb8, log: &Log) -> Box<dyn Entity> {
        Box::new(Self {
            tag,
            z,
            color,
            log: Arc::clone(log),
            fail_update: false,
            max_width: u32::MAX,
        })
    }

    fn note(&self, what: &str) {
        self.log.lock().unwrap().push(format!("{}:{what}", self.tag));
    }
}

impl Entity for Recorder {
    fn tag(&self) -> &str {
        self.tag
    }

    fn z_index(&self) -> i32 {
        self.z
    }

    fn update(&mut self, _delta: Duration) -> PathchainResult<()> {
        self.note("update");
        if self.fail_update {
            return Err(crate::foundation::error::PathchainError::render("update refused"));
        }
        Ok(())
    }

    fn render(&self, target: &mut Frame) {
        self.note("render");
        target.data_mut()[..4].copy_from_slice(&self.color.to_premul_opaque());
    }

    fn on_canvas_resize(&mut self, canvas: Canvas) -> PathchainResult<()> {
        self.note(&format!("resize {}x{}", canvas.width, canvas.height));
        if canvas.width > self.max_width {
            return Err(crate::foundation::error::PathchainError::render("canvas too wide"));
        }
        Ok(())
    }

    fn on_theme_change(&mut self, theme: &Theme) -> PathchainResult<()> {
        self.note(&format!("theme {}", theme.name));
        Ok(())
    }

    fn on_attach(&mut self) {
        self.note("attach");
    }

    fn on_detach(&mut self) {
        self.note("detach");
    }
}

fn drain(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.lock().unwrap())
}

#[test]
fn add_and_remove_run_lifecycle_hooks() {
    let log = Log::default();
    let mut stage = Stage::new(Canvas::square(4), Theme::light());
    stage.add(Recorder::boxed("a", 0, Rgb8::new(1, 1, 1), &log));
    stage.add(Recorder::boxed("b", 0, Rgb8::new(2, 2, 2), &log));
    assert_eq!(stage.len(), 2);
    assert_eq!(drain(&log), ["a:attach", "b:attach"]);

    assert!(stage.remove("a").is_some());
    assert!(stage.remove("a").is_none());
    assert_eq!(drain(&log), ["a:detach"]);
    assert!(stage.get("b").is_some());
    assert!(stage.get("a").is_none());
}

#[test]
fn step_updates_in_insertion_order() {
    let log = Log::default();
    let mut stage = Stage::new(Canvas::square(4), Theme::light());
    stage.add(Recorder::boxed("late", 5, Rgb8::new(1, 1, 1), &log));
    stage.add(Recorder::boxed("early", -5, Rgb8::new(2, 2, 2), &log));
    drain(&log);

    stage.step(Duration::from_millis(16)).unwrap();
    assert_eq!(drain(&log), ["late:update", "early:update"]);
}

#[test]
fn step_stops_at_first_error() {
    let log = Log::default();
    let mut stage = Stage::new(Canvas::square(4), Theme::light());
    stage.add(Box::new(Recorder {
        tag: "bad",
        z: 0,
        color: Rgb8::new(0, 0, 0),
        log: Arc::clone(&log),
        fail_update: true,
        max_width: u32::MAX,
    }));
    stage.add(Recorder::boxed("good", 0, Rgb8::new(0, 0, 0), &log));
    drain(&log);

    assert!(stage.step(Duration::from_millis(16)).is_err());
    assert_eq!(drain(&log), ["bad:update"]);
}

#[test]
fn render_frame_clears_to_background_and_draws_by_z_index() {
    let log = Log::default();
    let mut stage = Stage::new(Canvas::square(4), Theme::dark());
    stage.add(Recorder::boxed("top", 10, Rgb8::new(9, 9, 9), &log));
    stage.add(Recorder::boxed("bottom", -1, Rgb8::new(3, 3, 3), &log));
    drain(&log);

    let frame = stage.render_frame();
    assert_eq!(drain(&log), ["bottom:render", "top:render"]);
    assert_eq!(frame.pixel(0, 0), Some([9, 9, 9, 255]));
    let bg = Theme::dark().background;
    assert_eq!(frame.pixel(3, 3), Some([bg.r, bg.g, bg.b, 255]));
}

#[test]
fn resize_and_theme_are_forwarded_only_on_change() {
    let log = Log::default();
    let mut stage = Stage::new(Canvas::square(4), Theme::light());
    stage.add(Recorder::boxed("a", 0, Rgb8::new(0, 0, 0), &log));
    drain(&log);

    stage.resize(Canvas::square(4)).unwrap();
    stage.set_theme(Theme::light()).unwrap();
    assert!(drain(&log).is_empty());

    stage.resize(Canvas::new(8, 6)).unwrap();
    stage.set_theme(Theme::dark()).unwrap();
    assert_eq!(drain(&log), ["a:resize 8x6", "a:theme dark"]);
    assert_eq!(stage.canvas(), Canvas::new(8, 6));
    assert_eq!(stage.render_frame().width(), 8);
}

#[test]
fn failed_resize_restores_entities_already_resized() {
    let log = Log::default();
    let mut stage = Stage::new(Canvas::square(4), Theme::light());
    stage.add(Recorder::boxed("a", 0, Rgb8::new(0, 0, 0), &log));
    stage.add(Box::new(Recorder {
        tag: "narrow",
        z: 0,
        color: Rgb8::new(0, 0, 0),
        log: Arc::clone(&log),
        fail_update: false,
        max_width: 6,
    }));
    stage.add(Recorder::boxed("c", 0, Rgb8::new(0, 0, 0), &log));
    drain(&log);

    assert!(stage.resize(Canvas::new(8, 4)).is_err());
    assert_eq!(drain(&log), ["a:resize 8x4", "narrow:resize 8x4", "a:resize 4x4"]);
    assert_eq!(stage.canvas(), Canvas::square(4));

    stage.resize(Canvas::new(6, 4)).unwrap();
    assert_eq!(stage.canvas(), Canvas::new(6, 4));
}
