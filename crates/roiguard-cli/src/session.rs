// Author: Dustin Pilgrim
// License: MIT

use eventline::{debug, info, warn};

use roiguard::{
    BoundsProvider, Canvas, ClickTarget, DrawGesture, GuardedRoi, Limits, Point, RoiFactory,
    RoiOptions,
};

use crate::script::{Command, Line, ScriptError};

pub struct Session {
    canvas: Canvas,
    factory: RoiFactory,
    /// Successful creations, in order; script references are 1-based.
    rois: Vec<GuardedRoi>,
}

impl Session {
    /// Default canvas is 100 x 100 until a `bounds` line says otherwise.
    pub fn new(factory: RoiFactory) -> Self {
        Self {
            canvas: Canvas::new(Limits::new(0.0, 100.0), Limits::new(0.0, 100.0)),
            factory,
            rois: Vec::new(),
        }
    }

    pub fn apply(&mut self, line: &Line) -> Result<Vec<String>, ScriptError> {
        let n = line.number;
        debug!("line {n}: {:?}", line.command);

        let out = match &line.command {
            Command::Bounds { x, y } => {
                if !(x.0 < x.1 && y.0 < y.1) {
                    return Err(ScriptError::Rejected {
                        line: n,
                        message: "bounds must satisfy min < max".into(),
                    });
                }
                self.canvas
                    .set_limits(Limits::new(x.0, x.1), Limits::new(y.0, y.1));
                Vec::new()
            }

            Command::Image { name } => {
                let id = self.canvas.add_image(name);
                let label = name.clone();
                self.canvas.set_click_handler(id, move || {
                    info!("image {label} clicked");
                    println!("image {label}: clicked");
                    Ok(())
                });
                Vec::new()
            }

            Command::Create(p) => {
                self.canvas.queue_draw(DrawGesture::Rect(*p));
                self.create()
            }

            Command::CreateCancel => {
                self.canvas.queue_draw(DrawGesture::Cancel);
                self.create()
            }

            Command::Drag { roi, to } => {
                let g = self.guarded(n, *roi)?;
                let applied = g.roi().drag_to(*to).map_err(|e| rejected(n, e))?;
                vec![format!("roi {roi} dragged to {}", fmt_rect(&applied))]
            }

            Command::Move { roi, to } => {
                let g = self.guarded(n, *roi)?;
                g.roi().set_position(*to).map_err(|e| rejected(n, e))?;
                vec![format!("roi {roi} moved to {}", fmt_rect(to))]
            }

            Command::Click { roi, button } => {
                let g = self.guarded(n, *roi)?;
                let p = g.position();
                let centre = Point::new(p.x + p.w / 2.0, p.y + p.h / 2.0);
                let target = self.canvas.click_at(centre, *button);
                vec![format!("click {button:?} on roi {roi}: {}", fmt_target(target))]
            }

            Command::Activate { roi } => {
                let g = self.guarded(n, *roi)?;
                self.canvas
                    .activate_affordance(g.affordance())
                    .map_err(|e| rejected(n, e))?;
                vec![format!("roi {roi} deleted via marker")]
            }

            Command::Delete { roi } => {
                let g = self.guarded(n, *roi)?;
                g.roi().delete();
                vec![format!("roi {roi} deleted directly")]
            }

            Command::Show => self.describe(),
        };

        Ok(out)
    }

    fn create(&mut self) -> Vec<String> {
        match self.factory.try_create(&self.canvas, RoiOptions::interactive()) {
            Ok(Some(g)) => {
                let line = format!("roi {} created at {}", self.rois.len() + 1, fmt_rect(&g.position()));
                self.rois.push(g);
                vec![line]
            }
            Ok(None) => vec!["creation cancelled".to_string()],
            Err(e) => {
                warn!("roi creation rejected: {e}");
                vec![format!("creation rejected: {e}")]
            }
        }
    }

    fn guarded(&self, line: usize, roi: usize) -> Result<&GuardedRoi, ScriptError> {
        let g = self
            .rois
            .get(roi - 1)
            .ok_or(ScriptError::NoSuchRoi { line, roi })?;
        if !g.is_alive() {
            return Err(ScriptError::Rejected {
                line,
                message: format!("roi {roi} has been deleted"),
            });
        }
        Ok(g)
    }

    pub fn describe(&self) -> Vec<String> {
        let b = self.canvas.bounds();
        let mut out = vec![format!(
            "canvas x=[{}, {}] y=[{}, {}]",
            b.x.min, b.x.max, b.y.min, b.y.max
        )];

        for (i, g) in self.rois.iter().enumerate() {
            let n = i + 1;
            if !g.is_alive() {
                out.push(format!("roi {n}: deleted"));
                continue;
            }
            let marker = match self.canvas.affordance(g.affordance()) {
                Some(rec) => format!(
                    "marker ({}, {}) {}",
                    rec.anchor.x,
                    rec.anchor.y,
                    if rec.visible { "visible" } else { "hidden" }
                ),
                None => "no marker".to_string(),
            };
            out.push(format!("roi {n}: {} {marker}", fmt_rect(&g.position())));
        }

        let tag = &self.factory.settings().tag;
        let key = &self.factory.settings().metadata_key;
        for p in self.canvas.cached_roi_positions(tag, key) {
            out.push(format!("cached {}", fmt_rect(&p)));
        }
        out
    }
}

fn rejected(line: usize, e: impl std::fmt::Display) -> ScriptError {
    ScriptError::Rejected {
        line,
        message: e.to_string(),
    }
}

fn fmt_rect(p: &roiguard::Position) -> String {
    format!("({}, {}, {}, {})", p.x, p.y, p.w, p.h)
}

fn fmt_target(t: ClickTarget) -> String {
    match t {
        ClickTarget::Affordance(id) => format!("{id}"),
        ClickTarget::Roi(id, outcome) => format!("{id} fill ({outcome:?})"),
        ClickTarget::Content(id) => format!("{id}"),
        ClickTarget::Nothing => "nothing".to_string(),
    }
}

#[cfg(test)]
impl Session {
    fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn run(&mut self, lines: &[Line]) -> Result<Vec<String>, ScriptError> {
        let mut out = Vec::new();
        for line in lines {
            out.extend(self.apply(line)?);
        }
        Ok(out)
    }
}
