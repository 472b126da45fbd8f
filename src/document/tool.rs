use log::*;
use thiserror::Error;

use crate::document::Document;
use crate::document::grid::Grid;
use crate::document::model::*;

/// Current editor mode, checked by the normal event dispatcher on every
/// pointer event. Delete mode is a state here, not a nested event loop.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Draw(DrawState),
    /// Armed delete mode, with the topmost path under the pointer (if any)
    /// as the removal candidate.
    Delete(Option<usize>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawState {
    Default,
    DragVertex { path :usize, segment :usize, vertex :usize },
}

/// Transient interaction state. Never persisted; only committed paths are
/// serialized.
#[derive(Debug)]
pub struct Tool {
    pub action :Action,
    /// Vertices of the segment being entered, 0..=3 between events.
    pub pending :Vec<Pt>,
    /// When set, the next committed segment extends the last path instead
    /// of starting a new one.
    pub append_segment :bool,
    /// Grid vertex under the pointer, tracked for the drawing surface.
    pub hover :Option<Pt>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("committing a segment requires 4 pending vertices, have {have}")]
    IncompleteSegment { have :usize },
}

impl Tool {
    pub fn new() -> Self {
        Tool {
            action: Action::Draw(DrawState::Default),
            pending: Vec::new(),
            append_segment: false,
            hover: None,
        }
    }
}

impl Document {
    pub fn pointer_down(&mut self, x :f64, y :f64) {
        if let Action::Delete(candidate) = self.tool.action {
            if let Some(idx) = candidate {
                if let Some(path) = self.model.delete_path(idx) {
                    info!("Deleted {} path at index {}.", path.kind.name(), idx);
                }
            }
            self.tool.action = Action::Draw(DrawState::Default);
            return;
        }

        let v = self.grid.vertex_at(x, y);
        if let Some((path, segment, vertex)) = find_vertex(&self.model, v) {
            // Down on an existing vertex starts a drag; nothing is added.
            self.tool.action = Action::Draw(DrawState::DragVertex { path, segment, vertex });
        } else {
            self.tool.pending.push(v);
            if self.tool.pending.len() == 4 {
                // Auto-commit: the 4th vertex completes the segment and
                // becomes the start of the next one.
                let vertices = std::mem::replace(&mut self.tool.pending, Vec::new());
                let last = vertices[3];
                self.commit_segment(vertices);
                self.tool.pending.push(last);
                self.tool.append_segment = true;
            }
        }
    }

    pub fn pointer_drag(&mut self, x :f64, y :f64) {
        if let Action::Draw(DrawState::DragVertex { path, segment, vertex }) = self.tool.action {
            let v = self.grid.vertex_at(x, y);
            if let Some(target) = self.model.paths.get_mut(path)
                .and_then(|p| p.segments.get_mut(segment))
                .and_then(|s| s.vertex_mut(vertex)) {
                *target = v;
            }
        }
    }

    /// Release always clears the drag target.
    pub fn pointer_up(&mut self) {
        if let Action::Draw(DrawState::DragVertex { .. }) = self.tool.action {
            self.tool.action = Action::Draw(DrawState::Default);
        }
    }

    pub fn pointer_move(&mut self, x :f64, y :f64) {
        match self.tool.action {
            Action::Delete(_) => {
                let mut candidate = None;
                for (i, path) in self.model.paths.iter().enumerate() {
                    if hit_path(path, &self.grid, x, y) {
                        // last-drawn path wins
                        candidate = Some(i);
                    }
                }
                self.tool.action = Action::Delete(candidate);
            },
            Action::Draw(_) => {
                self.tool.hover = Some(self.grid.vertex_at(x, y));
            },
        }
    }

    /// Commits the pending buffer as a full 4-vertex segment and continues
    /// drawing from its last vertex.
    pub fn add_segment(&mut self) -> Result<(), EditError> {
        if self.tool.pending.len() != 4 {
            return Err(EditError::IncompleteSegment { have: self.tool.pending.len() });
        }
        let vertices = std::mem::replace(&mut self.tool.pending, Vec::new());
        let last = vertices[3];
        self.commit_segment(vertices);
        self.tool.pending.push(last);
        self.tool.append_segment = true;
        Ok(())
    }

    /// Commits whatever is pending as a final segment and ends the current
    /// path. A buffer too short to form a segment is just discarded.
    pub fn stop_editing(&mut self) {
        let vertices = std::mem::replace(&mut self.tool.pending, Vec::new());
        if vertices.len() >= 2 {
            self.commit_segment(vertices);
        } else if !vertices.is_empty() {
            debug!("Discarding {} pending vertex without a segment.", vertices.len());
        }
        self.tool.append_segment = false;
    }

    pub fn arm_delete(&mut self) {
        self.tool.action = Action::Delete(None);
    }

    pub fn cancel_delete(&mut self) {
        if let Action::Delete(_) = self.tool.action {
            self.tool.action = Action::Draw(DrawState::Default);
        }
    }

    fn commit_segment(&mut self, vertices :Vec<Pt>) {
        let seg = match Segment::new(vertices) {
            Some(s) => s,
            None => return,
        };
        match (self.tool.append_segment, self.model.paths.last_mut()) {
            (true, Some(last)) => last.segments.push(seg),
            _ => self.model.paths.push(Path {
                kind: self.path_type,
                color: random_color(),
                segments: vec![seg],
            }),
        }
    }
}

/// Exact-equality scan over every vertex of every path. Later matches win,
/// same order the old editor scanned in.
pub fn find_vertex(model :&Model, v :Pt) -> Option<(usize,usize,usize)> {
    let mut found = None;
    for (i, path) in model.paths.iter().enumerate() {
        for (j, segment) in path.segments.iter().enumerate() {
            for (k, vertex) in segment.vertices().iter().enumerate() {
                if *vertex == v {
                    found = Some((i,j,k));
                }
            }
        }
    }
    found
}

/// True when the pixel position lies within the path's stroked outline.
/// Curves are flattened by sampling before the distance test.
pub fn hit_path(path :&Path, grid :&Grid, x :f64, y :f64) -> bool {
    let half_width = path.kind.stroke_width() / 2.0;
    for segment in path.segments.iter() {
        let pts = flatten(segment, grid);
        for (p1,p2) in pts.iter().zip(pts.iter().skip(1)) {
            let (d2, _t) = dist_to_line_sqr((x,y), *p1, *p2);
            if d2 <= half_width * half_width {
                return true;
            }
        }
    }
    false
}

const FLATTEN_STEPS :usize = 16;

/// Pixel polyline for a segment: a line stays two points, curves are
/// sampled as cubics the way the drawing surface renders them (3 vertices
/// use the single control point twice).
fn flatten(segment :&Segment, grid :&Grid) -> Vec<(f64,f64)> {
    let p :Vec<(f64,f64)> = segment.vertices().iter()
        .map(|v| grid.point_for_vertex(*v)).collect();
    match p.len() {
        2 => vec![p[0], p[1]],
        3 => sample_cubic(p[0], p[2], p[2], p[1]),
        4 => sample_cubic(p[0], p[2], p[3], p[1]),
        _ => Vec::new(),
    }
}

fn sample_cubic(p0 :(f64,f64), c1 :(f64,f64), c2 :(f64,f64), p1 :(f64,f64)) -> Vec<(f64,f64)> {
    (0..=FLATTEN_STEPS).map(|i| {
        let t = i as f64 / FLATTEN_STEPS as f64;
        let u = 1.0 - t;
        let b = |a :f64, b :f64, c :f64, d :f64| {
            u*u*u*a + 3.0*u*u*t*b + 3.0*u*t*t*c + t*t*t*d
        };
        (b(p0.0, c1.0, c2.0, p1.0), b(p0.1, c1.1, c2.1, p1.1))
    }).collect()
}

fn project_to_line(p :(f64,f64), a :(f64,f64), b :(f64,f64)) -> ((f64,f64), f64) {
    let ab = (b.0 - a.0, b.1 - a.1);
    let ap = (p.0 - a.0, p.1 - a.1);
    let len2 = ab.0*ab.0 + ab.1*ab.1;
    let t = if len2 == 0.0 { 0.0 } else {
        ((ap.0*ab.0 + ap.1*ab.1) / len2).max(0.0).min(1.0)
    };
    ((a.0 + t*ab.0, a.1 + t*ab.1), t)
}

fn dist_to_line_sqr(p0 :(f64,f64), a :(f64,f64), b :(f64,f64)) -> (f64, f64) {
    let (p, t) = project_to_line(p0, a, b);
    let d = (p.0 - p0.0, p.1 - p0.1);
    (d.0*d.0 + d.1*d.1, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use matches::assert_matches;

    fn doc() -> Document {
        // iPhone 4/4S preset: 480x320, tiles 24x32
        Document::empty(&Config::default())
    }

    fn click_vertex(doc :&mut Document, v :Pt) {
        let (x,y) = doc.grid.point_for_vertex(v);
        doc.pointer_down(x, y);
    }

    #[test]
    fn four_clicks_auto_commit_one_segment() {
        let mut d = doc();
        for v in &[Pt{x:3,y:3}, Pt{x:4,y:4}, Pt{x:5,y:3}, Pt{x:6,y:4}] {
            click_vertex(&mut d, *v);
        }
        assert_eq!(d.model.paths.len(), 1);
        assert_eq!(d.model.paths[0].segments.len(), 1);
        assert_eq!(d.model.paths[0].segments[0].vertices().len(), 4);
        // the 4th vertex starts the next segment
        assert_eq!(d.tool.pending, vec![Pt{x:6,y:4}]);
        assert!(d.tool.append_segment);
    }

    #[test]
    fn next_auto_commit_appends_to_same_path() {
        let mut d = doc();
        for v in &[Pt{x:3,y:3}, Pt{x:4,y:4}, Pt{x:5,y:3}, Pt{x:6,y:4},
                   Pt{x:7,y:3}, Pt{x:8,y:4}, Pt{x:9,y:3}] {
            click_vertex(&mut d, *v);
        }
        assert_eq!(d.model.paths.len(), 1);
        assert_eq!(d.model.paths[0].segments.len(), 2);
        assert_eq!(d.tool.pending, vec![Pt{x:9,y:3}]);
    }

    #[test]
    fn stop_editing_commits_short_segment_and_ends_path() {
        let mut d = doc();
        click_vertex(&mut d, Pt{x:3,y:3});
        click_vertex(&mut d, Pt{x:6,y:6});
        d.stop_editing();
        assert_eq!(d.model.paths.len(), 1);
        assert_eq!(d.model.paths[0].segments[0].vertices().len(), 2);
        assert!(d.tool.pending.is_empty());
        assert!(!d.tool.append_segment);

        // next committed segment starts a new path
        click_vertex(&mut d, Pt{x:10,y:3});
        click_vertex(&mut d, Pt{x:12,y:3});
        d.stop_editing();
        assert_eq!(d.model.paths.len(), 2);
    }

    #[test]
    fn stop_editing_discards_single_pending_vertex() {
        let mut d = doc();
        click_vertex(&mut d, Pt{x:3,y:3});
        d.stop_editing();
        assert!(d.model.paths.is_empty());
        assert!(d.tool.pending.is_empty());
    }

    #[test]
    fn add_segment_requires_full_buffer() {
        let mut d = doc();
        click_vertex(&mut d, Pt{x:3,y:3});
        click_vertex(&mut d, Pt{x:4,y:4});
        assert_eq!(d.add_segment(), Err(EditError::IncompleteSegment { have: 2 }));
        assert!(d.model.paths.is_empty());
    }

    #[test]
    fn down_on_existing_vertex_starts_drag() {
        let mut d = doc();
        for v in &[Pt{x:3,y:3}, Pt{x:4,y:4}, Pt{x:5,y:3}, Pt{x:6,y:4}] {
            click_vertex(&mut d, *v);
        }
        d.stop_editing();

        click_vertex(&mut d, Pt{x:4,y:4});
        assert_matches!(d.tool.action,
            Action::Draw(DrawState::DragVertex { path: 0, segment: 0, vertex: 1 }));
        // no vertex was added
        assert!(d.tool.pending.is_empty());

        let (x,y) = d.grid.point_for_vertex(Pt{x:8,y:8});
        d.pointer_drag(x, y);
        assert_eq!(d.model.paths[0].segments[0].vertices()[1], Pt{x:8,y:8});

        d.pointer_up();
        assert_matches!(d.tool.action, Action::Draw(DrawState::Default));
    }

    #[test]
    fn selected_type_and_palette_color_fixed_at_creation() {
        let mut d = doc();
        d.path_type = PathType::Walk;
        click_vertex(&mut d, Pt{x:3,y:3});
        click_vertex(&mut d, Pt{x:6,y:3});
        d.stop_editing();
        assert_eq!(d.model.paths[0].kind, PathType::Walk);
        assert!(PALETTE.contains(&d.model.paths[0].color));

        // changing the selector later does not retag existing paths
        d.path_type = PathType::Rail;
        assert_eq!(d.model.paths[0].kind, PathType::Walk);
    }

    #[test]
    fn delete_mode_hover_and_click() {
        let mut d = doc();
        // horizontal road from (3,3) to (6,3): pixels (72,96)..(144,96)
        click_vertex(&mut d, Pt{x:3,y:3});
        click_vertex(&mut d, Pt{x:6,y:3});
        d.stop_editing();

        d.arm_delete();
        assert_matches!(d.tool.action, Action::Delete(None));

        // within half the road stroke width (25px) of the chord
        d.pointer_move(100.0, 110.0);
        assert_matches!(d.tool.action, Action::Delete(Some(0)));

        // far away: candidate cleared
        d.pointer_move(100.0, 300.0);
        assert_matches!(d.tool.action, Action::Delete(None));

        d.pointer_move(100.0, 96.0);
        d.pointer_down(100.0, 96.0);
        assert!(d.model.paths.is_empty());
        assert_matches!(d.tool.action, Action::Draw(DrawState::Default));
    }

    #[test]
    fn delete_click_without_candidate_just_leaves_mode() {
        let mut d = doc();
        click_vertex(&mut d, Pt{x:3,y:3});
        click_vertex(&mut d, Pt{x:6,y:3});
        d.stop_editing();

        d.arm_delete();
        d.pointer_down(400.0, 400.0);
        assert_eq!(d.model.paths.len(), 1);
        assert_matches!(d.tool.action, Action::Draw(DrawState::Default));
    }

    #[test]
    fn delete_hover_topmost_path_wins() {
        let mut d = doc();
        // two roads one row apart; clicking the first path's own vertices
        // again would start a drag, so the second uses fresh grid points
        // whose 25px half stroke still overlaps the first
        click_vertex(&mut d, Pt{x:3,y:3});
        click_vertex(&mut d, Pt{x:6,y:3});
        d.stop_editing();
        click_vertex(&mut d, Pt{x:3,y:4});
        click_vertex(&mut d, Pt{x:6,y:4});
        d.stop_editing();
        assert_eq!(d.model.paths.len(), 2);

        d.arm_delete();
        // chords at y=96 and y=128; (100,112) is 16px from both
        d.pointer_move(100.0, 112.0);
        assert_matches!(d.tool.action, Action::Delete(Some(1)));
    }

    #[test]
    fn narrow_walk_hit_test_uses_its_own_width() {
        let mut d = doc();
        d.path_type = PathType::Walk;
        click_vertex(&mut d, Pt{x:3,y:3});
        click_vertex(&mut d, Pt{x:6,y:3});
        d.stop_editing();

        d.arm_delete();
        // 10px off the chord: outside walk's 7.5px half width
        d.pointer_move(100.0, 106.0);
        assert_matches!(d.tool.action, Action::Delete(None));
        d.pointer_move(100.0, 101.0);
        assert_matches!(d.tool.action, Action::Delete(Some(0)));
    }

    #[test]
    fn curved_segment_hit_test_follows_the_curve() {
        let mut d = doc();
        // 3-vertex curve: start (3,3), end (9,3), control (6,6) used twice.
        // The curve bows toward the control point, away from the chord.
        for v in &[Pt{x:3,y:3}, Pt{x:9,y:3}, Pt{x:6,y:6}] {
            click_vertex(&mut d, *v);
        }
        d.stop_editing();
        assert_eq!(d.model.paths[0].segments[0].vertices().len(), 3);

        d.arm_delete();
        // midpoint of the cubic at t=0.5: y = 96 + 0.75*(192-96) = 168
        d.pointer_move(144.0, 168.0);
        assert_matches!(d.tool.action, Action::Delete(Some(0)));
    }

    #[test]
    fn hover_tracked_in_draw_mode() {
        let mut d = doc();
        d.pointer_move(300.0, 150.0);
        assert_eq!(d.tool.hover, Some(Pt{x:12,y:5}));
    }
}
