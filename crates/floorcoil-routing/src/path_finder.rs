//! Wall-following path engine.
//!
//! The engine runs in two phases. Walking forward, it spirals inward along
//! the boundary, keeping half a spacing from the walls and a full spacing
//! from pipe it has already laid. Once it cannot advance any further it may
//! walk backward, returning between the runs at half the clearance, until no
//! wall is left to follow.
//!
//! Every step appends one point to the output and inserts the new run into
//! the index, so later steps treat it as a wall.

use crate::cancel::CancellationToken;
use crate::params::{ProbeTuning, RoutingParameters};
use crate::probe::{consume_hit, Clearance, ForwardProbe, Hit, Turn, FORWARD_PROBES};
use crate::turtle::Turtle;
use floorcoil_core::{Segment, Vec2, POINT_TOLERANCE};
use floorcoil_designer::SpatialIndex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Probe query tolerance, relative to the spacing.
const QUERY_TOLERANCE: f64 = 0.005;
/// Envelope padding used for endpoint lookups.
const ENDPOINT_QUERY_TOLERANCE: f64 = 0.001;

/// Engine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteState {
    Forward,
    Backward,
    Done,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    /// No further step was possible.
    Completed,
    /// The iteration cap was reached; the path is partial.
    StoppedByIterationCap,
    /// The cancellation token fired.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackwardStep {
    Continue,
    /// The step was drawn but nothing is left to follow.
    Finished,
    /// Too little room to draw the step.
    Exhausted,
}

/// Outcome of resolving a forward step.
#[derive(Debug, Clone, Copy)]
struct Resolved {
    t: f64,
    normal: Vec2,
    turn: Turn,
    wall: usize,
}

/// Inputs shared by the forward probes.
#[derive(Debug, Clone, Copy)]
struct StepContext {
    /// Wall the step is constrained by.
    next: usize,
    seg: Segment,
    normal: Vec2,
    side: f64,
    /// Origin of the clearance line.
    clearance_origin: Vec2,
    t: f64,
}

/// Incremental router over a pre-loaded segment index.
#[derive(Debug)]
pub struct PathFinder {
    index: SpatialIndex,
    turtle: Turtle,
    spacing: f64,
    allow_backward: bool,
    tuning: ProbeTuning,
    last: Option<usize>,
    latest_path: Option<usize>,
    state: RouteState,
    points: Vec<Vec2>,
    iterations: usize,
    max_iterations: usize,
    status: Option<RouteStatus>,
    cancel: Option<CancellationToken>,
}

impl PathFinder {
    /// Starts a run at `start` heading along `heading` (whose length should
    /// equal the spacing). `index` must already hold the region edges.
    pub fn new(
        index: SpatialIndex,
        start: Vec2,
        heading: Vec2,
        params: &RoutingParameters,
        max_iterations: usize,
    ) -> Self {
        Self {
            index,
            turtle: Turtle::new(start, heading, params.handedness),
            spacing: params.spacing,
            allow_backward: params.allow_backward,
            tuning: params.tuning,
            last: None,
            latest_path: None,
            state: RouteState::Forward,
            points: vec![start],
            iterations: 0,
            max_iterations,
            status: None,
            cancel: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn state(&self) -> RouteState {
        self.state
    }

    /// Final status, `None` while the run is still going.
    pub fn status(&self) -> Option<RouteStatus> {
        self.status
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Vec2> {
        self.points
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn turtle(&self) -> &Turtle {
        &self.turtle
    }

    /// Runs until done and returns the final status.
    pub fn run(&mut self) -> RouteStatus {
        while self.advance() {}
        self.status.unwrap_or(RouteStatus::Completed)
    }

    /// Performs one step. Returns `false` once the run has ended.
    pub fn advance(&mut self) -> bool {
        if self.state == RouteState::Done {
            return false;
        }
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            debug!("Route cancelled after {} iterations", self.iterations);
            return self.finish(RouteStatus::Cancelled);
        }

        // Both phases share the cap, and no step runs once it is spent.
        if self.iterations >= self.max_iterations {
            return self.stop_at_cap();
        }
        self.iterations += 1;

        match self.state {
            RouteState::Forward => {
                if !self.forward() {
                    if !self.allow_backward {
                        return self.finish(RouteStatus::Completed);
                    }
                    debug!(
                        "Forward walk blocked at iteration {}, walking back",
                        self.iterations
                    );
                    self.state = RouteState::Backward;
                }
            }
            RouteState::Backward => {
                let step = self.backward();
                if step != BackwardStep::Continue {
                    debug!("Backward walk ended ({:?})", step);
                    return self.finish(RouteStatus::Completed);
                }
            }
            RouteState::Done => return false,
        }
        true
    }

    fn finish(&mut self, status: RouteStatus) -> bool {
        self.state = RouteState::Done;
        self.status = Some(status);
        false
    }

    fn stop_at_cap(&mut self) -> bool {
        warn!(
            "Route stopped at the iteration cap ({}), path is partial",
            self.max_iterations
        );
        self.finish(RouteStatus::StoppedByIterationCap)
    }

    fn forward(&mut self) -> bool {
        let v = self.turtle.heading();
        if self.last.is_none() {
            self.last = self.first_hit(&self.turtle.right()).map(|h| h.index);
        }
        let Some(wall) = self.last.or_else(|| self.index.last_index()) else {
            return false;
        };

        let (_, p0) = self.turtle.front3().farthest_point(&self.index[wall]);
        let Some(next) = self.touching(p0).or_else(|| self.index.last_index()) else {
            return false;
        };
        let seg = self.index[next];

        let (d, _) = Segment::new(p0, v).signed_distance(far_end(&seg, p0));
        let (turn, side) = if d * self.turtle.up() > 0.0 {
            (Turn::Left, -1.0)
        } else {
            (Turn::Right, 1.0)
        };

        let (normal, _) = self.normal(&seg);
        let origin = seg.p() + normal * (side * self.clearance(next, Clearance::FORWARD));
        let t = match self
            .turtle
            .front()
            .crossing_param(&Segment::new(origin, seg.v()))
        {
            Some(t) if t != 0.0 => t,
            _ => return false,
        };

        let ctx = StepContext {
            next,
            seg,
            normal,
            side,
            clearance_origin: origin,
            t,
        };
        let mut resolved = Resolved {
            t,
            normal,
            turn,
            wall: next,
        };
        for probe in FORWARD_PROBES {
            if !probe.applies(turn) {
                continue;
            }
            if let Some(found) = self.run_probe(probe, &ctx) {
                debug!("{:?} constrains step to t={:.4}", probe, found.t);
                resolved = found;
                break;
            }
        }

        self.last = Some(resolved.wall);
        if resolved.t < self.tuning.min_advance {
            self.cap_turn();
            return false;
        }

        self.turtle.move_by(v * resolved.t);
        self.turtle.rotate_to(resolved.normal);
        self.emit();
        self.apply_turn(resolved.turn);
        true
    }

    /// Closes the spiral with a half-spacing U-turn.
    fn cap_turn(&mut self) {
        if let Some(latest) = self.index.last_index() {
            let direction = self.index[latest].v().normalized();
            if direction != Vec2::ZERO {
                self.turtle.rotate_to(direction * self.spacing);
            }
        }
        self.turtle.turn_right();
        let heading = self.turtle.heading();
        self.turtle.move_by(heading * 0.5);
        self.emit();
        self.turtle.turn_right();
        self.last = self.first_hit(&self.turtle.left()).map(|h| h.index);
    }

    fn run_probe(&self, probe: ForwardProbe, ctx: &StepContext) -> Option<Resolved> {
        match probe {
            ForwardProbe::BoundaryObstacle => {
                self.lateral_probe(probe, ctx, self.tuning.boundary_probe_offset)
            }
            ForwardProbe::PipeObstacle => self.lateral_probe(probe, ctx, self.tuning.pipe_probe_offset),
            ForwardProbe::FrontHit => self.front_probe(ctx),
            ForwardProbe::RightObstacle => {
                self.right_probe(probe, ctx, 0.5, self.tuning.right_boundary_limit)
            }
            ForwardProbe::RightPipe => self.right_probe(probe, ctx, 1.0, self.tuning.right_pipe_limit),
        }
    }

    /// Sweeps a probe parallel to the heading, `offset` spacings to the left,
    /// up to a guide line beyond the clearance line.
    fn lateral_probe(&self, probe: ForwardProbe, ctx: &StepContext, offset: f64) -> Option<Resolved> {
        let v = self.turtle.heading();
        let start = self.turtle.position() + self.turtle.left().v() * offset;
        let guide = Segment::new(
            ctx.clearance_origin + ctx.normal * (ctx.side * probe.guide_extra()),
            ctx.seg.v(),
        );
        let mut reach = Segment::new(start, v).crossing_param(&guide).unwrap_or(0.0);
        if reach < 0.0 {
            reach = 1.0 - reach;
        }

        let (t, normal, hit) = self.obstacle(&Segment::new(start, v * reach))?;
        let kind_matches = probe.wants_boundary() == Some(self.index.is_boundary(hit));
        (kind_matches && t < ctx.t).then_some(Resolved {
            t,
            normal,
            turn: Turn::Left,
            wall: hit,
        })
    }

    fn front_probe(&self, ctx: &StepContext) -> Option<Resolved> {
        let v = self.turtle.heading();
        let reach = Segment::new(self.turtle.position(), v * (ctx.t + self.tuning.front_reach));
        let hit = self.first_hit(&reach)?;

        let (wall, seg, normal, side) = if hit.index == ctx.next {
            (ctx.next, ctx.seg, ctx.normal, ctx.side)
        } else {
            let seg = self.index[hit.index];
            (hit.index, seg, self.normal(&seg).0, -1.0)
        };
        let origin = seg.p() + normal * (side * self.clearance(wall, Clearance::FORWARD));
        let t = self.front_crossing(origin, seg.v());
        Some(Resolved {
            t,
            normal,
            turn: Turn::Left,
            wall,
        })
    }

    /// While turning right, checks that the run on the right leaves enough
    /// room; if not, backs off that wall and turns left instead.
    fn right_probe(
        &self,
        probe: ForwardProbe,
        ctx: &StepContext,
        offset: f64,
        limit: f64,
    ) -> Option<Resolved> {
        let v = self.turtle.heading();
        let guide = Segment::new(ctx.seg.p() + ctx.normal * 0.5, ctx.seg.v());
        let start = self.turtle.position() + self.turtle.right().v() * offset;
        let t0 = Segment::new(start, v).crossing_param(&guide).unwrap_or(0.0);

        let hit = self.first_hit(&Segment::new(start + v * t0, v * 2.0))?;
        if probe.wants_boundary() != Some(self.index.is_boundary(hit.index)) {
            return None;
        }

        let (_, q) = self.turtle.front().nearest_point(&self.index[hit.index]);
        let (widest, normal) = self.widest(q);
        let wall = widest.or_else(|| self.index.last_index())?;
        let wall_seg = self.index[wall];
        if wall_seg.min_distance(&ctx.seg) >= limit * self.spacing {
            return None;
        }

        let t = self.front_crossing(wall_seg.p() - normal * probe.right_backoff(), wall_seg.v());
        Some(Resolved {
            t,
            normal,
            turn: Turn::Left,
            wall,
        })
    }

    /// Resolves the step against whatever `lateral` strikes first.
    fn obstacle(&self, lateral: &Segment) -> Option<(f64, Vec2, usize)> {
        let hit = self.first_hit(lateral)?;
        let (_, p) = self.turtle.front().nearest_point(&self.index[hit.index]);
        let (widest, normal) = self.widest(p);
        let wall = widest.or_else(|| self.index.last_index())?;
        let origin = p - normal * self.clearance(wall, Clearance::FORWARD);
        let t = self.front_crossing(origin, self.index[wall].v());
        Some((t, normal, hit.index))
    }

    fn backward(&mut self) -> BackwardStep {
        let v = self.turtle.heading();
        let Some(wall) = self.last.or_else(|| self.index.last_index()) else {
            return BackwardStep::Exhausted;
        };
        let wall_seg = self.index[wall];
        let (_, p0) = self.turtle.front3().farthest_point(&wall_seg);

        let mut turn = Turn::Right;
        let (t, normal, next, outcome) = match self.touching(p0) {
            None => {
                let (normal, _) = self.normal(&wall_seg);
                let t = self.turtle.front().param_of(p0);
                (t, normal, None, BackwardStep::Finished)
            }
            Some(mut next) => {
                let mut seg = self.index[next];
                let (d, _) = Segment::new(p0, v).signed_distance(far_end(&seg, p0));
                let mut side = -1.0;
                if d * self.turtle.up() > 0.0 {
                    turn = Turn::Left;
                    side = 1.0;
                }

                let (mut normal, _) = self.normal(&seg);
                let origin = seg.p() + normal * (side * self.clearance(next, Clearance::BACKWARD));
                let mut t = self.front_crossing(origin, seg.v());

                let along = Segment::new(self.turtle.position(), v * t);
                if let Some(hit) = self.first_hit(&along) {
                    next = hit.index;
                    seg = self.index[next];
                    normal = self.normal(&seg).0;
                    let origin = seg.p() - normal * self.clearance(next, Clearance::BACKWARD);
                    t = self.front_crossing(origin, seg.v());
                    turn = Turn::Right;
                } else {
                    // The way straight ahead is always treated as blocked, so
                    // the lateral clearance check below always runs.
                    let ahead = self.turtle.position() + v * t;
                    let lateral = match turn {
                        Turn::Left => self.turtle.left().v(),
                        Turn::Right => self.turtle.right().v(),
                    };
                    let probe = Segment::new(ahead, lateral * self.tuning.backward_probe);
                    if let Some(found) = self.retreat_clearance(&probe) {
                        (t, normal, next) = found;
                    }
                    if t.abs() < self.tuning.min_advance {
                        return BackwardStep::Exhausted;
                    }
                }
                (t, normal, Some(next), BackwardStep::Continue)
            }
        };

        self.last = next;
        self.turtle.move_by(v * t);
        self.turtle.rotate_to(normal);
        self.emit();
        self.apply_turn(turn);
        outcome
    }

    /// Distance to keep from whatever the backward lateral probe touches.
    fn retreat_clearance(&self, probe: &Segment) -> Option<(f64, Vec2, usize)> {
        let hit = self.first_hit(probe)?;
        let struck = self.index[hit.index];
        let (_, q) = self.turtle.front().nearest_point(&struck);
        let (widest, normal) = self.widest(q);
        let wall = widest.or_else(|| self.index.last_index())?;
        let wall_seg = self.index[wall];

        let cross = Segment::new(self.turtle.position(), normal * (-2.0 * struck.length()));
        let ot = wall_seg.crossing_param(&cross).unwrap_or(0.0);
        let side = if ot > 0.0 && ot < 1.0 { -1.0 } else { 1.0 };
        let origin = q - normal * (side * self.clearance(wall, Clearance::BACKWARD));
        let t = self.front_crossing(origin, wall_seg.v());
        Some((t, -normal, wall))
    }

    fn front_crossing(&self, origin: Vec2, direction: Vec2) -> f64 {
        self.turtle
            .front()
            .crossing_param(&Segment::new(origin, direction))
            .unwrap_or(0.0)
    }

    fn first_hit(&self, probe: &Segment) -> Option<Hit> {
        consume_hit(
            &self.index,
            probe,
            QUERY_TOLERANCE * self.spacing,
            self.latest_path,
        )
    }

    fn clearance(&self, segment: usize, clearance: Clearance) -> f64 {
        clearance.for_segment(&self.index, segment)
    }

    /// Normal of `seg` scaled to the spacing, flipped to face the heading,
    /// together with how well it aligns (`|n + f|`, in `[0, 2]`).
    fn normal(&self, seg: &Segment) -> (Vec2, f64) {
        let u = seg.v().normalized();
        let up = self.turtle.up();
        let mut n = Vec2::new(u.y * up, -u.x * up);
        let f = self.turtle.heading().normalized();
        let mut alignment = (n + f).length();
        if alignment < 1.0 {
            n = -n;
            alignment = (n + f).length();
        }
        (n * self.spacing, alignment)
    }

    /// Segment ending at `p` whose normal best matches the heading.
    fn widest(&self, p: Vec2) -> (Option<usize>, Vec2) {
        let mut best = None;
        let mut best_alignment = -1.0;
        let mut normal = self.turtle.heading();
        for i in self.index.query_point(p, ENDPOINT_QUERY_TOLERANCE) {
            let seg = self.index[i];
            if seg.has_endpoint(p, POINT_TOLERANCE) {
                let (n, alignment) = self.normal(&seg);
                if alignment > best_alignment {
                    best_alignment = alignment;
                    best = Some(i);
                    normal = n;
                }
            }
        }
        (best, normal)
    }

    /// First segment other than the followed wall that ends at `p`.
    fn touching(&self, p: Vec2) -> Option<usize> {
        self.index
            .query_point(p, ENDPOINT_QUERY_TOLERANCE)
            .into_iter()
            .find(|&i| Some(i) != self.last && self.index[i].has_endpoint(p, POINT_TOLERANCE))
    }

    fn emit(&mut self) {
        let to = self.turtle.position();
        let from = self.points.last().copied().unwrap_or(to);
        self.points.push(to);
        self.latest_path = Some(self.index.push_path(Segment::from_points(from, to)));
    }

    fn apply_turn(&mut self, turn: Turn) {
        match turn {
            Turn::Left => self.turtle.turn_left(),
            Turn::Right => self.turtle.turn_right(),
        }
    }
}

/// Endpoint of `seg` that is not `p`.
fn far_end(seg: &Segment, p: Vec2) -> Vec2 {
    if p.distance(seg.p()) < POINT_TOLERANCE {
        seg.end()
    } else {
        seg.p()
    }
}
