//! World-space pose snapshots.
//!
//! A [`PoseSnapshot`] owns all of its data, so it can be sent to a renderer
//! on another thread while the body keeps ticking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::body::CatBody;
use crate::geometry::Point;
use crate::limb::LimbId;
use crate::state::BehaviorState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPose {
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Heading in degrees.
    pub heading: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadPose {
    pub position: Point,
    pub heading: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimbPose {
    pub base: Point,
    pub end: Point,
    pub mid: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TailLink {
    pub start: Point,
    pub end: Point,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseSnapshot {
    pub body: BodyPose,
    pub head: HeadPose,
    pub limbs: BTreeMap<LimbId, LimbPose>,
    pub tail: Vec<TailLink>,
    pub state: BehaviorState,
    pub blink: bool,
    pub ear_twitch: bool,
}

impl PoseSnapshot {
    /// Resolve the body's internal angles into world coordinates.
    pub fn capture(body: &CatBody) -> Self {
        let params = body.params();
        let origin = body.position();
        let heading = body.heading();

        let limbs = body
            .limbs()
            .iter()
            .map(|limb| {
                let base = origin.add(limb.base().rotated(heading));
                let reach = limb.end_position().sub(limb.base()).rotated(heading);
                let end = base.add(reach);
                let pose = LimbPose {
                    base,
                    end,
                    mid: base.midpoint(end),
                };
                (limb.id(), pose)
            })
            .collect();

        let mut tail = Vec::with_capacity(body.tail().segments().len());
        let mut start = origin;
        for segment in body.tail().segments() {
            let end = start.add(Point::polar(segment.angle, segment.length));
            tail.push(TailLink { start, end });
            start = end;
        }

        Self {
            body: BodyPose {
                position: origin,
                width: params.width,
                height: params.height,
                heading,
            },
            head: HeadPose {
                position: origin.add(Point::polar(heading, params.head_offset)),
                heading: body.head_angle(),
            },
            limbs,
            tail,
            state: body.state(),
            blink: body.blink_timer() < params.blink_duration,
            ear_twitch: body.ear_twitch_timer() < params.ear_twitch_duration,
        }
    }

    pub fn limb(&self, id: LimbId) -> Option<&LimbPose> {
        self.limbs.get(&id)
    }

    /// Tail as a polyline: every link start, then the tip.
    pub fn tail_polyline(&self) -> Vec<Point> {
        let mut points: Vec<Point> = self.tail.iter().map(|link| link.start).collect();
        if let Some(last) = self.tail.last() {
            points.push(last.end);
        }
        points
    }

    pub fn tail_tip(&self) -> Option<Point> {
        self.tail.last().map(|link| link.end)
    }
}
