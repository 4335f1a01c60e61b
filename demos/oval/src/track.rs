//! Shared demo circuit definition.
//!
//! A rounded-rectangle club circuit: two long straights joined by two short
//! ones through four identical 45 m, 90° bends.  The back straight is
//! narrower and the last bend has kerbs on its exit.

use rc_core::{TrackId, Vec2};
use rc_track::{CornerDef, PathTracer, SectorDef, Surface, TrackBuilder};

const LONG:   f32 = 260.0;
const SHORT:  f32 = 140.0;
const RADIUS: f32 = 45.0;

/// Build the circuit.  Corners and sectors are placed from the nominal
/// section lengths; the builder wraps anything past the spline's length.
pub fn build_circuit() -> TrackBuilder {
    let bend = RADIUS * std::f32::consts::FRAC_PI_2;

    let mut p = PathTracer::new(Vec2::ZERO, 0.0, 7.0, 4.0);
    p.straight(LONG)
        .arc(RADIUS, 90.0)
        .straight(SHORT)
        .arc(RADIUS, 90.0)
        .half_width(5.5)
        .straight(LONG)
        .half_width(7.0)
        .arc(RADIUS, 90.0)
        .straight(SHORT)
        .surface(Surface::Kerb)
        .arc(RADIUS, 90.0)
        .surface(Surface::Asphalt);

    let mut b = TrackBuilder::new(TrackId(1), "harbour loop");
    b.add_control_points(p.finish());

    // Section start distances along the centerline.
    let mut s = 0.0;
    for (i, straight) in [LONG, SHORT, LONG, SHORT].into_iter().enumerate() {
        s += straight;
        b.add_corner(CornerDef::new(format!("T{}", i + 1), s, s + 0.5 * bend, s + bend));
        s += bend;
    }
    let half = LONG + SHORT + 2.0 * bend;
    b.add_sector(SectorDef::new("S1", 0.0, half));
    b.add_sector(SectorDef::new("S2", half, 0.0));
    b
}
