//! Builds a plane through three random points, then a point from three
//! random planes, and checks plane/point incidence both ways.
//!
//! ```text
//! cargo run --example plane_from_points
//! ```
//!
//! Incidence residuals print as `~0` when the constructions are consistent.

use rand::rngs::ThreadRng;
use rand::Rng;
use vectis::Vector3;

/// A plane in Hesse normal form: `dot(normal, p) == offset`.
#[derive(Debug, Clone, Copy)]
struct Plane {
    normal: Vector3,
    offset: f64,
}

impl Plane {
    /// The plane through three points, with normal `(b - a) x (c - a)`.
    ///
    /// Degenerate (collinear) points yield a non-finite normal, same as
    /// normalizing a zero vector.
    fn through(a: Vector3, b: Vector3, c: Vector3) -> Self {
        let normal = (b - a).cross(c - a).normalize();
        Self {
            normal,
            offset: normal.dot(a),
        }
    }

    fn random(rng: &mut ThreadRng) -> Self {
        Self {
            normal: Vector3::random(rng, -1.0, 1.0).normalize(),
            offset: rng.gen_range(-1.0..1.0),
        }
    }

    /// Signed incidence residual of a point against the plane equation.
    fn incidence(&self, point: Vector3) -> f64 {
        self.normal.dot(point) - self.offset
    }
}

/// Intersection point of three planes via the triple-product expansion.
///
/// A near-singular configuration (parallel planes) divides by a vanishing
/// determinant and yields non-finite components, matching the library's
/// IEEE propagation contract.
fn meet(wa: Plane, wb: Plane, wc: Plane) -> Vector3 {
    let det = wa.normal.dot(wb.normal.cross(wc.normal));
    (wb.normal.cross(wc.normal) * wa.offset
        + wc.normal.cross(wa.normal) * wb.offset
        + wa.normal.cross(wb.normal) * wc.offset)
        / det
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut rng = rand::thread_rng();

    tracing::info!("define three random points");
    let pa = Vector3::random(&mut rng, -1.0, 1.0);
    let pb = Vector3::random(&mut rng, -1.0, 1.0);
    let pc = Vector3::random(&mut rng, -1.0, 1.0);
    tracing::info!("PA = {pa:.4}");
    tracing::info!("PB = {pb:.4}");
    tracing::info!("PC = {pc:.4}");

    tracing::info!("a plane through the three points");
    let wabc = Plane::through(pa, pb, pc);
    tracing::info!("WABC: normal = {:.4}, offset = {:.4}", wabc.normal, wabc.offset);

    tracing::info!("check for plane*point incidence");
    tracing::info!("WABC * PA = {:+.4e}", wabc.incidence(pa));
    tracing::info!("WABC * PB = {:+.4e}", wabc.incidence(pb));
    tracing::info!("WABC * PC = {:+.4e}", wabc.incidence(pc));

    tracing::info!("define three random planes");
    let wa = Plane::random(&mut rng);
    let wb = Plane::random(&mut rng);
    let wc = Plane::random(&mut rng);
    tracing::info!("WA: normal = {:.4}, offset = {:.4}", wa.normal, wa.offset);
    tracing::info!("WB: normal = {:.4}, offset = {:.4}", wb.normal, wb.offset);
    tracing::info!("WC: normal = {:.4}, offset = {:.4}", wc.normal, wc.offset);

    tracing::info!("a point from the three planes");
    let pabc = meet(wa, wb, wc);
    tracing::info!("PABC = {pabc:.4}");

    tracing::info!("check for plane*point incidence");
    tracing::info!("PABC * WA = {:+.4e}", wa.incidence(pabc));
    tracing::info!("PABC * WB = {:+.4e}", wb.incidence(pabc));
    tracing::info!("PABC * WC = {:+.4e}", wc.incidence(pabc));
}
