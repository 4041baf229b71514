//! Boundary geometry resolution.
//!
//! Decodes the TopoJSON boundary payload into drawable region shapes plus
//! a mesh of interior borders, and owns the three-way identifier join the
//! rest of the system relies on: full display name ↔ two-letter postal
//! code ↔ zero-padded numeric id. Built once at load time; read-only
//! afterwards.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// A point in the topology's (pre-projected) coordinate space.
pub type Point = (f64, f64);

/// A closed ring of points.
pub type Ring = Vec<Point>;

/// Width the numeric region ids are padded to.
const ID_WIDTH: usize = 2;

/// Raw TopoJSON payload, limited to the subset the boundary data uses.
#[derive(Debug, Deserialize)]
pub struct Topology {
    pub transform: Option<Transform>,
    pub objects: TopoObjects,
    pub arcs: Vec<Vec<[f64; 2]>>,
}

/// Quantization transform applied to delta-encoded arcs.
#[derive(Debug, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

/// Named geometry collections; only `states` is used.
#[derive(Debug, Deserialize)]
pub struct TopoObjects {
    pub states: GeometryCollection,
}

#[derive(Debug, Deserialize)]
pub struct GeometryCollection {
    pub geometries: Vec<TopoGeometry>,
}

/// One region geometry. `arcs` nesting depends on `kind`, so it is kept
/// as raw JSON and interpreted during resolution.
#[derive(Debug, Deserialize)]
pub struct TopoGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub properties: Option<GeometryProperties>,
    #[serde(default)]
    pub arcs: Value,
}

#[derive(Debug, Deserialize)]
pub struct GeometryProperties {
    pub name: String,
}

/// Accepts numeric or string ids; the boundary data has shipped both.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "geometry id must be a string or number, got {other}"
        ))),
    }
}

/// Pads a numeric region id to the fixed lookup width.
///
/// Idempotent: `pad_id("6")` and `pad_id("06")` both yield `"06"`, so
/// lookups are never sensitive to upstream formatting.
pub fn pad_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() >= ID_WIDTH {
        trimmed.to_string()
    } else {
        format!("{trimmed:0>width$}", width = ID_WIDTH)
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    fn extend(&mut self, (x, y): Point) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Whether a point lies inside (or on the edge of) the box.
    pub fn contains(&self, (x, y): Point) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// One drawable region: a set of polygons, each a list of rings.
#[derive(Clone, Debug)]
pub struct RegionShape {
    /// Zero-padded numeric id.
    pub id: String,
    /// Display name from the topology's properties.
    pub name: String,
    /// Polygons; the first ring of each is the exterior, the rest holes.
    pub polygons: Vec<Vec<Ring>>,
    pub bounds: Bounds,
}

impl RegionShape {
    /// Even-odd point-in-polygon test across all rings.
    pub fn contains(&self, point: Point) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }
        let mut inside = false;
        for polygon in &self.polygons {
            for ring in polygon {
                if ring_crossings_odd(ring, point) {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

/// Ray-cast crossing parity for a single ring.
fn ring_crossings_odd(ring: &[Point], (px, py): Point) -> bool {
    let mut odd = false;
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            odd = !odd;
        }
        j = i;
    }
    odd
}

/// Immutable derived mapping from display name to numeric id to shape.
#[derive(Clone, Debug)]
pub struct GeometryIndex {
    shapes: Vec<RegionShape>,
    by_id: HashMap<String, usize>,
    name_to_id: HashMap<String, String>,
    mesh: Vec<Ring>,
    bounds: Bounds,
}

impl GeometryIndex {
    /// All region shapes in topology order.
    pub fn shapes(&self) -> &[RegionShape] {
        &self.shapes
    }

    /// Looks up a shape by numeric id; the id is padded first, so `"6"`
    /// and `"06"` resolve to the same entry.
    pub fn shape(&self, id: &str) -> Option<&RegionShape> {
        self.by_id.get(&pad_id(id)).map(|&i| &self.shapes[i])
    }

    /// Resolves a display name to its padded numeric id.
    pub fn id_for_name(&self, name: &str) -> Option<&str> {
        self.name_to_id.get(name).map(String::as_str)
    }

    /// Interior borders: every arc shared by two distinct regions, for
    /// stroking without double-drawing shared edges.
    pub fn mesh(&self) -> &[Ring] {
        &self.mesh
    }

    /// Bounding box of the whole topology.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The region containing a point, if any.
    pub fn region_at(&self, point: Point) -> Option<&RegionShape> {
        self.shapes.iter().find(|s| s.contains(point))
    }
}

/// Resolves a raw topology into a [`GeometryIndex`].
///
/// Decodes the delta-encoded arcs, assembles polygon rings per region,
/// pads numeric ids, builds the name → id table, and extracts the
/// interior-border mesh. Geometry kinds other than `Polygon` and
/// `MultiPolygon` are skipped.
pub fn resolve(topology: &Topology) -> crate::Result<GeometryIndex> {
    let arcs = decode_arcs(topology);

    // Arcs referenced by two distinct regions form the interior mesh.
    // An arc reused within one region (rings of a MultiPolygon) is not
    // an interior border, so ownership is tracked per region.
    let mut arc_owner: Vec<Option<usize>> = vec![None; arcs.len()];
    let mut arc_shared: Vec<bool> = vec![false; arcs.len()];

    let mut shapes = Vec::new();
    let mut by_id = HashMap::new();
    let mut name_to_id = HashMap::new();
    let mut bounds = Bounds::empty();

    for geometry in &topology.objects.states.geometries {
        let polygon_arcs: Vec<Vec<Vec<i64>>> = match geometry.kind.as_str() {
            "Polygon" => vec![serde_json::from_value(geometry.arcs.clone())?],
            "MultiPolygon" => serde_json::from_value(geometry.arcs.clone())?,
            other => {
                tracing::warn!(kind = other, id = %geometry.id, "skipping unsupported geometry");
                continue;
            }
        };

        let id = pad_id(&geometry.id);
        let name = geometry
            .properties
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.clone());

        let mut shape_bounds = Bounds::empty();
        let mut polygons = Vec::with_capacity(polygon_arcs.len());
        for rings in &polygon_arcs {
            let mut assembled = Vec::with_capacity(rings.len());
            for ring_arcs in rings {
                let ring = assemble_ring(&arcs, ring_arcs);
                for &point in &ring {
                    shape_bounds.extend(point);
                    bounds.extend(point);
                }
                for &arc_index in ring_arcs {
                    let index = arc_position(arc_index);
                    let Some(owner) = arc_owner.get_mut(index) else {
                        continue;
                    };
                    match *owner {
                        None => *owner = Some(shapes.len()),
                        Some(first) if first != shapes.len() => arc_shared[index] = true,
                        Some(_) => {}
                    }
                }
                assembled.push(ring);
            }
            polygons.push(assembled);
        }

        name_to_id.insert(name.clone(), id.clone());
        by_id.insert(id.clone(), shapes.len());
        shapes.push(RegionShape {
            id,
            name,
            polygons,
            bounds: shape_bounds,
        });
    }

    let mesh = arcs
        .iter()
        .zip(&arc_shared)
        .filter(|&(_, &shared)| shared)
        .map(|(arc, _)| arc.clone())
        .collect();

    tracing::info!(
        regions = shapes.len(),
        arcs = arcs.len(),
        "resolved boundary topology"
    );

    Ok(GeometryIndex {
        shapes,
        by_id,
        name_to_id,
        mesh,
        bounds,
    })
}

/// Decodes every arc into absolute coordinates, applying the quantization
/// transform when present (first point absolute, the rest deltas).
fn decode_arcs(topology: &Topology) -> Vec<Ring> {
    topology
        .arcs
        .iter()
        .map(|arc| match &topology.transform {
            Some(t) => {
                let mut x = 0.0;
                let mut y = 0.0;
                arc.iter()
                    .map(|[dx, dy]| {
                        x += dx;
                        y += dy;
                        (x * t.scale[0] + t.translate[0], y * t.scale[1] + t.translate[1])
                    })
                    .collect()
            }
            None => arc.iter().map(|[x, y]| (*x, *y)).collect(),
        })
        .collect()
}

/// Index of the arc a (possibly negated) reference points at.
fn arc_position(reference: i64) -> usize {
    if reference < 0 {
        (!reference) as usize
    } else {
        reference as usize
    }
}

/// Concatenates a ring's arcs into one point list. A negative reference
/// means the arc runs reversed; the shared junction point between
/// consecutive arcs is dropped to avoid duplicates.
fn assemble_ring(arcs: &[Ring], ring_arcs: &[i64]) -> Ring {
    let mut ring: Ring = Vec::new();
    for &reference in ring_arcs {
        let arc = match arcs.get(arc_position(reference)) {
            Some(arc) => arc,
            None => continue,
        };
        let points: Vec<Point> = if reference < 0 {
            arc.iter().rev().copied().collect()
        } else {
            arc.clone()
        };
        let skip = usize::from(!ring.is_empty());
        ring.extend(points.into_iter().skip(skip));
    }
    ring
}
