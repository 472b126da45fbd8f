use serde::{Serialize, Deserialize};
use serde::ser::Serializer;
use serde::de::{Deserializer, Visitor};
use rand::Rng;

/// Integer grid vertex. Coordinates are margin-inclusive while stored;
/// the exporter subtracts the margin again.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct Pt {
    pub x :i32,
    pub y :i32,
}

impl Serialize for Pt {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S : Serializer
    {
        serializer.serialize_str(&format!("{};{}", self.x, self.y))
    }
}

impl<'de> Deserialize<'de> for Pt {
    fn deserialize<D>(deserializer: D) -> Result<Pt, D::Error>
        where D: Deserializer<'de>
    {
        deserializer.deserialize_str(PtDeser)
    }
}

struct PtDeser;

impl<'de> Visitor<'de> for PtDeser {
    type Value = Pt;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(formatter, "Expecting a point x;y, e.g. \"4;-5\".")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where E: serde::de::Error
    {
        let components = s.split(";").collect::<Vec<_>>();
        match &components[..] {
            [x,y] => Ok(Pt { x: x.parse().map_err(|_| E::custom("int parse error"))?,
                             y: y.parse().map_err(|_| E::custom("int parse error"))? }),
            _ => Err(E::custom("expected two components x;y")),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[derive(Serialize, Deserialize)]
pub enum PathType { Road, Rail, Walk, Cross }

impl PathType {
    pub fn name(&self) -> &'static str {
        match self {
            PathType::Road => "Road",
            PathType::Rail => "Rail",
            PathType::Walk => "Walk",
            PathType::Cross => "Cross",
        }
    }

    /// Stroke width in device pixels, used for the delete-mode hit test.
    pub fn stroke_width(&self) -> f64 {
        match self {
            PathType::Road => 50.0,
            PathType::Walk => 15.0,
            _ => 2.0,
        }
    }

    /// Type tags as spelled in the old level format (case sensitive).
    pub fn from_legacy(s :&str) -> Option<PathType> {
        match s {
            "road" => Some(PathType::Road),
            "rail" => Some(PathType::Rail),
            "walk" => Some(PathType::Walk),
            "cross" => Some(PathType::Cross),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[derive(Serialize, Deserialize)]
pub struct Color {
    pub r :u8,
    pub g :u8,
    pub b :u8,
}

/// Display colors for newly created paths. Cosmetic only, never exported.
pub const PALETTE :[Color; 8] = [
    Color { r: 0xe6, g: 0x19, b: 0x4b },
    Color { r: 0x3c, g: 0xb4, b: 0x4b },
    Color { r: 0xff, g: 0xe1, b: 0x19 },
    Color { r: 0x43, g: 0x63, b: 0xd8 },
    Color { r: 0xf5, g: 0x82, b: 0x31 },
    Color { r: 0x91, g: 0x1e, b: 0xb4 },
    Color { r: 0x42, g: 0xd4, b: 0xf4 },
    Color { r: 0xf0, g: 0x32, b: 0xe6 },
];

pub fn random_color() -> Color {
    PALETTE[rand::thread_rng().gen_range(0, PALETTE.len())]
}

/// One straight or curved stroke: 2 vertices is a line, 3 is a curve with a
/// single control point used twice, 4 is a curve with two control points.
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(Serialize)]
pub struct Segment {
    vertices :Vec<Pt>,
}

impl<'de> Deserialize<'de> for Segment {
    fn deserialize<D>(deserializer: D) -> Result<Segment, D::Error>
        where D: Deserializer<'de>
    {
        #[derive(Deserialize)]
        struct Raw {
            vertices :Vec<Pt>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Segment::new(raw.vertices)
            .ok_or_else(|| serde::de::Error::custom("segment must have 2 to 4 vertices"))
    }
}

impl Segment {
    pub fn new(vertices :Vec<Pt>) -> Option<Segment> {
        if (2..=4).contains(&vertices.len()) {
            Some(Segment { vertices })
        } else {
            None
        }
    }

    pub fn vertices(&self) -> &[Pt] { &self.vertices }

    /// Vertex positions may move (dragging), but the count invariant holds.
    pub fn vertex_mut(&mut self, idx :usize) -> Option<&mut Pt> {
        self.vertices.get_mut(idx)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(Serialize, Deserialize)]
pub struct Path {
    pub kind :PathType,
    pub color :Color,
    pub segments :Vec<Segment>,
}

/// The committed editor contents. Insertion order is z-order: the path with
/// the highest index is drawn last and wins hit tests.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[derive(Serialize, Deserialize)]
pub struct Model {
    pub paths :Vec<Path>,
}

impl Model {
    pub fn empty() -> Self { Default::default() }

    pub fn delete_path(&mut self, idx :usize) -> Option<Path> {
        if idx < self.paths.len() {
            Some(self.paths.remove(idx))
        } else {
            None
        }
    }
}
