use crate::bbox::BoundingBox;

/// Wolvercote, north of Oxford. Kept as a preset, not fetched by default.
pub const WOLVERCOTE_BBOX: BoundingBox = BoundingBox::new(-1.3163, 51.7574, -1.2684, 51.7782);

/// Oxford to Hemel Hempstead.
pub const HH_BBOX: BoundingBox = BoundingBox::new(-1.3163, 51.7387, -0.4132, 51.7803);

/// A map API base URL and the file its response is saved to.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint<'a> {
    pub base_url: &'a str,
    pub output_file: &'a str,
}

/// Fetched in this order.
pub const ENDPOINTS: [Endpoint<'static>; 2] = [
    Endpoint {
        base_url: "http://localhost/osm/api/0.5/map",
        output_file: "file1.xml",
    },
    Endpoint {
        base_url: "http://localhost:3000/api/0.5/map",
        output_file: "file2.xml",
    },
];

pub const DEFAULT_OUTPUT_DIR: &str = ".";
