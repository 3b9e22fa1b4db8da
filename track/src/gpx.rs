//! GPX (`.gpx`) track parsing.
//!
//! Only the parts of the format needed to recover an ordered list of
//! positions are read: `<gpx>/<trk>/<trkseg>/<trkpt lat lon><ele/></trkpt>`.

use crate::TrackError;
use geo::geometry::Coord;
use log::{debug, info, warn};
use std::path::Path;
use xot::{NameId, NamespaceId, Node, Xot};

const GPX_1_1_NS: &str = "http://www.topografix.com/GPX/1/1";
const GPX_1_0_NS: &str = "http://www.topografix.com/GPX/1/0";

/// A track point as recorded in the source document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawTrackPoint {
    /// Position where `x` is longitude and `y` is latitude, in
    /// degrees.
    pub coord: Coord<f64>,

    /// Elevation in meters, if recorded.
    pub elevation: Option<f64>,
}

impl RawTrackPoint {
    pub fn new(lat: f64, lon: f64, elevation: Option<f64>) -> Self {
        Self {
            coord: Coord { x: lon, y: lat },
            elevation,
        }
    }

    pub fn lat(&self) -> f64 {
        self.coord.y
    }

    pub fn lon(&self) -> f64 {
        self.coord.x
    }
}

/// Returns the track points read from the GPX file at `path`.
///
/// Points without a usable elevation are skipped with a warning.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<RawTrackPoint>, TrackError> {
    let path = path.as_ref();
    info!("loading GPX track {}", path.display());
    let xml = std::fs::read_to_string(path).map_err(|source| TrackError::Io {
        path: path.to_owned(),
        source,
    })?;
    let points = parse(&xml)?;
    info!("loaded {} track points from {}", points.len(), path.display());
    Ok(points)
}

/// Returns the track points of the first segment of the first track
/// in `xml`.
pub fn parse(xml: &str) -> Result<Vec<RawTrackPoint>, TrackError> {
    let mut tree = Xot::new();
    let names = GpxNames::register(&mut tree);
    let root = tree.parse(xml)?;

    let gpx = tree.document_element(root)?;
    if !tree
        .element(gpx)
        .is_some_and(|ele| names.gpx.matches(ele.name()))
    {
        return Err(TrackError::MissingElement("gpx"));
    }

    let trk = child_elements(&tree, gpx, &names.trk)
        .next()
        .ok_or(TrackError::MissingElement("trk"))?;

    let mut segments = child_elements(&tree, trk, &names.trkseg);
    let trkseg = segments
        .next()
        .ok_or(TrackError::MissingElement("trkseg"))?;
    let ignored = segments.count();
    if ignored > 0 {
        debug!("ignoring {ignored} additional track segment(s)");
    }

    let points: Vec<RawTrackPoint> = child_elements(&tree, trkseg, &names.trkpt)
        .enumerate()
        .filter_map(|(idx, trkpt)| parse_trkpt(&tree, &names, idx, trkpt))
        .collect();

    if points.is_empty() {
        Err(TrackError::Empty)
    } else {
        Ok(points)
    }
}

fn parse_trkpt(tree: &Xot, names: &GpxNames, idx: usize, trkpt: Node) -> Option<RawTrackPoint> {
    let ele = tree.element(trkpt)?;
    let attr = |name: NameId| {
        ele.get_attribute(name)
            .and_then(parse_finite)
    };

    let (Some(lat), Some(lon)) = (attr(names.lat), attr(names.lon)) else {
        warn!("track point {idx} has no valid lat/lon, skipping");
        return None;
    };

    let elevation = child_elements(tree, trkpt, &names.ele)
        .next()
        .and_then(|node| tree.children(node).find_map(|child| tree.text_str(child)))
        .and_then(parse_finite);

    if elevation.is_none() {
        warn!("track point {idx} has no usable <ele>, skipping");
        return None;
    }

    Some(RawTrackPoint::new(lat, lon, elevation))
}

/// Parses a number, rejecting `NaN` and infinities.
fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|val| val.is_finite())
}

/// Returns the element children of `parent` named `tag`.
fn child_elements<'a>(
    tree: &'a Xot,
    parent: Node,
    tag: &'a Tag,
) -> impl Iterator<Item = Node> + 'a {
    tree.children(parent).filter(move |node| {
        tree.element(*node)
            .is_some_and(|ele| tag.matches(ele.name()))
    })
}

/// An element name interned once per accepted namespace (none,
/// GPX 1.1, GPX 1.0).
struct Tag([NameId; 3]);

impl Tag {
    fn register(tree: &mut Xot, local: &str, [v1_1, v1_0]: [NamespaceId; 2]) -> Self {
        Self([
            tree.add_name(local),
            tree.add_name_ns(local, v1_1),
            tree.add_name_ns(local, v1_0),
        ])
    }

    fn matches(&self, name: NameId) -> bool {
        self.0.contains(&name)
    }
}

struct GpxNames {
    gpx: Tag,
    trk: Tag,
    trkseg: Tag,
    trkpt: Tag,
    ele: Tag,
    lat: NameId,
    lon: NameId,
}

impl GpxNames {
    fn register(tree: &mut Xot) -> Self {
        let namespaces = [
            tree.add_namespace(GPX_1_1_NS),
            tree.add_namespace(GPX_1_0_NS),
        ];
        Self {
            gpx: Tag::register(tree, "gpx", namespaces),
            trk: Tag::register(tree, "trk", namespaces),
            trkseg: Tag::register(tree, "trkseg", namespaces),
            trkpt: Tag::register(tree, "trkpt", namespaces),
            ele: Tag::register(tree, "ele", namespaces),
            // Attributes are never namespaced in GPX.
            lat: tree.add_name("lat"),
            lon: tree.add_name("lon"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{load, parse, RawTrackPoint};
    use crate::TrackError;
    use std::path::PathBuf;

    fn tracks_dir() -> PathBuf {
        [env!("CARGO_MANIFEST_DIR"), "..", "data", "tracks"]
            .iter()
            .collect()
    }

    const FIVE_POINTS_ONE_BARE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Afternoon Run</name>
    <trkseg>
      <trkpt lat="60.0000" lon="10.0000"><ele>100.0</ele></trkpt>
      <trkpt lat="60.0010" lon="10.0010"><ele>101.5</ele></trkpt>
      <trkpt lat="60.0020" lon="10.0020"><time>2024-05-01T12:00:00Z</time></trkpt>
      <trkpt lat="60.0030" lon="10.0030"><ele>103.0</ele></trkpt>
      <trkpt lat="60.0040" lon="10.0040"><ele>104.0</ele></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    #[test]
    fn test_missing_elevation_is_skipped() {
        let points = parse(FIVE_POINTS_ONE_BARE).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], RawTrackPoint::new(60.0, 10.0, Some(100.0)));
        assert_eq!(points[2], RawTrackPoint::new(60.003, 10.003, Some(103.0)));
    }

    #[test]
    fn test_unparsable_elevation_is_skipped() {
        let xml = r#"<gpx><trk><trkseg>
            <trkpt lat="1" lon="2"><ele>high</ele></trkpt>
            <trkpt lat="1" lon="3"><ele> 7.5 </ele></trkpt>
            <trkpt lon="3"><ele>7.5</ele></trkpt>
        </trkseg></trk></gpx>"#;
        let points = parse(xml).unwrap();
        assert_eq!(points, vec![RawTrackPoint::new(1.0, 3.0, Some(7.5))]);
    }

    #[test]
    fn test_non_finite_values_are_skipped() {
        let xml = r#"<gpx><trk><trkseg>
            <trkpt lat="1" lon="1"><ele>10</ele></trkpt>
            <trkpt lat="NaN" lon="2"><ele>11</ele></trkpt>
            <trkpt lat="3" lon="3"><ele>inf</ele></trkpt>
            <trkpt lat="4" lon="-infinity"><ele>12</ele></trkpt>
            <trkpt lat="5" lon="5"><ele>13</ele></trkpt>
        </trkseg></trk></gpx>"#;
        let points = parse(xml).unwrap();
        assert_eq!(
            points,
            vec![
                RawTrackPoint::new(1.0, 1.0, Some(10.0)),
                RawTrackPoint::new(5.0, 5.0, Some(13.0)),
            ]
        );
    }

    #[test]
    fn test_gpx_1_0_namespace() {
        let xml = r#"<gpx version="1.0" xmlns="http://www.topografix.com/GPX/1/0">
            <trk><trkseg><trkpt lat="1" lon="2"><ele>3</ele></trkpt></trkseg></trk>
        </gpx>"#;
        assert_eq!(parse(xml).unwrap().len(), 1);
    }

    #[test]
    fn test_only_first_segment_is_read() {
        let xml = r#"<gpx><trk>
            <trkseg><trkpt lat="1" lon="2"><ele>3</ele></trkpt></trkseg>
            <trkseg><trkpt lat="4" lon="5"><ele>6</ele></trkpt></trkseg>
        </trk></gpx>"#;
        let points = parse(xml).unwrap();
        assert_eq!(points, vec![RawTrackPoint::new(1.0, 2.0, Some(3.0))]);
    }

    #[test]
    fn test_structure_errors() {
        assert!(matches!(
            parse("<kml><trk/></kml>"),
            Err(TrackError::MissingElement("gpx"))
        ));
        assert!(matches!(
            parse("<gpx><metadata/></gpx>"),
            Err(TrackError::MissingElement("trk"))
        ));
        assert!(matches!(
            parse("<gpx><trk><name>x</name></trk></gpx>"),
            Err(TrackError::MissingElement("trkseg"))
        ));
        assert!(matches!(
            parse("<gpx><trk><trkseg></trkseg></trk></gpx>"),
            Err(TrackError::Empty)
        ));
        assert!(matches!(
            parse("<gpx><trk><trkseg><trkpt lat=\"1\" lon=\"2\"/></trkseg></trk></gpx>"),
            Err(TrackError::Empty)
        ));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(
            parse("<gpx><trk></gpx>"),
            Err(TrackError::Xml(_))
        ));
    }

    #[test]
    fn test_load() {
        let mut path = tracks_dir();
        path.push("ridge_loop.gpx");
        let points = load(&path).unwrap();
        assert_eq!(points.len(), 12);
        assert!(points.iter().all(|p| p.elevation.is_some()));
    }

    #[test]
    fn test_load_missing_file() {
        let mut path = tracks_dir();
        path.push("does_not_exist.gpx");
        assert!(matches!(load(&path), Err(TrackError::Io { .. })));
    }
}
