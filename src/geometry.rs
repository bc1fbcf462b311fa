//! The geometry collaborator: validated GeoJSON in, WKT out.
//!
//! The AST stores geometries as [geojson::Geometry]; the text emitter
//! turns them back into WKT through [geozero], carrying the third
//! dimension when the coordinates have one.

use crate::Error;
use geozero::{geojson::GeoJsonString, CoordDimensions, ToWkt};

const DEFAULT_NDIM: usize = 2;

/// Converts a GeoJSON geometry to WKT.
pub(crate) fn to_wkt(geometry: &geojson::Geometry) -> Result<String, Error> {
    let dims = match geojson_ndims(geometry) {
        3 => CoordDimensions::xyz(),
        _ => CoordDimensions::xy(),
    };
    let geojson = GeoJsonString(geometry.to_string());
    geojson.to_wkt_ndim(dims).map_err(Error::from)
}

fn geojson_ndims(geojson: &geojson::Geometry) -> usize {
    use geojson::Value::*;
    match &geojson.value {
        Point(coords) => coords.len(),
        MultiPoint(v) => v.first().map(|v| v.len()).unwrap_or(DEFAULT_NDIM),
        LineString(v) => v.first().map(|v| v.len()).unwrap_or(DEFAULT_NDIM),
        MultiLineString(v) => v
            .first()
            .and_then(|v| v.first())
            .map(|v| v.len())
            .unwrap_or(DEFAULT_NDIM),
        Polygon(v) => v
            .first()
            .and_then(|v| v.first())
            .map(|v| v.len())
            .unwrap_or(DEFAULT_NDIM),
        MultiPolygon(v) => v
            .first()
            .and_then(|v| v.first())
            .and_then(|v| v.first())
            .map(|v| v.len())
            .unwrap_or(DEFAULT_NDIM),
        GeometryCollection(v) => v.first().map(geojson_ndims).unwrap_or(DEFAULT_NDIM),
    }
}

#[cfg(test)]
mod tests {
    use super::to_wkt;

    fn geometry(s: &str) -> geojson::Geometry {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn point() {
        let geometry = geometry(r#"{"type":"Point","coordinates":[-105.1019,40.1672]}"#);
        assert_eq!(to_wkt(&geometry).unwrap(), "POINT(-105.1019 40.1672)");
    }

    #[test]
    fn point_z() {
        let geometry = geometry(r#"{"type":"Point","coordinates":[-105.1019,40.1672,4981]}"#);
        let wkt = to_wkt(&geometry).unwrap();
        assert!(wkt.contains('Z'), "lost the third dimension: {wkt}");
        // The emitted form must parse back to the same geometry.
        let text = format!("S_INTERSECTS(geom, {wkt})");
        let expr = crate::parse_text(&text).unwrap();
        let reparsed = expr.to_value().unwrap()["args"][1].clone();
        assert_eq!(
            serde_json::from_value::<geojson::Geometry>(reparsed).unwrap(),
            geometry
        );
    }

    #[test]
    fn polygon() {
        let geometry = geometry(
            r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,1],[0,0]]]}"#,
        );
        let wkt = to_wkt(&geometry).unwrap();
        let expr = crate::parse_text(&format!("S_CONTAINS(geom, {wkt})")).unwrap();
        let reparsed = expr.to_value().unwrap()["args"][1].clone();
        assert_eq!(
            serde_json::from_value::<geojson::Geometry>(reparsed).unwrap(),
            geometry
        );
    }
}
