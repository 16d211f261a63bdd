/// Cell name from a `/data/:cellName` route, percent-decoded. Accepts the
/// hash-router form `#/data/...` as well.
pub fn cell_from_route(route: &str) -> Option<String> {
    let route = route.trim().trim_start_matches('#');
    let encoded = route.strip_prefix("/data/")?.trim_end_matches('/');
    if encoded.is_empty() || encoded.contains('/') {
        return None;
    }
    let decoded = urlencoding::decode(encoded).ok()?;
    Some(decoded.into_owned())
}

pub fn route_for_cell(cell: &str) -> String {
    format!("/data/{}", urlencoding::encode(cell))
}
