//! Image asset URLs.

use orderdesk::orders::ImageRef;

const CDN_HOST: &str = "https://cdn.sanity.io";

/// Resolve an `image-{id}-{width}x{height}-{ext}` asset reference to its CDN URL.
///
/// Returns `None` for references that do not follow the asset naming scheme.
pub fn cdn_url(project_id: &str, dataset: &str, image: &ImageRef) -> Option<String> {
    let asset = image.as_str().strip_prefix("image-")?;

    let mut parts = asset.rsplitn(3, '-');

    let ext = parts.next()?;
    let dimensions = parts.next()?;
    let id = parts.next()?;

    let (width, height) = dimensions.split_once('x')?;

    let is_number = |value: &str| !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit());

    if id.is_empty() || ext.is_empty() || !is_number(width) || !is_number(height) {
        return None;
    }

    Some(format!(
        "{CDN_HOST}/images/{project_id}/{dataset}/{id}-{dimensions}.{ext}"
    ))
}
