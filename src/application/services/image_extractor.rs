//! Image URL extraction from message text.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::Attachment;

/// Attachment content types treated as images.
pub const IMAGE_CONTENT_TYPES: [&str; 4] =
    ["image/png", "image/jpg", "image/jpeg", "image/webp"];

/// Filename suffixes treated as images, used as a fallback when the
/// declared content type is absent or unrecognized.
pub const IMAGE_EXTENSIONS: [&str; 4] = [".png", ".jpg", ".jpeg", ".webp"];

/// Extracts image URLs from message text.
///
/// Every `http(s)` URL is stripped of its query string, then kept only when
/// the stripped form ends with a recognized image extension. Order is
/// preserved as found in the text; duplicates are not collapsed.
#[must_use]
pub fn images_urls(content: &str) -> Vec<String> {
    static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

    if !content.contains("http") {
        return Vec::new();
    }

    URL_RE
        .find_iter(content)
        .map(|m| {
            let url = m.as_str();
            url.split_once('?').map_or(url, |(base, _)| base)
        })
        .filter(|url| IMAGE_EXTENSIONS.iter().any(|ext| url.ends_with(ext)))
        .map(str::to_owned)
        .collect()
}

/// Returns true when an attachment carries image content, by declared
/// content type or filename suffix.
#[must_use]
pub fn is_image_attachment(attachment: &Attachment) -> bool {
    attachment
        .content_type()
        .is_some_and(|ct| IMAGE_CONTENT_TYPES.contains(&ct))
        || IMAGE_EXTENSIONS
            .iter()
            .any(|ext| attachment.filename().ends_with(ext))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_single_direct_link() {
        assert_eq!(
            images_urls("https://i.imgur.com/0dY8Y1W.jpg"),
            vec!["https://i.imgur.com/0dY8Y1W.jpg"]
        );
    }

    #[test]
    fn test_query_string_is_stripped() {
        let content = "https://media.discordapp.net/attachments/726754446352056373/1093231767349117028/caudillo.png?width=1424&height=1350";
        assert_eq!(
            images_urls(content),
            vec!["https://media.discordapp.net/attachments/726754446352056373/1093231767349117028/caudillo.png"]
        );
    }

    #[test]
    fn test_mixed_links_keep_only_images_in_order() {
        let content = "https://media.discordapp.net/attachments/726754446352056373/1093231767349117028/caudillo.png \
                       https://images-ext-1.discordapp.net/external/eNDj2RvyeG2zLAc3QJioqI_wzyqXECLhjGwcJizZ2ik/https/media.tenor.com/kBKK4MUC-HoAAAPo/oui-ouais.mp4 \
                       https://cdn.discordapp.com/attachments/1008488496354308199/1095793693912465590/archiviste.png";
        assert_eq!(
            images_urls(content),
            vec![
                "https://media.discordapp.net/attachments/726754446352056373/1093231767349117028/caudillo.png",
                "https://cdn.discordapp.com/attachments/1008488496354308199/1095793693912465590/archiviste.png",
            ]
        );
    }

    #[test_case("https://a.com/x.png"; "png")]
    #[test_case("https://a.com/x.jpg"; "jpg")]
    #[test_case("https://a.com/x.jpeg"; "jpeg")]
    #[test_case("https://a.com/x.webp"; "webp")]
    fn test_recognized_extensions(url: &str) {
        assert_eq!(images_urls(url), vec![url]);
    }

    #[test_case("https://a.com/x.gif"; "gif is not copied")]
    #[test_case("https://a.com/x.PNG"; "suffix match is case sensitive")]
    #[test_case("https://a.com/page?fake=.png"; "extension hidden in query string")]
    #[test_case("ftp://a.com/x.png"; "non http scheme")]
    fn test_rejected_urls(url: &str) {
        assert!(images_urls(url).is_empty());
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let content = "https://a.com/1.png and again https://a.com/1.png";
        assert_eq!(images_urls(content).len(), 2);
    }

    #[test]
    fn test_no_urls() {
        assert!(images_urls("just some text").is_empty());
        assert!(images_urls("").is_empty());
    }

    #[test]
    fn test_attachment_by_content_type() {
        let attachment = Attachment::new("1", "raw-export", 10, "https://cdn.test/a")
            .with_content_type("image/webp");
        assert!(is_image_attachment(&attachment));
    }

    #[test]
    fn test_attachment_by_filename_fallback() {
        let attachment = Attachment::new("1", "sketch.jpeg", 10, "https://cdn.test/a");
        assert!(is_image_attachment(&attachment));
    }

    #[test]
    fn test_non_image_attachment() {
        let attachment = Attachment::new("1", "notes.pdf", 10, "https://cdn.test/a")
            .with_content_type("application/pdf");
        assert!(!is_image_attachment(&attachment));
    }
}
