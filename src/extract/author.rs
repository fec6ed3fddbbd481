//! Author profile extraction
//!
//! One author profile document in, one [`AuthorRecord`] out. The name and
//! photo anchors are required; the biography block is optional.

use crate::extract::select;
use crate::extract::ExtractError;
use crate::record::AuthorRecord;
use crate::site::SiteOrigin;
use scraper::Html;

/// The unique element holding the author's display name
const AUTHOR_NAME: &str = "div.author_name";

/// The optional biography container
const AUTHOR_BIO: &str = "div.person-page__html";

/// The container wrapping the author's portrait image
const AUTHOR_PHOTO_BOX: &str = "div.biblio_author_image";

/// Parses one author profile document into a record
///
/// # Extraction rules
///
/// 1. Name: text of the unique name element; absent or empty is
///    `MissingField("name")`.
/// 2. Bio: if the biography container is present it is flattened to
///    line-separated plain text, otherwise the record carries no bio.
/// 3. Photo: the `src` of the `<img>` nested in the photo container; the
///    container or image being absent is `MissingField("photo")`. Relative
///    addresses are rewritten against the site origin.
///
/// # Arguments
///
/// * `html` - The fetched profile page body
/// * `origin` - Site origin used to absolutize the photo address
///
/// # Returns
///
/// * `Ok(AuthorRecord)` - Parsed record
/// * `Err(ExtractError)` - A required anchor was missing
pub fn extract_author(html: &str, origin: &SiteOrigin) -> Result<AuthorRecord, ExtractError> {
    let doc = Html::parse_document(html);

    let name = select::first(&doc, AUTHOR_NAME)
        .map(select::text_content)
        .filter(|name| !name.is_empty())
        .ok_or(ExtractError::MissingField("name"))?;

    let bio = select::first(&doc, AUTHOR_BIO).map(select::flatten_text);

    let photo = select::first(&doc, AUTHOR_PHOTO_BOX)
        .and_then(|container| select::first_in(container, "img"))
        .and_then(|img| img.value().attr("src"))
        .ok_or(ExtractError::MissingField("photo"))?;

    let photo_path = origin.absolutize(photo)?;

    Ok(AuthorRecord {
        name,
        bio,
        photo_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> SiteOrigin {
        SiteOrigin::parse("https://litres.ru").unwrap()
    }

    const FULL_PROFILE: &str = r#"
        <html><body>
        <div class="author_name">Михаил Булгаков</div>
        <div class="biblio_author_image">
            <img src="/pub/author/bulgakov.jpg" alt="">
        </div>
        <div class="person-page__html">
            <p>Русский писатель.</p>
            <p>Автор романа «Мастер и Маргарита».</p>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_extract_full_profile() {
        let author = extract_author(FULL_PROFILE, &origin()).unwrap();

        assert_eq!(author.name, "Михаил Булгаков");
        assert_eq!(
            author.bio.as_deref(),
            Some("Русский писатель.\nАвтор романа «Мастер и Маргарита».")
        );
        assert_eq!(author.photo_path, "https://litres.ru/pub/author/bulgakov.jpg");
    }

    #[test]
    fn test_missing_name_fails() {
        let html = r#"
            <html><body>
            <div class="biblio_author_image"><img src="/p.jpg"></div>
            </body></html>
        "#;
        let result = extract_author(html, &origin());
        assert!(matches!(result, Err(ExtractError::MissingField("name"))));
    }

    #[test]
    fn test_missing_bio_is_not_an_error() {
        let html = r#"
            <html><body>
            <div class="author_name">Анна Ахматова</div>
            <div class="biblio_author_image"><img src="/a.jpg"></div>
            </body></html>
        "#;
        let author = extract_author(html, &origin()).unwrap();
        assert_eq!(author.bio, None);
    }

    #[test]
    fn test_missing_photo_container_fails() {
        let html = r#"<html><body><div class="author_name">Имя</div></body></html>"#;
        let result = extract_author(html, &origin());
        assert!(matches!(result, Err(ExtractError::MissingField("photo"))));
    }

    #[test]
    fn test_photo_container_without_img_fails() {
        let html = r#"
            <html><body>
            <div class="author_name">Имя</div>
            <div class="biblio_author_image"></div>
            </body></html>
        "#;
        let result = extract_author(html, &origin());
        assert!(matches!(result, Err(ExtractError::MissingField("photo"))));
    }

    #[test]
    fn test_absolute_photo_left_unchanged() {
        let html = r#"
            <html><body>
            <div class="author_name">Имя</div>
            <div class="biblio_author_image">
                <img src="https://cv.litres.ru/author/1.jpg">
            </div>
            </body></html>
        "#;
        let author = extract_author(html, &origin()).unwrap();
        assert_eq!(author.photo_path, "https://cv.litres.ru/author/1.jpg");
    }
}
