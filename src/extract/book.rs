//! Book page extraction
//!
//! Extraction happens in two explicit stages:
//!
//! 1. [`parse_book_page`] — synchronous: pull every scalar field and the
//!    list of author profile URLs out of the document.
//! 2. [`extract_book`] — asynchronous: run stage 1, fetch the author batch,
//!    parse each profile, assemble the final [`BookRecord`].
//!
//! The split keeps the parsed document (`scraper::Html` is not `Send`)
//! confined to the synchronous stage, so per-book extraction futures can be
//! spawned onto the runtime and author batches of different books overlap.

use crate::extract::select;
use crate::extract::{date, extract_author, ExtractError};
use crate::fetch::Fetcher;
use crate::record::{AuthorRecord, BookRecord, Genre, Tag};
use crate::site::SiteOrigin;
use chrono::NaiveDate;
use scraper::Html;
use url::Url;

/// Container of the book title; the first text fragment is the name
const BOOK_NAME: &str = "div.biblio_book_name";

/// Exact text of the release-date label; the date follows as a text sibling
const PUBLISH_DATE_LABEL: &str = "Дата выхода на ЛитРес:";

/// Optional synopsis container
const PREAMBLE: &str = "div.biblio_book_descr_publishers";

/// Page metadata element carrying the cover image address
const COVER_META: &str = r#"meta[property="og:image"]"#;

/// Container of the author links
const AUTHOR_LINKS_BOX: &str = "div.biblio_book_author";

/// Optional tags block
const TAGS_BOX: &str = "li.tags_list";

/// Labeled links inside the tags block and the genre element
const LABELED_LINK: &str = "a.biblio_info__link";

/// Exact text of the genre label; links are collected from its parent
const GENRE_LABEL: &str = "Жанр:";

/// Optional series container
const SERIES_BOX: &str = "div.biblio_book_sequences";

/// Series links inside the series container
const SERIES_LINK: &str = "a.biblio_book_sequences__link";

/// The synchronous parse result of one book page
///
/// Everything a [`BookRecord`] needs except the resolved authors; in their
/// place stands the ordered list of author profile URLs to fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct BookPage {
    pub name: String,
    pub publish_date: NaiveDate,
    pub preamble: Option<String>,
    pub cover_path: String,
    pub author_urls: Vec<Url>,
    pub tags: Vec<Tag>,
    pub genres: Vec<Genre>,
    pub series: Option<String>,
}

/// Parses the scalar fields and author links out of one book document
///
/// Extraction rules, in order, each required anchor failing independently
/// with `MissingField(<field>)`:
///
/// 1. Title — first non-whitespace text fragment in the book-name container.
/// 2. Publish date — text sibling of the release-date label, run through the
///    date translator.
/// 3. Preamble — optional container flattened to line-separated text.
/// 4. Cover — `og:image` metadata content, absolutized.
/// 5. Author links — every anchor in the author container, normalized to
///    author profile URLs.
/// 6. Tags — labeled links of the optional tags block; a missing block is an
///    empty list, not an error.
/// 7. Genres — labeled links collected from the element containing the
///    genre label. The label itself is required; the collected list may
///    still be empty.
/// 8. Series — first series link's text. Pages can list several series;
///    only the first is kept.
pub fn parse_book_page(html: &str, origin: &SiteOrigin) -> Result<BookPage, ExtractError> {
    let doc = Html::parse_document(html);

    let name = select::first(&doc, BOOK_NAME)
        .and_then(select::first_text_fragment)
        .ok_or(ExtractError::MissingField("title"))?;

    let date_text = select::find_label(&doc, "strong", PUBLISH_DATE_LABEL)
        .and_then(select::following_text)
        .ok_or(ExtractError::MissingField("publish date"))?;
    let publish_date = date::translate(&date_text)?;

    let preamble = select::first(&doc, PREAMBLE).map(select::flatten_text);

    let cover = select::first(&doc, COVER_META)
        .and_then(|meta| meta.value().attr("content"))
        .ok_or(ExtractError::MissingField("cover"))?;
    let cover_path = origin.absolutize(cover)?;

    let author_box =
        select::first(&doc, AUTHOR_LINKS_BOX).ok_or(ExtractError::MissingField("authors"))?;
    let mut author_urls = Vec::new();
    for anchor in select::all_in(author_box, "a") {
        if let Some(href) = anchor.value().attr("href") {
            author_urls.push(origin.author_profile_url(href)?);
        }
    }

    let tags = match select::first(&doc, TAGS_BOX) {
        Some(block) => select::all_in(block, LABELED_LINK)
            .into_iter()
            .map(|link| Tag::new(capitalize(&select::text_content(link))))
            .collect(),
        None => Vec::new(),
    };

    let genre_label = select::find_label(&doc, "strong", GENRE_LABEL)
        .ok_or(ExtractError::MissingField("genre"))?;
    let genre_box =
        select::parent_element(genre_label).ok_or(ExtractError::MissingField("genre"))?;
    let genres = select::all_in(genre_box, LABELED_LINK)
        .into_iter()
        .map(|link| Genre::new(capitalize(&select::text_content(link))))
        .collect();

    let series = select::first(&doc, SERIES_BOX)
        .and_then(|block| select::first_in(block, SERIES_LINK))
        .map(select::text_content);

    Ok(BookPage {
        name,
        publish_date,
        preamble,
        cover_path,
        author_urls,
        tags,
        genres,
        series,
    })
}

/// Extracts a complete book record from one fetched book document
///
/// Runs [`parse_book_page`], then resolves every referenced author with one
/// fetch batch and parses each profile. Any author fetch or parse failure
/// fails the whole book: the record never carries a partial author list.
///
/// # Arguments
///
/// * `fetcher` - Fetcher used for the nested author batch
/// * `origin` - Site origin for address rewriting
/// * `html` - The fetched book page body
///
/// # Returns
///
/// * `Ok(BookRecord)` - Fully assembled record
/// * `Err(ExtractError)` - A required anchor was missing, the date was
///   malformed, or an author could not be fetched or parsed
pub async fn extract_book(
    fetcher: &Fetcher,
    origin: &SiteOrigin,
    html: &str,
) -> Result<BookRecord, ExtractError> {
    let page = parse_book_page(html, origin)?;
    let authors = resolve_authors(fetcher, origin, &page.author_urls).await?;

    Ok(BookRecord {
        name: page.name,
        publish_date: page.publish_date,
        preamble: page.preamble,
        cover_path: page.cover_path,
        authors,
        tags: page.tags,
        genres: page.genres,
        series: page.series,
        rating_sum: 0,
        rating_num: 0,
    })
}

/// Fetches and parses every author profile of a book
///
/// The batch preserves page order. The first failed slot, fetch or parse,
/// propagates and fails the enclosing book.
async fn resolve_authors(
    fetcher: &Fetcher,
    origin: &SiteOrigin,
    urls: &[Url],
) -> Result<Vec<AuthorRecord>, ExtractError> {
    if urls.is_empty() {
        return Ok(Vec::new());
    }

    tracing::debug!("Resolving {} author profiles", urls.len());
    let fetched = fetcher.fetch_all(urls).await;

    let mut authors = Vec::with_capacity(fetched.len());
    for result in fetched {
        let page = result?;
        authors.push(extract_author(&page.body, origin)?);
    }

    Ok(authors)
}

/// Uppercases the first letter and lowercases the rest, Unicode-aware
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> SiteOrigin {
        SiteOrigin::parse("https://litres.ru").unwrap()
    }

    const FULL_BOOK: &str = r#"
        <html><head>
        <meta property="og:image" content="/img/cover.jpg">
        </head><body>
        <div class="biblio_book_name">
            Мастер и Маргарита
            <span>ещё что-то</span>
        </div>
        <div class="biblio_book_author">
            <a href="/author/mihail-bulgakov/">Михаил Булгаков</a>
        </div>
        <ul>
            <li><strong>Дата выхода на ЛитРес:</strong> 15 марта 2020</li>
            <li class="tags_list"><strong>Теги:</strong>
                <a class="biblio_info__link" href="/tags/1">проза</a>
                <a class="biblio_info__link" href="/tags/2">КЛАССИКА</a>
            </li>
            <li><strong>Жанр:</strong>
                <a class="biblio_info__link" href="/genre/1">роман</a>
            </li>
        </ul>
        <div class="biblio_book_descr_publishers">
            <p>Первый абзац описания.</p>
            <p>Второй абзац.</p>
        </div>
        <div class="biblio_book_sequences">
            <a class="biblio_book_sequences__link" href="/serii/1">Шедевры мировой классики</a>
            <a class="biblio_book_sequences__link" href="/serii/2">Вторая серия</a>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_full_book_page() {
        let page = parse_book_page(FULL_BOOK, &origin()).unwrap();

        assert_eq!(page.name, "Мастер и Маргарита");
        assert_eq!(
            page.publish_date,
            NaiveDate::from_ymd_opt(2020, 3, 15).unwrap()
        );
        assert_eq!(
            page.preamble.as_deref(),
            Some("Первый абзац описания.\nВторой абзац.")
        );
        assert_eq!(page.cover_path, "https://litres.ru/img/cover.jpg");
        assert_eq!(page.author_urls.len(), 1);
        assert_eq!(
            page.author_urls[0].as_str(),
            "https://litres.ru/author/mihail-bulgakov/ob-avtore/"
        );
        assert_eq!(
            page.tags,
            vec![Tag::new("Проза"), Tag::new("Классика")]
        );
        assert_eq!(page.genres, vec![Genre::new("Роман")]);
        assert_eq!(page.series.as_deref(), Some("Шедевры мировой классики"));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let first = parse_book_page(FULL_BOOK, &origin()).unwrap();
        let second = parse_book_page(FULL_BOOK, &origin()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_title_fails() {
        let html = FULL_BOOK.replace("biblio_book_name", "renamed");
        let result = parse_book_page(&html, &origin());
        assert!(matches!(result, Err(ExtractError::MissingField("title"))));
    }

    #[test]
    fn test_missing_date_label_fails() {
        let html = FULL_BOOK.replace("Дата выхода на ЛитРес:", "Дата выхода:");
        let result = parse_book_page(&html, &origin());
        assert!(matches!(
            result,
            Err(ExtractError::MissingField("publish date"))
        ));
    }

    #[test]
    fn test_malformed_date_fails() {
        let html = FULL_BOOK.replace("15 марта 2020", "когда-то давно");
        let result = parse_book_page(&html, &origin());
        assert!(matches!(result, Err(ExtractError::MalformedDate(_))));
    }

    #[test]
    fn test_missing_preamble_is_none() {
        let html = FULL_BOOK.replace("biblio_book_descr_publishers", "renamed");
        let page = parse_book_page(&html, &origin()).unwrap();
        assert_eq!(page.preamble, None);
    }

    #[test]
    fn test_missing_cover_fails() {
        let html = FULL_BOOK.replace("og:image", "og:other");
        let result = parse_book_page(&html, &origin());
        assert!(matches!(result, Err(ExtractError::MissingField("cover"))));
    }

    #[test]
    fn test_missing_author_box_fails() {
        let html = FULL_BOOK.replace("biblio_book_author", "renamed");
        let result = parse_book_page(&html, &origin());
        assert!(matches!(result, Err(ExtractError::MissingField("authors"))));
    }

    #[test]
    fn test_missing_tags_block_is_empty_list() {
        let html = FULL_BOOK.replace("tags_list", "renamed");
        let page = parse_book_page(&html, &origin()).unwrap();
        assert!(page.tags.is_empty());
    }

    #[test]
    fn test_missing_genre_label_fails() {
        let html = FULL_BOOK.replace("Жанр:", "Раздел:");
        let result = parse_book_page(&html, &origin());
        assert!(matches!(result, Err(ExtractError::MissingField("genre"))));
    }

    #[test]
    fn test_genre_label_without_links_is_empty_list() {
        let html = FULL_BOOK.replace(
            r#"<a class="biblio_info__link" href="/genre/1">роман</a>"#,
            "",
        );
        let page = parse_book_page(&html, &origin()).unwrap();
        assert!(page.genres.is_empty());
    }

    #[test]
    fn test_missing_series_is_none() {
        let html = FULL_BOOK.replace("biblio_book_sequences\"", "renamed\"");
        let page = parse_book_page(&html, &origin()).unwrap();
        assert_eq!(page.series, None);
    }

    #[test]
    fn test_only_first_series_kept() {
        let page = parse_book_page(FULL_BOOK, &origin()).unwrap();
        assert_eq!(page.series.as_deref(), Some("Шедевры мировой классики"));
    }

    #[test]
    fn test_author_suffix_not_duplicated() {
        let html = FULL_BOOK.replace(
            "/author/mihail-bulgakov/",
            "/author/mihail-bulgakov/ob-avtore/",
        );
        let page = parse_book_page(&html, &origin()).unwrap();
        assert_eq!(
            page.author_urls[0].as_str(),
            "https://litres.ru/author/mihail-bulgakov/ob-avtore/"
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("проза"), "Проза");
        assert_eq!(capitalize("КЛАССИКА"), "Классика");
        assert_eq!(capitalize("fantasy"), "Fantasy");
        assert_eq!(capitalize(""), "");
    }
}
